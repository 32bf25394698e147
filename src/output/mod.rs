//! Output module for run reports
//!
//! This module handles:
//! - Counting saved, skipped and failed posters
//! - Printing the end-of-run report with the per-strategy failure trail
//! - Writing a markdown summary file

mod markdown;
mod report;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use report::{format_report, print_report, FailureLine, RunReport};
