//! End-of-run report
//!
//! Collects every poster outcome of a run and renders the saved/skipped/failed
//! summary printed when the run ends.

use crate::model::FetchOutcome;
use chrono::{DateTime, Utc};

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Number of states crawled (directory entries with a usable name)
    pub states: usize,

    /// One outcome per poster, grouped by state in discovery order
    pub outcomes: Vec<FetchOutcome>,

    /// True if the run was stopped before all work was scheduled
    pub interrupted: bool,
}

/// A failed poster as shown in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureLine<'a> {
    pub page_url: &'a str,
    pub attempt_errors: &'a [String],
}

impl RunReport {
    pub fn saved(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_saved()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = FailureLine<'_>> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FetchOutcome::Failed {
                page_url,
                attempt_errors,
            } => Some(FailureLine {
                page_url,
                attempt_errors,
            }),
            _ => None,
        })
    }

    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }

    /// One-line counts, e.g. `Saved: 1, Skipped: 0, Failed: 0`
    pub fn counts_line(&self) -> String {
        format!(
            "Saved: {}, Skipped: {}, Failed: {}",
            self.saved(),
            self.skipped(),
            self.failed()
        )
    }
}

/// Formats the report as plain text
pub fn format_report(report: &RunReport) -> String {
    let mut out = String::new();

    out.push_str("=== Poster Harvest Report ===\n\n");
    out.push_str(&format!("Started:  {}\n", report.started_at.to_rfc3339()));
    out.push_str(&format!("Finished: {}\n", report.finished_at.to_rfc3339()));
    out.push_str(&format!("States:   {}\n", report.states));
    out.push_str(&format!("Posters:  {}\n", report.total()));
    if report.interrupted {
        out.push_str("Run was interrupted; some posters were not attempted.\n");
    }
    out.push('\n');
    out.push_str(&report.counts_line());
    out.push('\n');

    if report.failed() > 0 {
        out.push_str("\nFailures:\n");
        for failure in report.failures() {
            out.push_str(&format!("  {}\n", failure.page_url));
            for message in failure.attempt_errors {
                for line in message.lines() {
                    out.push_str(&format!("    {}\n", line));
                }
            }
        }
    }

    out
}

/// Prints the report to stdout
pub fn print_report(report: &RunReport) {
    print!("{}", format_report(report));
}
