//! Markdown report generation
//!
//! This module writes a human-readable markdown version of the run report,
//! including counts, per-state totals and the failure trail.

use crate::model::FetchOutcome;
use crate::output::report::RunReport;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown report to `output_path`
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(std::io::Error)` - Failed to create or write the file
pub fn write_markdown_report(report: &RunReport, output_path: &Path) -> std::io::Result<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a run report as markdown
pub fn format_markdown_report(report: &RunReport) -> String {
    let mut md = String::new();

    md.push_str("# Poster Harvest Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", report.finished_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {} seconds\n",
        report.duration_seconds()
    ));
    if report.interrupted {
        md.push_str("- **Status**: interrupted\n");
    } else {
        md.push_str("- **Status**: completed\n");
    }
    md.push('\n');

    md.push_str("## Totals\n\n");
    md.push_str("| Outcome | Count |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!("| Saved | {} |\n", report.saved()));
    md.push_str(&format!("| Skipped | {} |\n", report.skipped()));
    md.push_str(&format!("| Failed | {} |\n", report.failed()));
    md.push_str(&format!("| **Total** | **{}** |\n\n", report.total()));

    let per_state = files_per_state(report);
    if !per_state.is_empty() {
        md.push_str("## Files by State\n\n");
        md.push_str("| State | Files |\n");
        md.push_str("|-------|-------|\n");
        for (state, count) in &per_state {
            md.push_str(&format!("| {} | {} |\n", state, count));
        }
        md.push('\n');
    }

    if report.failed() > 0 {
        md.push_str("## Failures\n\n");
        for failure in report.failures() {
            md.push_str(&format!("### {}\n\n", failure.page_url));
            for message in failure.attempt_errors {
                md.push_str(&format!("- `{}`\n", message.replace('`', "'")));
            }
            md.push('\n');
        }
    }

    md
}

/// Counts saved and skipped files by their state directory
fn files_per_state(report: &RunReport) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for path in report.outcomes.iter().filter_map(FetchOutcome::path) {
        let state = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        *counts.entry(state).or_insert(0) += 1;
    }
    counts
}
