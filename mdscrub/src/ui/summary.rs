// mdscrub/src/ui/summary.rs
//! Console reporting for batch runs: one line per file, optional per-rule
//! counts, and the closing totals.

use std::io::{self, Write};

use mdscrub_core::redaction_match::non_zero;

use crate::batch::{BatchReport, FileReport, FileStatus};
use crate::ui::output_format;
use crate::ui::theme::{paint, ThemeEntry};

/// Prints the outcome for one file.
///
/// Dry runs print `Would process: <path>`; real runs print the source and
/// destination. Failed files always print their error.
pub fn print_file_line<W: Write>(
    writer: &mut W,
    report: &FileReport,
    dry_run: bool,
    supports_color: bool,
) -> io::Result<()> {
    let source = report.source.display();
    match report.status {
        FileStatus::Failed => {
            let reason = report.error.as_deref().unwrap_or("unknown error");
            let line = format!("Failed: {} ({})", source, reason);
            writeln!(writer, "{}", paint(&line, ThemeEntry::Error, supports_color))
        }
        _ if dry_run => {
            let state = if report.status == FileStatus::Changed { "changes" } else { "no changes" };
            writeln!(writer, "Would process: {} ({})", source, state)
        }
        _ => match &report.destination {
            Some(dest) if dest != &report.source => writeln!(writer, "Processed: {} -> {}", source, dest.display()),
            _ => writeln!(writer, "Processed: {}", source),
        },
    }
}

/// Prints the non-zero redaction counts of one file, indented below its line.
pub fn print_rule_counts<W: Write>(writer: &mut W, report: &FileReport, supports_color: bool) -> io::Result<()> {
    for item in non_zero(&report.summary) {
        writeln!(
            writer,
            "    {} {} ({})",
            paint(&item.rule_name, ThemeEntry::SummaryRuleName, supports_color),
            paint(&format!("x{}", item.occurrences), ThemeEntry::SummaryOccurrences, supports_color),
            item.kind.as_str()
        )?;
    }
    Ok(())
}

/// Prints the closing totals.
pub fn print_batch_totals<W: Write>(writer: &mut W, report: &BatchReport, supports_color: bool) -> io::Result<()> {
    if report.is_dry_run() {
        let line = format!(
            "Dry run: {} file(s) would be processed, {} with changes.",
            report.succeeded(),
            report.changed()
        );
        writeln!(writer, "{}", paint(&line, ThemeEntry::Header, supports_color))?;
    } else {
        let line = format!("Successfully processed {} files", report.succeeded());
        output_format::print_success_message(writer, &line, supports_color)?;
    }
    if report.failed() > 0 {
        let line = format!("Failed to process {} file(s)", report.failed());
        output_format::print_error_message(writer, &line, supports_color)?;
    }
    Ok(())
}
