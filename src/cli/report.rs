//! Human-facing output of the extract command.
//!
//! Scan diagnostics and file failures go to stderr; one success line per
//! catalog directory goes to stdout.

use std::io::{self, Write};

use colored::Colorize;

use crate::extract::{CatalogReport, ExtractReport, FileFailure, ScanIssue};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a finished extraction.
pub fn print_extract(report: &ExtractReport) {
    print_diagnostics_to(report, &mut io::stderr().lock());
    print_summary_to(report, &mut io::stdout().lock());
}

/// Print scan issues and file failures.
pub fn print_diagnostics_to<W: Write>(report: &ExtractReport, writer: &mut W) {
    for issue in &report.issues {
        print_issue(issue, writer);
    }
    for failure in &report.failures {
        print_failure(failure, writer);
    }
}

/// Print one line per catalog directory, then the totals.
pub fn print_summary_to<W: Write>(report: &ExtractReport, writer: &mut W) {
    if report.files_scanned == 0 && report.failures.is_empty() {
        let _ = writeln!(writer, "{}", "No source files found".yellow());
        return;
    }

    for catalog in &report.catalogs {
        print_catalog(catalog, writer);
    }

    let files = plural(report.files_scanned, "file", "files");
    let mark = if report.has_failures() {
        FAILURE_MARK.red()
    } else {
        SUCCESS_MARK.green()
    };
    let mut line = format!("Scanned {} source {}", report.files_scanned, files);
    if !report.issues.is_empty() {
        line.push_str(&format!(
            ", {} {} skipped",
            report.issues.len(),
            plural(report.issues.len(), "call", "calls")
        ));
    }
    if report.has_failures() {
        line.push_str(&format!(
            ", {} {} failed",
            report.failures.len(),
            plural(report.failures.len(), "file", "files")
        ));
    }
    let _ = writeln!(writer, "{} {}", mark, line);
}

fn print_catalog<W: Write>(catalog: &CatalogReport, writer: &mut W) {
    let dir = catalog.dir.display().to_string();
    if catalog.written.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}: no messages, nothing written",
            SUCCESS_MARK.green(),
            dir.bold()
        );
        return;
    }
    let _ = writeln!(
        writer,
        "{} {}: {} {} written to {} {} ({})",
        SUCCESS_MARK.green(),
        dir.bold(),
        catalog.entries,
        plural(catalog.entries, "message", "messages"),
        catalog.written.len(),
        plural(catalog.written.len(), "catalog", "catalogs"),
        catalog.written.join(", ")
    );
}

fn print_issue<W: Write>(issue: &ScanIssue, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), issue.message);
    let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), issue.file_path, issue.line);
    if let Some(first_line) = issue.snippet.lines().next() {
        let _ = writeln!(writer, "   {} {}", "|".blue(), first_line);
    }
}

fn print_failure<W: Write>(failure: &FileFailure, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}: {:#}",
        "error:".bold().red(),
        failure.path.display(),
        failure.error
    );
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
