//! Terminal rendering of summaries and the failure table

use colored::*;
use unicode_width::UnicodeWidthStr;

use negkw::keywords::{GroupFailure, Normalized, SubmissionReport};

const HEADERS: [&str; 3] = ["Advertiser ID", "Unit ID", "Message"];

/// One-line description of what a file produced
pub fn normalize_summary(normalized: &Normalized) -> String {
    let mut summary = format!(
        "{} groups, {} keywords",
        normalized.groups.len().to_string().bold(),
        normalized.keyword_count().to_string().bold()
    );
    if !normalized.skipped.is_empty() {
        let skipped = format!(
            " ({} incomplete rows skipped)",
            normalized.skipped.len()
        );
        summary.push_str(&skipped.dimmed().to_string());
    }
    summary
}

pub fn print_report(report: &SubmissionReport) {
    if report.is_success() {
        println!(
            "{}",
            format!("All {} groups submitted successfully.", report.total())
                .green()
                .bold()
        );
        return;
    }

    println!(
        "{}",
        format!(
            "{} of {} requests failed:",
            report.failure_count(),
            report.total()
        )
        .red()
        .bold()
    );
    println!();
    print!("{}", render_failure_table(&report.failures()));
}

/// Plain-text table of failures, aligned by display width
pub fn render_failure_table(failures: &[&GroupFailure]) -> String {
    let rows: Vec<[String; 3]> = failures
        .iter()
        .map(|f| {
            [
                f.advertiser_id.to_string(),
                f.unit_id.to_string(),
                f.message.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(UnicodeWidthStr::width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    out.push_str(&render_line(&HEADERS.map(str::to_string), &widths));
    out.push_str(&render_line(
        &widths.map(|w| "-".repeat(w)),
        &widths,
    ));
    for row in &rows {
        out.push_str(&render_line(row, &widths));
    }
    out
}

fn render_line(cells: &[String; 3], widths: &[usize; 3]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{}{}", cell, " ".repeat(fill))
}
