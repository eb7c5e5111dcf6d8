//! CSV export of failed groups

use anyhow::{Context, Result};
use csv::Writer;
use std::io::Write;
use std::path::Path;

use crate::keywords::SubmissionReport;

/// Write failed groups as CSV: advertiser id, unit id, cause, message
pub fn write_failures_csv<W: Write>(report: &SubmissionReport, writer: W) -> Result<usize> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record(["advertiser_id", "unit_id", "cause", "message"])
        .context("Failed to write CSV header")?;

    let failures = report.failures();
    for failure in &failures {
        wtr.write_record([
            failure.advertiser_id.to_string(),
            failure.unit_id.to_string(),
            failure.cause.to_string(),
            failure.message.clone(),
        ])
        .with_context(|| format!("Failed to write failure for {}", failure.key()))?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(failures.len())
}

/// Export failed groups to a CSV file
pub fn export_failures_csv(report: &SubmissionReport, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    let count = write_failures_csv(report, file)?;

    log::info!("Exported {} failures to {}", count, path.display());
    Ok(count)
}
