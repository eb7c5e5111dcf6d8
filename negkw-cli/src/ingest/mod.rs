//! Input loading
//!
//! Spreadsheets (xlsx/xlsm/xlsb/xls/ods) and CSV files yield raw rows for
//! the normalizer. A `.json` file is taken as an already normalized list of
//! request groups, as written by `negkw preview --output`.

pub mod columns;
pub mod csv;
pub mod excel;

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::api::models::RequestGroup;
use crate::keywords::{Normalized, RawRecord, normalize_with_diagnostics};

pub use self::columns::{ColumnMap, canonical_header};
pub use self::csv::read_csv_records;
pub use self::excel::read_workbook_records;

/// Kind of input file, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Workbook,
    Csv,
    Groups,
}

impl InputFormat {
    pub fn detect(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(InputFormat::Workbook),
            "csv" => Ok(InputFormat::Csv),
            "json" => Ok(InputFormat::Groups),
            "" => bail!("Cannot determine file type of {}", path.display()),
            other => bail!("Unsupported file type '.{}': {}", other, path.display()),
        }
    }
}

/// Read raw rows from a spreadsheet or CSV file
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    match InputFormat::detect(path)? {
        InputFormat::Workbook => read_workbook_records(path),
        InputFormat::Csv => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
            read_csv_records(BufReader::new(file))
                .with_context(|| format!("Failed to parse CSV file: {}", path.display()))
        }
        InputFormat::Groups => bail!(
            "{} contains request groups, not spreadsheet rows",
            path.display()
        ),
    }
}

/// Read previously exported request groups
pub fn read_groups_json(path: &Path) -> Result<Vec<RequestGroup>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open groups file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse request groups from {}", path.display()))
}

/// Load any supported input into request groups
///
/// Rows are normalized; a groups file is used as-is.
pub fn load_groups(path: &Path) -> Result<Normalized> {
    match InputFormat::detect(path)? {
        InputFormat::Groups => Ok(Normalized {
            groups: read_groups_json(path)?,
            skipped: Vec::new(),
        }),
        _ => Ok(normalize_with_diagnostics(&read_records(path)?)),
    }
}
