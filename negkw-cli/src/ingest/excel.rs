//! Read keyword rows from the first sheet of a workbook

use anyhow::{Context, Result};
use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

use crate::keywords::{CellValue, RawRecord};

use super::columns::ColumnMap;

/// Convert a calamine cell to a loosely-typed value
fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        // Date cells keep their serial number, like any other numeric cell
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Read all data rows of the first sheet
///
/// The first row of the used range is the header. Fully blank rows are
/// ignored; incomplete rows are returned as-is for the normalizer to skip.
pub fn read_workbook_records(path: &Path) -> Result<Vec<RawRecord>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("Spreadsheet has no sheets")?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    // 0-based sheet row of the header
    let header_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .with_context(|| format!("Sheet '{}' is empty", sheet_name))?
        .iter()
        .map(|c| c.to_string())
        .collect();

    let columns = ColumnMap::from_headers(&header[..])
        .with_context(|| format!("Sheet '{}' is not a keyword sheet", sheet_name))?;

    let mut records = Vec::new();
    for (offset, row) in rows.enumerate() {
        // 1-based, counting the header
        let row_num = header_row + offset + 2;
        let record = columns.record(row_num, |idx| {
            row.get(idx).map(cell_to_value).unwrap_or_default()
        });

        if record.is_blank() {
            continue;
        }
        records.push(record);
    }

    log::info!(
        "Read {} rows from sheet '{}' of {}",
        records.len(),
        sheet_name,
        path.display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::columns::canonical_header;
    use crate::keywords::Field;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_cell_conversion() {
        assert_eq!(cell_to_value(&Data::Empty), CellValue::Empty);
        assert_eq!(cell_to_value(&Data::String(String::new())), CellValue::Empty);
        assert_eq!(cell_to_value(&Data::Float(1.0)), CellValue::Number(1.0));
        assert_eq!(cell_to_value(&Data::Int(7)), CellValue::Integer(7));
        assert_eq!(
            cell_to_value(&Data::String("免费".to_string())),
            CellValue::Text("免费".to_string())
        );
    }

    #[test]
    fn test_reads_rows_and_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, field) in Field::ALL.into_iter().enumerate() {
            sheet.write_string(0, col as u16, canonical_header(field)).unwrap();
        }
        sheet.write_number(1, 0, 1).unwrap();
        sheet.write_number(1, 1, 10).unwrap();
        sheet.write_string(1, 2, "free").unwrap();
        sheet.write_number(1, 3, 1).unwrap();
        // Row 3 left blank
        sheet.write_string(3, 0, "2").unwrap();
        sheet.write_string(3, 2, "crack").unwrap();
        sheet.write_number(3, 3, 0).unwrap();
        workbook.save(&path).unwrap();

        let records = read_workbook_records(&path).unwrap();

        assert_eq!(
            records,
            vec![
                RawRecord::new(1.0, 10.0, "free", 1.0).at_row(2),
                RawRecord::new("2", CellValue::Empty, "crack", 0.0).at_row(4),
            ]
        );
    }

    #[test]
    fn test_sheet_without_keyword_headers_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "name").unwrap();
        sheet.write_string(1, 0, "Contoso").unwrap();
        workbook.save(&path).unwrap();

        let err = read_workbook_records(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("missing required column"));
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"definitely not a zip archive").unwrap();

        assert!(read_workbook_records(&path).is_err());
    }
}
