//! Read keyword rows from CSV

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::io::Read;

use crate::keywords::{CellValue, RawRecord};

use super::columns::ColumnMap;

/// Read all data rows; every cell arrives as text and is coerced later
pub fn read_csv_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(str::to_string)
        .collect();
    let columns = ColumnMap::from_headers(&headers[..])?;

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let row = result.with_context(|| format!("Failed to read CSV row {}", idx + 2))?;
        let row_num = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);

        let record = columns.record(row_num, |col| match row.get(col) {
            Some(s) if !s.is_empty() => CellValue::Text(s.to_string()),
            _ => CellValue::Empty,
        });

        if record.is_blank() {
            continue;
        }
        records.push(record);
    }

    log::info!("Read {} rows from CSV", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_csv_rows() {
        let data = "advertiser_id,unit_id,keyword,match_type\n\
                    1,10,free,1\n\
                    1,,tutorial,0\n\
                    ,,,\n\
                    2,20,\"crack, full\",1\n";

        let records = read_csv_records(data.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![
                RawRecord::new("1", "10", "free", "1").at_row(2),
                RawRecord::new("1", CellValue::Empty, "tutorial", "0").at_row(3),
                RawRecord::new("2", "20", "crack, full", "1").at_row(5),
            ]
        );
    }

    #[test]
    fn test_short_rows_leave_fields_empty() {
        let data = "keyword,match_type,advertiser_id,unit_id\nfree,1\n";

        let records = read_csv_records(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].advertiser_id, CellValue::Empty);
        assert_eq!(records[0].unit_id, CellValue::Empty);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(read_csv_records("".as_bytes()).is_err());
    }
}
