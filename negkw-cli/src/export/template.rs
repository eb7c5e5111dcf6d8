//! Write the keyword upload template

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

use crate::ingest::canonical_header;
use crate::keywords::Field;

/// Sheet name of the template workbook
pub const TEMPLATE_SHEET: &str = "批量加否模板";

/// Default file name for the template
pub const TEMPLATE_FILE_NAME: &str = "批量加否模板.xlsx";

/// Illustrative rows: advertiser id, unit id, keyword, match type
const EXAMPLE_ROWS: [(i64, i64, &str, i64); 3] = [
    (123456789, 987654321, "免费", 1),
    (123456789, 987654321, "教程", 0),
    (111222333, 444555666, "破解", 1),
];

/// Write an xlsx template with the required headers and example rows
pub fn write_template(path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(TEMPLATE_SHEET)?;

    let header_format = Format::new().set_bold();
    for (col, field) in Field::ALL.into_iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, canonical_header(field), &header_format)?;
        worksheet.set_column_width(col, 24)?;
    }

    for (idx, (advertiser_id, unit_id, keyword, match_type)) in EXAMPLE_ROWS.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_number(row, 0, *advertiser_id as f64)?;
        worksheet.write_number(row, 1, *unit_id as f64)?;
        worksheet.write_string(row, 2, *keyword)?;
        worksheet.write_number(row, 3, *match_type as f64)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save template: {}", path.display()))?;

    log::info!("Template written to {}", path.display());
    Ok(())
}
