//! Header recognition for the four input columns

use anyhow::{Result, bail};

use crate::keywords::{CellValue, Field, RawRecord};

/// Header text used by the template, per field
pub fn canonical_header(field: Field) -> &'static str {
    match field {
        Field::AdvertiserId => "广告主id（短id）",
        Field::UnitId => "单元id",
        Field::Keyword => "否定词（1个词1行）",
        Field::MatchType => "匹配方式（0-精准匹配，1-短语匹配）",
    }
}

/// Accepted header spellings besides the canonical one, already folded
fn aliases(field: Field) -> &'static [&'static str] {
    match field {
        Field::AdvertiserId => &["广告主id", "advertiser_id", "advertiser id", "advertiser"],
        Field::UnitId => &["unit_id", "unit id", "unit"],
        Field::Keyword => &["否定词", "keyword", "negative_keyword", "negative keyword"],
        Field::MatchType => &["匹配方式", "match_type", "match type", "phrase_match_type"],
    }
}

/// Fold a header for comparison: BOM and surrounding whitespace removed,
/// lowercased, full-width punctuation mapped to ASCII
fn fold_header(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '（' => '(',
            '）' => ')',
            '，' => ',',
            other => other,
        })
        .collect()
}

fn header_matches(field: Field, header: &str) -> bool {
    let folded = fold_header(header);
    folded == fold_header(canonical_header(field)) || aliases(field).contains(&folded.as_str())
}

/// Column position of each required field in a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    positions: [usize; 4],
}

impl ColumnMap {
    /// Locate all four columns; the first matching header wins
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let mut positions = [0usize; 4];
        let mut missing = Vec::new();

        for field in Field::ALL {
            match headers.iter().position(|h| header_matches(field, h.as_ref())) {
                Some(idx) => positions[field as usize] = idx,
                None => missing.push(canonical_header(field)),
            }
        }

        if !missing.is_empty() {
            bail!(
                "Header row is missing required column(s): {}",
                missing.join(", ")
            );
        }

        Ok(Self { positions })
    }

    pub fn index(&self, field: Field) -> usize {
        self.positions[field as usize]
    }

    /// Build a record by looking up each field's cell by column index
    pub fn record<F>(&self, row: usize, cell: F) -> RawRecord
    where
        F: Fn(usize) -> CellValue,
    {
        let mut record = RawRecord::default().at_row(row);
        for field in Field::ALL {
            record.set(field, cell(self.index(field)));
        }
        record
    }
}
