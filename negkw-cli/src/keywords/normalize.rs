//! Rows → deduplicated request groups
//!
//! Records are consumed in order. A group is created the first time its
//! (advertiser, unit) pair is seen, and a keyword is kept only the first time
//! its text is seen within that group, so the first match type wins.
//! Incomplete rows are skipped and reported as diagnostics, never as errors.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::api::models::{GroupKey, Keyword, RequestGroup};

use super::record::{Field, RawRecord};

/// Why a row contributed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Missing(Field),
    /// Present, but not a number (text, NaN, infinity, out of range)
    InvalidNumber(Field),
    /// A number with a fractional part
    Fractional(Field),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Missing(field) => write!(f, "missing {}", field),
            SkipReason::InvalidNumber(field) => write!(f, "{} is not a valid number", field),
            SkipReason::Fractional(field) => write!(f, "{} has a fractional part", field),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: SkipReason,
}

/// Normalization result with diagnostics for skipped rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub groups: Vec<RequestGroup>,
    pub skipped: Vec<SkippedRow>,
}

impl Normalized {
    pub fn keyword_count(&self) -> usize {
        self.groups.iter().map(|g| g.keywords.len()).sum()
    }
}

/// Group and deduplicate records, discarding skip diagnostics
pub fn normalize(records: &[RawRecord]) -> Vec<RequestGroup> {
    normalize_with_diagnostics(records).groups
}

/// Group and deduplicate records
pub fn normalize_with_diagnostics(records: &[RawRecord]) -> Normalized {
    let mut groups: Vec<RequestGroup> = Vec::new();
    let mut seen_keywords: Vec<HashSet<String>> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut skipped = Vec::new();

    for record in records {
        let row = match coerce(record) {
            Ok(row) => row,
            Err(reason) => {
                log::warn!("Skipping row {}: {}", record.row, reason);
                skipped.push(SkippedRow {
                    row: record.row,
                    reason,
                });
                continue;
            }
        };

        let key = GroupKey::new(row.advertiser_id, row.unit_id);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(RequestGroup::new(row.advertiser_id, row.unit_id));
            seen_keywords.push(HashSet::new());
            groups.len() - 1
        });

        if seen_keywords[slot].insert(row.keyword.clone()) {
            groups[slot]
                .keywords
                .push(Keyword::new(row.keyword, row.match_type));
        } else {
            log::debug!(
                "Row {}: duplicate keyword {:?} in group {}",
                record.row,
                row.keyword,
                key
            );
        }
    }

    log::info!(
        "Normalized {} rows into {} groups ({} skipped)",
        records.len(),
        groups.len(),
        skipped.len()
    );

    Normalized { groups, skipped }
}

struct CoercedRow {
    advertiser_id: i64,
    unit_id: i64,
    keyword: String,
    match_type: i64,
}

fn coerce(record: &RawRecord) -> Result<CoercedRow, SkipReason> {
    // Presence first, so a row missing a field reports that before any
    // coercion problem in an earlier column. Whitespace-only text is missing
    // (see CellValue::is_present), so a keyword of only spaces drops the row.
    if let Some(field) = Field::ALL
        .into_iter()
        .find(|f| !record.get(*f).is_present())
    {
        return Err(SkipReason::Missing(field));
    }

    let integer = |field: Field| {
        let cell = record.get(field);
        cell.to_integer().ok_or(if cell.is_fractional() {
            SkipReason::Fractional(field)
        } else {
            SkipReason::InvalidNumber(field)
        })
    };

    Ok(CoercedRow {
        advertiser_id: integer(Field::AdvertiserId)?,
        unit_id: integer(Field::UnitId)?,
        keyword: record
            .keyword
            .to_text()
            .ok_or(SkipReason::Missing(Field::Keyword))?,
        match_type: integer(Field::MatchType)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::record::CellValue;

    fn kw(text: &str, match_type: i64) -> Keyword {
        Keyword::new(text, match_type)
    }

    fn scenario_rows() -> Vec<RawRecord> {
        vec![
            RawRecord::new(1, 10, "free", 1).at_row(2),
            RawRecord::new(1, 10, "tutorial", 0).at_row(3),
            RawRecord::new(1, 10, "free", 0).at_row(4),
            RawRecord::new(2, 20, "crack", 1).at_row(5),
        ]
    }

    #[test]
    fn test_groups_and_dedups_first_occurrence_wins() {
        let groups = normalize(&scenario_rows());

        assert_eq!(
            groups,
            vec![
                RequestGroup {
                    advertiser_id: 1,
                    unit_id: 10,
                    keywords: vec![kw("free", 1), kw("tutorial", 0)],
                },
                RequestGroup {
                    advertiser_id: 2,
                    unit_id: 20,
                    keywords: vec![kw("crack", 1)],
                },
            ]
        );
    }

    #[test]
    fn test_is_deterministic() {
        let rows = scenario_rows();
        assert_eq!(normalize(&rows), normalize(&rows));
    }

    #[test]
    fn test_row_missing_unit_id_is_dropped() {
        let mut rows = scenario_rows();
        rows[1].unit_id = CellValue::Empty;

        let normalized = normalize_with_diagnostics(&rows);

        assert_eq!(normalized.groups.len(), 2);
        assert_eq!(normalized.groups[0].keywords, vec![kw("free", 1)]);
        assert_eq!(normalized.groups[1].keywords, vec![kw("crack", 1)]);
        assert_eq!(
            normalized.skipped,
            vec![SkippedRow {
                row: 3,
                reason: SkipReason::Missing(Field::UnitId)
            }]
        );
    }

    #[test]
    fn test_group_order_follows_first_appearance() {
        let rows = vec![
            RawRecord::new(3, 30, "a", 0),
            RawRecord::new(1, 10, "b", 0),
            RawRecord::new(3, 30, "c", 0),
            RawRecord::new(2, 20, "d", 0),
            RawRecord::new(1, 10, "e", 0),
        ];

        let groups = normalize(&rows);
        let keys: Vec<_> = groups.iter().map(|g| g.key().to_string()).collect();
        assert_eq!(keys, vec!["3-30", "1-10", "2-20"]);
        assert_eq!(groups[0].keywords, vec![kw("a", 0), kw("c", 0)]);
        assert_eq!(groups[1].keywords, vec![kw("b", 0), kw("e", 0)]);
    }

    #[test]
    fn test_key_does_not_confuse_concatenated_ids() {
        let rows = vec![
            RawRecord::new(1, 23, "x", 0),
            RawRecord::new(12, 3, "x", 0),
        ];

        let groups = normalize(&rows);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_same_unit_under_different_advertisers_is_separate() {
        let rows = vec![
            RawRecord::new(1, 10, "x", 0),
            RawRecord::new(2, 10, "x", 1),
        ];

        let groups = normalize(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].keywords, vec![kw("x", 1)]);
    }

    #[test]
    fn test_numeric_text_is_coerced() {
        let rows = vec![
            RawRecord::new("123456789", " 987654321 ", "免费", "1"),
            RawRecord::new(123456789.0, 987654321, "教程", 0.0),
        ];

        let groups = normalize(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].advertiser_id, 123456789);
        assert_eq!(groups[0].unit_id, 987654321);
        assert_eq!(groups[0].keywords, vec![kw("免费", 1), kw("教程", 0)]);
    }

    #[test]
    fn test_numeric_keyword_is_rendered_as_text() {
        let groups = normalize(&[RawRecord::new(1, 1, 2024.0, 0)]);
        assert_eq!(groups[0].keywords, vec![kw("2024", 0)]);
    }

    #[test]
    fn test_non_numeric_id_is_treated_as_missing() {
        let rows = vec![
            RawRecord::new("abc", 10, "free", 0).at_row(2),
            RawRecord::new(1, 10, "free", "exact").at_row(3),
            RawRecord::new(1, 10, "tutorial", 0).at_row(4),
        ];

        let normalized = normalize_with_diagnostics(&rows);
        assert_eq!(normalized.groups.len(), 1);
        assert_eq!(normalized.groups[0].keywords, vec![kw("tutorial", 0)]);
        assert_eq!(
            normalized.skipped,
            vec![
                SkippedRow {
                    row: 2,
                    reason: SkipReason::InvalidNumber(Field::AdvertiserId)
                },
                SkippedRow {
                    row: 3,
                    reason: SkipReason::InvalidNumber(Field::MatchType)
                },
            ]
        );
    }

    #[test]
    fn test_fractional_number_has_its_own_reason() {
        let rows = vec![
            RawRecord::new(1, 10, "free", 1.5).at_row(2),
            RawRecord::new(1, "10.5", "free", 0).at_row(3),
            RawRecord::new(1, 10, "free", f64::NAN).at_row(4),
        ];

        let normalized = normalize_with_diagnostics(&rows);
        assert!(normalized.groups.is_empty());
        assert_eq!(
            normalized.skipped,
            vec![
                SkippedRow {
                    row: 2,
                    reason: SkipReason::Fractional(Field::MatchType)
                },
                SkippedRow {
                    row: 3,
                    reason: SkipReason::Fractional(Field::UnitId)
                },
                SkippedRow {
                    row: 4,
                    reason: SkipReason::InvalidNumber(Field::MatchType)
                },
            ]
        );
        assert_eq!(
            normalized.skipped[0].reason.to_string(),
            "match type has a fractional part"
        );
    }

    #[test]
    fn test_whitespace_only_keyword_is_missing() {
        let rows = vec![
            RawRecord::new(1, 10, "   ", 0).at_row(2),
            RawRecord::new(1, 10, " free ", 0).at_row(3),
        ];

        let normalized = normalize_with_diagnostics(&rows);
        assert_eq!(normalized.groups[0].keywords, vec![kw(" free ", 0)]);
        assert_eq!(
            normalized.skipped,
            vec![SkippedRow {
                row: 2,
                reason: SkipReason::Missing(Field::Keyword)
            }]
        );
    }

    #[test]
    fn test_out_of_range_match_type_passes_through() {
        let groups = normalize(&[RawRecord::new(-1, 0, "x", 7)]);
        assert_eq!(groups[0].advertiser_id, -1);
        assert_eq!(groups[0].keywords, vec![kw("x", 7)]);
    }

    #[test]
    fn test_keyword_text_is_case_and_space_sensitive() {
        let rows = vec![
            RawRecord::new(1, 1, "Free", 0),
            RawRecord::new(1, 1, "free", 1),
            RawRecord::new(1, 1, "free ", 1),
        ];

        let groups = normalize(&rows);
        assert_eq!(groups[0].keywords.len(), 3);
    }

    #[test]
    fn test_no_group_holds_duplicate_keywords() {
        let mut rows = Vec::new();
        for i in 0..200i64 {
            rows.push(RawRecord::new(i % 3, i % 2, format!("kw{}", i % 7), i % 2));
        }

        let normalized = normalize_with_diagnostics(&rows);
        for group in &normalized.groups {
            let unique: HashSet<_> = group.keywords.iter().map(|k| &k.keyword).collect();
            assert_eq!(unique.len(), group.keywords.len());
        }
        // 6 distinct (advertiser, unit) pairs, each sees every keyword text
        assert_eq!(normalized.groups.len(), 6);
        assert_eq!(normalized.keyword_count(), 6 * 7);
    }

    #[test]
    fn test_empty_input() {
        let normalized = normalize_with_diagnostics(&[]);
        assert!(normalized.groups.is_empty());
        assert!(normalized.skipped.is_empty());
    }
}
