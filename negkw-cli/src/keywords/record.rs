//! Loosely-typed input rows as they come out of a spreadsheet

use std::fmt;

/// One spreadsheet cell before coercion
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Absent, blank or error cell
    #[default]
    Empty,
    Integer(i64),
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// Whether the cell counts as present
    ///
    /// Whitespace-only text does not: a keyword cell of spaces drops its row
    /// like an empty cell, and an id cell of spaces is missing, not invalid.
    pub fn is_present(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Text(s) => !s.trim().is_empty(),
            _ => true,
        }
    }

    /// Coerce to an integer id or match type
    ///
    /// Numeric-looking text is parsed after trimming. Anything that does not
    /// land on a finite whole number in `i64` range yields `None`.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            CellValue::Empty => None,
            CellValue::Integer(i) => Some(*i),
            CellValue::Bool(b) => Some(i64::from(*b)),
            CellValue::Number(n) => float_to_integer(*n),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(float_to_integer))
            }
        }
    }

    /// A finite number with a fractional part, such as `1.5` or `"2.25"`
    ///
    /// Such values never become ids or match types; truncating would submit
    /// a different value than the sheet holds.
    pub fn is_fractional(&self) -> bool {
        let n = match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) => n,
                Err(_) => return false,
            },
            _ => return false,
        };
        n.is_finite() && n.fract() != 0.0
    }

    /// Coerce to keyword text. Text is kept as written.
    pub fn to_text(&self) -> Option<String> {
        if !self.is_present() {
            return None;
        }
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Integer(i) => Some(i.to_string()),
            CellValue::Number(n) => Some(match float_to_integer(*n) {
                Some(i) => i.to_string(),
                None => n.to_string(),
            }),
            CellValue::Bool(b) => Some(b.to_string()),
        }
    }
}

fn float_to_integer(n: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if !n.is_finite() || n.fract() != 0.0 || n < i64::MIN as f64 || n >= i64::MAX as f64 {
        return None;
    }
    Some(n as i64)
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Integer(i64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// The four required input fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    AdvertiserId,
    UnitId,
    Keyword,
    MatchType,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::AdvertiserId,
        Field::UnitId,
        Field::Keyword,
        Field::MatchType,
    ];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::AdvertiserId => write!(f, "advertiser id"),
            Field::UnitId => write!(f, "unit id"),
            Field::Keyword => write!(f, "keyword"),
            Field::MatchType => write!(f, "match type"),
        }
    }
}

/// One input row
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    /// 1-based row number in the source sheet, 0 when unknown
    pub row: usize,
    pub advertiser_id: CellValue,
    pub unit_id: CellValue,
    pub keyword: CellValue,
    pub match_type: CellValue,
}

impl RawRecord {
    pub fn new(
        advertiser_id: impl Into<CellValue>,
        unit_id: impl Into<CellValue>,
        keyword: impl Into<CellValue>,
        match_type: impl Into<CellValue>,
    ) -> Self {
        Self {
            row: 0,
            advertiser_id: advertiser_id.into(),
            unit_id: unit_id.into(),
            keyword: keyword.into(),
            match_type: match_type.into(),
        }
    }

    pub fn at_row(mut self, row: usize) -> Self {
        self.row = row;
        self
    }

    pub fn get(&self, field: Field) -> &CellValue {
        match field {
            Field::AdvertiserId => &self.advertiser_id,
            Field::UnitId => &self.unit_id,
            Field::Keyword => &self.keyword,
            Field::MatchType => &self.match_type,
        }
    }

    pub fn set(&mut self, field: Field, value: CellValue) {
        match field {
            Field::AdvertiserId => self.advertiser_id = value,
            Field::UnitId => self.unit_id = value,
            Field::Keyword => self.keyword = value,
            Field::MatchType => self.match_type = value,
        }
    }

    /// True when no field holds anything; such rows are not data rows
    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|f| !self.get(*f).is_present())
    }
}
