//! Wire models for the negative keyword batch endpoint

use serde::{Deserialize, Serialize};
use std::fmt;

/// Application status code the endpoint returns for an accepted request
pub const API_OK_CODE: i64 = 0;

/// Known values for [`Keyword::phrase_match_type`]
pub mod match_type {
    pub const EXACT: i64 = 0;
    pub const PHRASE: i64 = 1;
}

/// A single negative keyword inside a request group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub keyword: String,
    /// 0 = exact match, 1 = phrase match. Not validated.
    pub phrase_match_type: i64,
}

impl Keyword {
    pub fn new(keyword: impl Into<String>, phrase_match_type: i64) -> Self {
        Self {
            keyword: keyword.into(),
            phrase_match_type,
        }
    }
}

/// Request body for one (advertiser, unit) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestGroup {
    pub advertiser_id: i64,
    pub unit_id: i64,
    pub keywords: Vec<Keyword>,
}

impl RequestGroup {
    pub fn new(advertiser_id: i64, unit_id: i64) -> Self {
        Self {
            advertiser_id,
            unit_id,
            keywords: Vec::new(),
        }
    }

    pub fn key(&self) -> GroupKey {
        GroupKey::new(self.advertiser_id, self.unit_id)
    }
}

/// Grouping key of a [`RequestGroup`]
///
/// Rendered as `"{advertiser_id}-{unit_id}"`. Lookups always go through the
/// numeric pair, so `(1, 23)` and `(12, 3)` stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey {
    pub advertiser_id: i64,
    pub unit_id: i64,
}

impl GroupKey {
    pub fn new(advertiser_id: i64, unit_id: i64) -> Self {
        Self {
            advertiser_id,
            unit_id,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.advertiser_id, self.unit_id)
    }
}

/// Decoded response body
///
/// `code` is required; a body without it counts as undecodable.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub code: i64,
    #[serde(default, alias = "msg")]
    pub message: Option<String>,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.code == API_OK_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_group_wire_shape() {
        let mut group = RequestGroup::new(123456789, 987654321);
        group.keywords.push(Keyword::new("免费", match_type::PHRASE));

        let value = serde_json::to_value(&group).unwrap();
        assert_eq!(
            value,
            json!({
                "advertiser_id": 123456789,
                "unit_id": 987654321,
                "keywords": [{"keyword": "免费", "phrase_match_type": 1}]
            })
        );
    }

    #[test]
    fn test_group_key_display_is_unambiguous() {
        assert_eq!(GroupKey::new(1, 23).to_string(), "1-23");
        assert_eq!(GroupKey::new(12, 3).to_string(), "12-3");
        assert_ne!(GroupKey::new(1, 23), GroupKey::new(12, 3));
    }

    #[test]
    fn test_api_response_accepts_msg_alias() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"code": 40001, "msg": "invalid unit"}"#).unwrap();
        assert!(!response.is_ok());
        assert_eq!(response.message.as_deref(), Some("invalid unit"));
    }

    #[test]
    fn test_api_response_requires_code() {
        assert!(serde_json::from_str::<ApiResponse>(r#"{"message": "hi"}"#).is_err());
    }
}
