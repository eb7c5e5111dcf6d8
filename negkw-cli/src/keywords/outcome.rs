//! Per-group submission outcomes and the aggregated report

use serde::Serialize;
use std::fmt;

use crate::api::models::GroupKey;

/// Why a group was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FailureCause {
    /// Non-2xx HTTP status
    HttpStatus(u16),
    /// 2xx status, but the body carried a non-zero application code
    ApiCode(i64),
    /// 2xx status, but the body was not a recognizable response
    UndecodableBody,
    /// The request never got a reply
    Transport,
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::HttpStatus(status) => write!(f, "HTTP {}", status),
            FailureCause::ApiCode(code) => write!(f, "code {}", code),
            FailureCause::UndecodableBody => write!(f, "undecodable body"),
            FailureCause::Transport => write!(f, "transport"),
        }
    }
}

/// A group the endpoint did not accept
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupFailure {
    pub advertiser_id: i64,
    pub unit_id: i64,
    /// User-facing explanation
    pub message: String,
    pub cause: FailureCause,
}

impl GroupFailure {
    pub fn new(key: GroupKey, cause: FailureCause, message: impl Into<String>) -> Self {
        Self {
            advertiser_id: key.advertiser_id,
            unit_id: key.unit_id,
            message: message.into(),
            cause,
        }
    }

    pub fn key(&self) -> GroupKey {
        GroupKey::new(self.advertiser_id, self.unit_id)
    }
}

/// Result of submitting one request group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success(GroupKey),
    Failure(GroupFailure),
}

impl SubmissionOutcome {
    pub fn key(&self) -> GroupKey {
        match self {
            SubmissionOutcome::Success(key) => *key,
            SubmissionOutcome::Failure(failure) => failure.key(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }

    pub fn failure(&self) -> Option<&GroupFailure> {
        match self {
            SubmissionOutcome::Success(_) => None,
            SubmissionOutcome::Failure(failure) => Some(failure),
        }
    }
}

/// Outcomes of a single submit call, one per group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionReport {
    pub outcomes: Vec<SubmissionOutcome>,
}

impl SubmissionReport {
    pub fn new(outcomes: Vec<SubmissionOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.total() - self.success_count()
    }

    pub fn failures(&self) -> Vec<&GroupFailure> {
        self.outcomes
            .iter()
            .filter_map(SubmissionOutcome::failure)
            .collect()
    }

    /// True when every group was accepted
    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let report = SubmissionReport::new(vec![
            SubmissionOutcome::Success(GroupKey::new(1, 10)),
            SubmissionOutcome::Failure(GroupFailure::new(
                GroupKey::new(2, 20),
                FailureCause::ApiCode(1),
                "quota exceeded",
            )),
            SubmissionOutcome::Success(GroupKey::new(3, 30)),
        ]);

        assert_eq!(report.total(), 3);
        assert_eq!(report.success_count(), 2);
        assert_eq!(report.failure_count(), 1);
        assert!(!report.is_success());

        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].key(), GroupKey::new(2, 20));
        assert_eq!(failures[0].message, "quota exceeded");
    }

    #[test]
    fn test_empty_report_is_success() {
        assert!(SubmissionReport::default().is_success());
    }

    #[test]
    fn test_failure_serializes_with_ids() {
        let failure = GroupFailure::new(GroupKey::new(2, 20), FailureCause::HttpStatus(500), "boom");
        let value = serde_json::to_value(&failure).unwrap();

        assert_eq!(value["advertiser_id"], 2);
        assert_eq!(value["unit_id"], 20);
        assert_eq!(value["message"], "boom");
        assert_eq!(value["cause"]["kind"], "http_status");
        assert_eq!(value["cause"]["value"], 500);
    }
}
