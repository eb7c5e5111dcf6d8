//! Concurrent submission of request groups
//!
//! Every group becomes exactly one request. All requests are started
//! together and bounded only by the [`ConcurrencyLimiter`]; `submit`
//! returns once each of them has settled. A failing group never affects
//! its siblings.

use futures::future::join_all;
use std::time::Instant;

use crate::api::client::{HttpReply, KeywordClient};
use crate::api::models::{ApiResponse, RequestGroup};
use crate::api::resilience::ConcurrencyLimiter;

use super::outcome::{FailureCause, GroupFailure, SubmissionOutcome, SubmissionReport};

/// Message used when the server gave no usable explanation
pub const FALLBACK_FAILURE_MESSAGE: &str =
    "Request failed: could not parse error information from the response";

/// Message used when a transport error has no description
pub const TRANSPORT_FALLBACK_MESSAGE: &str = "Network request failed";

/// A reply that does not count as accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyFailure {
    pub cause: FailureCause,
    pub message: String,
}

/// Decide whether a reply means the group was accepted
///
/// Accepted only when the HTTP status is 2xx and the body decodes with
/// `code == 0`. The server message is preferred for failures.
pub fn interpret_reply(reply: &HttpReply) -> Result<(), ReplyFailure> {
    let decoded = serde_json::from_str::<ApiResponse>(&reply.body).ok();
    let http_ok = reply.is_http_success();

    let cause = match &decoded {
        Some(response) if http_ok && response.is_ok() => return Ok(()),
        _ if !http_ok => FailureCause::HttpStatus(reply.status),
        Some(response) => FailureCause::ApiCode(response.code),
        None => FailureCause::UndecodableBody,
    };

    let message = decoded
        .and_then(|r| r.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string());

    Err(ReplyFailure { cause, message })
}

/// Drives one request per group through a [`KeywordClient`]
pub struct BatchSubmitter<C> {
    client: C,
    limiter: ConcurrencyLimiter,
}

impl<C: KeywordClient> BatchSubmitter<C> {
    pub fn new(client: C, limiter: ConcurrencyLimiter) -> Self {
        Self { client, limiter }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Submit all groups and wait for every outcome
    ///
    /// Yields exactly one outcome per group, in input order.
    pub async fn submit(&self, groups: &[RequestGroup]) -> SubmissionReport {
        let start = Instant::now();
        log::info!(
            "Submitting {} groups (max {} in flight{})",
            groups.len(),
            self.limiter.max_concurrent_requests(),
            if self.limiter.is_enabled() { "" } else { ", unlimited" }
        );

        let outcomes = join_all(groups.iter().map(|group| self.submit_group(group))).await;
        let report = SubmissionReport::new(outcomes);

        let stats = self.limiter.stats();
        log::info!(
            "Submission finished in {:?}: {} succeeded, {} failed",
            start.elapsed(),
            report.success_count(),
            report.failure_count()
        );
        log::debug!(
            "Concurrency: {} permits acquired, {:.0}% waited",
            stats.requests_acquired,
            stats.wait_rate() * 100.0
        );

        report
    }

    async fn submit_group(&self, group: &RequestGroup) -> SubmissionOutcome {
        let key = group.key();
        let _permit = self.limiter.acquire().await;

        let failure = match self.client.add_negative_keywords(group).await {
            Ok(reply) => match interpret_reply(&reply) {
                Ok(()) => {
                    log::debug!("Group {} accepted ({} keywords)", key, group.keywords.len());
                    return SubmissionOutcome::Success(key);
                }
                Err(ReplyFailure { cause, message }) => GroupFailure::new(key, cause, message),
            },
            Err(err) => {
                let description = format!("{:#}", err);
                let message = if description.trim().is_empty() {
                    TRANSPORT_FALLBACK_MESSAGE.to_string()
                } else {
                    description
                };
                GroupFailure::new(key, FailureCause::Transport, message)
            }
        };

        log::warn!(
            "Group {} failed ({}): {}",
            key,
            failure.cause,
            failure.message
        );
        SubmissionOutcome::Failure(failure)
    }
}
