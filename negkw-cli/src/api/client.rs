//! HTTP client for the negative keyword batch endpoint

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use super::models::RequestGroup;

/// Default endpoint for adding negative keywords in batch
pub const DEFAULT_ENDPOINT: &str =
    "https://adapi.xiaohongshu.com/api/open/jg/negative/keyword/batch/add";

/// Raw reply of a request that reached the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    /// Response body; empty when the body could not be read
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_http_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport for submitting one request group
///
/// An `Err` means the request never produced a reply (DNS, connection,
/// timeout). Any reply, whatever its status, is returned as `Ok`.
#[async_trait]
pub trait KeywordClient: Send + Sync {
    async fn add_negative_keywords(&self, group: &RequestGroup) -> Result<HttpReply>;
}

/// reqwest based [`KeywordClient`]
#[derive(Debug, Clone)]
pub struct HttpKeywordClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpKeywordClient {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
        user_agent: &str,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl KeywordClient for HttpKeywordClient {
    async fn add_negative_keywords(&self, group: &RequestGroup) -> Result<HttpReply> {
        log::debug!(
            "POST {} for {} ({} keywords)",
            self.endpoint,
            group.key(),
            group.keywords.len()
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(group)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                log::debug!("Failed to read response body for {}: {}", group.key(), e);
                String::new()
            }
        };

        Ok(HttpReply { status, body })
    }
}
