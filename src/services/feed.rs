// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run-list feed client.
//!
//! The feed is a public, unauthenticated endpoint returning an XML
//! document. We only need the raw bytes; parsing happens elsewhere.

/// Anything that can produce the raw feed document for an account.
#[allow(async_fn_in_trait)]
pub trait FeedSource {
    async fn fetch(&self, account_id: &str) -> Result<Vec<u8>, FetchError>;
}

/// HTTP feed client.
#[derive(Clone)]
pub struct HttpFeedClient {
    http: reqwest::Client,
    feed_url: String,
}

impl HttpFeedClient {
    /// Create a client for the given feed endpoint.
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            feed_url: feed_url.into(),
        }
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }
}

impl FeedSource for HttpFeedClient {
    async fn fetch(&self, account_id: &str) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(url = %self.feed_url, account_id, "Requesting run-list feed");

        let response = self
            .http
            .get(&self.feed_url)
            .query(&[("userID", account_id)])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status(status.as_u16(), body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        tracing::debug!(bytes = bytes.len(), "Run-list feed received");
        Ok(bytes.to_vec())
    }
}

/// Errors from fetching the feed. All of them are recoverable by falling
/// back to an earlier cached document.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("HTTP {0}: {1}")]
    Status(u16, String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}
