//! Lookup traits and request/response types

use crate::results::{ArticleSummary, SearchHit};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Failure of a single lookup call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl LookupError {
    /// Short label used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::Timeout => "timeout",
            Self::Parse(_) => "parse",
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Timeout
        } else if let Some(status) = err.status() {
            LookupError::Status(status.as_u16())
        } else {
            LookupError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Parse(err.to_string())
    }
}

/// Finds hits for a free-text query
#[async_trait]
pub trait SearchLookup: Send + Sync {
    /// Return at most `limit` hits, in relevance order
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchHit>, LookupError>;
}

/// Fetches the summary of a single article
#[async_trait]
pub trait DetailLookup: Send + Sync {
    async fn summary(&self, title: &str) -> Result<ArticleSummary, LookupError>;
}

/// HTTP GET request to be made by a lookup
#[derive(Debug, Clone)]
pub struct LookupRequest {
    /// URL to request
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: Vec<(String, String)>,
}

impl LookupRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            params: Vec::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Value of a query parameter
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP response from a lookup request
#[derive(Debug)]
pub struct LookupResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl LookupResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, LookupError> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `Err(Status)` for non-2xx responses
    pub fn error_for_status(self) -> Result<Self, LookupError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(LookupError::Status(self.status))
        }
    }
}
