//! Orchestrator options and errors

use crate::config::{Placeholders, Settings};
use crate::lookup::LookupError;
use std::time::Duration;
use thiserror::Error;

/// The search lookup could not be performed; no results are available
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("search unavailable: {source}")]
pub struct SearchUnavailable {
    #[source]
    pub source: LookupError,
}

impl From<LookupError> for SearchUnavailable {
    fn from(source: LookupError) -> Self {
        Self { source }
    }
}

/// Tuning and presentation options for [`SearchOrchestrator`](super::SearchOrchestrator)
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Limit used by `search_default`
    pub default_limit: u32,
    /// Detail lookups in flight at once
    pub detail_concurrency: usize,
    pub search_timeout: Duration,
    pub detail_timeout: Duration,
    pub placeholders: Placeholders,
    /// Locale for display dates
    pub locale: String,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl OrchestratorOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            default_limit: settings.search.default_limit,
            detail_concurrency: settings.search.detail_concurrency,
            search_timeout: settings.search.search_timeout(),
            detail_timeout: settings.search.detail_timeout(),
            placeholders: settings.placeholders.clone(),
            locale: settings.general.locale.clone(),
        }
    }

    /// Set detail concurrency (at least 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.detail_concurrency = concurrency.max(1);
        self
    }

    /// Set both lookup timeouts
    pub fn with_timeouts(mut self, search: Duration, detail: Duration) -> Self {
        self.search_timeout = search;
        self.detail_timeout = detail;
        self
    }
}
