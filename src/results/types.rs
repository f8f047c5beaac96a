//! Result type definitions

use crate::config::Placeholders;
use crate::locales;
use serde::{Deserialize, Serialize};

/// A single hit returned by the search lookup, before enrichment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Page identifier
    pub id: u64,
    /// Article title
    pub title: String,
}

impl SearchHit {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Article summary returned by the detail lookup.
///
/// Optional fields are `None` when the provider omitted them or sent an
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub title: String,
    pub extract: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Last modification timestamp (RFC 3339)
    pub last_modified: Option<String>,
    pub html_extract: Option<String>,
}

impl ArticleSummary {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_extract(mut self, extract: impl Into<String>) -> Self {
        self.extract = non_empty(extract.into());
        self
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = non_empty(url.into());
        self
    }

    pub fn with_last_modified(mut self, timestamp: impl Into<String>) -> Self {
        self.last_modified = non_empty(timestamp.into());
        self
    }

    pub fn with_html_extract(mut self, html: impl Into<String>) -> Self {
        self.html_extract = non_empty(html.into());
        self
    }
}

/// Displayable result: a hit merged with its summary.
///
/// Every field is populated; missing summary fields are replaced by the
/// configured placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedResult {
    pub id: u64,
    pub title: String,
    pub snippet: String,
    pub image_url: String,
    pub display_date: String,
    pub full_content_html: String,
}

impl EnrichedResult {
    /// Merge a hit with its summary, substituting placeholders
    pub fn from_summary(
        hit: &SearchHit,
        summary: ArticleSummary,
        placeholders: &Placeholders,
        locale: &str,
    ) -> Self {
        let title = non_empty(summary.title).unwrap_or_else(|| hit.title.clone());

        let display_date = summary
            .last_modified
            .as_deref()
            .and_then(|ts| locales::format_date(ts, locale))
            .unwrap_or_else(|| placeholders.date.clone());

        let full_content_html = match summary.html_extract {
            Some(html) => html,
            None => {
                let text = summary.extract.as_deref().unwrap_or(&placeholders.content);
                format!("<p>{}</p>", tera::escape_html(text))
            }
        };

        Self {
            id: hit.id,
            title,
            snippet: summary
                .extract
                .unwrap_or_else(|| placeholders.snippet.clone()),
            image_url: summary
                .thumbnail_url
                .unwrap_or_else(|| placeholders.image_url.clone()),
            display_date,
            full_content_html,
        }
    }
}

/// `None` for the empty string; whitespace is kept as a value
pub fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
