//! Wikipedia search and summary lookups

use super::traits::*;
use crate::config::WikipediaSettings;
use crate::network::HttpClient;
use crate::results::{non_empty, ArticleSummary, SearchHit};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Wikipedia lookups backed by the Action API (search) and the REST API
/// (page summaries)
#[derive(Clone)]
pub struct Wikipedia {
    client: HttpClient,
    api_url: String,
    rest_url: String,
}

impl Wikipedia {
    /// Create lookups for the configured language edition
    pub fn new(client: HttpClient, settings: &WikipediaSettings) -> Self {
        let lang = settings.base_lang();
        Self::with_urls(client, settings.api_url(lang), settings.rest_url(lang))
    }

    /// Create lookups against explicit endpoint URLs
    pub fn with_urls(
        client: HttpClient,
        api_url: impl Into<String>,
        rest_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            rest_url: rest_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Build the full-text search request
    pub fn search_request(&self, query: &str, limit: u32) -> LookupRequest {
        LookupRequest::get(&self.api_url)
            .param("action", "query")
            .param("list", "search")
            .param("srsearch", query)
            .param("srlimit", limit.to_string())
            .param("format", "json")
    }

    /// Parse hits from a search response.
    ///
    /// A body without a `query.search` block yields no hits; an API-level
    /// `error` object is a failure.
    pub fn parse_search(response: LookupResponse) -> Result<Vec<SearchHit>, LookupError> {
        let response = response.error_for_status()?;
        let payload: SearchPayload = response.json()?;

        if let Some(error) = payload.error {
            return Err(LookupError::Parse(format!(
                "API error {}: {}",
                error.code, error.info
            )));
        }

        let hits = payload
            .query
            .map(|q| q.search)
            .unwrap_or_default()
            .into_iter()
            .map(|raw| SearchHit::new(raw.pageid, raw.title))
            .collect();

        Ok(hits)
    }

    /// Build the page summary request for an article title
    pub fn summary_request(&self, title: &str) -> LookupRequest {
        let url = format!(
            "{}/page/summary/{}",
            self.rest_url,
            urlencoding::encode(title)
        );
        LookupRequest::get(url)
    }

    /// Parse a page summary response
    pub fn parse_summary(response: LookupResponse) -> Result<ArticleSummary, LookupError> {
        let response = response.error_for_status()?;
        let payload: SummaryPayload = response.json()?;

        Ok(ArticleSummary {
            title: payload.title,
            extract: payload.extract.and_then(non_empty),
            thumbnail_url: payload
                .thumbnail
                .and_then(|t| t.source)
                .and_then(non_empty),
            last_modified: payload.timestamp.and_then(non_empty),
            html_extract: payload.extract_html.and_then(non_empty),
        })
    }
}

#[async_trait]
impl SearchLookup for Wikipedia {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchHit>, LookupError> {
        let request = self.search_request(query, limit);
        let response = self.client.execute(request).await?;
        let hits = Self::parse_search(response)?;
        debug!("Wikipedia search '{}' returned {} hits", query, hits.len());
        Ok(hits)
    }
}

#[async_trait]
impl DetailLookup for Wikipedia {
    async fn summary(&self, title: &str) -> Result<ArticleSummary, LookupError> {
        let request = self.summary_request(title);
        let response = self.client.execute(request).await?;
        Self::parse_summary(response)
    }
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    query: Option<SearchBlock>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct SearchBlock {
    #[serde(default)]
    search: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    pageid: u64,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct SummaryPayload {
    #[serde(default)]
    title: String,
    extract: Option<String>,
    thumbnail: Option<Thumbnail>,
    timestamp: Option<String>,
    extract_html: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: Option<String>,
}
