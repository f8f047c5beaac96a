//! Type-ahead suggestions
//!
//! Suggestions are a regular search with a small limit; only the titles and
//! page ids of the enriched results are kept.

use crate::search::SearchOrchestrator;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A single suggestion entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: u64,
    pub title: String,
}

/// Fetch suggestions for a partially typed query.
///
/// Blank queries return nothing without searching. Failures are logged and
/// yield no suggestions.
pub async fn fetch_suggestions(
    orchestrator: &SearchOrchestrator,
    query: &str,
    limit: u32,
) -> Vec<Suggestion> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    match orchestrator.search(query, limit).await {
        Ok(results) => results
            .into_iter()
            .map(|r| Suggestion {
                id: r.id,
                title: r.title,
            })
            .collect(),
        Err(e) => {
            warn!("Error fetching suggestions for '{}': {}", query, e);
            Vec::new()
        }
    }
}
