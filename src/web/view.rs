//! Page state derived from a search outcome

use crate::locales::Translations;
use crate::results::EnrichedResult;
use crate::search::SearchUnavailable;
use serde::Serialize;

/// What a results area shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageState {
    /// Nothing searched yet
    Idle,
    Results { results: Vec<EnrichedResult> },
    Empty { message: String, hint: String },
    Error { message: String },
}

impl PageState {
    /// Map a search outcome to a page state. An error never carries results.
    pub fn from_outcome(
        outcome: Result<Vec<EnrichedResult>, SearchUnavailable>,
        translations: &Translations,
        locale: &str,
    ) -> Self {
        match outcome {
            Ok(results) if results.is_empty() => PageState::Empty {
                message: translations.text(locale, "no_results").to_string(),
                hint: translations.text(locale, "no_results_hint").to_string(),
            },
            Ok(results) => PageState::Results { results },
            Err(_) => PageState::Error {
                message: translations.text(locale, "search_error").to_string(),
            },
        }
    }

    pub fn results(&self) -> &[EnrichedResult] {
        match self {
            PageState::Results { results } => results,
            _ => &[],
        }
    }
}
