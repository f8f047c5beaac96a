//! HTTP request handlers

use super::state::AppState;
use super::view::PageState;
use crate::autocomplete::{fetch_suggestions, Suggestion};
use crate::results::EnrichedResult;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tera::Context;
use tracing::{error, warn};

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search query
    pub q: Option<String>,
    /// Maximum number of results
    pub limit: Option<u32>,
    /// Output format ("json" or HTML)
    pub format: Option<String>,
}

/// Search results response for JSON format
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub limit: u32,
    pub number_of_results: usize,
    pub results: Vec<EnrichedResult>,
}

/// Base context shared by all pages
fn page_context(state: &AppState, query: &str, page: &PageState) -> Context {
    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("locale", state.locale());
    ctx.insert("t", &state.translations.catalog(state.locale()));
    ctx.insert("query", query);
    ctx.insert("state", page);
    ctx.insert("topic", &Option::<String>::None);
    ctx
}

fn render(state: &AppState, template: &str, ctx: &Context) -> Response {
    match state.templates.render_with_context(template, ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Template error: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Home page handler, showing articles for a random popular topic
pub async fn index(State(state): State<AppState>) -> Response {
    let search = &state.settings.search;
    let topic = search
        .popular_topics
        .choose(&mut rand::thread_rng())
        .cloned();

    let page = match topic {
        Some(ref topic) => {
            match state.orchestrator.search(topic, search.popular_limit).await {
                // a topic with no articles leaves the landing page idle
                Ok(results) if results.is_empty() => PageState::Idle,
                Ok(results) => PageState::from_outcome(Ok(results), &state.translations, state.locale()),
                Err(e) => {
                    warn!("Error loading popular articles for '{}': {}", topic, e);
                    PageState::Idle
                }
            }
        }
        None => PageState::Idle,
    };

    let mut ctx = page_context(&state, "", &page);
    ctx.insert("topic", &topic);
    render(&state, "index.html", &ctx)
}

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = match params.q {
        Some(ref q) if !q.trim().is_empty() => q.trim().to_string(),
        _ => return Redirect::to("/").into_response(),
    };

    let limit = state.settings.search.clamp_limit(params.limit);
    let outcome = state.orchestrator.search(&query, limit).await;

    match params.format.as_deref() {
        Some("json") => match outcome {
            Ok(results) => Json(SearchResponse {
                query,
                limit,
                number_of_results: results.len(),
                results,
            })
            .into_response(),
            Err(e) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response(),
        },
        _ => {
            let page = PageState::from_outcome(outcome, &state.translations, state.locale());
            let ctx = page_context(&state, &query, &page);
            render(&state, "search.html", &ctx)
        }
    }
}

/// Autocomplete parameters
#[derive(Debug, Deserialize)]
pub struct AutocompleteParams {
    pub q: Option<String>,
}

/// Autocomplete handler, a search with the suggestion limit
pub async fn autocomplete(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteParams>,
) -> Json<Vec<Suggestion>> {
    let query = params.q.unwrap_or_default();
    let suggestions = fetch_suggestions(
        &state.orchestrator,
        &query,
        state.settings.search.suggestion_limit,
    )
    .await;
    Json(suggestions)
}

/// Stats handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// Robots.txt handler
pub async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    let content = if state.is_public() {
        "User-agent: *\nAllow: /\nDisallow: /search\nDisallow: /autocomplete\n"
    } else {
        "User-agent: *\nDisallow: /\n"
    };
    (
        [(axum::http::header::CONTENT_TYPE, "text/plain")],
        content,
    )
}
