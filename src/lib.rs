//! WikiSearch-RS: a Wikipedia search front-end written in Rust
//!
//! Searches Wikipedia, enriches every hit with its page summary and serves
//! the results as cards with a full-article view.

pub mod autocomplete;
pub mod config;
pub mod locales;
pub mod lookup;
pub mod metrics;
pub mod network;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use lookup::{DetailLookup, LookupError, SearchLookup};
pub use results::{ArticleSummary, EnrichedResult, SearchHit};
pub use search::{SearchOrchestrator, SearchUnavailable};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
