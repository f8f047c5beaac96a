//! Result types for search hits, article summaries and enriched results
//!
//! This module defines the data model shared by the lookups, the
//! orchestrator and the web layer.

mod types;

pub use types::*;
