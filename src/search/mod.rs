//! Search orchestration module
//!
//! Runs the search lookup, enriches each hit with its summary and
//! absorbs per-hit failures.

mod executor;
mod models;

pub use executor::SearchOrchestrator;
pub use models::*;
