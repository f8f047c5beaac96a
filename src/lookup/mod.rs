//! Lookup module
//!
//! Defines the search and detail lookup traits the orchestrator depends on,
//! and the Wikipedia implementation of both.

mod traits;

pub mod wikipedia;

pub use traits::*;
pub use wikipedia::Wikipedia;
