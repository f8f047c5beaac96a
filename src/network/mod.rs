//! HTTP networking module
//!
//! Provides HTTP client functionality for the Wikipedia lookups.

mod client;
mod user_agent;

pub use client::HttpClient;
pub use user_agent::build_user_agent;
