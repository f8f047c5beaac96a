//! User agent and accept headers

/// Descriptive User-Agent, as requested by the Wikimedia API etiquette
pub fn build_user_agent(suffix: Option<&str>) -> String {
    let base = format!("wikisearch-rs/{}", crate::VERSION);
    match suffix.map(str::trim) {
        Some(suffix) if !suffix.is_empty() => format!("{} {}", base, suffix),
        _ => base,
    }
}

/// Standard accept header for JSON requests
pub fn accept_json() -> &'static str {
    "application/json,text/javascript,*/*;q=0.01"
}
