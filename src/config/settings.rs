//! Settings structures for WikiSearch-RS configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub wikipedia: WikipediaSettings,
    pub search: SearchSettings,
    pub placeholders: Placeholders,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (WIKISEARCH_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("WIKISEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("WIKISEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("WIKISEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("WIKISEARCH_LANG") {
            self.wikipedia.lang = val;
        }
        if let Ok(val) = std::env::var("WIKISEARCH_LOCALE") {
            self.general.locale = val;
        }
    }

    /// Reject settings the search pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        let search = &self.search;
        if search.default_limit == 0 || search.suggestion_limit == 0 || search.popular_limit == 0
        {
            bail!("search limits must be positive");
        }
        if search.max_limit < search.default_limit {
            bail!(
                "search.max_limit ({}) is below search.default_limit ({})",
                search.max_limit,
                search.default_limit
            );
        }
        if search.detail_concurrency == 0 {
            bail!("search.detail_concurrency must be at least 1");
        }
        check_timeout("search.search_timeout", search.search_timeout)?;
        check_timeout("search.detail_timeout", search.detail_timeout)?;
        check_timeout("outgoing.request_timeout", self.outgoing.request_timeout)?;
        if search.popular_topics.is_empty() {
            bail!("search.popular_topics must not be empty");
        }

        let lang = self.wikipedia.base_lang();
        Url::parse(&self.wikipedia.api_url(lang))?;
        Url::parse(&self.wikipedia.rest_url(lang))?;
        Ok(())
    }
}

/// Longest accepted timeout, in seconds
pub const MAX_TIMEOUT_SECS: f64 = 3600.0;

/// Timeouts must be finite, positive and at most `MAX_TIMEOUT_SECS`
fn check_timeout(name: &str, secs: f64) -> Result<()> {
    if !(secs > 0.0 && secs <= MAX_TIMEOUT_SECS) {
        bail!("{} must be between 0 and {} seconds, got {}", name, MAX_TIMEOUT_SECS, secs);
    }
    Ok(())
}

/// Saturating conversion for settings that skipped `validate`
fn timeout_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs.min(MAX_TIMEOUT_SECS)).unwrap_or(Duration::ZERO)
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name displayed in UI
    pub instance_name: String,
    /// Locale used for UI messages and dates ("id" or "en")
    pub locale: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "WikiSearch".to_string(),
            locale: "id".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Public instance mode (affects robots.txt)
    pub public_instance: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8888,
            bind_address: "127.0.0.1".to_string(),
            public_instance: false,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// Text appended to the User-Agent header
    pub useragent_suffix: Option<String>,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy used for all outgoing requests
    pub proxy: Option<String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 5.0,
            useragent_suffix: None,
            pool_maxsize: 20,
            verify_ssl: true,
            proxy: None,
        }
    }
}

/// Wikipedia endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikipediaSettings {
    /// Language edition (e.g. "en", "id", "en-US")
    pub lang: String,
    /// Action API URL, `{lang}` is substituted
    pub api_url: String,
    /// REST API base URL, `{lang}` is substituted
    pub rest_url: String,
}

impl Default for WikipediaSettings {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            api_url: "https://{lang}.wikipedia.org/w/api.php".to_string(),
            rest_url: "https://{lang}.wikipedia.org/api/rest_v1".to_string(),
        }
    }
}

impl WikipediaSettings {
    /// Base language code ("en" from "en-US")
    pub fn base_lang(&self) -> &str {
        match self.lang.split('-').next() {
            Some(lang) if !lang.is_empty() && lang != "all" => lang,
            _ => "en",
        }
    }

    pub fn api_url(&self, lang: &str) -> String {
        self.api_url.replace("{lang}", lang)
    }

    pub fn rest_url(&self, lang: &str) -> String {
        self.rest_url.replace("{lang}", lang)
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Hits requested by a regular search
    pub default_limit: u32,
    /// Hits requested in suggestion mode
    pub suggestion_limit: u32,
    /// Hits requested for the landing page
    pub popular_limit: u32,
    /// Upper bound for a caller-supplied limit
    pub max_limit: u32,
    /// Topics the landing page picks from
    pub popular_topics: Vec<String>,
    /// Detail lookups in flight at once (1 = sequential)
    pub detail_concurrency: usize,
    /// Search lookup timeout in seconds
    pub search_timeout: f64,
    /// Per-hit detail lookup timeout in seconds
    pub detail_timeout: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_limit: 10,
            suggestion_limit: 5,
            popular_limit: 6,
            max_limit: 50,
            popular_topics: vec![
                "Indonesia".to_string(),
                "Teknologi".to_string(),
                "Sejarah".to_string(),
                "Ilmu Pengetahuan".to_string(),
                "Budaya".to_string(),
            ],
            detail_concurrency: 4,
            search_timeout: 5.0,
            detail_timeout: 5.0,
        }
    }
}

impl SearchSettings {
    pub fn search_timeout(&self) -> Duration {
        timeout_duration(self.search_timeout)
    }

    pub fn detail_timeout(&self) -> Duration {
        timeout_duration(self.detail_timeout)
    }

    /// Clamp a caller-supplied limit into `1..=max_limit`
    pub fn clamp_limit(&self, limit: Option<u32>) -> u32 {
        limit
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1))
    }
}

/// Values substituted when a summary lacks a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    /// Snippet used when the summary has no extract
    pub snippet: String,
    /// Image used when the summary has no thumbnail
    pub image_url: String,
    /// Date text used when the summary has no usable timestamp
    pub date: String,
    /// Paragraph text used when neither HTML nor plain extract exists
    pub content: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            snippet: "Tidak ada ringkasan tersedia".to_string(),
            image_url: "https://via.placeholder.com/400x300?text=No+Image".to_string(),
            date: "Tidak diketahui".to_string(),
            content: "Konten tidak tersedia".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8888);
        assert!(!settings.general.debug);
        assert_eq!(settings.search.default_limit, 10);
        assert_eq!(settings.search.suggestion_limit, 5);
        assert_eq!(settings.search.popular_limit, 6);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
wikipedia:
  lang: id
search:
  detail_concurrency: 1
placeholders:
  snippet: "No summary available"
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.wikipedia.lang, "id");
        assert_eq!(settings.search.detail_concurrency, 1);
        assert_eq!(settings.search.default_limit, 10);
        assert_eq!(settings.placeholders.snippet, "No summary available");
        assert_eq!(settings.placeholders.date, "Tidak diketahui");
    }

    #[test]
    fn test_base_lang() {
        let mut wiki = WikipediaSettings::default();
        assert_eq!(wiki.base_lang(), "en");
        wiki.lang = "en-US".to_string();
        assert_eq!(wiki.base_lang(), "en");
        wiki.lang = "all".to_string();
        assert_eq!(wiki.base_lang(), "en");
        wiki.lang = "id".to_string();
        assert_eq!(wiki.api_url(wiki.base_lang()), "https://id.wikipedia.org/w/api.php");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.search.detail_concurrency = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.search.suggestion_limit = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.wikipedia.api_url = "not a url".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unusable_timeouts() {
        for yaml in [
            "search:\n  search_timeout: .inf\n",
            "search:\n  detail_timeout: .nan\n",
            "search:\n  detail_timeout: 1.0e300\n",
            "search:\n  search_timeout: 0\n",
            "outgoing:\n  request_timeout: .inf\n",
            "outgoing:\n  request_timeout: -1\n",
        ] {
            let settings = Settings::from_yaml(yaml).unwrap();
            assert!(settings.validate().is_err(), "accepted {:?}", yaml);
        }

        let settings = Settings::from_yaml("search:\n  detail_timeout: 0.5\n").unwrap();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.search.detail_timeout(), Duration::from_millis(500));
    }

    #[test]
    fn test_timeout_accessors_saturate() {
        let mut search = SearchSettings::default();
        search.search_timeout = f64::INFINITY;
        search.detail_timeout = f64::NAN;
        assert_eq!(search.search_timeout(), Duration::from_secs(3600));
        assert_eq!(search.detail_timeout(), Duration::from_secs(3600));

        search.detail_timeout = -2.0;
        assert_eq!(search.detail_timeout(), Duration::ZERO);
    }

    #[test]
    fn test_clamp_limit() {
        let search = SearchSettings::default();
        assert_eq!(search.clamp_limit(None), 10);
        assert_eq!(search.clamp_limit(Some(0)), 1);
        assert_eq!(search.clamp_limit(Some(6)), 6);
        assert_eq!(search.clamp_limit(Some(500)), 50);
    }
}
