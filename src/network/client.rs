//! HTTP client for making lookup requests

use super::user_agent::{accept_json, build_user_agent};
use crate::config::OutgoingSettings;
use crate::lookup::{LookupError, LookupRequest, LookupResponse};
use reqwest::{Client, Response};
use std::time::Duration;

/// HTTP client wrapper with WikiSearch-specific configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> anyhow::Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> anyhow::Result<Self> {
        let timeout = Duration::try_from_secs_f64(settings.request_timeout).map_err(|e| {
            anyhow::anyhow!(
                "invalid outgoing.request_timeout {}: {}",
                settings.request_timeout,
                e
            )
        })?;
        let mut builder = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref proxy_url) = settings.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            default_timeout: timeout,
            user_agent: build_user_agent(settings.useragent_suffix.as_deref()),
        })
    }

    /// Execute a lookup request
    pub async fn execute(&self, request: LookupRequest) -> Result<LookupResponse, LookupError> {
        self.execute_with_timeout(request, self.default_timeout).await
    }

    /// Execute a lookup request with custom timeout
    pub async fn execute_with_timeout(
        &self,
        request: LookupRequest,
        timeout: Duration,
    ) -> Result<LookupResponse, LookupError> {
        let mut req_builder = self
            .client
            .get(&request.url)
            .timeout(timeout)
            .header("User-Agent", &self.user_agent)
            .header("Accept", accept_json());

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// Simple GET request
    pub async fn get(&self, url: &str) -> Result<LookupResponse, LookupError> {
        self.execute(LookupRequest::get(url)).await
    }

    /// Read status, final URL and body
    async fn parse_response(response: Response) -> Result<LookupResponse, LookupError> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let text = response.text().await?;

        Ok(LookupResponse { status, text, url })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
