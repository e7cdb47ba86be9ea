//! Configuration for the HTTP country source.

use std::env;
use std::time::Duration;

use crate::error::SourceError;

/// REST Countries v2; returns a bare array.
pub const REST_COUNTRIES_URL: &str = "https://restcountries.com/v2/all";

/// Countries API; wraps the array in `data`.
pub const COUNTRIES_API_URL: &str = "https://countries-api-abhishek.vercel.app/countries";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for fetching the country list over HTTP.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Endpoint returning the full country list.
    pub url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent sent with the request.
    pub user_agent: String,
}

impl SourceConfig {
    /// Create a configuration for the given endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("country-explorer/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// REST Countries v2 endpoint.
    pub fn rest_countries() -> Self {
        Self::new(REST_COUNTRIES_URL)
    }

    /// Countries API endpoint.
    pub fn countries_api() -> Self {
        Self::new(COUNTRIES_API_URL)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `COUNTRY_SOURCE_URL` | Country list endpoint | REST Countries v2 |
    /// | `COUNTRY_SOURCE_TIMEOUT_SECS` | Request timeout | `15` |
    pub fn from_env() -> Result<Self, SourceError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SourceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("COUNTRY_SOURCE_URL").unwrap_or_else(|| REST_COUNTRIES_URL.to_string());
        let mut config = Self::new(url);
        config.validate()?;

        if let Some(raw) = lookup("COUNTRY_SOURCE_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                SourceError::Config(format!(
                    "COUNTRY_SOURCE_TIMEOUT_SECS is not a number: {}",
                    raw
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Check that the URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), SourceError> {
        let url = self.url.trim();
        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(())
        } else {
            Err(SourceError::Config(format!("unsupported source URL: {}", self.url)))
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::rest_countries()
    }
}
