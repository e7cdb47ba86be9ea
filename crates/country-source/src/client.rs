//! HTTP country source.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::source::CountrySource;

/// Fetches the country list with a single HTTP GET.
#[derive(Clone)]
pub struct HttpCountrySource {
    http: Client,
    config: SourceConfig,
}

impl HttpCountrySource {
    /// Build a source for the configured endpoint.
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(SourceError::Http)?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl CountrySource for HttpCountrySource {
    fn name(&self) -> &str {
        &self.config.url
    }

    async fn fetch(&self) -> Result<Value, SourceError> {
        debug!("Fetching countries from: {}", self.config.url);

        let response = self.http.get(&self.config.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        debug!("Received {} bytes", bytes.len());

        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl std::fmt::Debug for HttpCountrySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCountrySource")
            .field("config", &self.config)
            .finish()
    }
}
