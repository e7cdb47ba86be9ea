//! The data source trait and an in-memory implementation.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::SourceError;

/// Something that can produce the raw country payload.
///
/// The payload is returned unparsed; the loader decides how to normalize it.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Human-readable source name for logs.
    fn name(&self) -> &str;

    /// Fetch the full payload once.
    async fn fetch(&self) -> Result<Value, SourceError>;
}

/// A source that returns a fixed payload, or a fixed failure.
///
/// Useful for tests and for replaying captured responses.
#[derive(Debug, Clone)]
pub struct StaticSource {
    outcome: Result<Value, String>,
}

impl StaticSource {
    /// A source that always returns `payload`.
    pub fn new(payload: Value) -> Self {
        Self {
            outcome: Ok(payload),
        }
    }

    /// A source whose fetch always fails with a configuration-style error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }
}

#[async_trait]
impl CountrySource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> Result<Value, SourceError> {
        self.outcome.clone().map_err(SourceError::Config)
    }
}
