//! Error types for country record handling.

use thiserror::Error;

/// Errors that can occur while turning a source payload into records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountryError {
    /// A single raw record could not be normalized.
    ///
    /// The record is dropped from the base list; the rest of the batch survives.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// The payload was neither an array nor an object with a `data` array.
    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),

    /// The data source could not be reached or returned an unusable response.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
}

impl CountryError {
    /// The detail text, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::MalformedRecord(msg)
            | Self::UnexpectedPayload(msg)
            | Self::SourceUnavailable(msg) => msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_drops_prefix() {
        let err = CountryError::SourceUnavailable("The country service timed out".into());
        assert_eq!(err.message(), "The country service timed out");
        assert_eq!(CountryError::MalformedRecord("no name".into()).message(), "no name");
    }

    #[test]
    fn test_display() {
        let err = CountryError::SourceUnavailable("HTTP 503".into());
        assert_eq!(err.to_string(), "source unavailable: HTTP 503");
    }
}
