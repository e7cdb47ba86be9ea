//! Error types for country sources.

use country_core::CountryError;
use thiserror::Error;

/// Errors that can occur while fetching the country list.
///
/// At the session boundary every fetch failure becomes a
/// [`CountryError`]: payload errors pass through, the rest become
/// [`CountryError::SourceUnavailable`] carrying [`SourceError::user_message`].
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was JSON but not a country list.
    #[error("invalid payload: {0}")]
    Payload(#[from] CountryError),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SourceError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(e) if e.is_timeout() => "The country service timed out".to_string(),
            Self::Http(_) | Self::Status { .. } => "Network response was not ok".to_string(),
            Self::Json(_) | Self::Payload(_) => {
                "The country service returned unreadable data".to_string()
            }
            Self::Config(msg) => msg.clone(),
        }
    }
}

impl From<SourceError> for CountryError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Payload(inner) => inner,
            other => CountryError::SourceUnavailable(other.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = SourceError::Status {
            status: 503,
            body: "unavailable".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503: unavailable");
        assert_eq!(err.user_message(), "Network response was not ok");
    }

    #[test]
    fn test_into_country_error() {
        let err: CountryError = SourceError::Config("bad url".into()).into();
        assert_eq!(err, CountryError::SourceUnavailable("bad url".into()));

        let status = SourceError::Status {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(
            CountryError::from(status),
            CountryError::SourceUnavailable("Network response was not ok".into())
        );

        let payload = SourceError::Payload(CountryError::UnexpectedPayload("null".into()));
        assert_eq!(
            CountryError::from(payload),
            CountryError::UnexpectedPayload("null".into())
        );
    }
}
