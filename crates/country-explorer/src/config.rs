//! Configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

use country_core::{DisplayPolicy, SearchScope};
use country_source::{SourceConfig, SourceError};
use serde::{Deserialize, Serialize};

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable cards.
    #[default]
    Cards,
    /// Pretty-printed JSON array of cards.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cards" | "text" => Ok(Self::Cards),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{}' (expected cards or json)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cards => f.write_str("cards"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Explorer configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the country list comes from.
    pub source: SourceConfig,
    /// Whether an unfiltered view shows everything or nothing.
    pub policy: DisplayPolicy,
    /// Fields the search text is matched against.
    pub scope: SearchScope,
    pub format: OutputFormat,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `COUNTRY_SOURCE_URL` | Country list endpoint | `https://restcountries.com/v2/all` |
    /// | `COUNTRY_SOURCE_TIMEOUT_SECS` | Request timeout | `15` |
    /// | `COUNTRY_DISPLAY_POLICY` | `show-all` or `require-filter` | `show-all` |
    /// | `COUNTRY_SEARCH_SCOPE` | `all` or `name` | `all` |
    /// | `COUNTRY_OUTPUT_FORMAT` | `cards` or `json` | `cards` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = SourceConfig::from_lookup(&lookup)?;

        let policy = match lookup("COUNTRY_DISPLAY_POLICY") {
            Some(raw) => raw.parse().map_err(ConfigError::Invalid)?,
            None => DisplayPolicy::default(),
        };

        let scope = match lookup("COUNTRY_SEARCH_SCOPE") {
            Some(raw) => raw.parse().map_err(ConfigError::Invalid)?,
            None => SearchScope::default(),
        };

        let format = match lookup("COUNTRY_OUTPUT_FORMAT") {
            Some(raw) => raw.parse().map_err(ConfigError::Invalid)?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            source,
            policy,
            scope,
            format,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Source(#[from] SourceError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use country_source::REST_COUNTRIES_URL;
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.source.url, REST_COUNTRIES_URL);
        assert_eq!(config.source.timeout, Duration::from_secs(15));
        assert_eq!(config.policy, DisplayPolicy::ShowAll);
        assert_eq!(config.scope, SearchScope::All);
        assert_eq!(config.format, OutputFormat::Cards);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (
                "COUNTRY_SOURCE_URL",
                "https://countries-api-abhishek.vercel.app/countries",
            ),
            ("COUNTRY_SOURCE_TIMEOUT_SECS", "3"),
            ("COUNTRY_DISPLAY_POLICY", "require-filter"),
            ("COUNTRY_SEARCH_SCOPE", "name"),
            ("COUNTRY_OUTPUT_FORMAT", "json"),
        ]))
        .unwrap();

        assert!(config.source.url.ends_with("/countries"));
        assert_eq!(config.source.timeout, Duration::from_secs(3));
        assert_eq!(config.policy, DisplayPolicy::RequireFilter);
        assert_eq!(config.scope, SearchScope::NameOnly);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("COUNTRY_SOURCE_TIMEOUT_SECS", "soon")])),
            Err(ConfigError::Source(SourceError::Config(_)))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("COUNTRY_DISPLAY_POLICY", "maybe")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("COUNTRY_SOURCE_URL", "countries.json")])),
            Err(ConfigError::Source(_))
        ));
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Cards));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
