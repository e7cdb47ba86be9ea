//! Canonical country record and filter criteria.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Region labels offered by the region filter.
pub const KNOWN_REGIONS: [&str; 5] = ["Africa", "Americas", "Asia", "Europe", "Oceania"];

/// Upper bound (exclusive) of the small population bucket.
pub const SMALL_POPULATION_LIMIT: u64 = 1_000_000;

/// Upper bound (inclusive) of the medium population bucket.
pub const MEDIUM_POPULATION_LIMIT: u64 = 50_000_000;

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A country record after normalization.
///
/// Only `name` is guaranteed. Optional fields are `None` (or empty lists)
/// when the source did not provide a usable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    /// Identity key. Never empty.
    pub name: String,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    pub population: Option<u64>,
    /// Area in square kilometers.
    pub area: Option<f64>,
    pub coordinates: Option<Coordinates>,
    /// Neighbouring country codes, in source order.
    #[serde(default)]
    pub borders: Vec<String>,
    #[serde(default)]
    pub timezones: Vec<String>,
    /// Display string such as `"Euro (EUR)"`.
    pub currency: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub flag_url: Option<String>,
}

impl CountryRecord {
    /// Create a record with only a name; every other field is absent.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capital: None,
            region: None,
            subregion: None,
            population: None,
            area: None,
            coordinates: None,
            borders: Vec::new(),
            timezones: Vec::new(),
            currency: None,
            languages: Vec::new(),
            flag_url: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_subregion(mut self, subregion: impl Into<String>) -> Self {
        self.subregion = Some(subregion.into());
        self
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = Some(population);
        self
    }

    pub fn with_capital(mut self, capital: impl Into<String>) -> Self {
        self.capital = Some(capital.into());
        self
    }
}

/// Population bucket used by the population filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopulationBucket {
    /// Fewer than one million people.
    Small,
    /// Between one and fifty million people, both inclusive.
    Medium,
    /// More than fifty million people.
    Large,
}

impl PopulationBucket {
    pub const ALL: [PopulationBucket; 3] = [Self::Small, Self::Medium, Self::Large];

    /// The bucket a population falls into. Every value maps to exactly one.
    pub fn for_population(population: u64) -> Self {
        if population < SMALL_POPULATION_LIMIT {
            Self::Small
        } else if population <= MEDIUM_POPULATION_LIMIT {
            Self::Medium
        } else {
            Self::Large
        }
    }

    pub fn contains(&self, population: u64) -> bool {
        Self::for_population(population) == *self
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Short label matching the filter menu.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "< 1M",
            Self::Medium => "1M - 50M",
            Self::Large => "> 50M",
        }
    }

    /// Parse an optional bucket from user input.
    ///
    /// Empty input, `none`, `all`, and `any` mean no bucket.
    pub fn parse_optional(input: &str) -> Result<Option<Self>, ParseBucketError> {
        match input.trim().to_lowercase().as_str() {
            "" | "none" | "all" | "any" => Ok(None),
            other => other.parse().map(Some),
        }
    }
}

impl fmt::Display for PopulationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a bucket name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown population bucket '{0}' (expected small, medium or large)")]
pub struct ParseBucketError(pub String);

impl FromStr for PopulationBucket {
    type Err = ParseBucketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(ParseBucketError(s.to_string())),
        }
    }
}

/// The current combination of search text, region, and population bucket.
///
/// Criteria are values: every update returns a new instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    search_text: String,
    region: String,
    bucket: Option<PopulationBucket>,
}

impl FilterCriteria {
    pub fn new(
        search_text: impl Into<String>,
        region: impl Into<String>,
        bucket: Option<PopulationBucket>,
    ) -> Self {
        Self {
            search_text: search_text.into(),
            region: region.into(),
            bucket,
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Selected region, empty when any region is accepted.
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn bucket(&self) -> Option<PopulationBucket> {
        self.bucket
    }

    pub fn with_search(&self, search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            ..self.clone()
        }
    }

    pub fn with_region(&self, region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..self.clone()
        }
    }

    pub fn with_bucket(&self, bucket: Option<PopulationBucket>) -> Self {
        Self {
            bucket,
            ..self.clone()
        }
    }

    pub fn cleared() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(PopulationBucket::for_population(0), PopulationBucket::Small);
        assert_eq!(PopulationBucket::for_population(999_999), PopulationBucket::Small);
        assert_eq!(PopulationBucket::for_population(1_000_000), PopulationBucket::Medium);
        assert_eq!(PopulationBucket::for_population(50_000_000), PopulationBucket::Medium);
        assert_eq!(PopulationBucket::for_population(50_000_001), PopulationBucket::Large);
    }

    #[test]
    fn test_exactly_one_bucket_contains_population() {
        let populations = [
            0,
            18_000,
            999_999,
            1_000_000,
            25_000_000,
            50_000_000,
            50_000_001,
            u64::MAX,
        ];
        for population in populations {
            let matching = PopulationBucket::ALL
                .iter()
                .filter(|b| b.contains(population))
                .count();
            assert_eq!(matching, 1, "population {}", population);
        }
    }

    #[test]
    fn test_parse_bucket() {
        assert_eq!("small".parse::<PopulationBucket>(), Ok(PopulationBucket::Small));
        assert_eq!("LARGE".parse::<PopulationBucket>(), Ok(PopulationBucket::Large));
        assert!("huge".parse::<PopulationBucket>().is_err());
    }

    #[test]
    fn test_parse_optional_bucket() {
        assert_eq!(PopulationBucket::parse_optional(""), Ok(None));
        assert_eq!(PopulationBucket::parse_optional("none"), Ok(None));
        assert_eq!(
            PopulationBucket::parse_optional(" medium "),
            Ok(Some(PopulationBucket::Medium))
        );
        assert!(PopulationBucket::parse_optional("tiny").is_err());
    }

    #[test]
    fn test_criteria_updates_return_new_values() {
        let base = FilterCriteria::default();
        let next = base.with_search("pa").with_region("Oceania");

        assert_eq!(base.search_text(), "");
        assert_eq!(next.search_text(), "pa");
        assert_eq!(next.region(), "Oceania");
        assert_eq!(next.bucket(), None);
        assert_eq!(
            next.with_bucket(Some(PopulationBucket::Small)).bucket(),
            Some(PopulationBucket::Small)
        );
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let mut record = CountryRecord::named("Palau");
        record.flag_url = Some("https://flagcdn.com/pw.svg".to_string());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["flagUrl"], "https://flagcdn.com/pw.svg");
        assert!(json["capital"].is_null());
    }
}
