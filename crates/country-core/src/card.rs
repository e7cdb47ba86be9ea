//! Display-ready country cards.
//!
//! A card holds only strings. Every absent value has already been replaced
//! with [`NOT_AVAILABLE`], so renderers never deal with missing data.

use serde::Serialize;

use crate::record::CountryRecord;

/// Placeholder shown for absent fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Message shown when filtering leaves nothing to display.
pub const NO_RESULTS_MESSAGE: &str = "No country found.";

/// A country record formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCard {
    pub name: String,
    pub capital: String,
    pub region: String,
    pub subregion: String,
    pub population: String,
    pub area: String,
    pub coordinates: String,
    pub borders: String,
    pub timezones: String,
    pub currency: String,
    pub languages: String,
    pub flag: String,
}

impl CountryCard {
    pub fn from_record(record: &CountryRecord) -> Self {
        Self {
            name: record.name.clone(),
            capital: or_placeholder(record.capital.as_deref()),
            region: or_placeholder(record.region.as_deref()),
            subregion: or_placeholder(record.subregion.as_deref()),
            population: record
                .population
                .map(group_thousands)
                .unwrap_or_else(placeholder),
            // A zero area is treated like a missing one.
            area: record
                .area
                .filter(|area| *area > 0.0)
                .map(|area| format!("{} km²", format_decimal(area)))
                .unwrap_or_else(placeholder),
            coordinates: record
                .coordinates
                .map(|c| format!("Lat: {}, Lng: {}", c.latitude, c.longitude))
                .unwrap_or_else(placeholder),
            borders: join_or_placeholder(&record.borders),
            timezones: join_or_placeholder(&record.timezones),
            currency: or_placeholder(record.currency.as_deref()),
            languages: join_or_placeholder(&record.languages),
            flag: or_placeholder(record.flag_url.as_deref()),
        }
    }

    /// Label/value pairs in display order, excluding the name.
    pub fn fields(&self) -> [(&'static str, &str); 11] {
        [
            ("Capital", self.capital.as_str()),
            ("Region", self.region.as_str()),
            ("Subregion", self.subregion.as_str()),
            ("Population", self.population.as_str()),
            ("Area", self.area.as_str()),
            ("Coordinates", self.coordinates.as_str()),
            ("Borders", self.borders.as_str()),
            ("Timezones", self.timezones.as_str()),
            ("Currency", self.currency.as_str()),
            ("Languages", self.languages.as_str()),
            ("Flag", self.flag.as_str()),
        ]
    }
}

impl From<&CountryRecord> for CountryCard {
    fn from(record: &CountryRecord) -> Self {
        Self::from_record(record)
    }
}

fn placeholder() -> String {
    NOT_AVAILABLE.to_string()
}

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => placeholder(),
    }
}

fn join_or_placeholder(values: &[String]) -> String {
    if values.is_empty() {
        placeholder()
    } else {
        values.join(", ")
    }
}

/// Format an integer with comma thousands separators.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Format a non-negative decimal with separators and at most three fraction digits.
fn format_decimal(value: f64) -> String {
    let fixed = format!("{:.3}", value);
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');
    let whole = whole.parse::<u64>().map(group_thousands).unwrap_or_else(|_| whole.to_string());

    if fraction.is_empty() {
        whole
    } else {
        format!("{}.{}", whole, fraction)
    }
}
