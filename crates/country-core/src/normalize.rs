//! Normalization of source payloads into [`CountryRecord`]s.
//!
//! Data sources disagree on field names and shapes. Each known shape gets its
//! own adapter, chosen by [`RecordShape::detect`]; all adapters converge on the
//! same canonical record. Only a missing name fails a record. Any other field
//! with an unexpected shape is treated as absent.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::CountryError;
use crate::record::{Coordinates, CountryRecord};

/// Known source record shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// REST Countries v2: flat name, `latlng` pair, `currencies` list, `flag` URL.
    Legacy,
    /// REST Countries v3: `name.common`, `capital` list, keyed `currencies`
    /// and `languages` maps, `flags` object.
    Nested,
    /// Simplified APIs: `coordinates` object, `currency` display string,
    /// `languages` as plain strings.
    Flat,
}

impl RecordShape {
    /// Pick the adapter by looking at which fields are present.
    pub fn detect(raw: &Map<String, Value>) -> Self {
        let keyed = |key: &str| raw.get(key).is_some_and(Value::is_object);

        if keyed("name") || keyed("currencies") || keyed("languages") {
            Self::Nested
        } else if raw.contains_key("coordinates") || raw.contains_key("currency") {
            Self::Flat
        } else {
            Self::Legacy
        }
    }
}

/// A raw record that failed normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// Position in the source payload.
    pub index: usize,
    pub error: CountryError,
}

/// Result of normalizing a whole payload.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    /// Successfully normalized records, in source order.
    pub records: Vec<CountryRecord>,
    pub rejected: Vec<RejectedRecord>,
}

/// Pull the record array out of a payload.
///
/// Accepts a bare array or an object wrapping the array in `data`.
pub fn extract_records(payload: Value) -> Result<Vec<Value>, CountryError> {
    match payload {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(CountryError::UnexpectedPayload(format!(
                "`data` field is {}, expected an array",
                kind(&other)
            ))),
            None => Err(CountryError::UnexpectedPayload(
                "object without a `data` array".to_string(),
            )),
        },
        other => Err(CountryError::UnexpectedPayload(format!(
            "payload is {}, expected an array",
            kind(&other)
        ))),
    }
}

/// Normalize every record in a batch, keeping the ones that succeed.
pub fn normalize_batch<'a, I>(raws: I) -> NormalizedBatch
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut batch = NormalizedBatch::default();

    for (index, raw) in raws.into_iter().enumerate() {
        match normalize_record(raw) {
            Ok(record) => batch.records.push(record),
            Err(error) => batch.rejected.push(RejectedRecord { index, error }),
        }
    }

    debug!(
        "Normalized {} records ({} rejected)",
        batch.records.len(),
        batch.rejected.len()
    );

    batch
}

/// Normalize a single raw record.
pub fn normalize_record(raw: &Value) -> Result<CountryRecord, CountryError> {
    let map = raw.as_object().ok_or_else(|| {
        CountryError::MalformedRecord(format!("expected an object, found {}", kind(raw)))
    })?;

    match RecordShape::detect(map) {
        RecordShape::Legacy => normalize_legacy(map),
        RecordShape::Nested => normalize_nested(map),
        RecordShape::Flat => normalize_flat(map),
    }
}

fn normalize_legacy(raw: &Map<String, Value>) -> Result<CountryRecord, CountryError> {
    let mut record = CountryRecord::named(required_name(text(raw.get("name")))?);
    fill_common(&mut record, raw);
    record.coordinates =
        coordinates(raw.get("latlng")).or_else(|| coordinates(raw.get("coordinates")));
    record.currency = currency(raw.get("currencies")).or_else(|| currency(raw.get("currency")));
    record.flag_url = url(raw.get("flag")).or_else(|| flags_object(raw.get("flags")));
    Ok(record)
}

fn normalize_nested(raw: &Map<String, Value>) -> Result<CountryRecord, CountryError> {
    let name = match raw.get("name") {
        Some(Value::Object(names)) => {
            text(names.get("common")).or_else(|| text(names.get("official")))
        }
        other => text(other),
    };

    let mut record = CountryRecord::named(required_name(name)?);
    fill_common(&mut record, raw);
    record.coordinates = coordinates(raw.get("latlng"));
    record.currency = currency(raw.get("currencies"));
    // v3 puts an emoji in `flag`; the image lives under `flags`.
    record.flag_url = flags_object(raw.get("flags"));
    Ok(record)
}

fn normalize_flat(raw: &Map<String, Value>) -> Result<CountryRecord, CountryError> {
    let mut record = CountryRecord::named(required_name(text(raw.get("name")))?);
    fill_common(&mut record, raw);
    record.coordinates =
        coordinates(raw.get("coordinates")).or_else(|| coordinates(raw.get("latlng")));
    record.currency = currency(raw.get("currency")).or_else(|| currency(raw.get("currencies")));
    record.flag_url = url(raw.get("flag")).or_else(|| flags_object(raw.get("flags")));
    Ok(record)
}

/// Fields whose key and shape agree across every known source.
fn fill_common(record: &mut CountryRecord, raw: &Map<String, Value>) {
    record.capital = text(raw.get("capital"));
    record.region = text(raw.get("region"));
    record.subregion = text(raw.get("subregion"));
    record.population = count(raw.get("population"));
    record.area = measure(raw.get("area"));
    record.borders = string_list(raw.get("borders"));
    record.timezones = string_list(raw.get("timezones"));
    record.languages = languages(raw.get("languages"));
}

fn required_name(name: Option<String>) -> Result<String, CountryError> {
    name.ok_or_else(|| CountryError::MalformedRecord("missing or empty name".to_string()))
}

/// A non-empty trimmed string, or the first one in a list.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Array(items) => items.iter().find_map(|item| text(Some(item))),
        _ => None,
    }
}

/// A non-negative whole number. Fractions are truncated.
fn count(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    value
        .as_u64()
        .or_else(|| measure(Some(value)).map(|n| n as u64))
}

/// A finite, non-negative number.
fn measure(value: Option<&Value>) -> Option<f64> {
    value?.as_f64().filter(|n| n.is_finite() && *n >= 0.0)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(|item| text(Some(item))).collect(),
        _ => Vec::new(),
    }
}

fn coordinates(value: Option<&Value>) -> Option<Coordinates> {
    let finite = |v: Option<&Value>| v?.as_f64().filter(|n| n.is_finite());

    match value? {
        Value::Array(pair) if pair.len() >= 2 => {
            Some(Coordinates::new(finite(pair.first())?, finite(pair.get(1))?))
        }
        Value::Object(map) => {
            let latitude = finite(map.get("latitude")).or_else(|| finite(map.get("lat")))?;
            let longitude = finite(map.get("longitude"))
                .or_else(|| finite(map.get("lng")))
                .or_else(|| finite(map.get("lon")))?;
            Some(Coordinates::new(latitude, longitude))
        }
        _ => None,
    }
}

/// Currency display string from a list of entries, a keyed map, or plain text.
///
/// Only the first currency is shown.
fn currency(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(_) => text(value),
        Value::Array(entries) => entries.iter().find_map(|entry| match entry {
            Value::Object(fields) => currency_label(
                text(fields.get("name")),
                text(fields.get("code")),
            ),
            other => text(Some(other)),
        }),
        Value::Object(by_code) => by_code.iter().find_map(|(code, entry)| {
            let name = text(entry.get("name"));
            let code = text(entry.get("code")).or_else(|| {
                let code = code.trim();
                (!code.is_empty()).then(|| code.to_string())
            });
            currency_label(name, code)
        }),
        _ => None,
    }
}

fn currency_label(name: Option<String>, code: Option<String>) -> Option<String> {
    match (name, code) {
        (Some(name), Some(code)) => Some(format!("{} ({})", name, code)),
        (Some(name), None) => Some(name),
        (None, Some(code)) => Some(code),
        (None, None) => None,
    }
}

/// Language display names from structured entries, plain strings, or a keyed map.
fn languages(value: Option<&Value>) -> Vec<String> {
    let entry_name = |entry: &Value| match entry {
        Value::Object(fields) => text(fields.get("name")),
        other => text(Some(other)),
    };

    match value {
        Some(Value::Array(entries)) => entries.iter().filter_map(entry_name).collect(),
        Some(Value::Object(by_code)) => by_code.values().filter_map(entry_name).collect(),
        Some(Value::String(_)) => text(value).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// Any non-empty string; relative paths are kept as sent.
fn url(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(_) => text(value),
        _ => None,
    }
}

fn flags_object(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Object(map) => url(map.get("svg")).or_else(|| url(map.get("png"))),
        other => url(Some(other)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
