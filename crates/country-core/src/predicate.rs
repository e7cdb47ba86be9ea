//! Filter predicates over a single [`CountryRecord`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::{CountryRecord, PopulationBucket};

/// Which record fields the search text is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchScope {
    /// Name, region, and subregion.
    #[default]
    All,
    /// Name only.
    NameOnly,
}

impl FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "name" | "name-only" => Ok(Self::NameOnly),
            other => Err(format!("unknown search scope '{}' (expected all or name)", other)),
        }
    }
}

/// Case-insensitive substring match on name, region, or subregion.
///
/// Empty search text matches everything.
pub fn matches_search(record: &CountryRecord, search_text: &str) -> bool {
    if search_text.is_empty() {
        return true;
    }

    let needle = fold_case(search_text);
    [
        Some(record.name.as_str()),
        record.region.as_deref(),
        record.subregion.as_deref(),
    ]
    .into_iter()
    .any(|field| fold_case(field.unwrap_or_default()).contains(&needle))
}

/// Case-insensitive substring match on the name alone.
pub fn matches_name(record: &CountryRecord, search_text: &str) -> bool {
    search_text.is_empty() || fold_case(&record.name).contains(&fold_case(search_text))
}

/// Case folding that is stable under a change of case of its input.
///
/// Uppercasing first expands characters such as `ß` to `SS`, so `ß`, `SS`
/// and `ss` all fold to the same text.
fn fold_case(text: &str) -> String {
    text.to_uppercase().to_lowercase()
}

/// Dispatch to the search predicate for `scope`.
pub fn matches_search_in(record: &CountryRecord, search_text: &str, scope: SearchScope) -> bool {
    match scope {
        SearchScope::All => matches_search(record, search_text),
        SearchScope::NameOnly => matches_name(record, search_text),
    }
}

/// Exact, case-sensitive region match. Empty region matches everything.
pub fn matches_region(record: &CountryRecord, region: &str) -> bool {
    region.is_empty() || record.region.as_deref() == Some(region)
}

/// Population bucket match. Records without a population match no bucket.
pub fn matches_population(record: &CountryRecord, bucket: Option<PopulationBucket>) -> bool {
    match bucket {
        None => true,
        Some(bucket) => record.population.is_some_and(|p| bucket.contains(p)),
    }
}
