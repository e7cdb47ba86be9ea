//! The filter pipeline: base list construction and visible-list computation.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::dedupe::dedupe_report;
use crate::error::CountryError;
use crate::normalize::{extract_records, normalize_batch, RejectedRecord};
use crate::predicate::{matches_population, matches_region, matches_search_in, SearchScope};
use crate::record::{CountryRecord, FilterCriteria};
use crate::state::FetchStatus;

/// The normalized, deduplicated records for a session.
///
/// Built once per successful fetch and never modified afterwards. Cloning is
/// cheap; clones share the same records.
#[derive(Debug, Clone)]
pub struct BaseList {
    records: Arc<[CountryRecord]>,
}

/// A base list together with what was discarded while building it.
#[derive(Debug, Clone)]
pub struct BuiltBaseList {
    pub base: BaseList,
    /// Records that failed normalization.
    pub rejected: Vec<RejectedRecord>,
    /// Names whose later occurrences were collapsed.
    pub duplicates: Vec<String>,
}

impl BaseList {
    /// Build a base list from already normalized records, deduplicating by name.
    pub fn new(records: impl IntoIterator<Item = CountryRecord>) -> Self {
        Self {
            records: dedupe_report(records).retained.into(),
        }
    }

    /// Build a base list from a raw source payload.
    ///
    /// Fails only when the payload itself has the wrong shape. Individual
    /// records that cannot be normalized are dropped and reported.
    pub fn from_payload(payload: Value) -> Result<BuiltBaseList, CountryError> {
        let raws = extract_records(payload)?;
        let batch = normalize_batch(&raws);

        for rejected in &batch.rejected {
            warn!("Dropping record {}: {}", rejected.index, rejected.error);
        }

        let report = dedupe_report(batch.records);
        if !report.dropped.is_empty() {
            debug!("Collapsed duplicate names: {:?}", report.dropped);
        }

        info!(
            records = report.retained.len(),
            rejected = batch.rejected.len(),
            duplicates = report.dropped.len(),
            "Built base list"
        );

        Ok(BuiltBaseList {
            base: Self {
                records: report.retained.into(),
            },
            rejected: batch.rejected,
            duplicates: report.dropped,
        })
    }

    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }
}

impl Default for BaseList {
    fn default() -> Self {
        Self {
            records: Arc::from(Vec::new()),
        }
    }
}

impl Deref for BaseList {
    type Target = [CountryRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

/// Records from `base` that satisfy every criterion, in base order.
pub fn compute_visible_list<'a>(
    base: &'a [CountryRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a CountryRecord> {
    compute_visible_list_with(base, criteria, SearchScope::All)
}

/// Like [`compute_visible_list`], with an explicit search scope.
pub fn compute_visible_list_with<'a>(
    base: &'a [CountryRecord],
    criteria: &FilterCriteria,
    scope: SearchScope,
) -> Vec<&'a CountryRecord> {
    let visible: Vec<_> = base
        .iter()
        .filter(|record| {
            matches_search_in(record, criteria.search_text(), scope)
                && matches_region(record, criteria.region())
                && matches_population(record, criteria.bucket())
        })
        .collect();

    debug!("Filtered {} records down to {}", base.len(), visible.len());
    visible
}

/// Whether any filter narrows the list.
pub fn is_active_filter(criteria: &FilterCriteria) -> bool {
    !criteria.search_text().is_empty()
        || !criteria.region().is_empty()
        || criteria.bucket().is_some()
}

/// What to show while no filter is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayPolicy {
    /// Show the full list.
    #[default]
    ShowAll,
    /// Show nothing until the user filters.
    RequireFilter,
}

impl DisplayPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShowAll => "show-all",
            Self::RequireFilter => "require-filter",
        }
    }
}

impl fmt::Display for DisplayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "show-all" | "all" => Ok(Self::ShowAll),
            "require-filter" | "filtered" => Ok(Self::RequireFilter),
            other => Err(format!(
                "unknown display policy '{}' (expected show-all or require-filter)",
                other
            )),
        }
    }
}

/// Everything the presentation layer needs for one render pass.
#[derive(Debug, Clone)]
pub struct PipelineOutput<'a> {
    /// Fetch status, passed through unchanged.
    pub status: &'a FetchStatus,
    /// Records passing the current criteria. Empty unless the base list is ready.
    pub visible: Vec<&'a CountryRecord>,
    pub is_active_filter: bool,
}

impl<'a> PipelineOutput<'a> {
    /// Whether results (or the empty-result message) should be rendered.
    pub fn should_render(&self, policy: DisplayPolicy) -> bool {
        self.status.is_ready()
            && (self.is_active_filter || policy == DisplayPolicy::ShowAll)
    }

    /// Records to render under `policy`.
    pub fn rendered(&self, policy: DisplayPolicy) -> &[&'a CountryRecord] {
        if self.should_render(policy) {
            &self.visible
        } else {
            &[]
        }
    }

    /// Whether to show the "no country found" message.
    pub fn is_empty_result(&self, policy: DisplayPolicy) -> bool {
        self.should_render(policy) && self.visible.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PopulationBucket;
    use serde_json::json;

    fn base() -> BaseList {
        BaseList::new(vec![
            CountryRecord::named("France")
                .with_region("Europe")
                .with_population(67_000_000),
            CountryRecord::named("Palau")
                .with_region("Oceania")
                .with_population(18_000),
        ])
    }

    fn names(records: &[&CountryRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_inactive_criteria_returns_full_list() {
        let criteria = FilterCriteria::default();
        assert!(!is_active_filter(&criteria));
        assert_eq!(names(&compute_visible_list(&base(), &criteria)), vec!["France", "Palau"]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let criteria = FilterCriteria::new("a", "Europe", Some(PopulationBucket::Large));
        assert_eq!(names(&compute_visible_list(&base(), &criteria)), vec!["France"]);

        let criteria = FilterCriteria::new("a", "Europe", Some(PopulationBucket::Small));
        assert!(compute_visible_list(&base(), &criteria).is_empty());
    }

    #[test]
    fn test_empty_base_list() {
        let criteria = FilterCriteria::new("x", "", None);
        assert!(compute_visible_list(&BaseList::default(), &criteria).is_empty());
    }

    #[test]
    fn test_name_only_scope() {
        let criteria = FilterCriteria::new("oceania", "", None);
        assert_eq!(compute_visible_list(&base(), &criteria).len(), 1);
        assert!(compute_visible_list_with(&base(), &criteria, SearchScope::NameOnly).is_empty());
    }

    #[test]
    fn test_is_active_filter() {
        assert!(is_active_filter(&FilterCriteria::new("p", "", None)));
        assert!(is_active_filter(&FilterCriteria::new("", "Asia", None)));
        assert!(is_active_filter(&FilterCriteria::new("", "", Some(PopulationBucket::Small))));
    }

    #[test]
    fn test_base_list_dedupes() {
        let base =
            BaseList::new(vec![CountryRecord::named("Congo"), CountryRecord::named("Congo")]);
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn test_from_payload_reports_drops() {
        let built = BaseList::from_payload(json!({
            "data": [
                {"name": "Congo", "population": 5_500_000},
                {"region": "Africa"},
                {"name": "Congo", "population": 89_000_000}
            ]
        }))
        .unwrap();

        assert_eq!(built.base.len(), 1);
        assert_eq!(built.base[0].population, Some(5_500_000));
        assert_eq!(built.rejected.len(), 1);
        assert_eq!(built.duplicates, vec!["Congo"]);
    }

    #[test]
    fn test_clones_share_records() {
        let base = base();
        let clone = base.clone();
        assert!(std::ptr::eq(base.records().as_ptr(), clone.records().as_ptr()));
    }

    #[test]
    fn test_display_policy() {
        let ready = FetchStatus::Ready;
        let output = PipelineOutput {
            status: &ready,
            visible: Vec::new(),
            is_active_filter: false,
        };

        assert!(output.should_render(DisplayPolicy::ShowAll));
        assert!(output.is_empty_result(DisplayPolicy::ShowAll));
        assert!(!output.should_render(DisplayPolicy::RequireFilter));
        assert!(!output.is_empty_result(DisplayPolicy::RequireFilter));
    }

    #[test]
    fn test_nothing_renders_while_loading() {
        let loading = FetchStatus::Loading;
        let output = PipelineOutput {
            status: &loading,
            visible: Vec::new(),
            is_active_filter: true,
        };

        assert!(!output.should_render(DisplayPolicy::ShowAll));
        assert!(output.rendered(DisplayPolicy::ShowAll).is_empty());
    }

    #[test]
    fn test_parse_display_policy() {
        assert_eq!("show-all".parse::<DisplayPolicy>(), Ok(DisplayPolicy::ShowAll));
        assert_eq!("Require-Filter".parse::<DisplayPolicy>(), Ok(DisplayPolicy::RequireFilter));
        assert!("sometimes".parse::<DisplayPolicy>().is_err());
    }
}
