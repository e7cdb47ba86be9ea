//! Country record model and filter pipeline.
//!
//! This crate holds the pure, synchronous part of the country explorer:
//!
//! - [`normalize_record`] / [`BaseList::from_payload`] - turn heterogeneous
//!   source records into canonical [`CountryRecord`]s
//! - [`dedupe_by_name`] - keep the first record per name
//! - [`matches_search`], [`matches_region`], [`matches_population`] - the predicate bank
//! - [`compute_visible_list`] / [`is_active_filter`] - the filter pipeline
//! - [`ExplorerState`] - the fetch lifecycle and criteria as immutable snapshots
//! - [`CountryCard`] - display strings with `N/A` placeholders
//!
//! # Example
//!
//! ```rust
//! use country_core::{compute_visible_list, BaseList, FilterCriteria, PopulationBucket};
//! use serde_json::json;
//!
//! let built = BaseList::from_payload(json!([
//!     {"name": "France", "region": "Europe", "population": 67000000},
//!     {"name": "Palau", "region": "Oceania", "population": 18000},
//! ]))
//! .unwrap();
//!
//! let criteria = FilterCriteria::new("", "", Some(PopulationBucket::Large));
//! let visible = compute_visible_list(&built.base, &criteria);
//! assert_eq!(visible[0].name, "France");
//! ```

mod card;
mod dedupe;
mod error;
mod normalize;
mod pipeline;
mod predicate;
mod record;
mod state;

pub use card::{group_thousands, CountryCard, NOT_AVAILABLE, NO_RESULTS_MESSAGE};
pub use dedupe::{dedupe_by_name, dedupe_report, DedupReport};
pub use error::CountryError;
pub use normalize::{
    extract_records, normalize_batch, normalize_record, NormalizedBatch, RecordShape,
    RejectedRecord,
};
pub use pipeline::{
    compute_visible_list, compute_visible_list_with, is_active_filter, BaseList, BuiltBaseList,
    DisplayPolicy, PipelineOutput,
};
pub use predicate::{
    matches_name, matches_population, matches_region, matches_search, matches_search_in,
    SearchScope,
};
pub use record::{
    Coordinates, CountryRecord, FilterCriteria, ParseBucketError, PopulationBucket,
    KNOWN_REGIONS, MEDIUM_POPULATION_LIMIT, SMALL_POPULATION_LIMIT,
};
pub use state::{ExplorerState, FetchStatus, StateEvent};
