//! Explorer session state and its single update function.
//!
//! The session moves through `NotRequested -> Loading -> Ready | Failed`
//! exactly once. Every user input produces a new [`ExplorerState`] through
//! [`ExplorerState::apply`]; nothing mutates a snapshot in place.

use tracing::{debug, warn};

use crate::error::CountryError;
use crate::pipeline::{compute_visible_list_with, is_active_filter, BaseList, PipelineOutput};
use crate::predicate::SearchScope;
use crate::record::{FilterCriteria, PopulationBucket};

/// Status of the one-shot fetch of the base list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    NotRequested,
    Loading,
    Ready,
    /// The fetch failed.
    Failed(CountryError),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// The fetch error, if the fetch failed.
    pub fn error(&self) -> Option<&CountryError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Inputs that advance the session.
#[derive(Debug, Clone)]
pub enum StateEvent {
    FetchStarted,
    FetchSucceeded {
        base: BaseList,
        /// Number of records dropped during normalization.
        rejected: usize,
    },
    FetchFailed(CountryError),
    SearchChanged(String),
    RegionChanged(String),
    BucketChanged(Option<PopulationBucket>),
    CriteriaReplaced(FilterCriteria),
    CriteriaCleared,
}

/// Immutable snapshot of an explorer session.
#[derive(Debug, Clone, Default)]
pub struct ExplorerState {
    status: FetchStatus,
    base: BaseList,
    criteria: FilterCriteria,
    rejected: usize,
}

impl ExplorerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with initial criteria.
    pub fn with_criteria(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            ..Self::default()
        }
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn base(&self) -> &BaseList {
        &self.base
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Records dropped during normalization of the fetched payload.
    pub fn rejected_count(&self) -> usize {
        self.rejected
    }

    /// True only before the fetch has been requested.
    pub fn needs_fetch(&self) -> bool {
        matches!(self.status, FetchStatus::NotRequested)
    }

    /// Produce the next snapshot.
    ///
    /// Fetch events that do not fit the current status are ignored, so the
    /// base list can only be set once per session.
    pub fn apply(self, event: StateEvent) -> Self {
        match event {
            StateEvent::FetchStarted => {
                if !self.needs_fetch() {
                    warn!("Ignoring fetch start in state {:?}", self.status);
                    return self;
                }
                Self {
                    status: FetchStatus::Loading,
                    ..self
                }
            }
            StateEvent::FetchSucceeded { base, rejected } => {
                if !self.status.is_loading() {
                    warn!("Ignoring fetch result in state {:?}", self.status);
                    return self;
                }
                debug!("Base list ready with {} records", base.len());
                Self {
                    status: FetchStatus::Ready,
                    base,
                    rejected,
                    ..self
                }
            }
            StateEvent::FetchFailed(err) => {
                if !self.status.is_loading() {
                    warn!("Ignoring fetch failure in state {:?}", self.status);
                    return self;
                }
                Self {
                    status: FetchStatus::Failed(err),
                    ..self
                }
            }
            StateEvent::SearchChanged(text) => {
                let criteria = self.criteria.with_search(text);
                Self { criteria, ..self }
            }
            StateEvent::RegionChanged(region) => {
                let criteria = self.criteria.with_region(region);
                Self { criteria, ..self }
            }
            StateEvent::BucketChanged(bucket) => {
                let criteria = self.criteria.with_bucket(bucket);
                Self { criteria, ..self }
            }
            StateEvent::CriteriaReplaced(criteria) => Self { criteria, ..self },
            StateEvent::CriteriaCleared => Self {
                criteria: FilterCriteria::cleared(),
                ..self
            },
        }
    }

    /// Run the pipeline against the current snapshot.
    ///
    /// The visible list is empty unless the base list is ready.
    pub fn output(&self, scope: SearchScope) -> PipelineOutput<'_> {
        let visible = if self.status.is_ready() {
            compute_visible_list_with(&self.base, &self.criteria, scope)
        } else {
            Vec::new()
        };

        PipelineOutput {
            status: &self.status,
            visible,
            is_active_filter: is_active_filter(&self.criteria),
        }
    }
}
