//! One-shot loading of the base list.

use country_core::{BaseList, BuiltBaseList, CountryError, ExplorerState, StateEvent};
use tracing::{info, warn};

use crate::error::SourceError;
use crate::source::CountrySource;

/// Fetch the payload once and build the base list from it.
pub async fn load_base_list(source: &dyn CountrySource) -> Result<BuiltBaseList, SourceError> {
    let payload = source.fetch().await?;
    let built = BaseList::from_payload(payload)?;

    info!(
        source = source.name(),
        records = built.base.len(),
        rejected = built.rejected.len(),
        "Loaded country list"
    );

    Ok(built)
}

/// Drive the fetch lifecycle for `state`.
///
/// Fetches only when the state has not requested its base list yet; any other
/// state is returned unchanged. Failures end up in the returned state as a
/// [`CountryError`].
pub async fn initialize(state: ExplorerState, source: &dyn CountrySource) -> ExplorerState {
    if !state.needs_fetch() {
        return state;
    }

    let state = state.apply(StateEvent::FetchStarted);

    match load_base_list(source).await {
        Ok(built) => state.apply(StateEvent::FetchSucceeded {
            base: built.base,
            rejected: built.rejected.len(),
        }),
        Err(e) => {
            warn!("Error fetching countries from {}: {}", source.name(), e);
            state.apply(StateEvent::FetchFailed(CountryError::from(e)))
        }
    }
}
