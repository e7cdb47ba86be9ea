//! Country data sources.
//!
//! This crate fetches the raw country payload and feeds it into the
//! `country-core` pipeline. It provides:
//!
//! - [`CountrySource`] - the async data source trait
//! - [`HttpCountrySource`] - a reqwest-backed source for a REST endpoint
//! - [`StaticSource`] - a fixed payload, for tests and replays
//! - [`initialize`] - the one-shot fetch that moves an [`ExplorerState`] to
//!   ready or failed
//!
//! # Example
//!
//! ```no_run
//! use country_core::{ExplorerState, SearchScope};
//! use country_source::{initialize, HttpCountrySource, SourceConfig};
//!
//! # async fn example() -> Result<(), country_source::SourceError> {
//! let source = HttpCountrySource::new(SourceConfig::default())?;
//! let state = initialize(ExplorerState::new(), &source).await;
//!
//! for record in state.output(SearchScope::All).visible {
//!     println!("{}", record.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`ExplorerState`]: country_core::ExplorerState

pub mod client;
pub mod config;
pub mod error;
pub mod loader;
pub mod source;

pub use client::HttpCountrySource;
pub use config::{SourceConfig, COUNTRIES_API_URL, DEFAULT_TIMEOUT_SECS, REST_COUNTRIES_URL};
pub use error::SourceError;
pub use loader::{initialize, load_base_list};
pub use source::{CountrySource, StaticSource};

// Re-export async_trait for custom sources
pub use async_trait::async_trait;
