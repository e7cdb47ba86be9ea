//! Country explorer.
//!
//! Fetches the country list once, then prints the countries matching a
//! search text, region, and population bucket. With `--interactive` the
//! filters can be changed line by line against the same list.

mod command;
mod config;
mod render;
mod session;

use std::time::Duration;

use clap::Parser;
use country_core::{DisplayPolicy, ExplorerState, FilterCriteria, PopulationBucket, SearchScope};
use country_source::{initialize, HttpCountrySource};
use tokio::io::BufReader;
use tracing::info;

use crate::config::{Config, OutputFormat};
use crate::render::{render_state, RenderSettings};

#[derive(Debug, Parser)]
#[command(name = "country-explorer")]
#[command(about = "Search and filter the world's countries")]
struct Args {
    /// Case-insensitive text matched against name, region, and subregion
    #[arg(long, short, default_value = "")]
    search: String,

    /// Exact region: Africa, Americas, Asia, Europe, or Oceania
    #[arg(long, short, default_value = "")]
    region: String,

    /// Population bucket: small (<1M), medium (1M-50M), or large (>50M)
    #[arg(long, short)]
    population: Option<PopulationBucket>,

    /// Unfiltered view: show-all or require-filter. Falls back to COUNTRY_DISPLAY_POLICY.
    #[arg(long)]
    policy: Option<DisplayPolicy>,

    /// Search fields: all or name. Falls back to COUNTRY_SEARCH_SCOPE.
    #[arg(long)]
    scope: Option<SearchScope>,

    /// Output format: cards or json. Falls back to COUNTRY_OUTPUT_FORMAT.
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Country list endpoint. Falls back to COUNTRY_SOURCE_URL.
    #[arg(long)]
    url: Option<String>,

    /// Request timeout in seconds. Falls back to COUNTRY_SOURCE_TIMEOUT_SECS.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Read filter commands from stdin after the first render
    #[arg(long, short)]
    interactive: bool,
}

impl Args {
    /// Command-line flags take precedence over the environment.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if let Some(scope) = self.scope {
            config.scope = scope;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(url) = &self.url {
            config.source.url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.source.timeout = Duration::from_secs(secs);
        }
        config
    }

    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.search.as_str(), self.region.as_str(), self.population)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays clean for results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("country_explorer=info".parse()?)
                .add_directive("country_source=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = args.apply(Config::from_env()?);
    let settings = RenderSettings::from(&config);

    info!(
        url = %config.source.url,
        policy = %config.policy,
        format = %config.format,
        "Starting country explorer"
    );

    let source = HttpCountrySource::new(config.source)?;

    let criteria = args.criteria();
    session::warn_unknown_region(criteria.region());

    let state = initialize(ExplorerState::with_criteria(criteria), &source).await;

    let state = if args.interactive {
        let stdin = BufReader::new(tokio::io::stdin());
        session::run(state, &settings, stdin, &mut std::io::stdout()).await?
    } else {
        println!("{}", render_state(&state, &settings)?);
        state
    };

    // Both modes exit non-zero when there was nothing to explore
    if state.status().error().is_some() {
        std::process::exit(1);
    }

    Ok(())
}
