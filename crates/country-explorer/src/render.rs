//! Text and JSON rendering of explorer state.

use std::fmt::Write as _;

use country_core::{
    CountryCard, DisplayPolicy, ExplorerState, FetchStatus, SearchScope, NO_RESULTS_MESSAGE,
};

use crate::config::{Config, OutputFormat};

/// Shown while the country list is being fetched.
pub const LOADING_MESSAGE: &str = "Loading countries...";

/// Shown under `require-filter` until some criterion is set.
pub const PROMPT_MESSAGE: &str =
    "Enter a search term or choose a region or population to see countries.";

/// The presentation choices for one session.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderSettings {
    pub policy: DisplayPolicy,
    pub scope: SearchScope,
    pub format: OutputFormat,
}

impl From<&Config> for RenderSettings {
    fn from(config: &Config) -> Self {
        Self {
            policy: config.policy,
            scope: config.scope,
            format: config.format,
        }
    }
}

/// Render the current state of a session.
pub fn render_state(
    state: &ExplorerState,
    settings: &RenderSettings,
) -> Result<String, serde_json::Error> {
    let output = state.output(settings.scope);

    match output.status {
        FetchStatus::NotRequested | FetchStatus::Loading => {
            return Ok(LOADING_MESSAGE.to_string());
        }
        FetchStatus::Failed(err) => return Ok(format!("Error: {}", err.message())),
        FetchStatus::Ready => {}
    }

    if !output.should_render(settings.policy) {
        return Ok(PROMPT_MESSAGE.to_string());
    }

    let cards: Vec<CountryCard> = output
        .rendered(settings.policy)
        .iter()
        .map(|record| CountryCard::from_record(record))
        .collect();

    match settings.format {
        OutputFormat::Json => serde_json::to_string_pretty(&cards),
        OutputFormat::Cards if output.is_empty_result(settings.policy) => {
            Ok(NO_RESULTS_MESSAGE.to_string())
        }
        OutputFormat::Cards => Ok(render_cards(&cards)),
    }
}

/// Render cards as indented text blocks separated by blank lines.
pub fn render_cards(cards: &[CountryCard]) -> String {
    let mut out = String::new();

    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", card.name);
        for (label, value) in card.fields() {
            let _ = writeln!(out, "  {:<12} {}", format!("{}:", label), value);
        }
    }

    let noun = if cards.len() == 1 { "country" } else { "countries" };
    let _ = write!(out, "\n{} {}", cards.len(), noun);
    out
}
