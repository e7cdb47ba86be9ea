//! Interactive session over line-based input.

use std::io::Write;

use country_core::{ExplorerState, StateEvent, KNOWN_REGIONS};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::command::{help_text, parse_command, Command};
use crate::render::{render_state, RenderSettings};

/// Warn when a region is set that no record can match.
pub fn warn_unknown_region(region: &str) {
    if !region.is_empty() && !KNOWN_REGIONS.contains(&region) {
        warn!(region, "Region is not one of {:?}; nothing will match", KNOWN_REGIONS);
    }
}

/// Read commands from `input` until `quit` or end of input, printing results to `out`.
///
/// Returns the final state. A failed fetch is reported once and no input is
/// read, since there is no base list to filter.
pub async fn run<R, W>(
    mut state: ExplorerState,
    settings: &RenderSettings,
    input: R,
    out: &mut W,
) -> Result<ExplorerState, Box<dyn std::error::Error>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    writeln!(out, "{}", render_state(&state, settings)?)?;
    if state.status().error().is_some() {
        return Ok(state);
    }
    writeln!(out, "Type 'help' for commands.")?;

    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(out, "{}", help_text())?,
            Command::Show => writeln!(out, "{}", render_state(&state, settings)?)?,
            Command::Update(event) => {
                if let StateEvent::RegionChanged(region) = &event {
                    warn_unknown_region(region);
                }
                debug!(?event, "Applying command");
                state = state.apply(event);
                writeln!(out, "{}", render_state(&state, settings)?)?;
            }
        }
        out.flush()?;
    }

    Ok(state)
}
