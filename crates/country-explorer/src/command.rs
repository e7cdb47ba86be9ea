//! Interactive command parsing.

use country_core::{ParseBucketError, PopulationBucket, StateEvent, KNOWN_REGIONS};

/// Help text for interactive mode.
pub fn help_text() -> String {
    let buckets: Vec<String> = PopulationBucket::ALL
        .iter()
        .map(|bucket| format!("{} ({})", bucket.as_str(), bucket.label()))
        .collect();

    format!(
        "Commands:
  search <text>         Filter by name, region, or subregion (empty clears)
  region <name>         {} (empty clears)
  population <bucket>   {}, or any
  clear                 Reset all filters
  show                  Print the current results
  help                  Show this help
  quit                  Exit",
        KNOWN_REGIONS.join(", "),
        buckets.join(", ")
    )
}

/// A parsed line of interactive input.
#[derive(Debug, Clone)]
pub enum Command {
    /// Update the session, then print the results.
    Update(StateEvent),
    Show,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error(transparent)]
    Bucket(#[from] ParseBucketError),
}

/// Parse one line of input. Blank lines are treated as `show`.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "" | "show" => Command::Show,
        "search" | "s" => Command::Update(StateEvent::SearchChanged(rest.to_string())),
        "region" | "r" => Command::Update(StateEvent::RegionChanged(rest.to_string())),
        "population" | "p" => {
            Command::Update(StateEvent::BucketChanged(PopulationBucket::parse_optional(rest)?))
        }
        "clear" => Command::Update(StateEvent::CriteriaCleared),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_keeps_inner_spaces() {
        match parse_command("search  united states ") {
            Ok(Command::Update(StateEvent::SearchChanged(text))) => {
                assert_eq!(text, "united states")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_empty_search_clears_text() {
        match parse_command("search") {
            Ok(Command::Update(StateEvent::SearchChanged(text))) => assert!(text.is_empty()),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_region() {
        match parse_command("region Oceania") {
            Ok(Command::Update(StateEvent::RegionChanged(region))) => {
                assert_eq!(region, "Oceania")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_population() {
        assert!(matches!(
            parse_command("population Large"),
            Ok(Command::Update(StateEvent::BucketChanged(Some(PopulationBucket::Large))))
        ));
        assert!(matches!(
            parse_command("p any"),
            Ok(Command::Update(StateEvent::BucketChanged(None)))
        ));
        assert!(matches!(
            parse_command("population huge"),
            Err(CommandError::Bucket(_))
        ));
    }

    #[test]
    fn test_simple_commands() {
        assert!(matches!(
            parse_command("clear"),
            Ok(Command::Update(StateEvent::CriteriaCleared))
        ));
        assert!(matches!(parse_command(""), Ok(Command::Show)));
        assert!(matches!(parse_command("SHOW"), Ok(Command::Show)));
        assert!(matches!(parse_command("help"), Ok(Command::Help)));
        assert!(matches!(parse_command("quit"), Ok(Command::Quit)));
    }

    #[test]
    fn test_help_lists_regions_and_buckets() {
        let help = help_text();
        assert!(help.contains("Africa, Americas, Asia, Europe, Oceania"));
        assert!(help.contains("small (< 1M), medium (1M - 50M), large (> 50M), or any"));
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_command("dance now").unwrap_err();
        assert!(err.to_string().contains("'dance'"));
    }
}
