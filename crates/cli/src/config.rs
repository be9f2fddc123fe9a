//! Binary configuration read from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use movement_core::Coords;

/// How the compiled plan is printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    pub scenario: PathBuf,
    /// Replaces the rules file named by the scenario.
    pub rules: Option<PathBuf>,
    pub output: OutputFormat,
    /// Routes the path here after the scenario's own intents.
    pub destination: Option<Coords>,
    pub search_time: Duration,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            scenario: PathBuf::from("scenario.ron"),
            rules: None,
            output: OutputFormat::Text,
            destination: None,
            search_time: Duration::from_millis(500),
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MOVEC_SCENARIO` - Scenario RON file (default: scenario.ron)
    /// - `MOVEC_RULES` - Rules TOML file overriding the scenario's (optional)
    /// - `MOVEC_OUTPUT` - `text` or `json` (default: text)
    /// - `MOVEC_DESTINATION` - `x,y` hex to route to (optional)
    /// - `MOVEC_SEARCH_MS` - Route search time limit in milliseconds (default: 500)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("MOVEC_SCENARIO") {
            config.scenario = PathBuf::from(path);
        }
        config.rules = env::var("MOVEC_RULES").ok().map(PathBuf::from);

        if let Some(output) = read_env::<OutputFormat>("MOVEC_OUTPUT") {
            config.output = output;
        }
        config.destination = env::var("MOVEC_DESTINATION")
            .ok()
            .and_then(|value| parse_coords(&value));
        if let Some(millis) = read_env::<u64>("MOVEC_SEARCH_MS") {
            config.search_time = Duration::from_millis(millis.max(1));
        }

        config
    }
}

/// Parses `x,y` into coordinates.
pub fn parse_coords(value: &str) -> Option<Coords> {
    let (x, y) = value.split_once(',')?;
    Some(Coords::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
