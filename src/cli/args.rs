//! Command line configuration
//!
//! Every argument is optional: `moodlog` with no arguments reads and
//! writes `mental_health_log.csv` in the current directory.

use clap::{crate_version, App, Arg, ArgMatches};

pub const DEFAULT_JOURNAL: &str = "mental_health_log.csv";
pub const DEFAULT_CHART: &str = "stress_trend.svg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// journal file, read at startup and rewritten after every new entry
    pub journal: String,
    /// where the trend chart is saved
    pub chart: String,
    /// number of `-v` flags
    pub verbosity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            journal: DEFAULT_JOURNAL.to_string(),
            chart: DEFAULT_CHART.to_string(),
            verbosity: 0,
        }
    }
}

fn app() -> App<'static, 'static> {
    App::new("moodlog")
        .version(crate_version!())
        .about("Daily mental health journal with weekly stress trends")
        .arg(
            Arg::with_name("FILE")
                .help("Journal file to read and update")
                .index(1),
        )
        .arg(
            Arg::with_name("chart")
                .short("c")
                .long("chart")
                .value_name("SVG")
                .takes_value(true)
                .help("Where to save the stress trend chart"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more details on stderr (repeat for more)"),
        )
}

impl Config {
    pub fn from_args() -> Self {
        Self::from_matches(&app().get_matches())
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let default = Self::default();
        Self {
            journal: matches
                .value_of("FILE")
                .map(String::from)
                .unwrap_or(default.journal),
            chart: matches
                .value_of("chart")
                .map(String::from)
                .unwrap_or(default.chart),
            verbosity: matches.occurrences_of("verbose"),
        }
    }

    /// Maximum level of the diagnostics written to stderr
    pub fn log_level(&self) -> tracing::Level {
        match self.verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}
