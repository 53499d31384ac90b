use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use fetchdeck_core::OverlapPolicy;
use log::LevelFilter;

use crate::platform::logging::LogDestination;

/// Fetch lesson data from the placeholder, geocoding and weather APIs.
#[derive(Debug, Parser)]
#[command(name = "fetchdeck", version)]
pub struct Cli {
    /// RON config file; missing or malformed files fall back to defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogArg::Terminal, global = true)]
    pub log: LogArg,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LevelFilter,

    /// How overlapping loads on one panel resolve; overrides the config file.
    #[arg(long, value_enum, global = true)]
    pub policy: Option<PolicyArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// List users.
    Users,
    /// List posts.
    Posts,
    /// List the comments on one post.
    Comments {
        #[arg(long)]
        post: u32,
    },
    /// Type a city name one keystroke at a time through the debounced search.
    Search {
        query: String,
        /// Pause between simulated keystrokes. The command prints once the
        /// search for the full query has completed.
        #[arg(long, default_value_t = 120)]
        keystroke_ms: u64,
    },
    /// Current weather and today's summary for a coordinate pair.
    Weather {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Search for a city, then show the weather at the best match.
    City { query: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogArg {
    Off,
    Terminal,
    File,
    Both,
}

impl From<LogArg> for LogDestination {
    fn from(arg: LogArg) -> Self {
        match arg {
            LogArg::Off => LogDestination::Off,
            LogArg::Terminal => LogDestination::Terminal,
            LogArg::File => LogDestination::File,
            LogArg::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    LastWrite,
    LatestRequest,
}

impl From<PolicyArg> for OverlapPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::LastWrite => OverlapPolicy::LastWriteWins,
            PolicyArg::LatestRequest => OverlapPolicy::LatestRequestWins,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn weather_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["fetchdeck", "weather", "--lat", "-33.87", "--lon", "151.21"])
            .unwrap();
        assert_eq!(
            cli.command,
            Command::Weather {
                lat: -33.87,
                lon: 151.21
            }
        );
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "fetchdeck",
            "search",
            "Porto Alegre",
            "--policy",
            "latest-request",
            "--log",
            "off",
        ])
        .unwrap();
        assert_eq!(cli.policy, Some(PolicyArg::LatestRequest));
        assert_eq!(cli.log, LogArg::Off);
        assert_eq!(cli.log_level, LevelFilter::Warn);
        assert_eq!(
            cli.command,
            Command::Search {
                query: "Porto Alegre".to_string(),
                keystroke_ms: 120
            }
        );
    }

    #[test]
    fn comments_require_a_post_id() {
        assert!(Cli::try_parse_from(["fetchdeck", "comments"]).is_err());
    }
}
