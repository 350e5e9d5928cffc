//! ESPN Fetcher
//!
//! Reads one ESPN fantasy football league week (scoreboard, team list, boxscore),
//! hands the payloads to `league-report`, and writes the result to disk.

pub mod cli;
pub mod config;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod output;

pub use cli::Cli;
pub use config::FetcherConfig;
pub use fetcher::{EspnFetcher, FetchError};
pub use models::{LeagueRequest, LeagueView};
pub use output::write_report;
