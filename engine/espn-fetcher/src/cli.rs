//! # Command Line Interface
//!
//! Flags override whatever the config file and environment provided.

use crate::config::FetcherConfig;
use clap::Parser;
use std::path::PathBuf;

/// Build the weekly fantasy league report
#[derive(Parser, Debug)]
#[command(name = "league-report")]
#[command(about = "Fetch an ESPN fantasy league week and write report.json and subject.txt")]
pub struct Cli {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// League identifier
    #[arg(long)]
    pub league_id: Option<String>,

    /// Season year
    #[arg(long)]
    pub season: Option<i32>,

    /// Week to report on
    #[arg(short, long)]
    pub week: Option<u32>,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also fetch every earlier week for the season challenge overview
    #[arg(long)]
    pub history: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn apply(&self, config: &mut FetcherConfig) {
        if let Some(league_id) = &self.league_id {
            config.espn.league_id = league_id.clone();
        }
        if let Some(season) = self.season {
            config.espn.season = Some(season);
        }
        if let Some(week) = self.week {
            config.espn.week = Some(week);
        }
        if let Some(output) = &self.output {
            config.output.dir = output.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}
