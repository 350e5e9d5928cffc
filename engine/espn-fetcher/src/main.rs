use anyhow::Context;
use clap::Parser;
use espn_fetcher::{logging, write_report, Cli, EspnFetcher, FetcherConfig};
use league_report::{build_report, LeaguePayload};
use std::collections::BTreeMap;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = FetcherConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;
    logging::initialize_logging(&config.logging)?;

    let season = config.espn.resolved_season();
    let week = config.espn.resolved_week();
    info!("Building report for league {} season {} week {}", config.espn.league_id, season, week);

    let fetcher = EspnFetcher::new(&config).context("Failed to create ESPN client")?;
    let current = fetcher
        .fetch_week(week)
        .await
        .with_context(|| format!("Failed to fetch week {} from {}", week, fetcher.url()))?;

    let mut history: BTreeMap<u32, LeaguePayload> = BTreeMap::new();
    if cli.history {
        for past in 1..week {
            match fetcher.fetch_week(past).await {
                Ok(payload) => {
                    history.insert(past, payload);
                }
                Err(e) => warn!("Skipping week {} in season overview: {}", past, e),
            }
        }
    }

    let report = build_report(week, &current, &history);
    let artifacts = write_report(&config.output.dir, &report)?;

    println!("{}", artifacts.report.display());
    Ok(())
}
