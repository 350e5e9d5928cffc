use crate::config::FetcherConfig;
use crate::models::{league_url, LeagueRequest};
use league_report::LeaguePayload;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("League API returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Scoreboard payload has no schedule list")]
    MissingSchedule,

    #[error("Invalid fetcher configuration: {0}")]
    InvalidConfig(String),
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Reads one league's scoreboard, team list and boxscore from the ESPN API.
///
/// One request per read, no retry. Private leagues need both cookies configured.
pub struct EspnFetcher {
    client: Client,
    url: String,
}

impl EspnFetcher {
    pub fn new(config: &FetcherConfig) -> FetchResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = config.espn.cookie_header() {
            let value = HeaderValue::from_str(&cookie)
                .map_err(|e| FetchError::InvalidConfig(format!("cookie header: {}", e)))?;
            headers.insert(COOKIE, value);
        } else if config.espn.espn_s2.is_some() || config.espn.swid.is_some() {
            warn!("Only one of espn_s2 and SWID is set; sending requests without cookies");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .user_agent(config.http.user_agent.clone())
            .default_headers(headers)
            .build()?;

        let url = league_url(
            &config.espn.base_url,
            config.espn.resolved_season(),
            &config.espn.league_id,
        );
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn get(&self, request: &LeagueRequest) -> FetchResult<Value> {
        debug!("GET {} {:?}", self.url, request.query());

        let response = self.client.get(&self.url).query(&request.query()).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url: self.url.clone(),
            });
        }

        Ok(response.json().await?)
    }

    /// Scores for `week`; fails when the payload carries no `schedule`
    pub async fn fetch_scoreboard(&self, week: u32) -> FetchResult<Value> {
        let scoreboard = self.get(&LeagueRequest::scoreboard(week)).await?;
        ensure_schedule(scoreboard)
    }

    pub async fn fetch_teams(&self) -> FetchResult<Value> {
        let payload = self.get(&LeagueRequest::teams()).await?;
        Ok(payload.get("teams").cloned().unwrap_or(Value::Array(Vec::new())))
    }

    pub async fn fetch_boxscore(&self, week: u32) -> FetchResult<Value> {
        self.get(&LeagueRequest::boxscore(week)).await
    }

    /// Everything the report needs for one week.
    ///
    /// Only the scoreboard is required. A failed team list or boxscore read is logged
    /// and left out, which the report handles as missing data.
    pub async fn fetch_week(&self, week: u32) -> FetchResult<LeaguePayload> {
        let scoreboard = self.fetch_scoreboard(week).await?;
        let mut payload = LeaguePayload::new(scoreboard);

        if !has_teams(&payload.scoreboard) {
            match self.fetch_teams().await {
                Ok(teams) => payload = payload.with_teams(teams),
                Err(e) => warn!("Failed to fetch team list for week {}: {}", week, e),
            }
        }

        match self.fetch_boxscore(week).await {
            Ok(boxscore) => payload = payload.with_boxscore(boxscore),
            Err(e) => warn!("Failed to fetch boxscore for week {}: {}", week, e),
        }

        info!(
            "Fetched week {}: teams={}, boxscore={}",
            week,
            has_teams(&payload.scoreboard) || payload.teams.is_some(),
            payload.boxscore.is_some()
        );
        Ok(payload)
    }
}

fn ensure_schedule(scoreboard: Value) -> FetchResult<Value> {
    match scoreboard.get("schedule") {
        Some(Value::Array(_)) => Ok(scoreboard),
        _ => Err(FetchError::MissingSchedule),
    }
}

fn has_teams(scoreboard: &Value) -> bool {
    scoreboard.get("teams").and_then(Value::as_array).is_some_and(|teams| !teams.is_empty())
}
