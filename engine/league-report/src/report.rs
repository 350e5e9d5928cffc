//! Report assembly: runs the derivation pipeline over one league snapshot

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::challenges::{compute_challenge, title_for_week, SEASON_WEEKS};
use crate::matchups::{schedule_of, summarize};
use crate::narrative::compose_narrative;
use crate::rankings::compute_rankings;
use crate::roster::build_week_rows;
use crate::standings::extract_standings;
use crate::teams::{team_list, TeamDirectory};
use crate::types::{ChallengeResult, Matchup, PowerRankingRow, StandingsRow, TeamWeekRow};

/// Raw upstream payloads for one week, as fetched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaguePayload {
    /// Must expose a `schedule` list and usually a `teams` list
    pub scoreboard: Value,
    /// Used when the scoreboard carries no teams
    pub teams: Option<Value>,
    /// Absent when the league hides roster detail
    pub boxscore: Option<Value>,
}

impl LeaguePayload {
    pub fn new(scoreboard: Value) -> Self {
        Self { scoreboard, teams: None, boxscore: None }
    }

    pub fn with_teams(mut self, teams: Value) -> Self {
        self.teams = Some(teams);
        self
    }

    pub fn with_boxscore(mut self, boxscore: Value) -> Self {
        self.boxscore = Some(boxscore);
        self
    }
}

/// Normalized structures derived from one snapshot for one week
#[derive(Debug, Clone, PartialEq)]
pub struct WeekSummary {
    pub week: u32,
    pub matchups: Vec<Matchup>,
    pub standings: Vec<StandingsRow>,
    pub week_rows: Option<Vec<TeamWeekRow>>,
}

impl WeekSummary {
    /// Directory first, then the three independent derivations.
    pub fn derive(week: u32, payload: &LeaguePayload) -> Self {
        let raw_teams = team_list(&payload.scoreboard, payload.teams.as_ref());
        let directory = raw_teams.map(TeamDirectory::resolve_names).unwrap_or_default();
        if directory.is_empty() {
            warn!("No team list for week {}; team names will be synthesized", week);
        } else {
            debug!("Resolved {} team names for week {}", directory.len(), week);
        }

        let schedule = schedule_of(&payload.scoreboard).unwrap_or(&[]);
        let matchups = summarize(schedule, week, &directory);
        let standings = raw_teams
            .and_then(Value::as_array)
            .map(|teams| extract_standings(teams))
            .unwrap_or_default();
        let week_rows = build_week_rows(payload.boxscore.as_ref(), &directory, week);

        Self { week, matchups, standings, week_rows }
    }

    pub fn challenge(&self) -> Option<ChallengeResult> {
        compute_challenge(self.week, &self.matchups, &self.standings, self.week_rows.as_deref())
    }
}

/// Where a table week stands for the season overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum ChallengeStatus {
    Awarded(ChallengeResult),
    /// Played, but the rule found no winner or the week's data was not supplied
    NoWinner,
    #[serde(rename = "tbd")]
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonChallenge {
    pub week: u32,
    pub title: String,
    #[serde(flatten)]
    pub status: ChallengeStatus,
}

/// Everything a renderer needs for the weekly email; no markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub week: u32,
    pub subject: String,
    pub matchups: Vec<Matchup>,
    pub standings: Vec<StandingsRow>,
    pub challenge: Option<ChallengeResult>,
    pub next_challenge: Option<String>,
    pub season_challenges: Vec<SeasonChallenge>,
    pub power_rankings: Vec<PowerRankingRow>,
    pub narrative: String,
}

pub fn subject_for_week(week: u32) -> String {
    format!("Fantasy Week {} Results & Notes", week)
}

/// One entry per table week. Past weeks come from `history`, the current week
/// from `current`, later weeks are upcoming.
pub fn season_challenges(
    week: u32,
    current: Option<&ChallengeResult>,
    history: &BTreeMap<u32, LeaguePayload>,
) -> Vec<SeasonChallenge> {
    (1..=SEASON_WEEKS)
        .filter_map(|table_week| {
            let title = title_for_week(table_week)?;
            let status = if table_week > week {
                ChallengeStatus::Upcoming
            } else {
                let result = if table_week == week {
                    current.cloned()
                } else {
                    history
                        .get(&table_week)
                        .and_then(|payload| WeekSummary::derive(table_week, payload).challenge())
                };
                result.map_or(ChallengeStatus::NoWinner, ChallengeStatus::Awarded)
            };
            Some(SeasonChallenge { week: table_week, title: title.to_string(), status })
        })
        .collect()
}

/// Build the full report for `week`.
///
/// Pure and deterministic: the same payloads always give the same report.
pub fn build_report(
    week: u32,
    current: &LeaguePayload,
    history: &BTreeMap<u32, LeaguePayload>,
) -> Report {
    let summary = WeekSummary::derive(week, current);
    if summary.matchups.is_empty() {
        warn!("No matchups found for week {}. Check the week, season, or league cookies.", week);
    }

    let challenge = summary.challenge();
    let season_challenges = season_challenges(week, challenge.as_ref(), history);
    let power_rankings = compute_rankings(&summary.standings);
    let narrative = compose_narrative(&summary.matchups, week, summary.week_rows.as_deref());

    info!(
        "Built week {} report: {} matchups, {} teams, challenge winner {:?}",
        week,
        summary.matchups.len(),
        summary.standings.len(),
        challenge.as_ref().map(|c| c.winning_team_name.as_str())
    );

    Report {
        week,
        subject: subject_for_week(week),
        next_challenge: week.checked_add(1).and_then(title_for_week).map(str::to_string),
        challenge,
        season_challenges,
        power_rankings,
        narrative,
        matchups: summary.matchups,
        standings: summary.standings,
    }
}
