//! Roster aggregator: per-side starter/bench player lines for a week

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::EntryError;
use crate::json;
use crate::matchups::{self, schedule_of};
use crate::teams::TeamDirectory;
use crate::types::{LineupSlot, PlayerEntry, Position, Side, TeamWeekRow};

/// `statSourceId` of actual results
pub const ACTUAL_STAT_SOURCE: i64 = 0;
/// `statSourceId` of projections
pub const PROJECTED_STAT_SOURCE: i64 = 1;

/// Roster nesting conventions, tried in order
pub const ROSTER_KEYS: [&str; 2] = ["rosterForCurrentScoringPeriod", "rosterForMatchupPeriod"];

/// Roster entries of one matchup side; empty when neither nesting is present.
pub fn roster_entries(side: &Value) -> &[Value] {
    ROSTER_KEYS
        .iter()
        .find_map(|key| json::array_at(side, &[key, "entries"]))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Sources of a player's actual points, in resolution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointsSource {
    EntryAppliedStatTotal,
    EntryAppliedTotal,
    PoolAppliedStatTotal,
    PoolAppliedTotal,
    WeekStatRecord,
    WeekStatBreakdown,
}

impl PointsSource {
    pub const ORDER: [PointsSource; 6] = [
        PointsSource::EntryAppliedStatTotal,
        PointsSource::EntryAppliedTotal,
        PointsSource::PoolAppliedStatTotal,
        PointsSource::PoolAppliedTotal,
        PointsSource::WeekStatRecord,
        PointsSource::WeekStatBreakdown,
    ];

    pub fn extract(self, entry: &Value, week: u32) -> Option<f64> {
        match self {
            PointsSource::EntryAppliedStatTotal => json::number_at(entry, &["appliedStatTotal"]),
            PointsSource::EntryAppliedTotal => json::number_at(entry, &["appliedTotal"]),
            PointsSource::PoolAppliedStatTotal => {
                json::number_at(entry, &["playerPoolEntry", "appliedStatTotal"])
            }
            PointsSource::PoolAppliedTotal => {
                json::number_at(entry, &["playerPoolEntry", "appliedTotal"])
            }
            PointsSource::WeekStatRecord => stat_record(entry, week, ACTUAL_STAT_SOURCE)
                .and_then(|record| json::number_at(record, &["appliedTotal"])),
            PointsSource::WeekStatBreakdown => {
                stat_record(entry, week, ACTUAL_STAT_SOURCE).and_then(breakdown_total)
            }
        }
    }
}

/// Sources of a player's projection, in resolution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionSource {
    WeekStatRecord,
    WeekStatBreakdown,
    EntryProjectedPoints,
    PoolProjectedTotal,
}

impl ProjectionSource {
    pub const ORDER: [ProjectionSource; 4] = [
        ProjectionSource::WeekStatRecord,
        ProjectionSource::WeekStatBreakdown,
        ProjectionSource::EntryProjectedPoints,
        ProjectionSource::PoolProjectedTotal,
    ];

    pub fn extract(self, entry: &Value, week: u32) -> Option<f64> {
        match self {
            ProjectionSource::WeekStatRecord => stat_record(entry, week, PROJECTED_STAT_SOURCE)
                .and_then(|record| json::number_at(record, &["appliedTotal"])),
            ProjectionSource::WeekStatBreakdown => {
                stat_record(entry, week, PROJECTED_STAT_SOURCE).and_then(breakdown_total)
            }
            ProjectionSource::EntryProjectedPoints => json::number_at(entry, &["projectedPoints"]),
            ProjectionSource::PoolProjectedTotal => {
                json::number_at(entry, &["playerPoolEntry", "projectedAppliedTotal"])
            }
        }
    }
}

fn player_of(entry: &Value) -> Option<&Value> {
    json::path(entry, &["playerPoolEntry", "player"]).or_else(|| json::path(entry, &["player"]))
}

/// Per-week stat record of the given source
fn stat_record(entry: &Value, week: u32, source: i64) -> Option<&Value> {
    player_of(entry)
        .and_then(|player| json::array_at(player, &["stats"]))?
        .iter()
        .find(|record| {
            json::integer_at(record, &["scoringPeriodId"]) == Some(i64::from(week))
                && json::integer_at(record, &["statSourceId"]) == Some(source)
        })
}

/// Sum of the individual stat contributions of a stat record
fn breakdown_total(record: &Value) -> Option<f64> {
    json::path(record, &["appliedStats"])
        .and_then(Value::as_object)
        .map(|stats| stats.values().filter_map(json::number).sum())
}

pub fn player_points(entry: &Value, week: u32) -> f64 {
    PointsSource::ORDER.iter().find_map(|source| source.extract(entry, week)).unwrap_or(0.0)
}

/// Projection, or `None` when the upstream carries none
pub fn player_projection(entry: &Value, week: u32) -> Option<f64> {
    ProjectionSource::ORDER.iter().find_map(|source| source.extract(entry, week))
}

fn player_name(entry: &Value) -> String {
    let player = player_of(entry);
    if let Some(full) = player.and_then(|p| json::text_at(p, &["fullName"])) {
        return full.to_string();
    }
    let parts: Vec<&str> = player
        .map(|p| [json::text_at(p, &["firstName"]), json::text_at(p, &["lastName"])])
        .into_iter()
        .flatten()
        .flatten()
        .collect();
    if !parts.is_empty() {
        return parts.join(" ");
    }
    let id = json::integer_at(entry, &["playerId"])
        .or_else(|| player.and_then(|p| json::integer_at(p, &["id"])));
    match id {
        Some(id) => format!("Player {}", id),
        None => "Unknown Player".to_string(),
    }
}

/// Parse one roster entry into a player line for `week`.
pub fn parse_entry(entry: &Value, week: u32) -> Result<PlayerEntry, EntryError> {
    if !entry.is_object() {
        return Err(EntryError::NotAnObject);
    }
    let name = player_name(entry);
    let slot = json::integer_at(entry, &["lineupSlotId"])
        .and_then(|id| u32::try_from(id).ok())
        .ok_or_else(|| EntryError::MissingLineupSlot { player: name.clone() })?;
    let position = player_of(entry)
        .and_then(|p| json::integer_at(p, &["defaultPositionId"]))
        .and_then(|id| u32::try_from(id).ok())
        .map(Position::from)
        .unwrap_or(Position::Other(0));

    Ok(PlayerEntry {
        name,
        position,
        lineup_slot: LineupSlot::from(slot),
        points: player_points(entry, week),
        projected_points: player_projection(entry, week),
    })
}

/// Split a side's roster into (starters, bench), skipping malformed entries.
pub fn partition_roster(entries: &[Value], week: u32) -> (Vec<PlayerEntry>, Vec<PlayerEntry>) {
    let mut starters = Vec::new();
    let mut bench = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        match parse_entry(entry, week) {
            Ok(player) if player.lineup_slot.is_bench() => bench.push(player),
            Ok(player) => starters.push(player),
            Err(e) => warn!("Skipping roster entry {} for week {}: {}", index, week, e),
        }
    }
    (starters, bench)
}

/// Sum of starter projections; `None` unless at least one starter has a projection.
pub fn projected_total(starters: &[PlayerEntry]) -> Option<f64> {
    starters
        .iter()
        .filter_map(|p| p.projected_points)
        .fold(None, |acc, points| Some(acc.unwrap_or(0.0) + points))
}

/// Build two rows (home, away) per schedule entry for `week`.
///
/// Returns `None` when no boxscore-shaped payload is available, which is distinct from
/// an empty list for a payload that simply has no entries this week.
pub fn build_week_rows(
    boxscore: Option<&Value>,
    teams: &TeamDirectory,
    week: u32,
) -> Option<Vec<TeamWeekRow>> {
    let schedule = boxscore.and_then(schedule_of)?;

    let mut rows = Vec::new();
    for entry in schedule.iter().filter(|entry| matchups::is_week_entry(entry, week)) {
        let Some(matchup) = matchups::summarize_entry(entry, teams) else {
            continue;
        };
        for side in Side::BOTH {
            let opponent = match side {
                Side::Home => Side::Away,
                Side::Away => Side::Home,
            };
            let raw_side = &entry[side.key()];
            let (starters, bench) = partition_roster(roster_entries(raw_side), week);
            let (team_name, points) = matchup.side(side);
            let (opponent_name, opponent_points) = matchup.side(opponent);
            let team_id = match side {
                Side::Home => matchup.home_team_id,
                Side::Away => matchup.away_team_id,
            };

            rows.push(TeamWeekRow {
                team_id,
                team_name: team_name.to_string(),
                points,
                opponent_name: opponent_name.to_string(),
                opponent_points,
                won: matchup.winning_side() == Some(side),
                absolute_margin: matchup.absolute_margin,
                projected_starter_total: projected_total(&starters),
                starters,
                bench,
            });
        }
    }

    debug!("Built {} team week rows for week {}", rows.len(), week);
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player(name: &str, slot: u32, position: u32, points: f64, projection: Option<f64>) -> Value {
        let mut stats =
            vec![json!({"scoringPeriodId": 4, "statSourceId": 0, "appliedTotal": points})];
        if let Some(p) = projection {
            stats.push(json!({"scoringPeriodId": 4, "statSourceId": 1, "appliedTotal": p}));
        }
        json!({
            "lineupSlotId": slot,
            "playerPoolEntry": {"player": {
                "fullName": name,
                "defaultPositionId": position,
                "stats": stats,
            }},
        })
    }

    fn boxscore() -> Value {
        json!({"schedule": [
            {"matchupPeriodId": 3, "home": {"teamId": 1}, "away": {"teamId": 2}},
            {
                "matchupPeriodId": 4,
                "winner": "AWAY",
                "home": {
                    "teamId": 1,
                    "totalPoints": 95.5,
                    "rosterForCurrentScoringPeriod": {"entries": [
                        player("Quinn", 0, 1, 20.5, Some(18.0)),
                        player("Benchy", 20, 2, 14.0, Some(9.0)),
                        player("Hurt", 21, 3, 0.0, None),
                        player("Flexy", 23, 3, 11.0, None),
                    ]},
                },
                "away": {
                    "teamId": 2,
                    "totalPoints": 101.0,
                    "rosterForMatchupPeriod": {"entries": [
                        player("Runner", 2, 2, 30.0, None),
                        "garbage",
                        {"playerPoolEntry": {"player": {"fullName": "No Slot"}}},
                    ]},
                },
            },
        ]})
    }

    fn directory() -> TeamDirectory {
        TeamDirectory::resolve_names(&json!([{"id": 1, "name": "Ones"}, {"id": 2, "name": "Twos"}]))
    }

    #[test]
    fn test_rows_per_side() {
        let rows = build_week_rows(Some(&boxscore()), &directory(), 4).unwrap();
        assert_eq!(rows.len(), 2);

        let home = &rows[0];
        assert_eq!(home.team_name, "Ones");
        assert_eq!(home.opponent_name, "Twos");
        assert_eq!(home.points, 95.5);
        assert_eq!(home.opponent_points, 101.0);
        assert!(!home.won);
        assert_eq!(home.absolute_margin, 5.5);
        assert!(rows[1].won);
    }

    #[test]
    fn test_bench_and_ir_never_start() {
        let rows = build_week_rows(Some(&boxscore()), &directory(), 4).unwrap();
        let home = &rows[0];
        let starters: Vec<&str> = home.starters.iter().map(|p| p.name.as_str()).collect();
        let bench: Vec<&str> = home.bench.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(starters, vec!["Quinn", "Flexy"]);
        assert_eq!(bench, vec!["Benchy", "Hurt"]);
        assert!(home.starters.iter().all(|p| !p.lineup_slot.is_bench()));
        assert_eq!(home.bench_points(), 14.0);
    }

    #[test]
    fn test_projection_total_only_counts_starters() {
        let rows = build_week_rows(Some(&boxscore()), &directory(), 4).unwrap();
        assert_eq!(rows[0].projected_starter_total, Some(18.0));
        // no starter projections on the away side
        assert_eq!(rows[1].projected_starter_total, None);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let rows = build_week_rows(Some(&boxscore()), &directory(), 4).unwrap();
        let away = &rows[1];
        assert_eq!(away.starters.len(), 1);
        assert_eq!(away.starters[0].name, "Runner");
        assert_eq!(away.starters[0].position, Position::RunningBack);
        assert!(away.bench.is_empty());
    }

    #[test]
    fn test_absent_payload_vs_empty_week() {
        assert!(build_week_rows(None, &directory(), 4).is_none());
        assert!(build_week_rows(Some(&json!({"teams": []})), &directory(), 4).is_none());
        let rows = build_week_rows(Some(&boxscore()), &directory(), 9).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_points_resolution_order() {
        let entry = json!({
            "lineupSlotId": 0,
            "appliedStatTotal": 12.0,
            "playerPoolEntry": {"appliedStatTotal": 99.0},
        });
        assert_eq!(player_points(&entry, 1), 12.0);

        let pool = json!({"lineupSlotId": 0, "playerPoolEntry": {"appliedStatTotal": 7.5}});
        assert_eq!(player_points(&pool, 1), 7.5);

        let breakdown = json!({
            "lineupSlotId": 0,
            "playerPoolEntry": {"player": {"stats": [
                {"scoringPeriodId": 2, "statSourceId": 0, "appliedTotal": 40.0},
                {
                    "scoringPeriodId": 1,
                    "statSourceId": 0,
                    "appliedStats": {"3": 4.0, "25": 6.0, "72": -2.0},
                },
            ]}},
        });
        assert_eq!(player_points(&breakdown, 1), 8.0);
        assert_eq!(player_points(&breakdown, 2), 40.0);
        assert_eq!(player_points(&breakdown, 3), 0.0);
    }

    #[test]
    fn test_projection_absent_is_not_zero() {
        let none = json!({"lineupSlotId": 0, "playerPoolEntry": {"player": {"stats": []}}});
        assert_eq!(player_projection(&none, 1), None);

        let zero = json!({"lineupSlotId": 0, "projectedPoints": 0.0});
        assert_eq!(player_projection(&zero, 1), Some(0.0));

        let pool = json!({"lineupSlotId": 0, "playerPoolEntry": {"projectedAppliedTotal": 13.2}});
        assert_eq!(player_projection(&pool, 1), Some(13.2));
    }

    #[test]
    fn test_player_name_fallbacks() {
        let split = json!({"lineupSlotId": 0, "player": {"firstName": "Jo", "lastName": "Doe"}});
        assert_eq!(parse_entry(&split, 1).unwrap().name, "Jo Doe");

        let id_only = json!({"lineupSlotId": 0, "playerId": 4040});
        assert_eq!(parse_entry(&id_only, 1).unwrap().name, "Player 4040");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_entry(&json!(3), 1), Err(EntryError::NotAnObject));
        let err = parse_entry(&json!({"playerId": 5}), 1).unwrap_err();
        assert_eq!(err, EntryError::MissingLineupSlot { player: "Player 5".to_string() });
    }
}
