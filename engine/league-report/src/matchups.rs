//! Matchup summarizer: raw schedule entries to decided matchups

use serde_json::Value;

use crate::json;
use crate::teams::TeamDirectory;
use crate::types::{Matchup, Side, Winner};

/// Explicit winner flag carried by a schedule entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinnerFlag {
    Home,
    Away,
    Tie,
    Undecided,
    Other,
}

impl WinnerFlag {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "HOME" => WinnerFlag::Home,
            "AWAY" => WinnerFlag::Away,
            "TIE" => WinnerFlag::Tie,
            "UNDECIDED" => WinnerFlag::Undecided,
            _ => WinnerFlag::Other,
        }
    }

    fn of(entry: &Value) -> Option<Self> {
        json::text_at(entry, &["winner"]).map(Self::parse)
    }
}

/// Classify the result of a game.
///
/// With unequal points an explicit HOME/AWAY flag wins, anything else compares points.
/// Level points are a tie only when a flag other than UNDECIDED is present.
pub fn decide_winner(home_points: f64, away_points: f64, flag: Option<WinnerFlag>) -> Winner {
    if home_points == away_points {
        return match flag {
            Some(WinnerFlag::Undecided) | None => Winner::Undecided,
            Some(_) => Winner::Tie,
        };
    }
    match flag {
        Some(WinnerFlag::Home) => Winner::Home,
        Some(WinnerFlag::Away) => Winner::Away,
        _ if home_points > away_points => Winner::Home,
        _ => Winner::Away,
    }
}

/// Period identifier of a schedule entry
pub fn matchup_period(entry: &Value) -> Option<i64> {
    json::integer_at(entry, &["matchupPeriodId"])
}

/// Whether the entry belongs to `week` and has both sides
pub fn is_week_entry(entry: &Value, week: u32) -> bool {
    matchup_period(entry) == Some(i64::from(week))
        && entry.get("home").is_some_and(Value::is_object)
        && entry.get("away").is_some_and(Value::is_object)
}

/// Points of one side: `totalPoints`, then `totalPointsLive`, then zero.
pub fn side_points(side: &Value) -> f64 {
    json::number_at(side, &["totalPoints"])
        .or_else(|| json::number_at(side, &["totalPointsLive"]))
        .unwrap_or(0.0)
}

fn side_team_id(side: &Value) -> Option<i64> {
    json::integer_at(side, &["teamId"])
}

/// Build a matchup from a schedule entry already known to have both sides.
pub fn summarize_entry(entry: &Value, teams: &TeamDirectory) -> Option<Matchup> {
    let home = entry.get(Side::Home.key())?;
    let away = entry.get(Side::Away.key())?;

    // An id-less side still renders; it just cannot be looked up.
    let home_team_id = side_team_id(home).unwrap_or_default();
    let away_team_id = side_team_id(away).unwrap_or_default();
    let home_points = side_points(home);
    let away_points = side_points(away);

    Some(Matchup {
        home_team_id,
        away_team_id,
        home_name: teams.name(home_team_id),
        away_name: teams.name(away_team_id),
        home_points,
        away_points,
        winner: decide_winner(home_points, away_points, WinnerFlag::of(entry)),
        absolute_margin: (home_points - away_points).abs(),
    })
}

/// Summarize the schedule entries for `week`, in source order.
pub fn summarize(schedule: &[Value], week: u32, teams: &TeamDirectory) -> Vec<Matchup> {
    schedule
        .iter()
        .filter(|entry| is_week_entry(entry, week))
        .filter_map(|entry| summarize_entry(entry, teams))
        .collect()
}

/// Schedule list of a scoreboard-shaped payload
pub fn schedule_of(payload: &Value) -> Option<&[Value]> {
    json::array_at(payload, &["schedule"]).map(Vec::as_slice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn directory() -> TeamDirectory {
        TeamDirectory::resolve_names(&json!([
            {"id": 1, "location": "Team", "nickname": "A"},
            {"id": 2, "location": "Team", "nickname": "B"},
            {"id": 3, "location": "Team", "nickname": "C"},
            {"id": 4, "location": "Team", "nickname": "D"},
        ]))
    }

    fn entry(week: u32, home: (i64, f64), away: (i64, f64), winner: Option<&str>) -> Value {
        let mut e = json!({
            "matchupPeriodId": week,
            "home": {"teamId": home.0, "totalPoints": home.1},
            "away": {"teamId": away.0, "totalPoints": away.1},
        });
        if let Some(w) = winner {
            e["winner"] = json!(w);
        }
        e
    }

    #[test]
    fn test_explicit_flags() {
        let schedule = vec![
            entry(3, (1, 110.0), (2, 90.0), Some("HOME")),
            entry(3, (3, 80.0), (4, 80.0), Some("TIE")),
        ];
        let matchups = summarize(&schedule, 3, &directory());
        assert_eq!(matchups.len(), 2);
        assert_eq!(matchups[0].winner, Winner::Home);
        assert_eq!(matchups[0].absolute_margin, 20.0);
        assert_eq!(matchups[0].home_name, "Team A");
        assert_eq!(matchups[1].winner, Winner::Tie);
        assert_eq!(matchups[1].absolute_margin, 0.0);
    }

    #[test]
    fn test_level_points_without_flag_are_undecided() {
        assert_eq!(decide_winner(50.0, 50.0, None), Winner::Undecided);
        assert_eq!(decide_winner(50.0, 50.0, Some(WinnerFlag::Undecided)), Winner::Undecided);
        assert_eq!(decide_winner(50.0, 50.0, Some(WinnerFlag::Home)), Winner::Tie);
        assert_eq!(decide_winner(0.0, 0.0, Some(WinnerFlag::Tie)), Winner::Tie);
    }

    #[test]
    fn test_unequal_points_fall_back_to_comparison() {
        assert_eq!(decide_winner(60.0, 70.0, None), Winner::Away);
        assert_eq!(decide_winner(60.0, 70.0, Some(WinnerFlag::Undecided)), Winner::Away);
        assert_eq!(decide_winner(60.0, 70.0, Some(WinnerFlag::Tie)), Winner::Away);
        assert_eq!(decide_winner(75.0, 70.0, Some(WinnerFlag::Other)), Winner::Home);
        // explicit flag is honored even against the points
        assert_eq!(decide_winner(60.0, 70.0, Some(WinnerFlag::Home)), Winner::Home);
        assert_eq!(WinnerFlag::parse("away"), WinnerFlag::Away);
    }

    #[test]
    fn test_other_weeks_and_byes_are_dropped() {
        let schedule = vec![
            entry(2, (1, 100.0), (2, 90.0), None),
            json!({"matchupPeriodId": 3, "home": {"teamId": 3, "totalPoints": 120.0}}),
            entry(3, (4, 70.0), (1, 71.5), None),
        ];
        let matchups = summarize(&schedule, 3, &directory());
        assert_eq!(matchups.len(), 1);
        assert_eq!(matchups[0].home_team_id, 4);
        assert_eq!(matchups[0].winner, Winner::Away);
        assert_eq!(matchups[0].absolute_margin, 1.5);
    }

    #[test]
    fn test_missing_points_and_unknown_teams() {
        let schedule = vec![json!({
            "matchupPeriodId": 1,
            "home": {"teamId": 42, "totalPoints": null},
            "away": {"teamId": 2, "totalPointsLive": "12.5"},
        })];
        let matchups = summarize(&schedule, 1, &directory());
        assert_eq!(matchups[0].home_name, "Team 42");
        assert_eq!(matchups[0].home_points, 0.0);
        assert_eq!(matchups[0].away_points, 12.5);
        assert_eq!(matchups[0].absolute_margin, 12.5);
    }

    #[test]
    fn test_non_finite_points_default_to_zero() {
        let schedule = vec![json!({
            "matchupPeriodId": 2,
            "home": {"teamId": 1, "totalPoints": "NaN"},
            "away": {"teamId": 2, "totalPoints": 90.0},
        })];
        let matchups = summarize(&schedule, 2, &directory());
        assert_eq!(matchups[0].home_points, 0.0);
        assert_eq!(matchups[0].winner, Winner::Away);
        assert_eq!(matchups[0].absolute_margin, 90.0);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let schedule = vec![
            entry(5, (1, 101.2), (2, 99.9), None),
            entry(5, (3, 88.0), (4, 120.4), Some("AWAY")),
        ];
        let first = summarize(&schedule, 5, &directory());
        let second = summarize(&schedule, 5, &directory());
        assert_eq!(first, second);
        assert_eq!(first[0].home_team_id, 1);
        assert_eq!(first[1].home_team_id, 3);
    }

    #[test]
    fn test_empty_week() {
        let schedule = vec![entry(1, (1, 1.0), (2, 2.0), None)];
        assert!(summarize(&schedule, 14, &directory()).is_empty());
    }
}
