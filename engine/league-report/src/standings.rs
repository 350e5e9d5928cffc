//! Standings extractor: season records sorted by wins then points-for

use serde_json::Value;

use crate::json;
use crate::teams;
use crate::types::StandingsRow;

/// Where a win/loss/tie count can live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSource {
    /// `record.overall.<field>`
    OverallRecord,
    /// `<field>` on the team itself
    TopLevel,
}

impl CountSource {
    pub const ORDER: [CountSource; 2] = [CountSource::OverallRecord, CountSource::TopLevel];

    pub fn extract(self, team: &Value, field: &str) -> Option<u32> {
        match self {
            CountSource::OverallRecord => json::count_at(team, &["record", "overall", field]),
            CountSource::TopLevel => json::count_at(team, &[field]),
        }
    }
}

/// Shapes points-for is published in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointsForSource {
    OverallRecord,
    Scalar,
    ScoredObject,
    StatMap,
}

/// Stat id holding season points in `valuesByStat`
pub const POINTS_FOR_STAT_ID: &str = "0";

impl PointsForSource {
    pub const ORDER: [PointsForSource; 4] = [
        PointsForSource::OverallRecord,
        PointsForSource::Scalar,
        PointsForSource::ScoredObject,
        PointsForSource::StatMap,
    ];

    pub fn extract(self, team: &Value) -> Option<f64> {
        match self {
            PointsForSource::OverallRecord => {
                json::number_at(team, &["record", "overall", "pointsFor"])
            }
            PointsForSource::Scalar => json::number_at(team, &["points"]),
            PointsForSource::ScoredObject => json::number_at(team, &["pointsScored", "total"]),
            PointsForSource::StatMap => {
                json::number_at(team, &["valuesByStat", POINTS_FOR_STAT_ID])
            }
        }
    }
}

fn count(team: &Value, field: &str) -> u32 {
    CountSource::ORDER.iter().find_map(|source| source.extract(team, field)).unwrap_or(0)
}

fn points_for(team: &Value) -> f64 {
    PointsForSource::ORDER.iter().find_map(|source| source.extract(team)).unwrap_or(0.0)
}

fn points_against(team: &Value) -> f64 {
    json::number_at(team, &["record", "overall", "pointsAgainst"]).unwrap_or(0.0)
}

/// Convert one raw team record. Never fails; missing fields default to zero.
pub fn standings_row(team: &Value) -> StandingsRow {
    let name = match teams::team_id(team) {
        Some(id) => teams::display_name(team, id),
        None => teams::NameSource::ORDER
            .iter()
            .find_map(|source| source.extract(team))
            .unwrap_or_else(|| "Unknown Team".to_string()),
    };

    StandingsRow {
        name,
        wins: count(team, "wins"),
        losses: count(team, "losses"),
        ties: count(team, "ties"),
        points_for: points_for(team),
        points_against: points_against(team),
    }
}

/// Sort rows by (wins, points-for) descending. Stable, so equal keys keep input order.
pub fn sort_standings(rows: &mut [StandingsRow]) {
    rows.sort_by(|a, b| {
        b.wins.cmp(&a.wins).then_with(|| b.points_for.total_cmp(&a.points_for))
    });
}

/// Extract and sort the standings table. Every input team appears exactly once.
pub fn extract_standings(raw_teams: &[Value]) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = raw_teams.iter().map(standings_row).collect();
    sort_standings(&mut rows);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sorted_by_wins_then_points_for() {
        let teams = vec![
            json!({"id": 1, "name": "A", "record": {"overall": {"wins": 5, "pointsFor": 100.0}}}),
            json!({"id": 2, "name": "B", "record": {"overall": {"wins": 5, "pointsFor": 120.0}}}),
            json!({"id": 3, "name": "C", "record": {"overall": {"wins": 3, "pointsFor": 200.0}}}),
        ];
        let standings = extract_standings(&teams);
        let names: Vec<&str> = standings.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_record_fallback_fields() {
        let team = json!({
            "id": 9,
            "wins": 4,
            "losses": 2,
            "record": {"overall": {"ties": 1, "pointsAgainst": 640.5}},
            "points": 702.25,
        });
        let row = standings_row(&team);
        assert_eq!(row.name, "Team 9");
        assert_eq!((row.wins, row.losses, row.ties), (4, 2, 1));
        assert_eq!(row.points_for, 702.25);
        assert_eq!(row.points_against, 640.5);
    }

    #[test]
    fn test_points_for_shapes() {
        let scored = json!({"id": 1, "pointsScored": {"total": 333.0}});
        assert_eq!(standings_row(&scored).points_for, 333.0);

        let stat_map = json!({"id": 1, "valuesByStat": {"0": 410.5}});
        assert_eq!(standings_row(&stat_map).points_for, 410.5);

        let nothing = json!({"id": 1});
        let row = standings_row(&nothing);
        assert_eq!(row.points_for, 0.0);
        assert_eq!(row.points_against, 0.0);
        assert_eq!((row.wins, row.losses, row.ties), (0, 0, 0));
    }

    #[test]
    fn test_ties_in_sort_key_keep_input_order() {
        let teams = vec![
            json!({"id": 1, "name": "First", "wins": 2, "points": 50.0, "ties": 1}),
            json!({"id": 2, "name": "Second", "wins": 2, "points": 50.0}),
        ];
        let standings = extract_standings(&teams);
        assert_eq!(standings[0].name, "First");
        assert_eq!(standings[1].name, "Second");
    }

    #[test]
    fn test_no_team_dropped() {
        let teams = vec![json!({}), json!({"name": "Anon"}), json!({"id": 4})];
        let standings = extract_standings(&teams);
        assert_eq!(standings.len(), 3);
        assert!(standings.iter().any(|r| r.name == "Anon"));
        assert!(standings.iter().any(|r| r.name == "Unknown Team"));
    }
}
