//! Power rankings derived from the standings table

use crate::types::{PowerRankingRow, StandingsRow};

/// `W-L`, or `W-L-T` when the team has ties
pub fn format_record(wins: u32, losses: u32, ties: u32) -> String {
    if ties > 0 {
        format!("{}-{}-{}", wins, losses, ties)
    } else {
        format!("{}-{}", wins, losses)
    }
}

/// `2*wins - losses + (pointsFor - pointsAgainst) / 100`
pub fn power_score(row: &StandingsRow) -> f64 {
    2.0 * f64::from(row.wins) - f64::from(row.losses)
        + (row.points_for - row.points_against) / 100.0
}

/// Rank teams by (score, points-for) descending; ranks are 1-based.
pub fn compute_rankings(standings: &[StandingsRow]) -> Vec<PowerRankingRow> {
    let mut rows: Vec<PowerRankingRow> = standings
        .iter()
        .map(|row| PowerRankingRow {
            name: row.name.clone(),
            record: format_record(row.wins, row.losses, row.ties),
            points_for: row.points_for,
            points_against: row.points_against,
            score: power_score(row),
            rank: 0,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.score.total_cmp(&a.score).then_with(|| b.points_for.total_cmp(&a.points_for))
    });
    for (index, row) in rows.iter_mut().enumerate() {
        row.rank = index as u32 + 1;
    }
    rows
}
