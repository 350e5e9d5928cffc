//! Narrative composer: a short recap paragraph for the week

use crate::select::{first_max_by_key, first_min_by_key};
use crate::types::{Matchup, Side, TeamWeekRow};

/// Minimum (projected - actual) shortfall worth calling out
pub const UNDERPERFORMANCE_THRESHOLD: f64 = 20.0;

fn underperformance_phrase(rotation: usize, team: &str, deficit: f64) -> String {
    match rotation {
        0 => format!("{} left {:.1} points on the table against their projection.", team, deficit),
        1 => format!(
            "Projections were not kind to {}, who fell {:.1} points short.",
            team, deficit
        ),
        _ => format!("{} underdelivered by {:.1} points versus expectations.", team, deficit),
    }
}

fn lowest_score_phrase(rotation: usize, team: &str, points: f64) -> String {
    match rotation {
        0 => format!("{} brought up the rear with {:.1} points.", team, points),
        1 => format!("Bottom of the barrel this week: {} at {:.1} points.", team, points),
        _ => format!(
            "{} will want to forget this one after scoring just {:.1} points.",
            team, points
        ),
    }
}

/// Phrase index for a week: `(week - 1) mod 3`, week 0 treated like week 1
pub fn rotation_index(week: u32) -> usize {
    (week.saturating_sub(1) % 3) as usize
}

pub fn no_results(week: u32) -> String {
    format!("No results yet for Week {}.", week)
}

fn closest_game(matchup: &Matchup) -> String {
    let ((leader, leader_points), (trailer, trailer_points)) = matchup.leader_and_trailer();
    format!(
        "The closest game saw {} ({:.1}) and {} ({:.1}) separated by just {:.1} points.",
        leader, leader_points, trailer, trailer_points, matchup.absolute_margin
    )
}

fn biggest_blowout(matchup: &Matchup) -> String {
    let ((leader, leader_points), (trailer, trailer_points)) = matchup.leader_and_trailer();
    format!(
        "The biggest margin belonged to {}, who put up {:.1} against {}'s {:.1}, a {:.1}-point gap.",
        leader, leader_points, trailer, trailer_points, matchup.absolute_margin
    )
}

/// Team with the largest projection shortfall of at least the threshold
fn underperformer(rows: &[TeamWeekRow]) -> Option<(&str, f64)> {
    let shortfalls = rows
        .iter()
        .filter_map(|row| {
            let projected = row.projected_starter_total?;
            Some((row.team_name.as_str(), projected - row.points))
        })
        .filter(|(_, deficit)| *deficit >= UNDERPERFORMANCE_THRESHOLD);
    first_max_by_key(shortfalls, |(_, deficit)| *deficit)
}

/// Lowest-scoring side across all matchups, home before away
fn lowest_side(matchups: &[Matchup]) -> Option<(&str, f64)> {
    let sides = matchups.iter().flat_map(|m| Side::BOTH.into_iter().map(move |side| m.side(side)));
    first_min_by_key(sides, |(_, points)| *points)
}

/// Compose the recap paragraph.
///
/// Order is fixed: closest game, biggest margin, optional underperformance callout,
/// lowest score. The last two rotate phrasing by week so consecutive reports differ.
pub fn compose_narrative(
    matchups: &[Matchup],
    week: u32,
    week_rows: Option<&[TeamWeekRow]>,
) -> String {
    let (Some(closest), Some(blowout)) = (
        first_min_by_key(matchups.iter(), |m| m.absolute_margin),
        first_max_by_key(matchups.iter(), |m| m.absolute_margin),
    ) else {
        return no_results(week);
    };

    let rotation = rotation_index(week);
    let mut sentences = vec![closest_game(closest), biggest_blowout(blowout)];

    if let Some((team, deficit)) = week_rows.and_then(underperformer) {
        sentences.push(underperformance_phrase(rotation, team, deficit));
    }
    if let Some((team, points)) = lowest_side(matchups) {
        sentences.push(lowest_score_phrase(rotation, team, points));
    }

    sentences.join(" ")
}
