//! Weekly challenge engine
//!
//! A fixed 17-week rotation. Each week names one rule; the rule reads the normalized
//! matchups, standings, and (optionally) per-side roster rows and names a single winner.
//! Rules never fail: missing inputs or no qualifying candidate simply produce no result.
//! Equal selection keys resolve to the first candidate in source order.

use tracing::debug;

use crate::rankings::{compute_rankings, format_record};
use crate::select::{first_max_by_key, first_min_by_key};
use crate::types::{ChallengeResult, Matchup, Position, Side, StandingsRow, TeamWeekRow};

/// First week in which the standings leader can take the first-place challenge
pub const FIRST_PLACE_MIN_WEEK: u32 = 9;

/// Starter points needed to count as a double-digit performance
pub const DOUBLE_DIGIT_POINTS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeRule {
    HighestScore,
    BiggestBlowout,
    HighestBench,
    TopAtPosition(Position),
    ClosestVictory,
    HighestScoringLoser,
    FirstPlace,
    BiggestProjectionBeat,
    HighestScoringStarter,
    MostPointsFor,
    MostDoubleDigitStarters,
    TopPowerRanking,
}

pub const SEASON_WEEKS: u32 = 17;

/// The rotation, indexed by `week - 1`
pub static CHALLENGE_TABLE: [(ChallengeRule, &str); SEASON_WEEKS as usize] = [
    (ChallengeRule::HighestScore, "Highest scoring team"),
    (ChallengeRule::BiggestBlowout, "Biggest blowout"),
    (ChallengeRule::HighestBench, "Highest scoring bench"),
    (ChallengeRule::TopAtPosition(Position::Quarterback), "Top scoring QB"),
    (ChallengeRule::ClosestVictory, "Closest victory"),
    (ChallengeRule::TopAtPosition(Position::RunningBack), "Top scoring RB"),
    (ChallengeRule::HighestScoringLoser, "Highest scoring loser"),
    (ChallengeRule::TopAtPosition(Position::WideReceiver), "Top scoring WR"),
    (ChallengeRule::FirstPlace, "First place overall"),
    (ChallengeRule::TopAtPosition(Position::TightEnd), "Top scoring TE"),
    (ChallengeRule::BiggestProjectionBeat, "Biggest projection beat"),
    (ChallengeRule::TopAtPosition(Position::Kicker), "Top scoring kicker"),
    (ChallengeRule::TopAtPosition(Position::Defense), "Top scoring defense"),
    (ChallengeRule::HighestScoringStarter, "Highest scoring starter"),
    (ChallengeRule::MostPointsFor, "Most points for"),
    (ChallengeRule::MostDoubleDigitStarters, "Most double-digit starters"),
    (ChallengeRule::TopPowerRanking, "Top power ranking"),
];

fn table_entry(week: u32) -> Option<&'static (ChallengeRule, &'static str)> {
    let index = usize::try_from(week.checked_sub(1)?).ok()?;
    CHALLENGE_TABLE.get(index)
}

/// Title of the week's challenge, without computing a result
pub fn title_for_week(week: u32) -> Option<&'static str> {
    table_entry(week).map(|(_, title)| *title)
}

/// Winner name and detail sentence
type Award = (String, String);

impl ChallengeRule {
    fn evaluate(
        self,
        week: u32,
        matchups: &[Matchup],
        standings: &[StandingsRow],
        week_rows: Option<&[TeamWeekRow]>,
    ) -> Option<Award> {
        // Player-level rules need at least one rostered player; a boxscore without
        // roster detail still yields rows, but with empty lineups.
        let rows = week_rows.filter(|rows| rows.iter().any(has_roster));

        match self {
            ChallengeRule::HighestScore => highest_score(matchups),
            ChallengeRule::BiggestBlowout => biggest_blowout(matchups),
            ChallengeRule::HighestBench => highest_bench(rows?),
            ChallengeRule::TopAtPosition(position) => top_at_position(rows?, position),
            ChallengeRule::ClosestVictory => closest_victory(matchups),
            ChallengeRule::HighestScoringLoser => highest_scoring_loser(matchups),
            ChallengeRule::FirstPlace => first_place(week, standings),
            ChallengeRule::BiggestProjectionBeat => biggest_projection_beat(rows?),
            ChallengeRule::HighestScoringStarter => highest_scoring_starter(rows?),
            ChallengeRule::MostPointsFor => most_points_for(standings),
            ChallengeRule::MostDoubleDigitStarters => most_double_digit_starters(rows?),
            ChallengeRule::TopPowerRanking => top_power_ranking(standings),
        }
    }
}

/// Compute the challenge result for `week`, or `None` if there is no rule for the week
/// or the rule finds no winner.
pub fn compute_challenge(
    week: u32,
    matchups: &[Matchup],
    standings: &[StandingsRow],
    week_rows: Option<&[TeamWeekRow]>,
) -> Option<ChallengeResult> {
    let (rule, title) = table_entry(week)?;
    let result = rule.evaluate(week, matchups, standings, week_rows);
    if result.is_none() {
        debug!("No winner for week {} challenge '{}'", week, title);
    }
    let (winner, detail) = result?;

    Some(ChallengeResult {
        week_number: week,
        challenge_title: title.to_string(),
        winning_team_name: winner,
        detail_text: detail,
    })
}

/// Every side of every matchup, home before away
fn sides(matchups: &[Matchup]) -> impl Iterator<Item = (&str, f64)> {
    matchups.iter().flat_map(|m| Side::BOTH.into_iter().map(move |side| m.side(side)))
}

fn decided(matchups: &[Matchup]) -> impl Iterator<Item = &Matchup> {
    matchups.iter().filter(|m| m.winning_side().is_some())
}

fn highest_score(matchups: &[Matchup]) -> Option<Award> {
    let (name, points) = first_max_by_key(sides(matchups), |(_, points)| *points)?;
    Some((name.to_string(), format!("{} scored {:.2} points.", name, points)))
}

fn biggest_blowout(matchups: &[Matchup]) -> Option<Award> {
    let matchup = first_max_by_key(decided(matchups), |m| m.absolute_margin)?;
    let ((winner, _), (loser, _)) = matchup.leader_and_trailer();
    Some((
        winner.to_string(),
        format!("{} beat {} by {:.2} points.", winner, loser, matchup.absolute_margin),
    ))
}

fn closest_victory(matchups: &[Matchup]) -> Option<Award> {
    let matchup = first_min_by_key(decided(matchups), |m| m.absolute_margin)?;
    let ((winner, _), (loser, _)) = matchup.leader_and_trailer();
    Some((
        winner.to_string(),
        format!("{} edged {} by {:.2} points.", winner, loser, matchup.absolute_margin),
    ))
}

fn highest_scoring_loser(matchups: &[Matchup]) -> Option<Award> {
    let losers = decided(matchups).map(|m| {
        let ((winner, _), (loser, points)) = m.leader_and_trailer();
        (loser, points, winner)
    });
    let (loser, points, winner) = first_max_by_key(losers, |(_, points, _)| *points)?;
    Some((
        loser.to_string(),
        format!("{} scored {:.2} points in a loss to {}.", loser, points, winner),
    ))
}

fn has_roster(row: &TeamWeekRow) -> bool {
    !row.starters.is_empty() || !row.bench.is_empty()
}

fn highest_bench(rows: &[TeamWeekRow]) -> Option<Award> {
    let benches = rows.iter().filter(|row| !row.bench.is_empty());
    let row = first_max_by_key(benches, |row| row.bench_points())?;
    Some((
        row.team_name.clone(),
        format!("{} left {:.2} points on the bench.", row.team_name, row.bench_points()),
    ))
}

fn top_at_position(rows: &[TeamWeekRow], position: Position) -> Option<Award> {
    let candidates = rows.iter().flat_map(|row| {
        row.starters.iter().filter(move |p| p.position == position).map(move |p| (row, p))
    });
    let (row, player) = first_max_by_key(candidates, |(_, player)| player.points)?;
    Some((
        row.team_name.clone(),
        format!(
            "{} ({}) scored {:.2} points for {}.",
            player.name, position, player.points, row.team_name
        ),
    ))
}

fn highest_scoring_starter(rows: &[TeamWeekRow]) -> Option<Award> {
    let candidates = rows.iter().flat_map(|row| row.starters.iter().map(move |p| (row, p)));
    let (row, player) = first_max_by_key(candidates, |(_, player)| player.points)?;
    Some((
        row.team_name.clone(),
        format!(
            "{} led all starters with {:.2} points for {}.",
            player.name, player.points, row.team_name
        ),
    ))
}

fn biggest_projection_beat(rows: &[TeamWeekRow]) -> Option<Award> {
    let beats = rows
        .iter()
        .filter_map(|row| row.projected_starter_total.map(|proj| (row, proj, row.points - proj)))
        .filter(|(_, _, beat)| *beat > 0.0);
    let (row, projection, beat) = first_max_by_key(beats, |(_, _, beat)| *beat)?;
    Some((
        row.team_name.clone(),
        format!(
            "{} beat their projection of {:.2} by {:.2} points.",
            row.team_name, projection, beat
        ),
    ))
}

fn most_double_digit_starters(rows: &[TeamWeekRow]) -> Option<Award> {
    let counts = rows
        .iter()
        .map(|row| {
            let count = row.starters.iter().filter(|p| p.points >= DOUBLE_DIGIT_POINTS).count();
            (row, count)
        })
        .filter(|(_, count)| *count > 0);
    let (row, count) = first_max_by_key(counts, |(_, count)| *count as f64)?;
    Some((
        row.team_name.clone(),
        format!("{} had {} starters reach double digits.", row.team_name, count),
    ))
}

fn first_place(week: u32, standings: &[StandingsRow]) -> Option<Award> {
    if week < FIRST_PLACE_MIN_WEEK {
        return None;
    }
    let leader = standings.first()?;
    Some((
        leader.name.clone(),
        format!(
            "{} leads the league at {} with {:.2} points for.",
            leader.name,
            format_record(leader.wins, leader.losses, leader.ties),
            leader.points_for
        ),
    ))
}

fn most_points_for(standings: &[StandingsRow]) -> Option<Award> {
    let row = first_max_by_key(standings.iter(), |row| row.points_for)?;
    Some((
        row.name.clone(),
        format!("{} has scored {:.2} points this season.", row.name, row.points_for),
    ))
}

fn top_power_ranking(standings: &[StandingsRow]) -> Option<Award> {
    let top = compute_rankings(standings).into_iter().next()?;
    Some((
        top.name.clone(),
        format!("{} tops the power rankings with a score of {:.2}.", top.name, top.score),
    ))
}
