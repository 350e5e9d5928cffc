use serde::{Deserialize, Serialize};
use std::fmt;

/// Lineup slot a player occupies for a scoring period.
///
/// Ids follow the upstream league provider's schema. Anything not listed is kept
/// as `Other` so unusual league settings never fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum LineupSlot {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Defense,
    Kicker,
    Bench,
    InjuredReserve,
    Flex,
    Other(u32),
}

impl LineupSlot {
    /// Bench and injured reserve are the only non-starting slots.
    pub fn is_bench(self) -> bool {
        matches!(self, LineupSlot::Bench | LineupSlot::InjuredReserve)
    }

    pub fn id(self) -> u32 {
        match self {
            LineupSlot::Quarterback => 0,
            LineupSlot::RunningBack => 2,
            LineupSlot::WideReceiver => 4,
            LineupSlot::TightEnd => 6,
            LineupSlot::Defense => 16,
            LineupSlot::Kicker => 17,
            LineupSlot::Bench => 20,
            LineupSlot::InjuredReserve => 21,
            LineupSlot::Flex => 23,
            LineupSlot::Other(id) => id,
        }
    }
}

impl From<u32> for LineupSlot {
    fn from(id: u32) -> Self {
        match id {
            0 => LineupSlot::Quarterback,
            2 => LineupSlot::RunningBack,
            4 => LineupSlot::WideReceiver,
            6 => LineupSlot::TightEnd,
            16 => LineupSlot::Defense,
            17 => LineupSlot::Kicker,
            20 => LineupSlot::Bench,
            21 => LineupSlot::InjuredReserve,
            23 => LineupSlot::Flex,
            other => LineupSlot::Other(other),
        }
    }
}

impl From<LineupSlot> for u32 {
    fn from(slot: LineupSlot) -> Self {
        slot.id()
    }
}

/// Default (roster-independent) position of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
    Other(u32),
}

impl Position {
    pub fn id(self) -> u32 {
        match self {
            Position::Quarterback => 1,
            Position::RunningBack => 2,
            Position::WideReceiver => 3,
            Position::TightEnd => 4,
            Position::Kicker => 5,
            Position::Defense => 16,
            Position::Other(id) => id,
        }
    }
}

impl From<u32> for Position {
    fn from(id: u32) -> Self {
        match id {
            1 => Position::Quarterback,
            2 => Position::RunningBack,
            3 => Position::WideReceiver,
            4 => Position::TightEnd,
            5 => Position::Kicker,
            16 => Position::Defense,
            other => Position::Other(other),
        }
    }
}

impl From<Position> for u32 {
    fn from(position: Position) -> Self {
        position.id()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Quarterback => write!(f, "QB"),
            Position::RunningBack => write!(f, "RB"),
            Position::WideReceiver => write!(f, "WR"),
            Position::TightEnd => write!(f, "TE"),
            Position::Kicker => write!(f, "K"),
            Position::Defense => write!(f, "D/ST"),
            Position::Other(id) => write!(f, "POS{}", id),
        }
    }
}

/// Outcome classification of a single matchup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Home,
    Away,
    Tie,
    Undecided,
}

/// Home or away half of a matchup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Home, Side::Away];

    pub fn key(self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

/// One head-to-head game for the requested week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_name: String,
    pub away_name: String,
    pub home_points: f64,
    pub away_points: f64,
    pub winner: Winner,
    pub absolute_margin: f64,
}

impl Matchup {
    /// Name and points of the given side
    pub fn side(&self, side: Side) -> (&str, f64) {
        match side {
            Side::Home => (&self.home_name, self.home_points),
            Side::Away => (&self.away_name, self.away_points),
        }
    }

    /// Side that won, if the game has a home/away winner
    pub fn winning_side(&self) -> Option<Side> {
        match self.winner {
            Winner::Home => Some(Side::Home),
            Winner::Away => Some(Side::Away),
            Winner::Tie | Winner::Undecided => None,
        }
    }

    /// (leader, trailer) as (name, points). Uses the decided winner when there is one,
    /// otherwise the point totals, keeping home first when level.
    pub fn leader_and_trailer(&self) -> ((&str, f64), (&str, f64)) {
        let home_leads = match self.winner {
            Winner::Home => true,
            Winner::Away => false,
            Winner::Tie | Winner::Undecided => self.home_points >= self.away_points,
        };
        if home_leads {
            (self.side(Side::Home), self.side(Side::Away))
        } else {
            (self.side(Side::Away), self.side(Side::Home))
        }
    }
}

/// Season-cumulative record of one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
    pub points_against: f64,
}

/// A rostered player's line for one week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub name: String,
    pub position: Position,
    pub lineup_slot: LineupSlot,
    pub points: f64,
    /// `None` means the upstream carried no projection, which is not the same as zero
    pub projected_points: Option<f64>,
}

/// One side of a matchup with its roster split into starters and bench
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamWeekRow {
    pub team_id: i64,
    pub team_name: String,
    pub points: f64,
    pub opponent_name: String,
    pub opponent_points: f64,
    pub won: bool,
    pub absolute_margin: f64,
    pub starters: Vec<PlayerEntry>,
    pub bench: Vec<PlayerEntry>,
    pub projected_starter_total: Option<f64>,
}

impl TeamWeekRow {
    pub fn bench_points(&self) -> f64 {
        self.bench.iter().map(|p| p.points).sum()
    }
}

/// Winner of a week's rotating challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeResult {
    pub week_number: u32,
    pub challenge_title: String,
    pub winning_team_name: String,
    pub detail_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerRankingRow {
    pub name: String,
    pub record: String,
    pub points_for: f64,
    pub points_against: f64,
    pub score: f64,
    pub rank: u32,
}
