//! League Report
//!
//! Turns raw fantasy league JSON (scoreboard, team list, optional boxscore) into a
//! normalized weekly report: matchups, standings, per-side roster rows, the rotating
//! weekly challenge, power rankings, and a recap paragraph.
//!
//! Every stage is a pure function of its inputs. Missing optional data is modelled as
//! `None`, malformed individual records are skipped, and nothing here returns an error.

pub mod challenges;
pub mod error;
pub mod json;
pub mod matchups;
pub mod narrative;
pub mod rankings;
pub mod report;
pub mod roster;
pub mod select;
pub mod standings;
pub mod teams;
pub mod types;


pub use challenges::{compute_challenge, title_for_week, ChallengeRule, SEASON_WEEKS};
pub use error::EntryError;
pub use matchups::summarize;
pub use narrative::compose_narrative;
pub use rankings::compute_rankings;
pub use report::{
    build_report, ChallengeStatus, LeaguePayload, Report, SeasonChallenge, WeekSummary,
};
pub use roster::build_week_rows;
pub use standings::extract_standings;
pub use teams::TeamDirectory;
pub use types::*;
