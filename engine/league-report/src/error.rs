//! Error types for LeagueReport
//!
//! The pipeline has no fatal path. These errors describe a single malformed record,
//! which is logged and skipped while its siblings are still processed.

use thiserror::Error;

/// Why a roster entry could not be turned into a player line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("roster entry is not an object")]
    NotAnObject,

    #[error("roster entry {player} has no lineup slot")]
    MissingLineupSlot { player: String },
}
