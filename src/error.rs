//! Error types for game commands.
//!
//! Every rejection is non-fatal: the command returns an error and leaves the
//! state untouched, and the caller may re-issue it once the precondition
//! holds.

use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameError {
    /// Action not allowed in the current phase (including after elimination).
    WrongPhase,
    NotEnoughGold { have: i32, need: i32 },
    /// Bench is full, nowhere to put the unit.
    BenchFull,
    BenchSlotOccupied { slot: usize },
    InvalidBenchSlot { slot: usize },
    InvalidShopSlot { index: usize },
    /// Shop offer was already purchased.
    AlreadySold,
    OutOfBounds { row: i32, col: i32 },
    CellOccupied { row: i32, col: i32 },
    EmptyCell { row: i32, col: i32 },
    /// Bench units may only deploy into the player zone.
    OutsidePlayerZone,
    /// Enemy units cannot be commanded.
    NotPlayerUnit,
    UnknownUnit,
    /// A battle needs at least one deployed player unit.
    NoUnitsDeployed,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::WrongPhase => write!(f, "action not allowed in the current phase"),
            GameError::NotEnoughGold { have, need } => {
                write!(f, "not enough gold: have {have}, need {need}")
            }
            GameError::BenchFull => write!(f, "bench is full"),
            GameError::BenchSlotOccupied { slot } => {
                write!(f, "bench slot {slot} is occupied")
            }
            GameError::InvalidBenchSlot { slot } => write!(f, "invalid bench slot {slot}"),
            GameError::InvalidShopSlot { index } => write!(f, "invalid shop slot {index}"),
            GameError::AlreadySold => write!(f, "shop offer already sold"),
            GameError::OutOfBounds { row, col } => {
                write!(f, "cell ({row}, {col}) is outside the arena")
            }
            GameError::CellOccupied { row, col } => {
                write!(f, "cell ({row}, {col}) is occupied")
            }
            GameError::EmptyCell { row, col } => write!(f, "cell ({row}, {col}) is empty"),
            GameError::OutsidePlayerZone => {
                write!(f, "bench units may only deploy into the player zone")
            }
            GameError::NotPlayerUnit => write!(f, "not a player unit"),
            GameError::UnknownUnit => write!(f, "unknown unit"),
            GameError::NoUnitsDeployed => write!(f, "no player units deployed"),
        }
    }
}

impl std::error::Error for GameError {}

/// Result type alias for game commands.
pub type GameResult<T> = Result<T, GameError>;
