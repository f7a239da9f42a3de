//! Error types.
//!
//! Each concern gets its own enum:
//! - `ConfigError`: invalid board or deck configuration (fatal at build time)
//! - `CardError`: a card transition attempted from a disallowed state
//! - `SnapshotError`: a persisted snapshot that cannot be applied to the deck
//! - `StoreError`: I/O or codec failure inside a save store
//!
//! Store errors never reach gameplay code; `SaveStore` implementations log
//! and swallow them.

use thiserror::Error;

use crate::cards::{CardId, CardState, FaceId};

/// Invalid board or deck configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// `columns * rows` is zero or odd.
    #[error("invalid board size {columns}x{rows}: card count must be positive and even")]
    InvalidBoardSize { columns: u32, rows: u32 },

    /// The deck cannot supply one distinct face per pair.
    #[error("not enough faces in deck: need at least {needed}, have {available}")]
    InsufficientDeck { needed: usize, available: usize },

    /// The same face id was listed twice in a deck.
    #[error("duplicate face id in deck: {0}")]
    DuplicateFace(FaceId),

    /// A face id was the empty string.
    #[error("face id must not be empty")]
    EmptyFaceId,

    /// A timing value was negative or not finite.
    #[error("invalid duration for '{field}': {value}")]
    InvalidDuration { field: &'static str, value: f32 },
}

/// Card state machine violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("{card}: cannot {action} while {from:?}")]
    InvalidTransition {
        card: CardId,
        from: CardState,
        action: &'static str,
    },
}

/// A snapshot that does not describe a buildable board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// Layout is not positive and even.
    #[error("invalid snapshot layout {columns}x{rows}")]
    InvalidLayout { columns: u32, rows: u32 },

    /// `faceIdsByIndex` length does not match the layout.
    #[error("snapshot holds {actual} faces, layout needs {expected}")]
    CardCount { expected: usize, actual: usize },

    /// A face id is not part of the active deck.
    #[error("snapshot face '{face}' at index {index} is not in the deck")]
    UnknownFace { index: usize, face: FaceId },

    /// A matched index lies outside the board.
    #[error("matched index {index} out of range for {count} cards")]
    MatchedOutOfRange { index: u32, count: usize },

    /// A face does not appear exactly twice.
    #[error("snapshot face '{face}' appears {count} times, expected 2")]
    UnpairedFace { face: FaceId, count: usize },

    /// A matched card whose partner is not matched.
    #[error("matched card {index} has unmatched partner {partner}")]
    UnmatchedPartner { index: u32, partner: u32 },
}

/// Failure inside a save store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("save store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("save data could not be encoded or decoded: {0}")]
    Codec(#[from] serde_json::Error),
}
