//! Card system: faces, decks, card instances and the board.
//!
//! ## Key Types
//!
//! - `FaceId`: The symbol a card shows; equal faces match
//! - `Deck`: Ordered set of distinct faces a board is drawn from
//! - `Card`: Per-card state machine (face-down, revealing, face-up, ...)
//! - `CardRef`: Generation-tagged reference that goes stale on rebuild
//! - `Board`: Owner of every card in play

pub mod board;
pub mod definition;
pub mod instance;

pub use board::{check_layout, Board};
pub use definition::{Deck, FaceId};
pub use instance::{Card, CardId, CardRef, CardState, FlipOutcome};
