//! Session events.
//!
//! The controller queues an event for everything a presentation, audio or
//! HUD layer may want to react to. Events are fire-and-forget: consuming
//! them never changes game state.

use crate::cards::CardId;
use crate::core::ScoreState;

/// Something that happened during a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A board was laid out, either fresh or restored from a save.
    BoardBuilt {
        columns: u32,
        rows: u32,
        restored: bool,
    },

    /// The player flipped a card.
    CardFlipped { card: CardId },

    /// A card started a flip animation (`face_up` is the destination).
    FlipStarted { card: CardId, face_up: bool },

    /// A card finished a flip animation.
    FlipFinished { card: CardId, face_up: bool },

    /// A card became matched.
    CardMatched { card: CardId },

    /// A pair was compared and the score updated.
    PairResolved { matched: bool, score: ScoreState },

    /// Any counter changed.
    ScoreChanged(ScoreState),

    /// The fresh-board preview finished; input is accepted.
    PreviewEnded,

    /// Every card is matched.
    Won { score: ScoreState },

    /// The session was restarted; a `BoardBuilt` follows.
    Restarted,
}
