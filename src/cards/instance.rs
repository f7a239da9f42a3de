//! Card instances - per-card runtime state.
//!
//! `Card` is a small state machine:
//!
//! ```text
//! FaceDown ──reveal──▶ Revealing ──▶ FaceUp ──hide──▶ Hiding ──▶ FaceDown
//!     │                                 │
//!     └──────────── set_matched ────────┴──▶ Matched (terminal)
//! ```
//!
//! Reveal and hide are not instantaneous. Each card carries a flip clock
//! advanced by the game loop; the presentation layer may also complete a
//! flip early via `finish_flip` when its animation ends. Only the terminal
//! "reached FaceUp" / "reached FaceDown" moments matter to game logic.

use serde::{Deserialize, Serialize};

use super::definition::FaceId;
use crate::core::error::CardError;

/// Card instance identifier: the card's stable position index on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Board position this card occupies.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card reference that goes stale when the board is rebuilt.
///
/// Resolves only against the board generation that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardRef {
    pub id: CardId,
    pub generation: u64,
}

impl std::fmt::Display for CardRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@gen{}", self.id, self.generation)
    }
}

/// Card state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Showing its back. Initial state.
    #[default]
    FaceDown,
    /// Flipping toward face-up.
    Revealing,
    /// Showing its face, waiting for comparison.
    FaceUp,
    /// Part of a resolved pair. Terminal.
    Matched,
    /// Flipping back toward face-down.
    Hiding,
}

impl CardState {
    /// Ready to be compared by the resolver.
    #[must_use]
    pub fn is_comparable(self) -> bool {
        matches!(self, Self::FaceUp | Self::Matched)
    }
}

/// Terminal flip moments reported by `Card::advance` and `Card::finish_flip`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Reveal finished; the card is ready for comparison.
    ReachedFaceUp,
    /// Hide finished; the card is face-down again.
    ReachedFaceDown,
}

/// A card on the board.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    id: CardId,
    face: FaceId,
    state: CardState,
    /// Seconds left on the in-flight flip.
    flip_remaining: f32,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(id: CardId, face: FaceId) -> Self {
        Self {
            id,
            face,
            state: CardState::FaceDown,
            flip_remaining: 0.0,
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn face(&self) -> &FaceId {
        &self.face
    }

    #[must_use]
    pub fn state(&self) -> CardState {
        self.state
    }

    /// True iff the card accepts input (face-down or face-up).
    #[must_use]
    pub fn can_interact(&self) -> bool {
        matches!(self.state, CardState::FaceDown | CardState::FaceUp)
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }

    /// Start flipping face-up. Valid only from `FaceDown`.
    pub fn reveal(&mut self, duration: f32) -> Result<(), CardError> {
        self.require(CardState::FaceDown, "reveal")?;
        self.state = CardState::Revealing;
        self.flip_remaining = duration.max(0.0);
        Ok(())
    }

    /// Start flipping face-down. Valid only from `FaceUp`.
    pub fn hide(&mut self, duration: f32) -> Result<(), CardError> {
        self.require(CardState::FaceUp, "hide")?;
        self.state = CardState::Hiding;
        self.flip_remaining = duration.max(0.0);
        Ok(())
    }

    /// Mark the card matched.
    ///
    /// Valid from `FaceUp`, or from `FaceDown` so a saved board can be
    /// replayed without animation. Already-matched cards stay matched.
    pub fn set_matched(&mut self) -> Result<(), CardError> {
        match self.state {
            CardState::FaceUp | CardState::FaceDown | CardState::Matched => {
                self.state = CardState::Matched;
                self.flip_remaining = 0.0;
                Ok(())
            }
            from => Err(self.invalid(from, "match")),
        }
    }

    /// Advance the flip clock by `dt` seconds.
    ///
    /// Returns the terminal moment if the in-flight flip completed.
    pub fn advance(&mut self, dt: f32) -> Option<FlipOutcome> {
        if !self.is_flipping() {
            return None;
        }
        self.flip_remaining -= dt;
        if self.flip_remaining <= 0.0 {
            self.finish_flip()
        } else {
            None
        }
    }

    /// Complete the in-flight flip immediately.
    ///
    /// Returns `None` if no flip was in progress.
    pub fn finish_flip(&mut self) -> Option<FlipOutcome> {
        let outcome = match self.state {
            CardState::Revealing => {
                self.state = CardState::FaceUp;
                FlipOutcome::ReachedFaceUp
            }
            CardState::Hiding => {
                self.state = CardState::FaceDown;
                FlipOutcome::ReachedFaceDown
            }
            _ => return None,
        };
        self.flip_remaining = 0.0;
        Some(outcome)
    }

    /// A reveal or hide is in progress.
    #[must_use]
    pub fn is_flipping(&self) -> bool {
        matches!(self.state, CardState::Revealing | CardState::Hiding)
    }

    fn require(&self, expected: CardState, action: &'static str) -> Result<(), CardError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid(self.state, action))
        }
    }

    fn invalid(&self, from: CardState, action: &'static str) -> CardError {
        CardError::InvalidTransition {
            card: self.id,
            from,
            action,
        }
    }
}
