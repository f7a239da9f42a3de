//! Pair resolution.
//!
//! Two face-up cards form a `Pair`. Pairs are queued on a `PairResolver`
//! and compared strictly in submission order by a single worker, driven
//! by the game loop:
//!
//! ```text
//!            enqueue                    both FaceUp
//!  Pair ──▶ [queue] ──▶ AwaitingReveal ─────────────▶ compare
//!                            │                        │      │
//!                   stale / timeout              match│      │mismatch
//!                            ▼                        ▼      ▼
//!                         discard                 Matched  Holding ──▶ hide
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use memory_match::cards::{Board, CardId, FaceId};
//! use memory_match::resolution::{PairResolver, ResolutionStatus, ResolverEvent};
//!
//! let mut board = Board::new();
//! board.layout_faces(2, 1, vec![FaceId::new("a"), FaceId::new("a")]);
//! for id in [CardId::new(0), CardId::new(1)] {
//!     board.get_mut(id).unwrap().reveal(0.0).unwrap();
//! }
//! board.advance(0.0);
//!
//! let mut resolver = PairResolver::new();
//! resolver.enqueue(board.card_ref(CardId::new(0)), board.card_ref(CardId::new(1)));
//!
//! let status = resolver.process(&mut board, 0.016);
//! assert_eq!(status, ResolutionStatus::Idle);
//! assert!(board.all_matched());
//! assert!(resolver
//!     .drain_events()
//!     .iter()
//!     .any(|e| matches!(e, ResolverEvent::Resolved(r) if r.matched)));
//! ```

mod pair;

pub use pair::PairResolver;

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardRef};

/// Two cards submitted together for comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub first: CardRef,
    pub second: CardRef,
}

impl Pair {
    #[must_use]
    pub fn new(first: CardRef, second: CardRef) -> Self {
        Self { first, second }
    }

    /// Both references, in submission order.
    #[must_use]
    pub fn refs(&self) -> [CardRef; 2] {
        [self.first, self.second]
    }
}

/// Outcome of comparing a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairResolution {
    pub pair: Pair,
    pub matched: bool,
}

/// Notifications from the resolver, drained by its single subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolverEvent {
    /// A card was moved to `Matched` by the resolver.
    CardMatched(CardId),

    /// A mismatched card started flipping back face-down.
    CardHiding(CardId),

    /// A pair was compared. Discarded pairs never produce this.
    Resolved(PairResolution),
}

/// What the resolver worker is doing after a `process` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStatus {
    /// Queue empty, nothing in flight.
    Idle,

    /// Waiting for the head pair to finish revealing.
    AwaitingReveal,

    /// Showing a mismatch before hiding it.
    Holding,
}
