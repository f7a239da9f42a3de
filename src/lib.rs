//! # memory-match
//!
//! Game logic for a tile-matching memory card game: a grid of face-down
//! cards is revealed two at a time, matching pairs stay face-up, mismatches
//! flip back, and the session tracks score, turns and combo until every
//! card is matched.
//!
//! ## Design Principles
//!
//! 1. **Tick-Driven**: No threads or async runtime. The host calls
//!    `SessionController::tick(dt)` once per frame; every wait (flip
//!    animation, reveal timeout, mismatch hold) is a polled timer.
//!
//! 2. **Single Mutator**: The session owns the board. The resolver reads
//!    cards and invokes their transitions but never holds them.
//!
//! 3. **Ordered Resolution**: Pairs are compared strictly in submission
//!    order by one worker.
//!
//! 4. **Best-Effort Persistence**: Save failures are logged, never fatal;
//!    an unreadable save is the same as no save.
//!
//! ## Modules
//!
//! - `core`: Configuration, errors, RNG, scoring
//! - `cards`: Faces, decks, card state machine, board
//! - `resolution`: FIFO pair resolver
//! - `session`: Session controller, snapshots, events
//! - `persistence`: Save stores
//! - `presentation`: Rendering/audio collaborator contract

pub mod cards;
pub mod core;
pub mod persistence;
pub mod presentation;
pub mod resolution;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CardError, ConfigError, GameRng, ScoreState, ScoreSystem, SessionConfig, SnapshotError,
    StoreError,
};

pub use crate::cards::{Board, Card, CardId, CardRef, CardState, Deck, FaceId, FlipOutcome};

pub use crate::resolution::{Pair, PairResolution, PairResolver, ResolutionStatus, ResolverEvent};

pub use crate::session::{
    FlipResult, IgnoreReason, SessionController, SessionEvent, SessionPhase, SessionSnapshot,
};

pub use crate::persistence::{FileSaveStore, MemorySaveStore, SaveStore};

pub use crate::presentation::{dispatch, Cue, Presenter};
