//! Core types: configuration, errors, RNG and scoring.
//!
//! These are the leaf building blocks the card, resolution and session
//! layers are assembled from.

pub mod config;
pub mod error;
pub mod rng;
pub mod score;

pub use config::SessionConfig;
pub use error::{CardError, ConfigError, SnapshotError, StoreError};
pub use rng::GameRng;
pub use score::{ScoreState, ScoreSystem};
