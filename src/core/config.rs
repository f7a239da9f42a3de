//! Session configuration.
//!
//! Hosts configure a session at startup by providing a `SessionConfig`.
//! Layout and timing live here; the deck is passed separately since it is
//! content, not tuning.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Session configuration parameters.
///
/// All durations are in seconds of game-loop time (the `dt` passed to
/// `SessionController::tick`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Board columns for freshly built boards.
    pub columns: u32,

    /// Board rows for freshly built boards.
    pub rows: u32,

    /// Length of a reveal or hide flip.
    /// Zero completes flips on the next tick.
    pub flip_secs: f32,

    /// How long a mismatched pair stays face-up before hiding.
    pub mismatch_hold_secs: f32,

    /// How long the resolver waits for both cards of a pair to finish
    /// revealing before discarding the pair.
    pub reveal_timeout_secs: f32,

    /// How long every card is shown on a fresh board before play starts.
    /// Zero disables the preview.
    pub preview_secs: f32,

    /// Seed for deck sampling and shuffles.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            columns: 4,
            rows: 4,
            flip_secs: 0.16,
            mismatch_hold_secs: 0.55,
            reveal_timeout_secs: 2.0,
            preview_secs: 0.0,
            seed: 42,
        }
    }
}

impl SessionConfig {
    /// Set the board layout.
    #[must_use]
    pub fn with_layout(mut self, columns: u32, rows: u32) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    /// Set the flip duration.
    #[must_use]
    pub fn with_flip_secs(mut self, secs: f32) -> Self {
        self.flip_secs = secs;
        self
    }

    /// Set the mismatch hold time.
    #[must_use]
    pub fn with_mismatch_hold(mut self, secs: f32) -> Self {
        self.mismatch_hold_secs = secs;
        self
    }

    /// Set the reveal timeout.
    #[must_use]
    pub fn with_reveal_timeout(mut self, secs: f32) -> Self {
        self.reveal_timeout_secs = secs;
        self
    }

    /// Enable the fresh-board preview.
    #[must_use]
    pub fn with_preview(mut self, secs: f32) -> Self {
        self.preview_secs = secs;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Draw the RNG seed from the operating system.
    #[must_use]
    pub fn with_entropy_seed(mut self) -> Self {
        self.seed = rand::random();
        self
    }

    /// Total cards on a fresh board.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Check every duration is finite and non-negative.
    ///
    /// Layout is checked against the deck when a board is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("flip_secs", self.flip_secs),
            ("mismatch_hold_secs", self.mismatch_hold_secs),
            ("reveal_timeout_secs", self.reveal_timeout_secs),
            ("preview_secs", self.preview_secs),
        ];

        for (field, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDuration { field, value });
            }
        }

        Ok(())
    }
}
