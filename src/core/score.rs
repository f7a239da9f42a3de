//! Score, turn, match and combo counters.
//!
//! Counters change only through the `register_*` operations. The one
//! exception is `load_from`, used when rehydrating a saved session.

use serde::{Deserialize, Serialize};

/// Points for every match.
pub const MATCH_POINTS: u32 = 100;

/// Extra points per consecutive match beyond the first.
pub const COMBO_STEP_POINTS: u32 = 25;

/// Combo steps that earn bonus points (bonus caps at 10 * 25 = 250).
pub const MAX_COMBO_STEPS: u32 = 10;

/// Points lost on a mismatch (score never drops below zero).
pub const MISMATCH_PENALTY: u32 = 10;

/// Snapshot of all counters, suitable for HUD display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    pub matches: u32,
    pub turns: u32,
    pub combo: u32,
}

/// Score bookkeeping for one session.
///
/// ## Scoring
///
/// - A flip counts one turn.
/// - A match earns `100 + min(combo - 1, 10) * 25`, where `combo` already
///   includes this match.
/// - A mismatch zeroes the combo and costs 10 points, floored at zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreSystem {
    state: ScoreState,
}

impl ScoreSystem {
    /// Create a zeroed score system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every counter.
    pub fn reset(&mut self) {
        self.state = ScoreState::default();
    }

    /// Count one card flip as a turn.
    ///
    /// Counters saturate; restored saves may carry arbitrary values.
    pub fn register_flip(&mut self) {
        self.state.turns = self.state.turns.saturating_add(1);
    }

    /// Record a match and return the points it earned.
    pub fn register_match(&mut self) -> u32 {
        self.state.matches = self.state.matches.saturating_add(1);
        self.state.combo = self.state.combo.saturating_add(1);

        let bonus_steps = (self.state.combo - 1).min(MAX_COMBO_STEPS);
        let points = MATCH_POINTS + bonus_steps * COMBO_STEP_POINTS;
        self.state.score = self.state.score.saturating_add(points);
        points
    }

    /// Record a mismatch.
    pub fn register_mismatch(&mut self) {
        self.state.combo = 0;
        self.state.score = self.state.score.saturating_sub(MISMATCH_PENALTY);
    }

    /// Restore counters from a saved session.
    pub fn load_from(&mut self, matches: u32, turns: u32, score: u32, combo: u32) {
        self.state = ScoreState {
            score,
            matches,
            turns,
            combo,
        };
    }

    /// Current counters.
    #[must_use]
    pub fn state(&self) -> ScoreState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.state.score
    }

    #[must_use]
    pub fn matches(&self) -> u32 {
        self.state.matches
    }

    #[must_use]
    pub fn turns(&self) -> u32 {
        self.state.turns
    }

    #[must_use]
    pub fn combo(&self) -> u32 {
        self.state.combo
    }
}
