//! The session controller: one game from board build to win.

use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::events::SessionEvent;
use super::snapshot::SessionSnapshot;
use crate::cards::{check_layout, Board, CardId, CardRef, CardState, Deck, FlipOutcome};
use crate::core::error::ConfigError;
use crate::core::{GameRng, ScoreState, ScoreSystem, SessionConfig};
use crate::persistence::SaveStore;
use crate::resolution::{PairResolver, ResolutionStatus, ResolverEvent};

/// Session lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Created, no board yet. Call `start`.
    #[default]
    Loading,
    /// Accepting flips (unless input is locked).
    Playing,
    /// Every card matched. Input stays locked until restart.
    Won,
}

/// Why a flip was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Input locked by the host, a preview, or a session still loading.
    InputLocked,
    /// The game is already won.
    GameWon,
    /// No card at that position.
    UnknownCard,
    /// The card is not face-down.
    NotFaceDown,
}

/// Result of a flip request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipResult {
    /// The card started revealing; waiting for its partner.
    Revealed,
    /// The card completed a pair, which was queued for resolution.
    PairFormed,
    /// Nothing happened.
    Ignored(IgnoreReason),
}

/// Stages of the optional fresh-board preview.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Preview {
    Revealing,
    Showing { elapsed: f32 },
    Hiding,
}

/// Owns the board, score and resolver for one session.
///
/// ## Flow
///
/// 1. `start()` restores the saved session if it is valid for the deck,
///    otherwise builds a fresh random board.
/// 2. `flip()` reveals a card; every second reveal forms a pair, which is
///    queued on the resolver and persisted.
/// 3. `tick()` advances flip animations and the resolver, applies
///    resolutions to the score, persists, and detects the win.
/// 4. `restart()` drops everything in flight and starts over.
///
/// ## Example
///
/// ```
/// use memory_match::cards::Deck;
/// use memory_match::core::SessionConfig;
/// use memory_match::persistence::MemorySaveStore;
/// use memory_match::session::{SessionController, SessionPhase};
///
/// let deck = Deck::new(["sun", "moon", "star"]).unwrap();
/// let config = SessionConfig::default().with_layout(3, 2);
///
/// let mut session = SessionController::new(config, deck, MemorySaveStore::new()).unwrap();
/// session.start().unwrap();
///
/// assert_eq!(session.phase(), SessionPhase::Playing);
/// assert_eq!(session.board().len(), 6);
/// ```
#[derive(Debug)]
pub struct SessionController<S: SaveStore> {
    config: SessionConfig,
    deck: Deck,
    store: S,
    rng: GameRng,
    board: Board,
    score: ScoreSystem,
    resolver: PairResolver,
    phase: SessionPhase,
    host_locked: bool,
    recent_reveals: SmallVec<[CardRef; 2]>,
    preview: Option<Preview>,
    events: Vec<SessionEvent>,
}

impl<S: SaveStore> SessionController<S> {
    /// Create a session.
    ///
    /// Fails if the configured timings are invalid or the configured layout
    /// cannot be built from `deck`.
    pub fn new(config: SessionConfig, deck: Deck, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        check_layout(config.columns, config.rows, &deck)?;

        Ok(Self {
            rng: GameRng::new(config.seed),
            resolver: PairResolver::from_config(&config),
            config,
            deck,
            store,
            board: Board::new(),
            score: ScoreSystem::new(),
            phase: SessionPhase::Loading,
            host_locked: false,
            recent_reveals: SmallVec::new(),
            preview: None,
            events: Vec::new(),
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn score(&self) -> ScoreState {
        self.score.state()
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Shut the session down, handing back its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// True if the store holds a save (the "continue" affordance).
    #[must_use]
    pub fn has_save(&self) -> bool {
        self.store.has_save()
    }

    #[must_use]
    pub fn resolver_status(&self) -> ResolutionStatus {
        self.resolver.status()
    }

    /// True while the preview is running.
    #[must_use]
    pub fn is_previewing(&self) -> bool {
        self.preview.is_some()
    }

    /// True if flips are currently ignored.
    #[must_use]
    pub fn is_input_locked(&self) -> bool {
        self.host_locked || self.preview.is_some() || self.phase != SessionPhase::Playing
    }

    /// Block or allow flips from the host (e.g. a pause overlay).
    pub fn set_input_locked(&mut self, locked: bool) {
        self.host_locked = locked;
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Capture the current session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.board, self.score.state())
    }

    // === Lifecycle ===

    /// Restore the saved session, or build a fresh board.
    ///
    /// A save that is missing, unreadable, or invalid for the deck is
    /// ignored. Errors only when a fresh board cannot be built.
    pub fn start(&mut self) -> Result<(), ConfigError> {
        self.reset_runtime();

        if let Some(snapshot) = self.store.try_load() {
            match snapshot.validate(&self.deck) {
                Ok(()) => {
                    self.restore(snapshot);
                    return Ok(());
                }
                Err(error) => warn!(%error, "ignoring saved session"),
            }
        }

        self.build_fresh()
    }

    /// Drop all in-flight work and the save, then build a fresh board.
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        info!("restarting session");
        self.reset_runtime();
        self.host_locked = false;
        self.store.clear();
        self.events.push(SessionEvent::Restarted);
        self.build_fresh()
    }

    fn reset_runtime(&mut self) {
        self.resolver.clear();
        self.recent_reveals.clear();
        self.preview = None;
        self.score.reset();
    }

    fn restore(&mut self, snapshot: SessionSnapshot) {
        let SessionSnapshot {
            columns,
            rows,
            matches,
            turns,
            score,
            combo,
            face_ids_by_index,
            matched_indices,
        } = snapshot;

        self.board.layout_faces(columns, rows, face_ids_by_index);
        for index in matched_indices {
            if let Some(card) = self.board.get_mut(CardId::new(index)) {
                if let Err(error) = card.set_matched() {
                    warn!(%error, "could not restore matched card");
                }
            }
        }
        self.score.load_from(matches, turns, score, combo);
        self.phase = SessionPhase::Playing;

        info!(columns, rows, matches, score, "session restored");
        self.events.push(SessionEvent::BoardBuilt {
            columns,
            rows,
            restored: true,
        });
        self.events.push(SessionEvent::ScoreChanged(self.score.state()));

        if self.board.all_matched() {
            self.enter_won();
        }
    }

    fn build_fresh(&mut self) -> Result<(), ConfigError> {
        let (columns, rows) = (self.config.columns, self.config.rows);
        self.board
            .layout_random(columns, rows, &self.deck, &mut self.rng)?;
        self.phase = SessionPhase::Playing;

        info!(columns, rows, "fresh board built");
        self.events.push(SessionEvent::BoardBuilt {
            columns,
            rows,
            restored: false,
        });
        self.events.push(SessionEvent::ScoreChanged(self.score.state()));

        if self.config.preview_secs > 0.0 {
            self.start_preview();
        }
        Ok(())
    }

    // === Input ===

    /// Handle a tap on the card at `card`.
    pub fn flip(&mut self, card: CardId) -> FlipResult {
        if self.phase == SessionPhase::Won {
            return FlipResult::Ignored(IgnoreReason::GameWon);
        }
        if self.is_input_locked() {
            return FlipResult::Ignored(IgnoreReason::InputLocked);
        }

        let flip_secs = self.config.flip_secs;
        let Some(target) = self.board.get_mut(card) else {
            return FlipResult::Ignored(IgnoreReason::UnknownCard);
        };
        if !target.can_interact() || target.state() != CardState::FaceDown {
            return FlipResult::Ignored(IgnoreReason::NotFaceDown);
        }
        if let Err(error) = target.reveal(flip_secs) {
            warn!(%error, "flip rejected");
            return FlipResult::Ignored(IgnoreReason::NotFaceDown);
        }

        self.score.register_flip();
        debug!(%card, turns = self.score.turns(), "card flipped");
        self.events.push(SessionEvent::FlipStarted {
            card,
            face_up: true,
        });
        self.events.push(SessionEvent::CardFlipped { card });
        self.events.push(SessionEvent::ScoreChanged(self.score.state()));

        self.recent_reveals.push(self.board.card_ref(card));
        if self.recent_reveals.len() < 2 {
            return FlipResult::Revealed;
        }

        let first = self.recent_reveals[0];
        let second = self.recent_reveals[1];
        self.recent_reveals.clear();
        self.resolver.enqueue(first, second);
        self.persist();
        FlipResult::PairFormed
    }

    /// Report that the presentation finished animating `card`'s flip.
    ///
    /// Returns `false` if the card was not flipping.
    pub fn complete_flip(&mut self, card: CardId) -> bool {
        let outcome = self.board.get_mut(card).and_then(|c| c.finish_flip());
        match outcome {
            Some(outcome) => {
                self.push_flip_finished(card, outcome);
                true
            }
            None => false,
        }
    }

    // === Game loop ===

    /// Advance the session by `dt` seconds.
    ///
    /// A non-finite `dt` is ignored; a negative one counts as zero.
    pub fn tick(&mut self, dt: f32) {
        if self.phase == SessionPhase::Loading {
            return;
        }
        if !dt.is_finite() {
            warn!(dt, "ignoring non-finite tick");
            return;
        }
        let dt = dt.max(0.0);

        for (card, outcome) in self.board.advance(dt) {
            self.push_flip_finished(card, outcome);
        }

        self.advance_preview(dt);

        self.resolver.process(&mut self.board, dt);
        for event in self.resolver.drain_events() {
            match event {
                ResolverEvent::CardMatched(card) => {
                    self.events.push(SessionEvent::CardMatched { card });
                }
                ResolverEvent::CardHiding(card) => {
                    self.events.push(SessionEvent::FlipStarted {
                        card,
                        face_up: false,
                    });
                }
                ResolverEvent::Resolved(resolution) => self.on_pair_resolved(resolution.matched),
            }
        }
    }

    fn push_flip_finished(&mut self, card: CardId, outcome: FlipOutcome) {
        self.events.push(SessionEvent::FlipFinished {
            card,
            face_up: outcome == FlipOutcome::ReachedFaceUp,
        });
    }

    fn on_pair_resolved(&mut self, matched: bool) {
        if self.phase == SessionPhase::Won {
            return;
        }

        if matched {
            self.score.register_match();
        } else {
            self.score.register_mismatch();
        }

        let score = self.score.state();
        debug!(matched, score = score.score, combo = score.combo, "pair resolved");
        self.events.push(SessionEvent::PairResolved { matched, score });
        self.events.push(SessionEvent::ScoreChanged(score));
        self.persist();

        if self.board.all_matched() {
            self.enter_won();
        }
    }

    fn enter_won(&mut self) {
        self.phase = SessionPhase::Won;
        self.resolver.clear();
        self.recent_reveals.clear();

        let score = self.score.state();
        info!(score = score.score, turns = score.turns, "board cleared");
        self.events.push(SessionEvent::Won { score });
        self.persist();
    }

    fn persist(&mut self) {
        let snapshot = self.snapshot();
        self.store.save(&snapshot);
    }

    // === Preview ===

    fn start_preview(&mut self) {
        let flip_secs = self.config.flip_secs;
        let ids: Vec<CardId> = self.board.cards().iter().map(|c| c.id()).collect();
        for card in ids {
            if let Some(target) = self.board.get_mut(card) {
                if target.reveal(flip_secs).is_ok() {
                    self.events.push(SessionEvent::FlipStarted {
                        card,
                        face_up: true,
                    });
                }
            }
        }
        debug!(secs = self.config.preview_secs, "preview started");
        self.preview = Some(Preview::Revealing);
    }

    fn advance_preview(&mut self, dt: f32) {
        let Some(stage) = self.preview else {
            return;
        };
        let flipping = self.board.cards().iter().any(|c| c.is_flipping());

        self.preview = match stage {
            Preview::Revealing if flipping => Some(Preview::Revealing),
            Preview::Revealing => Some(Preview::Showing { elapsed: 0.0 }),
            Preview::Showing { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed < self.config.preview_secs {
                    Some(Preview::Showing { elapsed })
                } else {
                    self.hide_preview();
                    Some(Preview::Hiding)
                }
            }
            Preview::Hiding if flipping => Some(Preview::Hiding),
            Preview::Hiding => {
                debug!("preview ended");
                self.events.push(SessionEvent::PreviewEnded);
                None
            }
        };
    }

    fn hide_preview(&mut self) {
        let flip_secs = self.config.flip_secs;
        let ids: Vec<CardId> = self.board.cards().iter().map(|c| c.id()).collect();
        for card in ids {
            if let Some(target) = self.board.get_mut(card) {
                if target.state() == CardState::FaceUp && target.hide(flip_secs).is_ok() {
                    self.events.push(SessionEvent::FlipStarted {
                        card,
                        face_up: false,
                    });
                }
            }
        }
    }
}
