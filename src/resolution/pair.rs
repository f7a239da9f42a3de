//! FIFO pair resolver with a single polling worker.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::cards::{Board, CardRef, CardState};
use crate::core::SessionConfig;

use super::{Pair, PairResolution, ResolutionStatus, ResolverEvent};

/// The worker's current job.
#[derive(Clone, Copy, Debug, Default)]
enum Worker {
    #[default]
    Idle,
    AwaitingReveal { pair: Pair, waited: f32 },
    Holding { pair: Pair, held: f32 },
}

enum Readiness {
    Ready,
    Pending,
    Stale,
}

/// Serializes pair comparisons.
///
/// ## Behavior
///
/// - `enqueue()`: Appends a pair; never blocks.
/// - `process()`: Runs the worker for one tick. The head pair is compared
///   once both cards are `FaceUp` (or `Matched`); stale or timed-out pairs
///   are dropped without a `Resolved` event.
/// - Matches resolve immediately. Mismatches report `Resolved` immediately,
///   hold, then hide whichever cards are still `FaceUp`. The next pair is
///   not started until the hold ends.
/// - `clear()`: Drops queued work, the in-flight pair and undrained events.
#[derive(Clone, Debug)]
pub struct PairResolver {
    queue: VecDeque<Pair>,
    worker: Worker,
    events: Vec<ResolverEvent>,
    mismatch_hold_secs: f32,
    reveal_timeout_secs: f32,
    hide_secs: f32,
}

impl Default for PairResolver {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

impl PairResolver {
    /// Create a resolver with default timings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver using the timings in `config`.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            queue: VecDeque::new(),
            worker: Worker::Idle,
            events: Vec::new(),
            mismatch_hold_secs: config.mismatch_hold_secs,
            reveal_timeout_secs: config.reveal_timeout_secs,
            hide_secs: config.flip_secs,
        }
    }

    /// Queue a pair for comparison.
    pub fn enqueue(&mut self, first: CardRef, second: CardRef) {
        debug!(%first, %second, queued = self.queue.len() + 1, "pair enqueued");
        self.queue.push_back(Pair::new(first, second));
    }

    /// Pairs waiting behind the one in flight.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is queued or in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && matches!(self.worker, Worker::Idle)
    }

    /// What the worker is doing right now.
    #[must_use]
    pub fn status(&self) -> ResolutionStatus {
        match self.worker {
            Worker::Idle => ResolutionStatus::Idle,
            Worker::AwaitingReveal { .. } => ResolutionStatus::AwaitingReveal,
            Worker::Holding { .. } => ResolutionStatus::Holding,
        }
    }

    /// Take every event produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<ResolverEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop all queued and in-flight work.
    ///
    /// Undrained events are dropped too, so nothing queued before the clear
    /// can be observed after it.
    pub fn clear(&mut self) {
        if !self.is_idle() {
            debug!(dropped = self.queue.len(), "resolver cleared");
        }
        self.queue.clear();
        self.worker = Worker::Idle;
        self.events.clear();
    }

    /// Run the worker for one tick of `dt` seconds.
    ///
    /// Keeps working until the queue is empty or the worker has to wait.
    pub fn process(&mut self, board: &mut Board, dt: f32) -> ResolutionStatus {
        let mut budget = dt.max(0.0);

        loop {
            match std::mem::take(&mut self.worker) {
                Worker::Idle => {
                    let Some(pair) = self.queue.pop_front() else {
                        return ResolutionStatus::Idle;
                    };
                    self.worker = Worker::AwaitingReveal { pair, waited: 0.0 };
                }

                Worker::AwaitingReveal { pair, waited } => match readiness(board, &pair) {
                    Readiness::Ready => self.compare(board, pair),
                    Readiness::Stale => {
                        warn!(first = %pair.first, second = %pair.second, "discarding stale pair");
                    }
                    Readiness::Pending => {
                        let waited = waited + std::mem::take(&mut budget);
                        if waited >= self.reveal_timeout_secs {
                            warn!(
                                first = %pair.first,
                                second = %pair.second,
                                waited,
                                "discarding pair that never finished revealing"
                            );
                            continue;
                        }
                        self.worker = Worker::AwaitingReveal { pair, waited };
                        return ResolutionStatus::AwaitingReveal;
                    }
                },

                Worker::Holding { pair, held } => {
                    let held = held + std::mem::take(&mut budget);
                    if held < self.mismatch_hold_secs {
                        self.worker = Worker::Holding { pair, held };
                        return ResolutionStatus::Holding;
                    }
                    self.hide_face_up(board, &pair);
                }
            }
        }
    }

    fn compare(&mut self, board: &mut Board, pair: Pair) {
        let matched = match (board.resolve(pair.first), board.resolve(pair.second)) {
            (Some(a), Some(b)) => a.face() == b.face(),
            _ => return,
        };

        debug!(first = %pair.first, second = %pair.second, matched, "pair compared");

        if matched {
            for card_ref in pair.refs() {
                let Some(card) = board.resolve_mut(card_ref) else {
                    continue;
                };
                if card.is_matched() {
                    continue;
                }
                match card.set_matched() {
                    Ok(()) => self.events.push(ResolverEvent::CardMatched(card_ref.id)),
                    Err(error) => warn!(%error, "could not mark card matched"),
                }
            }
        } else {
            self.worker = Worker::Holding { pair, held: 0.0 };
        }

        self.events
            .push(ResolverEvent::Resolved(PairResolution { pair, matched }));
    }

    fn hide_face_up(&mut self, board: &mut Board, pair: &Pair) {
        for card_ref in pair.refs() {
            let Some(card) = board.resolve_mut(card_ref) else {
                continue;
            };
            // Skip cards that moved on during the hold
            if card.state() != CardState::FaceUp {
                continue;
            }
            if card.hide(self.hide_secs).is_ok() {
                self.events.push(ResolverEvent::CardHiding(card_ref.id));
            }
        }
    }
}

fn readiness(board: &Board, pair: &Pair) -> Readiness {
    if pair.first == pair.second {
        return Readiness::Stale;
    }
    match (board.resolve(pair.first), board.resolve(pair.second)) {
        (Some(a), Some(b)) if a.state().is_comparable() && b.state().is_comparable() => {
            Readiness::Ready
        }
        (Some(_), Some(_)) => Readiness::Pending,
        _ => Readiness::Stale,
    }
}
