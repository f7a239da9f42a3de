//! Presentation collaborator contract.
//!
//! Rendering, animation and audio live outside this crate. A host
//! implements [`Presenter`] and feeds it the session's events through
//! [`dispatch`]. Every method defaults to a no-op, so hosts implement only
//! what they draw or play.
//!
//! Flip animations report completion back through
//! `SessionController::complete_flip`, or simply let the session's own
//! flip clock finish them.

use crate::cards::{Board, CardId, FaceId};
use crate::core::ScoreState;
use crate::session::SessionEvent;

/// Audio cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Flip,
    Match,
    Mismatch,
    Win,
}

/// Receiver for rendering and audio instructions.
#[allow(unused_variables)]
pub trait Presenter {
    /// Show the card's face.
    fn render_face(&mut self, card: CardId, face: &FaceId) {}

    /// Show the card's back.
    fn render_back(&mut self, card: CardId) {}

    /// Enable or disable taps on the card.
    fn set_interactable(&mut self, card: CardId, interactable: bool) {}

    /// Refresh the HUD counters.
    fn show_score(&mut self, score: ScoreState) {}

    /// Play a one-shot sound.
    fn play_cue(&mut self, cue: Cue) {}
}

/// Translate session events into presenter calls.
///
/// `board` supplies faces and current card states; pass the session's
/// board right after draining its events.
pub fn dispatch<P: Presenter + ?Sized>(events: &[SessionEvent], board: &Board, presenter: &mut P) {
    for event in events {
        match event {
            SessionEvent::BoardBuilt { .. } => {
                for card in board.cards() {
                    if card.is_matched() {
                        presenter.render_face(card.id(), card.face());
                    } else {
                        presenter.render_back(card.id());
                    }
                    presenter.set_interactable(card.id(), card.can_interact());
                }
            }
            SessionEvent::CardFlipped { .. } => presenter.play_cue(Cue::Flip),
            SessionEvent::FlipStarted { card, .. } => presenter.set_interactable(*card, false),
            SessionEvent::FlipFinished { card, face_up } => {
                if *face_up {
                    if let Some(c) = board.get(*card) {
                        presenter.render_face(*card, c.face());
                    }
                } else {
                    presenter.render_back(*card);
                }
                let interactable = board.get(*card).is_some_and(|c| c.can_interact());
                presenter.set_interactable(*card, interactable);
            }
            SessionEvent::CardMatched { card } => presenter.set_interactable(*card, false),
            SessionEvent::PairResolved { matched, .. } => {
                presenter.play_cue(if *matched { Cue::Match } else { Cue::Mismatch });
            }
            SessionEvent::ScoreChanged(score) => presenter.show_score(*score),
            SessionEvent::Won { .. } => presenter.play_cue(Cue::Win),
            SessionEvent::PreviewEnded | SessionEvent::Restarted => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        faces: Vec<(CardId, String)>,
        backs: Vec<CardId>,
        interactable: Vec<(CardId, bool)>,
        cues: Vec<Cue>,
        scores: Vec<ScoreState>,
    }

    impl Presenter for Recorder {
        fn render_face(&mut self, card: CardId, face: &FaceId) {
            self.faces.push((card, face.to_string()));
        }

        fn render_back(&mut self, card: CardId) {
            self.backs.push(card);
        }

        fn set_interactable(&mut self, card: CardId, interactable: bool) {
            self.interactable.push((card, interactable));
        }

        fn show_score(&mut self, score: ScoreState) {
            self.scores.push(score);
        }

        fn play_cue(&mut self, cue: Cue) {
            self.cues.push(cue);
        }
    }

    fn board() -> Board {
        let mut board = Board::new();
        board.layout_faces(2, 1, vec![FaceId::new("owl"), FaceId::new("owl")]);
        board
    }

    #[test]
    fn test_board_built_renders_every_card() {
        let mut board = board();
        board.get_mut(CardId::new(1)).unwrap().set_matched().unwrap();

        let mut recorder = Recorder::default();
        let events = [SessionEvent::BoardBuilt {
            columns: 2,
            rows: 1,
            restored: true,
        }];
        dispatch(&events, &board, &mut recorder);

        assert_eq!(recorder.backs, vec![CardId::new(0)]);
        assert_eq!(recorder.faces, vec![(CardId::new(1), "owl".to_string())]);
        assert_eq!(
            recorder.interactable,
            vec![(CardId::new(0), true), (CardId::new(1), false)]
        );
    }

    #[test]
    fn test_flip_finished_renders_face() {
        let mut board = board();
        let card = board.get_mut(CardId::new(0)).unwrap();
        card.reveal(0.0).unwrap();
        card.finish_flip();

        let mut recorder = Recorder::default();
        let events = [
            SessionEvent::CardFlipped { card: CardId::new(0) },
            SessionEvent::FlipFinished {
                card: CardId::new(0),
                face_up: true,
            },
        ];
        dispatch(&events, &board, &mut recorder);

        assert_eq!(recorder.cues, vec![Cue::Flip]);
        assert_eq!(recorder.faces, vec![(CardId::new(0), "owl".to_string())]);
        assert_eq!(recorder.interactable, vec![(CardId::new(0), true)]);
    }

    #[test]
    fn test_cues_and_score() {
        let score = ScoreState {
            score: 100,
            matches: 1,
            turns: 2,
            combo: 1,
        };
        let events = [
            SessionEvent::PairResolved {
                matched: false,
                score,
            },
            SessionEvent::PairResolved {
                matched: true,
                score,
            },
            SessionEvent::ScoreChanged(score),
            SessionEvent::Won { score },
        ];

        let mut recorder = Recorder::default();
        dispatch(&events, &board(), &mut recorder);

        assert_eq!(recorder.cues, vec![Cue::Mismatch, Cue::Match, Cue::Win]);
        assert_eq!(recorder.scores, vec![score]);
    }

    #[test]
    fn test_default_presenter_is_noop() {
        struct Silent;
        impl Presenter for Silent {}

        let events = [SessionEvent::Restarted, SessionEvent::PreviewEnded];
        dispatch(&events, &board(), &mut Silent);
    }
}
