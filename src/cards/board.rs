//! The board: every card in play, in position order.
//!
//! The board is the single owner of card state. Each layout bumps the
//! board's `generation`; a `CardRef` issued before a rebuild no longer
//! resolves, which is how queued work detects stale cards.

use std::collections::BTreeSet;

use tracing::debug;

use super::definition::{Deck, FaceId};
use super::instance::{Card, CardId, CardRef, FlipOutcome};
use crate::core::error::ConfigError;
use crate::core::rng::GameRng;

/// Check a layout can be built from `deck`.
///
/// Returns the card count on success.
pub fn check_layout(columns: u32, rows: u32, deck: &Deck) -> Result<usize, ConfigError> {
    let count = columns as usize * rows as usize;
    if count == 0 || count % 2 != 0 {
        return Err(ConfigError::InvalidBoardSize { columns, rows });
    }
    if !deck.supports(count) {
        return Err(ConfigError::InsufficientDeck {
            needed: count / 2,
            available: deck.len(),
        });
    }
    Ok(count)
}

/// Cards laid out on a `columns x rows` grid.
#[derive(Clone, Debug, Default)]
pub struct Board {
    columns: u32,
    rows: u32,
    cards: Vec<Card>,
    generation: u64,
}

impl Board {
    /// Create an empty board (generation 0, no cards).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out a fresh random board.
    ///
    /// Picks `columns * rows / 2` distinct faces uniformly at random,
    /// duplicates each, and shuffles. On error the board is left untouched.
    pub fn layout_random(
        &mut self,
        columns: u32,
        rows: u32,
        deck: &Deck,
        rng: &mut GameRng,
    ) -> Result<(), ConfigError> {
        let count = check_layout(columns, rows, deck)?;

        let chosen = rng.sample_distinct(deck.faces(), count / 2);
        let mut faces: Vec<FaceId> = chosen.iter().chain(chosen.iter()).cloned().collect();
        rng.shuffle(&mut faces);

        self.replace(columns, rows, faces);
        Ok(())
    }

    /// Lay out a board from known faces, all face-down.
    ///
    /// Callers validate `faces` against the layout first; see
    /// `SessionSnapshot::validate`.
    pub fn layout_faces(&mut self, columns: u32, rows: u32, faces: Vec<FaceId>) {
        self.replace(columns, rows, faces);
    }

    fn replace(&mut self, columns: u32, rows: u32, faces: Vec<FaceId>) {
        self.columns = columns;
        self.rows = rows;
        self.generation += 1;
        self.cards = faces
            .into_iter()
            .enumerate()
            .map(|(i, face)| Card::new(CardId::new(i as u32), face))
            .collect();

        debug!(
            columns,
            rows,
            generation = self.generation,
            "board laid out"
        );
    }

    #[must_use]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Layout generation; bumps on every rebuild.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in position order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index())
    }

    /// A reference to `id` valid for the current generation.
    #[must_use]
    pub fn card_ref(&self, id: CardId) -> CardRef {
        CardRef {
            id,
            generation: self.generation,
        }
    }

    /// Look up a card, or `None` if the reference is stale.
    #[must_use]
    pub fn resolve(&self, card_ref: CardRef) -> Option<&Card> {
        if card_ref.generation != self.generation {
            return None;
        }
        self.get(card_ref.id)
    }

    /// Mutable lookup, or `None` if the reference is stale.
    pub fn resolve_mut(&mut self, card_ref: CardRef) -> Option<&mut Card> {
        if card_ref.generation != self.generation {
            return None;
        }
        self.get_mut(card_ref.id)
    }

    /// True when the board has cards and every one is matched.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(Card::is_matched)
    }

    /// Face id at each position.
    #[must_use]
    pub fn faces_by_position(&self) -> Vec<FaceId> {
        self.cards.iter().map(|c| c.face().clone()).collect()
    }

    /// Positions of matched cards.
    #[must_use]
    pub fn matched_positions(&self) -> BTreeSet<u32> {
        self.cards
            .iter()
            .filter(|c| c.is_matched())
            .map(|c| c.id().raw())
            .collect()
    }

    /// Advance every in-flight flip by `dt` seconds.
    ///
    /// Returns the flips that completed, in position order.
    pub fn advance(&mut self, dt: f32) -> Vec<(CardId, FlipOutcome)> {
        self.cards
            .iter_mut()
            .filter_map(|card| card.advance(dt).map(|outcome| (card.id(), outcome)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardState;
    use rustc_hash::FxHashMap;

    fn deck(n: usize) -> Deck {
        Deck::new((0..n).map(|i| format!("face-{i}"))).unwrap()
    }

    #[test]
    fn test_layout_random_pairs_each_face() {
        let mut board = Board::new();
        let mut rng = GameRng::new(42);
        board.layout_random(4, 3, &deck(10), &mut rng).unwrap();

        assert_eq!(board.len(), 12);
        assert_eq!(board.generation(), 1);

        let mut counts: FxHashMap<&FaceId, usize> = FxHashMap::default();
        for card in board.cards() {
            *counts.entry(card.face()).or_default() += 1;
            assert_eq!(card.state(), CardState::FaceDown);
        }
        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_card_ids_are_positions() {
        let mut board = Board::new();
        board.layout_random(2, 2, &deck(2), &mut GameRng::new(1)).unwrap();

        for (i, card) in board.cards().iter().enumerate() {
            assert_eq!(card.id().index(), i);
        }
    }

    #[test]
    fn test_odd_board_rejected() {
        let mut board = Board::new();
        let err = board
            .layout_random(3, 3, &deck(10), &mut GameRng::new(1))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidBoardSize { columns: 3, rows: 3 });
        assert!(board.is_empty());
        assert_eq!(board.generation(), 0);
    }

    #[test]
    fn test_empty_board_rejected() {
        assert!(matches!(
            check_layout(0, 4, &deck(4)),
            Err(ConfigError::InvalidBoardSize { .. })
        ));
    }

    #[test]
    fn test_small_deck_rejected() {
        let err = check_layout(4, 4, &deck(7)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InsufficientDeck {
                needed: 8,
                available: 7,
            }
        );
        assert_eq!(check_layout(4, 4, &deck(8)), Ok(16));
    }

    #[test]
    fn test_stale_refs_do_not_resolve() {
        let mut board = Board::new();
        let mut rng = GameRng::new(3);
        board.layout_random(2, 2, &deck(2), &mut rng).unwrap();

        let old = board.card_ref(CardId::new(0));
        assert!(board.resolve(old).is_some());

        board.layout_random(2, 2, &deck(2), &mut rng).unwrap();
        assert!(board.resolve(old).is_none());
        assert!(board.resolve_mut(old).is_none());
        assert!(board.resolve(board.card_ref(CardId::new(0))).is_some());
    }

    #[test]
    fn test_out_of_range_ref() {
        let mut board = Board::new();
        board.layout_faces(1, 2, vec![FaceId::new("a"), FaceId::new("a")]);
        assert!(board.resolve(board.card_ref(CardId::new(2))).is_none());
    }

    #[test]
    fn test_matched_positions_and_all_matched() {
        let mut board = Board::new();
        board.layout_faces(2, 1, vec![FaceId::new("a"), FaceId::new("a")]);
        assert!(!board.all_matched());

        board.get_mut(CardId::new(1)).unwrap().set_matched().unwrap();
        assert_eq!(board.matched_positions(), BTreeSet::from([1]));

        board.get_mut(CardId::new(0)).unwrap().set_matched().unwrap();
        assert!(board.all_matched());
    }

    #[test]
    fn test_empty_board_is_not_won() {
        assert!(!Board::new().all_matched());
    }

    #[test]
    fn test_advance_reports_completed_flips() {
        let mut board = Board::new();
        board.layout_faces(2, 1, vec![FaceId::new("a"), FaceId::new("b")]);
        board.get_mut(CardId::new(0)).unwrap().reveal(0.1).unwrap();
        board.get_mut(CardId::new(1)).unwrap().reveal(0.3).unwrap();

        assert_eq!(
            board.advance(0.2),
            vec![(CardId::new(0), FlipOutcome::ReachedFaceUp)]
        );
        assert_eq!(
            board.advance(0.2),
            vec![(CardId::new(1), FlipOutcome::ReachedFaceUp)]
        );
        assert!(board.advance(1.0).is_empty());
    }
}
