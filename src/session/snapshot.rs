//! Persistable record of a session.
//!
//! A snapshot stores the face at every board position plus the matched
//! positions, so a restored board keeps its layout without reshuffling.
//! Field names on the wire follow the save format used by existing clients
//! (`layoutCols`, `faceIdsByIndex`, ...).

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Board, Deck, FaceId};
use crate::core::error::SnapshotError;
use crate::core::ScoreState;

/// Full session state for persistence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(rename = "layoutCols")]
    pub columns: u32,

    #[serde(rename = "layoutRows")]
    pub rows: u32,

    pub matches: u32,
    pub turns: u32,
    pub score: u32,
    pub combo: u32,

    /// Face at each board position.
    #[serde(rename = "faceIdsByIndex")]
    pub face_ids_by_index: Vec<FaceId>,

    /// Positions of matched cards (serialized ascending).
    #[serde(rename = "matchedIndices")]
    pub matched_indices: BTreeSet<u32>,
}

impl SessionSnapshot {
    /// Capture the current board and counters.
    #[must_use]
    pub fn capture(board: &Board, score: ScoreState) -> Self {
        Self {
            columns: board.columns(),
            rows: board.rows(),
            matches: score.matches,
            turns: score.turns,
            score: score.score,
            combo: score.combo,
            face_ids_by_index: board.faces_by_position(),
            matched_indices: board.matched_positions(),
        }
    }

    /// Cards the layout calls for.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Saved counters.
    #[must_use]
    pub fn score_state(&self) -> ScoreState {
        ScoreState {
            score: self.score,
            matches: self.matches,
            turns: self.turns,
            combo: self.combo,
        }
    }

    /// Check the snapshot describes a board buildable from `deck`.
    ///
    /// The layout must be positive and even, there must be one face per
    /// position, every face must be in the deck and appear exactly twice,
    /// every matched index must be on the board, and matched cards must
    /// come in matched pairs.
    pub fn validate(&self, deck: &Deck) -> Result<(), SnapshotError> {
        let expected = self.card_count();
        if expected == 0 || expected % 2 != 0 {
            return Err(SnapshotError::InvalidLayout {
                columns: self.columns,
                rows: self.rows,
            });
        }

        if self.face_ids_by_index.len() != expected {
            return Err(SnapshotError::CardCount {
                expected,
                actual: self.face_ids_by_index.len(),
            });
        }

        if let Some((index, face)) = self
            .face_ids_by_index
            .iter()
            .enumerate()
            .find(|(_, face)| !deck.contains(face))
        {
            return Err(SnapshotError::UnknownFace {
                index,
                face: face.clone(),
            });
        }

        if let Some(&index) = self
            .matched_indices
            .iter()
            .find(|&&i| i as usize >= expected)
        {
            return Err(SnapshotError::MatchedOutOfRange {
                index,
                count: expected,
            });
        }

        let mut positions: FxHashMap<&FaceId, SmallVec<[u32; 2]>> = FxHashMap::default();
        for (index, face) in self.face_ids_by_index.iter().enumerate() {
            positions.entry(face).or_default().push(index as u32);
        }

        // Report offenders in position order
        for face in &self.face_ids_by_index {
            let count = positions.get(face).map_or(0, |slots| slots.len());
            if count != 2 {
                return Err(SnapshotError::UnpairedFace {
                    face: face.clone(),
                    count,
                });
            }
        }

        for &index in &self.matched_indices {
            let face = &self.face_ids_by_index[index as usize];
            let Some(&partner) = positions
                .get(face)
                .and_then(|slots| slots.iter().find(|&&slot| slot != index))
            else {
                continue;
            };
            if !self.matched_indices.contains(&partner) {
                return Err(SnapshotError::UnmatchedPartner { index, partner });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use pretty_assertions::assert_eq;

    fn deck() -> Deck {
        Deck::new(["a", "b", "c"]).unwrap()
    }

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            columns: 2,
            rows: 2,
            matches: 1,
            turns: 4,
            score: 90,
            combo: 0,
            face_ids_by_index: ["a", "b", "a", "b"].into_iter().map(FaceId::from).collect(),
            matched_indices: BTreeSet::from([0, 2]),
        }
    }

    #[test]
    fn test_valid_snapshot() {
        assert_eq!(snapshot().validate(&deck()), Ok(()));
    }

    #[test]
    fn test_invalid_layout() {
        let mut s = snapshot();
        s.columns = 0;
        assert_eq!(
            s.validate(&deck()),
            Err(SnapshotError::InvalidLayout { columns: 0, rows: 2 })
        );
    }

    #[test]
    fn test_card_count_mismatch() {
        let mut s = snapshot();
        s.face_ids_by_index.pop();
        assert_eq!(
            s.validate(&deck()),
            Err(SnapshotError::CardCount {
                expected: 4,
                actual: 3,
            })
        );
    }

    #[test]
    fn test_unknown_face() {
        let mut s = snapshot();
        s.face_ids_by_index[3] = FaceId::new("zebra");
        assert_eq!(
            s.validate(&deck()),
            Err(SnapshotError::UnknownFace {
                index: 3,
                face: FaceId::new("zebra"),
            })
        );
    }

    #[test]
    fn test_matched_out_of_range() {
        let mut s = snapshot();
        s.matched_indices.insert(4);
        assert_eq!(
            s.validate(&deck()),
            Err(SnapshotError::MatchedOutOfRange { index: 4, count: 4 })
        );
    }

    #[test]
    fn test_face_must_appear_twice() {
        let mut s = snapshot();
        s.face_ids_by_index = ["a", "a", "a", "b"].into_iter().map(FaceId::from).collect();
        s.matched_indices = BTreeSet::from([0]);
        assert_eq!(
            s.validate(&deck()),
            Err(SnapshotError::UnpairedFace {
                face: FaceId::new("a"),
                count: 3,
            })
        );
    }

    #[test]
    fn test_matched_card_needs_matched_partner() {
        let mut s = snapshot();
        s.matched_indices = BTreeSet::from([0]);
        assert_eq!(
            s.validate(&deck()),
            Err(SnapshotError::UnmatchedPartner {
                index: 0,
                partner: 2,
            })
        );
    }

    #[test]
    fn test_capture() {
        let mut board = Board::new();
        board.layout_faces(2, 1, vec![FaceId::new("a"), FaceId::new("a")]);
        board.get_mut(CardId::new(1)).unwrap().set_matched().unwrap();

        let score = ScoreState {
            score: 100,
            matches: 1,
            turns: 2,
            combo: 1,
        };
        let s = SessionSnapshot::capture(&board, score);

        assert_eq!(s.columns, 2);
        assert_eq!(s.rows, 1);
        assert_eq!(s.score_state(), score);
        assert_eq!(s.face_ids_by_index, vec![FaceId::new("a"), FaceId::new("a")]);
        assert_eq!(s.matched_indices, BTreeSet::from([1]));
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "layoutCols": 2,
                "layoutRows": 2,
                "matches": 1,
                "turns": 4,
                "score": 90,
                "combo": 0,
                "faceIdsByIndex": ["a", "b", "a", "b"],
                "matchedIndices": [0, 2]
            })
        );
    }
}
