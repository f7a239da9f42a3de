//! Face identities and the deck they are drawn from.
//!
//! A `FaceId` names the symbol a card shows; two cards match when their
//! face ids are equal. The `Deck` is the ordered set of faces a board may
//! use. It is static content, separate from the per-card runtime state in
//! `Card`.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// Symbol identifying a card's matching partner.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceId(pub String);

impl FaceId {
    /// Create a new face ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FaceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FaceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for FaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered set of distinct faces available to a board.
///
/// ## Example
///
/// ```
/// use memory_match::cards::{Deck, FaceId};
///
/// let deck = Deck::new(["apple", "pear", "plum"]).unwrap();
///
/// assert_eq!(deck.len(), 3);
/// assert!(deck.contains(&FaceId::from("pear")));
/// assert!(deck.supports(6));
/// assert!(!deck.supports(8));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Deck {
    faces: Vec<FaceId>,
    index: FxHashSet<FaceId>,
}

impl Deck {
    /// Build a deck, rejecting empty or repeated face ids.
    pub fn new<I, F>(faces: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = F>,
        F: Into<FaceId>,
    {
        let mut deck = Self::default();
        for face in faces {
            let face = face.into();
            if face.0.is_empty() {
                return Err(ConfigError::EmptyFaceId);
            }
            if !deck.index.insert(face.clone()) {
                return Err(ConfigError::DuplicateFace(face));
            }
            deck.faces.push(face);
        }
        Ok(deck)
    }

    /// Number of distinct faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Faces in declaration order.
    #[must_use]
    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    /// Check whether a face belongs to this deck.
    #[must_use]
    pub fn contains(&self, face: &FaceId) -> bool {
        self.index.contains(face)
    }

    /// Check whether the deck has enough faces for `card_count` cards.
    #[must_use]
    pub fn supports(&self, card_count: usize) -> bool {
        self.faces.len() >= card_count / 2
    }
}
