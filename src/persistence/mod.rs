//! Session persistence.
//!
//! `SaveStore` is the seam between the session and durable storage.
//! Persistence is best-effort:
//!
//! - `save` overwrites the previous snapshot; failures are logged, never
//!   returned.
//! - `try_load` returns `None` for a missing, empty or malformed save.
//! - `clear` is idempotent.
//!
//! Two stores ship with the crate: [`MemorySaveStore`] and
//! [`FileSaveStore`]. Both use the JSON codec below.

mod file;
mod memory;

pub use file::{FileSaveStore, DEFAULT_FILE_NAME};
pub use memory::MemorySaveStore;

use crate::core::error::StoreError;
use crate::session::SessionSnapshot;

/// Durable storage for a single session snapshot.
pub trait SaveStore {
    /// Persist `snapshot`, replacing any earlier one.
    fn save(&mut self, snapshot: &SessionSnapshot);

    /// The most recent snapshot, or `None` if absent or unreadable.
    fn try_load(&self) -> Option<SessionSnapshot>;

    /// Remove any persisted snapshot.
    fn clear(&mut self);

    /// True if a non-empty save is present. Does not validate it.
    fn has_save(&self) -> bool;
}

/// Encode a snapshot as pretty-printed JSON.
pub fn encode_snapshot(snapshot: &SessionSnapshot) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Decode a snapshot. Blank input decodes to `None`.
pub fn decode_snapshot(raw: &str) -> Result<Option<SessionSnapshot>, StoreError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(raw)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::FaceId;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            columns: 2,
            rows: 1,
            matches: 0,
            turns: 1,
            score: 0,
            combo: 0,
            face_ids_by_index: vec![FaceId::new("x"), FaceId::new("x")],
            matched_indices: BTreeSet::new(),
        }
    }

    #[test]
    fn test_codec_round_trip() {
        let encoded = encode_snapshot(&snapshot()).unwrap();
        assert_eq!(decode_snapshot(&encoded).unwrap(), Some(snapshot()));
    }

    #[test]
    fn test_blank_decodes_to_none() {
        assert_eq!(decode_snapshot("").unwrap(), None);
        assert_eq!(decode_snapshot("  \n").unwrap(), None);
    }

    #[test]
    fn test_malformed_is_codec_error() {
        assert!(matches!(decode_snapshot("{"), Err(StoreError::Codec(_))));
        assert!(matches!(
            decode_snapshot(r#"{"layoutCols": -2}"#),
            Err(StoreError::Codec(_))
        ));
    }
}
