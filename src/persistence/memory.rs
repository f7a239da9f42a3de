//! In-memory save store.

use tracing::{error, warn};

use super::{decode_snapshot, encode_snapshot, SaveStore};
use crate::session::SessionSnapshot;

/// Keeps the encoded snapshot in memory.
///
/// Snapshots go through the same JSON codec as on disk, so decoding
/// failures behave exactly like a corrupt save file.
#[derive(Clone, Debug, Default)]
pub struct MemorySaveStore {
    blob: Option<String>,
}

impl MemorySaveStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `raw` as if it had been saved earlier.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            blob: Some(raw.into()),
        }
    }

    /// The stored encoding, if any.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl SaveStore for MemorySaveStore {
    fn save(&mut self, snapshot: &SessionSnapshot) {
        match encode_snapshot(snapshot) {
            Ok(encoded) => self.blob = Some(encoded),
            Err(err) => error!(error = %err, "failed to encode snapshot"),
        }
    }

    fn try_load(&self) -> Option<SessionSnapshot> {
        let raw = self.blob.as_deref()?;
        match decode_snapshot(raw) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "ignoring unreadable in-memory save");
                None
            }
        }
    }

    fn clear(&mut self) {
        self.blob = None;
    }

    fn has_save(&self) -> bool {
        self.blob.as_deref().is_some_and(|raw| !raw.trim().is_empty())
    }
}
