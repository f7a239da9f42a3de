//! JSON file save store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use super::{decode_snapshot, encode_snapshot, SaveStore};
use crate::core::error::StoreError;
use crate::session::SessionSnapshot;

/// File name used by [`FileSaveStore::in_dir`].
pub const DEFAULT_FILE_NAME: &str = "match_save.json";

/// Stores the snapshot as a JSON file.
///
/// Writes go to a sibling temp file that is then renamed over the save,
/// so an interrupted write leaves the previous save intact.
#[derive(Clone, Debug)]
pub struct FileSaveStore {
    path: PathBuf,
}

impl FileSaveStore {
    /// Store at an explicit file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `dir/match_save.json`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write(&self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        let encoded = encode_snapshot(snapshot)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp = self.temp_path();
        fs::write(&temp, encoded)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn read(&self) -> Result<Option<SessionSnapshot>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        decode_snapshot(&raw)
    }

    fn remove(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl SaveStore for FileSaveStore {
    fn save(&mut self, snapshot: &SessionSnapshot) {
        match self.write(snapshot) {
            Ok(()) => debug!(path = %self.path.display(), "snapshot saved"),
            Err(err) => error!(path = %self.path.display(), error = %err, "failed to save snapshot"),
        }
    }

    fn try_load(&self) -> Option<SessionSnapshot> {
        match self.read() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring unreadable save");
                None
            }
        }
    }

    fn clear(&mut self) {
        if let Err(err) = self.remove() {
            error!(path = %self.path.display(), error = %err, "failed to clear save");
        }
    }

    fn has_save(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.is_file() && meta.len() > 0)
    }
}
