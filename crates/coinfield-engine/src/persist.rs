//! JSON snapshot persistence.
//!
//! Writes the current snapshot to a single JSON file and reads it back.
//! Saving is an idempotent overwrite; durability guarantees beyond the
//! most recent snapshot (journaling, multi-version history) are out of
//! scope.

use std::path::Path;

use tracing::debug;

use coinfield_types::WorldSnapshot;

/// Errors that can occur when persisting or loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotStoreError {
    /// Reading or writing the snapshot file failed.
    #[error("snapshot file I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Serializing or deserializing the snapshot failed.
    #[error("snapshot JSON (de)serialization failed: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Write `snapshot` to `path` as pretty-printed JSON, replacing any
/// previous content.
///
/// # Errors
///
/// Returns [`SnapshotStoreError::Json`] if serialization fails or
/// [`SnapshotStoreError::Io`] if the file cannot be written.
pub fn save_snapshot(path: &Path, snapshot: &WorldSnapshot) -> Result<(), SnapshotStoreError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)?;
    debug!(path = %path.display(), sequence = snapshot.sequence, "snapshot saved");
    Ok(())
}

/// Read a snapshot previously written by [`save_snapshot`].
///
/// # Errors
///
/// Returns [`SnapshotStoreError::Io`] if the file cannot be read or
/// [`SnapshotStoreError::Json`] if the content is not a valid snapshot.
pub fn load_snapshot(path: &Path) -> Result<WorldSnapshot, SnapshotStoreError> {
    let contents = std::fs::read_to_string(path)?;
    let snapshot = serde_json::from_str(&contents)?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::placement::CoinPlacement;
    use crate::store::WorldStore;
    use crate::transition::TransitionEngine;
    use coinfield_types::{Action, ActionRequest, GridPos, PlayerId};

    #[test]
    fn save_and_load_round_trip() {
        let mut store = WorldStore::new(TransitionEngine::new(CoinPlacement::fixed()));
        let _ = store.apply(ActionRequest::new(
            PlayerId::new("alice"),
            Action::Spawn {
                position: GridPos::new(5, -5),
            },
        ));
        let _ = store.apply(ActionRequest::new(PlayerId::new("alice"), Action::GenerateCoins));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.json");

        let saved = save_snapshot(&path, store.snapshot());
        assert!(saved.is_ok());

        let loaded = load_snapshot(&path).unwrap_or_default();
        assert_eq!(&loaded, store.snapshot());
    }

    #[test]
    fn save_is_an_idempotent_overwrite() {
        let snapshot = WorldSnapshot::genesis();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.json");

        assert!(save_snapshot(&path, &snapshot).is_ok());
        assert!(save_snapshot(&path, &snapshot).is_ok());
        assert_eq!(load_snapshot(&path).unwrap_or_default(), snapshot);
    }

    #[test]
    fn loading_a_missing_file_is_an_io_error() {
        let result = load_snapshot(Path::new("/nonexistent/coinfield/world.json"));
        assert!(matches!(result, Err(SnapshotStoreError::Io { .. })));
    }
}
