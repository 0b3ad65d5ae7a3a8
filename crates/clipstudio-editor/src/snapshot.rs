//! Local project snapshots.
//!
//! Snapshots are plain pretty-printed JSON in a directory of the caller's
//! choosing. They are never sent to the backend.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clipstudio_models::Track;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EditorError, EditorResult};
use crate::timeline::Timeline;

const LATEST_FILE: &str = "latest.json";

/// Persisted editor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub saved_at: DateTime<Utc>,
    pub tracks: Vec<Track>,
}

/// Reads and writes `latest.json` in a snapshot directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn latest_path(&self) -> PathBuf {
        self.dir.join(LATEST_FILE)
    }

    /// Write a snapshot, replacing any previous one. The file is written to a
    /// temporary name first and renamed into place.
    pub fn save(&self, tracks: &[Track]) -> EditorResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let snapshot = ProjectSnapshot {
            saved_at: Utc::now(),
            tracks: tracks.to_vec(),
        };
        let json = serde_json::to_vec_pretty(&snapshot)?;

        let path = self.latest_path();
        let tmp = self.dir.join(format!("{}.tmp", LATEST_FILE));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        info!(path = %path.display(), tracks = tracks.len(), "Saved project snapshot");
        Ok(path)
    }

    pub fn load(&self) -> EditorResult<ProjectSnapshot> {
        let path = self.latest_path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EditorError::SnapshotNotFound(self.dir.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl Timeline {
    /// Best-effort local save. Failures are logged and returned; the
    /// in-memory timeline is unaffected either way.
    pub fn save_to(&self, store: &SnapshotStore) -> EditorResult<PathBuf> {
        store.save(self.tracks()).map_err(|e| {
            warn!(dir = %store.dir().display(), "Failed to save project snapshot: {}", e);
            e
        })
    }

    /// Restore the latest snapshot with empty history.
    pub fn load_from(store: &SnapshotStore) -> EditorResult<Timeline> {
        let snapshot = store.load()?;
        Ok(Timeline::from_tracks(snapshot.tracks))
    }
}
