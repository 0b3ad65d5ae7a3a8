//! Error types for editor operations.

use std::path::PathBuf;

use clipstudio_client::ApiError;
use clipstudio_models::{JobId, TrackId};
use thiserror::Error;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur while editing, saving or processing a project.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Unknown track: {0}")]
    UnknownTrack(TrackId),

    #[error("Track already exists: {0}")]
    DuplicateTrack(TrackId),

    #[error("Index {index} out of range for {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Volume must be between 0 and 100, got {0}")]
    InvalidVolume(u32),

    #[error("Start offset must be a finite, non-negative number of seconds, got {0}")]
    InvalidOffset(f64),

    #[error("Invalid trim range {start}s..{end}s")]
    InvalidTrim { start: f64, end: f64 },

    #[error("Nothing to import")]
    EmptyImport,

    #[error("Nothing to export: {0}")]
    NothingToExport(String),

    #[error("Unknown job: {0}")]
    UnknownJob(JobId),

    #[error("Job still running: {0}")]
    JobInProgress(JobId),

    #[error("Unsupported job for {backend}: {job}")]
    UnsupportedJob { backend: &'static str, job: String },

    #[error("No snapshot found in {0}")]
    SnapshotNotFound(PathBuf),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EditorError {
    pub fn unknown_track(id: &TrackId) -> Self {
        Self::UnknownTrack(id.clone())
    }

    /// Whether the error came from the backend rather than local validation.
    pub fn is_remote(&self) -> bool {
        matches!(self, EditorError::Api(_))
    }
}
