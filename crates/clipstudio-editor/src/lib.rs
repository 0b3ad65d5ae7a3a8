//! Editor state and media processing for ClipStudio.
//!
//! The [`Timeline`] is a plain in-memory state machine owned by one task.
//! Snapshots are local only. Rendering goes through a
//! [`MediaProcessingBackend`]: simulated locally or backed by the generation API.

pub mod error;
pub mod export;
pub mod filters;
pub mod processing;
pub mod snapshot;
pub mod timeline;

pub use error::{EditorError, EditorResult};
pub use export::build_export_request;
pub use filters::FilterPreset;
pub use processing::{
    ApiBackend, JobHandle, JobOutput, MediaProcessingBackend, ProcessingJob, SimulatedBackend,
};
pub use snapshot::{ProjectSnapshot, SnapshotStore};
pub use timeline::{MediaImport, Timeline};
