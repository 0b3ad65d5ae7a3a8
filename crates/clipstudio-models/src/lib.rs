//! Shared data models for the ClipStudio client.
//!
//! This crate provides Serde-serializable types for:
//! - Story, image, text-to-speech and video generation requests/results
//! - Saved-asset listings and delete acknowledgements
//! - Editor timeline tracks
//! - Media processing jobs

pub mod asset;
pub mod image;
pub mod job;
pub mod story;
pub mod track;
pub mod tts;
pub mod video;

// Re-export common types
pub use asset::{DeleteAck, SavedAsset, SavedList};
pub use image::{ImageRequest, ImageResult, SaveImageRequest};
pub use job::{JobId, JobState};
pub use story::{StoryRequest, StoryResult};
pub use track::{SourceHandle, Track, TrackId, TrackKind};
pub use tts::{SaveAudioRequest, TtsRequest, TtsResult, Voice};
pub use video::{
    UploadResult, VideoFormat, VideoFormatList, VideoGenerateRequest, VideoResult, VideoStatus,
    VideoStatusReport, VideoUpload, YoutubeUploadRequest, YoutubeUploadResult,
};
