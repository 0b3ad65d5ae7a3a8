//! Video assembly, upload and status models.

use base64::Engine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_duration() -> u32 {
    10
}

/// Request body for `POST /api/video/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VideoGenerateRequest {
    /// Image URLs, in playback order
    pub images: Vec<String>,
    /// Optional narration track
    #[serde(default)]
    pub audio_base64: Option<String>,
    /// Total duration in seconds
    #[serde(default = "default_duration")]
    pub duration: u32,
}

/// Assembled video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VideoResult {
    pub video_base64: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default = "default_duration")]
    pub duration: u32,
}

impl VideoResult {
    /// Decode the inline MP4 payload.
    pub fn video_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        base64::engine::general_purpose::STANDARD.decode(&self.video_base64)
    }
}

/// A local file to send as `multipart/form-data` to `POST /api/video/upload`.
#[derive(Debug, Clone)]
pub struct VideoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl VideoUpload {
    /// Tags as the backend expects them in the form field.
    pub fn tags_field(&self) -> String {
        self.tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Response from `POST /api/video/upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UploadResult {
    pub file_path: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Request body for `POST /api/video/youtube-upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct YoutubeUploadRequest {
    pub video_path: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Response from `POST /api/video/youtube-upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct YoutubeUploadResult {
    pub youtube_url: String,
    #[serde(default)]
    pub video_id: Option<String>,
}

/// Video processing status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    Queued,
    #[default]
    Processing,
    Completed,
    Failed,
    /// Any status string this client does not know about
    #[serde(other)]
    Unknown,
}

impl VideoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoStatus::Queued => "queued",
            VideoStatus::Processing => "processing",
            VideoStatus::Completed => "completed",
            VideoStatus::Failed => "failed",
            VideoStatus::Unknown => "unknown",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, VideoStatus::Completed | VideoStatus::Failed)
    }
}

impl fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Response from `GET /api/video/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoStatusReport {
    #[serde(default, alias = "video_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub status: VideoStatus,
    /// Progress percentage (0-100)
    #[serde(default)]
    pub progress: Option<u8>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One entry of `GET /api/video/formats/supported`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VideoFormat {
    pub format: String,
    #[serde(default)]
    pub description: String,
}

/// Supported-format listing, bare or wrapped in `{"formats": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum VideoFormatList {
    Bare(Vec<VideoFormat>),
    Wrapped { formats: Vec<VideoFormat> },
}

impl VideoFormatList {
    pub fn into_vec(self) -> Vec<VideoFormat> {
        match self {
            VideoFormatList::Bare(v) => v,
            VideoFormatList::Wrapped { formats } => formats,
        }
    }
}
