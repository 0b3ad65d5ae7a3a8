//! Editor timeline tracks.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a timeline track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TrackId(pub String);

impl TrackId {
    /// Generate a new random track ID.
    pub fn new() -> Self {
        Self(format!("track-{}", Uuid::new_v4()))
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Kind of media a track carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    Video,
    Audio,
    Image,
}

impl TrackKind {
    /// Classify by MIME type; anything that is not video or audio is treated as an image.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("video") {
            TrackKind::Video
        } else if mime.starts_with("audio") {
            TrackKind::Audio
        } else {
            TrackKind::Image
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackKind::Video => "video",
            TrackKind::Audio => "audio",
            TrackKind::Image => "image",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque reference to the media behind a track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SourceHandle {
    /// Local file path
    File(String),
    /// Remote or generated URL
    Url(String),
    /// Server-side path returned by an upload
    Uploaded(String),
}

impl SourceHandle {
    pub fn as_str(&self) -> &str {
        match self {
            SourceHandle::File(s) | SourceHandle::Url(s) | SourceHandle::Uploaded(s) => s,
        }
    }
}

fn default_volume() -> u8 {
    100
}

fn default_visible() -> bool {
    true
}

/// A timeline entry referencing one imported or generated media asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Track {
    pub id: TrackId,
    pub kind: TrackKind,
    pub name: String,
    pub source: SourceHandle,
    #[serde(default)]
    pub start_offset_secs: f64,
    #[serde(default)]
    pub duration_secs: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// 0-100
    #[serde(default = "default_volume")]
    pub volume_percent: u8,
    #[serde(default)]
    pub filters: Vec<String>,
}

impl Track {
    /// Create a visible track at offset zero with full volume and no filters.
    pub fn new(kind: TrackKind, name: impl Into<String>, source: SourceHandle) -> Self {
        Self {
            id: TrackId::new(),
            kind,
            name: name.into(),
            source,
            start_offset_secs: 0.0,
            duration_secs: 0.0,
            visible: default_visible(),
            volume_percent: default_volume(),
            filters: Vec::new(),
        }
    }

    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(TrackKind::from_mime("video/mp4"), TrackKind::Video);
        assert_eq!(TrackKind::from_mime("audio/mpeg"), TrackKind::Audio);
        assert_eq!(TrackKind::from_mime("image/png"), TrackKind::Image);
        assert_eq!(TrackKind::from_mime("application/octet-stream"), TrackKind::Image);
    }

    #[test]
    fn test_new_track_defaults() {
        let track = Track::new(TrackKind::Audio, "voice", SourceHandle::Url("u".into()));
        assert!(track.visible);
        assert_eq!(track.volume_percent, 100);
        assert!(track.id.as_str().starts_with("track-"));
    }
}
