//! Endpoint registry: logical operation to URL path.

use std::fmt;

/// Health probe path (service root).
pub const HEALTH: &str = "/";

/// Feature domain served by the generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Story,
    Image,
    Tts,
    Video,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Story => "story",
            Domain::Image => "image",
            Domain::Tts => "tts",
            Domain::Video => "video",
        }
    }

    /// Capitalized label used in mock messages.
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Story => "Story",
            Domain::Image => "Image",
            Domain::Tts => "Audio",
            Domain::Video => "Video",
        }
    }

    pub fn generate(&self) -> String {
        format!("/api/{}/generate", self.as_str())
    }

    pub fn save(&self) -> String {
        format!("/api/{}/save", self.as_str())
    }

    pub fn saved(&self) -> String {
        format!("/api/{}/saved", self.as_str())
    }

    /// `DELETE` target for one saved resource.
    pub fn delete(&self, id: &str) -> String {
        format!("/api/{}/{}", self.as_str(), encode_id(id))
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub mod tts {
    pub const VOICES: &str = "/api/tts/voices";
}

pub mod video {
    use super::encode_id;

    pub const UPLOAD: &str = "/api/video/upload";
    pub const YOUTUBE_UPLOAD: &str = "/api/video/youtube-upload";
    pub const FORMATS: &str = "/api/video/formats/supported";

    pub fn status(id: &str) -> String {
        format!("/api/video/{}/status", encode_id(id))
    }
}

fn encode_id(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crud_paths() {
        assert_eq!(Domain::Story.generate(), "/api/story/generate");
        assert_eq!(Domain::Image.save(), "/api/image/save");
        assert_eq!(Domain::Tts.saved(), "/api/tts/saved");
        assert_eq!(Domain::Video.delete("123"), "/api/video/123");
    }

    #[test]
    fn test_video_paths() {
        assert_eq!(video::status("abc"), "/api/video/abc/status");
        assert_eq!(video::YOUTUBE_UPLOAD, "/api/video/youtube-upload");
        assert_eq!(tts::VOICES, "/api/tts/voices");
    }

    #[test]
    fn test_ids_are_percent_encoded() {
        assert_eq!(Domain::Image.delete("a/b c"), "/api/image/a%2Fb%20c");
    }
}
