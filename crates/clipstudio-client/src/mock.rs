//! Mock payloads substituted when the backend is unreachable.
//!
//! Everything here is deterministic apart from the save ids and timestamps,
//! which mirror what a real save would return.

use chrono::Utc;
use serde_json::{Map, Value};

use clipstudio_models::{
    DeleteAck, ImageRequest, ImageResult, SaveAudioRequest, SaveImageRequest, SavedAsset,
    StoryResult, TtsRequest, TtsResult, Voice,
};

use crate::endpoints::Domain;

pub const STORY_TITLE: &str = "Test Story";
pub const STORY_CONTENT: &str = "This is a test story generated for demonstration purposes. \
     The backend is currently unavailable, so this is mock data.";
pub const STORY_TAGS: [&str; 3] = ["test", "mock", "demo"];

pub const SAMPLE_AUDIO_URL: &str = "https://www.soundjay.com/misc/sounds/bell-ringing-05.wav";
pub const SAMPLE_VIDEO_URL: &str =
    "https://sample-videos.com/zip/10/mp4/SampleVideo_1280x720_1mb.mp4";

const PLACEHOLDER_HOST: &str = "https://via.placeholder.com";
const PLACEHOLDER_COLORS: &str = "4F46E5/FFFFFF";
const PROMPT_PREVIEW_CHARS: usize = 20;
const TEXT_PREVIEW_CHARS: usize = 100;

const VOICES: [(&str, &str, &str); 6] = [
    ("alloy", "Alloy - Balanced", "A balanced, versatile voice"),
    ("echo", "Echo - Clear", "A warm, friendly voice"),
    ("fable", "Fable - Storytelling", "A clear, expressive voice"),
    ("onyx", "Onyx - Deep", "A deep, authoritative voice"),
    ("nova", "Nova - Bright", "A bright, energetic voice"),
    ("shimmer", "Shimmer - Warm", "A soft, gentle voice"),
];

pub fn story() -> StoryResult {
    StoryResult {
        title: STORY_TITLE.to_string(),
        content: STORY_CONTENT.to_string(),
        tags: STORY_TAGS.iter().map(|t| t.to_string()).collect(),
    }
}

/// Placeholder image sized like the request and labelled with the prompt.
pub fn image(request: &ImageRequest) -> ImageResult {
    let preview: String = request.prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
    ImageResult {
        url: format!(
            "{}/{}/{}?text=Mock+Image:+{}",
            PLACEHOLDER_HOST,
            request.size,
            PLACEHOLDER_COLORS,
            urlencoding::encode(&preview)
        ),
    }
}

/// Sample audio echoing the request parameters.
pub fn speech(request: &TtsRequest) -> TtsResult {
    let preview: String = request.text.chars().take(TEXT_PREVIEW_CHARS).collect();
    TtsResult {
        audio_base64: None,
        url: Some(SAMPLE_AUDIO_URL.to_string()),
        filename: None,
        text: Some(format!("{}...", preview)),
        voice: request.voice.clone(),
        model: request.model.clone(),
        speed: Some(request.speed),
    }
}

pub fn voices() -> Vec<Voice> {
    VOICES
        .iter()
        .map(|(id, name, description)| Voice {
            id: id.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
        })
        .collect()
}

/// Successful save acknowledgement echoing the saved fields.
pub fn saved_image(request: &SaveImageRequest) -> SavedAsset {
    let mut extra = Map::new();
    extra.insert("prompt".to_string(), Value::from(request.prompt.clone()));
    extra.insert("style".to_string(), Value::from(request.style.clone()));
    extra.insert("size".to_string(), Value::from(request.size.clone()));
    save_ack(Domain::Image, Some(request.url.clone()), extra)
}

pub fn saved_audio(request: &SaveAudioRequest) -> SavedAsset {
    let mut extra = Map::new();
    extra.insert("text".to_string(), Value::from(request.text.clone()));
    extra.insert("voice".to_string(), Value::from(request.voice.clone()));
    extra.insert("model".to_string(), Value::from(request.model.clone()));
    extra.insert("speed".to_string(), Value::from(request.speed));
    save_ack(Domain::Tts, request.url.clone(), extra)
}

fn save_ack(domain: Domain, url: Option<String>, extra: Map<String, Value>) -> SavedAsset {
    SavedAsset {
        id: Some(format!("mock-{}", Utc::now().timestamp_millis())),
        url,
        saved: true,
        message: Some(format!("{} saved (mock)", domain.label())),
        created_at: Some(Utc::now()),
        extra,
        ..SavedAsset::default()
    }
}

/// Static one-entry listing for a domain's saved assets.
pub fn saved_list(domain: Domain) -> Vec<SavedAsset> {
    let mut extra = Map::new();
    let url = match domain {
        Domain::Tts => {
            extra.insert("text".to_string(), Value::from("Sample audio text"));
            extra.insert("voice".to_string(), Value::from("alloy"));
            extra.insert("model".to_string(), Value::from("tts-1"));
            extra.insert("speed".to_string(), Value::from(1.0));
            SAMPLE_AUDIO_URL.to_string()
        }
        Domain::Video => SAMPLE_VIDEO_URL.to_string(),
        Domain::Story | Domain::Image => {
            extra.insert("prompt".to_string(), Value::from("Sample image prompt"));
            extra.insert("style".to_string(), Value::from("realistic"));
            extra.insert("size".to_string(), Value::from("512x512"));
            format!(
                "{}/512x512/{}?text=Sample+Image",
                PLACEHOLDER_HOST, PLACEHOLDER_COLORS
            )
        }
    };

    vec![SavedAsset {
        id: Some("mock-1".to_string()),
        url: Some(url),
        saved: true,
        created_at: Some(Utc::now()),
        extra,
        ..SavedAsset::default()
    }]
}

/// Optimistic delete acknowledgement.
pub fn deleted(domain: Domain, id: &str) -> DeleteAck {
    DeleteAck {
        success: true,
        message: format!("{} deleted (mock)", domain.label()),
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_placeholder_uses_size_and_prompt_prefix() {
        let req = ImageRequest::new("A very long prompt about mountains at dawn").with_size("512x512");
        let result = image(&req);
        assert!(result.url.starts_with("https://via.placeholder.com/512x512/4F46E5/FFFFFF"));
        assert!(result.url.ends_with("Mock+Image:+A%20very%20long%20prompt%20a"));
    }

    #[test]
    fn test_speech_echoes_request() {
        let req = TtsRequest::new("hello").with_voice("nova");
        let result = speech(&req);
        assert_eq!(result.url.as_deref(), Some(SAMPLE_AUDIO_URL));
        assert_eq!(result.text.as_deref(), Some("hello..."));
        assert_eq!(result.voice, "nova");
    }

    #[test]
    fn test_voices_are_the_six_builtins() {
        let ids: Vec<String> = voices().into_iter().map(|v| v.id).collect();
        assert_eq!(ids, ["alloy", "echo", "fable", "onyx", "nova", "shimmer"]);
    }

    #[test]
    fn test_save_and_delete_acks() {
        let saved = saved_image(&SaveImageRequest {
            url: "u".to_string(),
            prompt: "p".to_string(),
            style: "realistic".to_string(),
            size: "512x512".to_string(),
        });
        assert!(saved.saved);
        assert!(saved.id.unwrap().starts_with("mock-"));
        assert_eq!(saved.message.as_deref(), Some("Image saved (mock)"));

        let ack = deleted(Domain::Tts, "a1");
        assert!(ack.success);
        assert_eq!(ack.id, "a1");
        assert_eq!(ack.message, "Audio deleted (mock)");
    }
}
