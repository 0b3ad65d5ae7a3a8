//! Text-to-speech models.

use base64::Engine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_voice() -> String {
    "alloy".to_string()
}

fn default_model() -> String {
    "tts-1".to_string()
}

fn default_speed() -> f32 {
    1.0
}

/// Request body for `POST /api/tts/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TtsRequest {
    pub text: String,
    /// alloy, echo, fable, onyx, nova, shimmer
    #[serde(default = "default_voice")]
    pub voice: String,
    /// tts-1 or tts-1-hd
    #[serde(default = "default_model")]
    pub model: String,
    /// Playback speed (0.25 to 4.0)
    #[serde(default = "default_speed")]
    pub speed: f32,
}

impl TtsRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: default_voice(),
            model: default_model(),
            speed: default_speed(),
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }
}

/// Generated speech. The backend returns either inline base64 audio or a URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TtsResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
}

impl TtsResult {
    /// Decode the inline audio payload, if present.
    pub fn audio_bytes(&self) -> Result<Option<Vec<u8>>, base64::DecodeError> {
        self.audio_base64
            .as_deref()
            .map(|b64| base64::engine::general_purpose::STANDARD.decode(b64))
            .transpose()
    }
}

/// A selectable voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Voice {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for `POST /api/tts/save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SaveAudioRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub text: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_speed")]
    pub speed: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_bytes_decodes_base64() {
        let result: TtsResult =
            serde_json::from_str(r#"{"audio_base64":"aGVsbG8=","voice":"echo"}"#).unwrap();
        assert_eq!(result.audio_bytes().unwrap(), Some(b"hello".to_vec()));
        assert_eq!(result.model, "tts-1");
    }

    #[test]
    fn test_audio_bytes_absent_for_url_result() {
        let result: TtsResult =
            serde_json::from_str(r#"{"url":"https://cdn/a.mp3"}"#).unwrap();
        assert_eq!(result.audio_bytes().unwrap(), None);
    }

    #[test]
    fn test_invalid_base64_is_an_error() {
        let result: TtsResult = serde_json::from_str(r#"{"audio_base64":"%%%"}"#).unwrap();
        assert!(result.audio_bytes().is_err());
    }
}
