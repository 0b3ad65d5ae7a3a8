//! Image generation models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_style() -> String {
    "realistic".to_string()
}

fn default_size() -> String {
    "1024x1024".to_string()
}

/// Request body for `POST /api/image/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImageRequest {
    pub prompt: String,
    /// realistic, artistic, cartoon, anime
    #[serde(default = "default_style")]
    pub style: String,
    /// 256x256, 512x512, 1024x1024
    #[serde(default = "default_size")]
    pub size: String,
}

impl ImageRequest {
    /// Create a request with the default style and size.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            style: default_style(),
            size: default_size(),
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }
}

/// Generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImageResult {
    pub url: String,
}

/// Request body for `POST /api/image/save`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SaveImageRequest {
    pub url: String,
    pub prompt: String,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_size")]
    pub size: String,
}
