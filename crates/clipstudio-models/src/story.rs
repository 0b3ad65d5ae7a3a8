//! Story generation models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request body for `POST /api/story/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StoryRequest {
    /// Free-form prompt
    pub prompt: String,
    /// Genre/style, e.g. "drama"
    pub style: String,
    /// Target length, e.g. "short", "medium", "long"
    pub length: String,
}

impl StoryRequest {
    pub fn new(
        prompt: impl Into<String>,
        style: impl Into<String>,
        length: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            style: style.into(),
            length: length.into(),
        }
    }
}

/// Generated story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StoryResult {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl StoryResult {
    /// Render the story as a single block of text with a trailing tag line.
    pub fn formatted(&self) -> String {
        format!(
            "{}\n\n{}\n\nTags: {}",
            self.title,
            self.content,
            self.tags.join(", ")
        )
    }
}
