//! Story generation facade.

use std::sync::Arc;

use clipstudio_models::{StoryRequest, StoryResult};

use crate::client::ApiClient;
use crate::endpoints::Domain;
use crate::error::ApiResult;
use crate::mock;
use crate::services::fallback::or_mock;
use crate::types::RequestDescriptor;

/// Story facade. Generation always yields a renderable story.
#[derive(Debug, Clone)]
pub struct StoryService {
    client: Arc<ApiClient>,
}

impl StoryService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Generate a story, falling back to the demo story on any failure.
    pub async fn generate(&self, request: &StoryRequest) -> StoryResult {
        let result: ApiResult<StoryResult> = async {
            let descriptor = RequestDescriptor::post(Domain::Story.generate())
                .with_json(request)?
                .with_operation("story.generate");
            self.client.request_json::<StoryResult>(descriptor).await
        }
        .await;

        or_mock(Domain::Story, "generate", result, mock::story)
    }
}
