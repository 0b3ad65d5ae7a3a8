//! Image generation facade.

use std::sync::Arc;

use clipstudio_models::{DeleteAck, ImageRequest, ImageResult, SaveImageRequest, SavedAsset, SavedList};

use crate::client::ApiClient;
use crate::endpoints::Domain;
use crate::error::ApiResult;
use crate::mock;
use crate::services::fallback::{delete_ack, or_mock, strict};
use crate::types::RequestDescriptor;

const DOMAIN: Domain = Domain::Image;

/// Image facade. Every operation except `download` degrades to mock data.
#[derive(Debug, Clone)]
pub struct ImageService {
    client: Arc<ApiClient>,
}

impl ImageService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Generate an image; on failure returns a placeholder labelled with the prompt.
    pub async fn generate(&self, request: &ImageRequest) -> ImageResult {
        let result: ApiResult<ImageResult> = async {
            let descriptor = RequestDescriptor::post(DOMAIN.generate())
                .with_json(request)?
                .with_operation("image.generate");
            self.client.request_json(descriptor).await
        }
        .await;

        or_mock(DOMAIN, "generate", result, || mock::image(request))
    }

    /// Save an image; on failure acknowledges optimistically.
    pub async fn save(&self, request: &SaveImageRequest) -> SavedAsset {
        let result: ApiResult<SavedAsset> = async {
            let descriptor = RequestDescriptor::post(DOMAIN.save())
                .with_json(request)?
                .with_operation("image.save");
            self.client.request_json(descriptor).await
        }
        .await;

        or_mock(DOMAIN, "save", result, || mock::saved_image(request))
    }

    /// List saved images; on failure returns a static sample list.
    pub async fn saved(&self) -> Vec<SavedAsset> {
        let descriptor = RequestDescriptor::get(DOMAIN.saved()).with_operation("image.saved");
        let result = self
            .client
            .request_json::<SavedList>(descriptor)
            .await
            .map(SavedList::into_vec);

        or_mock(DOMAIN, "saved", result, || mock::saved_list(DOMAIN))
    }

    /// Delete a saved image; on failure acknowledges optimistically.
    pub async fn delete(&self, id: &str) -> DeleteAck {
        let descriptor = RequestDescriptor::delete(DOMAIN.delete(id)).with_operation("image.delete");
        let result = self
            .client
            .request(descriptor)
            .await
            .and_then(|body| delete_ack(body, id));

        or_mock(DOMAIN, "delete", result, || mock::deleted(DOMAIN, id))
    }

    /// Download an image by URL. Strict: a failed download is never mocked.
    pub async fn download(&self, url: &str) -> ApiResult<Vec<u8>> {
        let result = self.client.download(url, "image", "image.download").await;

        strict(DOMAIN, "download", result)
    }
}
