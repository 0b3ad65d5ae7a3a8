//! Text-to-speech facade.

use std::sync::Arc;

use clipstudio_models::{DeleteAck, SaveAudioRequest, SavedAsset, SavedList, TtsRequest, TtsResult, Voice};

use crate::client::ApiClient;
use crate::endpoints::{self, Domain};
use crate::error::ApiResult;
use crate::mock;
use crate::services::fallback::{delete_ack, or_mock, strict};
use crate::types::RequestDescriptor;

const DOMAIN: Domain = Domain::Tts;

/// TTS facade. Every operation except `download` degrades to mock data.
#[derive(Debug, Clone)]
pub struct TtsService {
    client: Arc<ApiClient>,
}

impl TtsService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Synthesize speech; on failure returns a sample clip echoing the request.
    pub async fn generate(&self, request: &TtsRequest) -> TtsResult {
        let result: ApiResult<TtsResult> = async {
            let descriptor = RequestDescriptor::post(DOMAIN.generate())
                .with_json(request)?
                .with_operation("tts.generate");
            self.client.request_json(descriptor).await
        }
        .await;

        or_mock(DOMAIN, "generate", result, || mock::speech(request))
    }

    /// Available voices; on failure the six built-in voices.
    pub async fn voices(&self) -> Vec<Voice> {
        let descriptor = RequestDescriptor::get(endpoints::tts::VOICES).with_operation("tts.voices");
        let result = self.client.request_json(descriptor).await;

        or_mock(DOMAIN, "voices", result, mock::voices)
    }

    pub async fn save(&self, request: &SaveAudioRequest) -> SavedAsset {
        let result: ApiResult<SavedAsset> = async {
            let descriptor = RequestDescriptor::post(DOMAIN.save())
                .with_json(request)?
                .with_operation("tts.save");
            self.client.request_json(descriptor).await
        }
        .await;

        or_mock(DOMAIN, "save", result, || mock::saved_audio(request))
    }

    pub async fn saved(&self) -> Vec<SavedAsset> {
        let descriptor = RequestDescriptor::get(DOMAIN.saved()).with_operation("tts.saved");
        let result = self
            .client
            .request_json::<SavedList>(descriptor)
            .await
            .map(SavedList::into_vec);

        or_mock(DOMAIN, "saved", result, || mock::saved_list(DOMAIN))
    }

    pub async fn delete(&self, id: &str) -> DeleteAck {
        let descriptor = RequestDescriptor::delete(DOMAIN.delete(id)).with_operation("tts.delete");
        let result = self
            .client
            .request(descriptor)
            .await
            .and_then(|body| delete_ack(body, id));

        or_mock(DOMAIN, "delete", result, || mock::deleted(DOMAIN, id))
    }

    /// Download synthesized audio by URL. Strict, like video.
    pub async fn download(&self, url: &str) -> ApiResult<Vec<u8>> {
        let result = self.client.download(url, "audio", "tts.download").await;

        strict(DOMAIN, "download", result)
    }
}
