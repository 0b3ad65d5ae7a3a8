//! Video assembly, upload and persistence facade.
//!
//! Unlike the other domains, every video operation propagates failures: these
//! calls move or persist user media, so a silent mock would hide data loss.

use std::sync::Arc;

use clipstudio_models::{
    DeleteAck, SavedAsset, SavedList, UploadResult, VideoFormat, VideoFormatList,
    VideoGenerateRequest, VideoResult, VideoStatusReport, VideoUpload, YoutubeUploadRequest,
    YoutubeUploadResult,
};

use crate::client::ApiClient;
use crate::endpoints::{self, Domain};
use crate::error::ApiResult;
use crate::services::fallback::{delete_ack, strict};
use crate::types::{MultipartBody, RequestDescriptor};

const DOMAIN: Domain = Domain::Video;

/// Video facade. All operations are strict.
#[derive(Debug, Clone)]
pub struct VideoService {
    client: Arc<ApiClient>,
}

impl VideoService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Assemble a video from images and optional narration.
    pub async fn generate(&self, request: &VideoGenerateRequest) -> ApiResult<VideoResult> {
        let result: ApiResult<VideoResult> = async {
            let descriptor = RequestDescriptor::post(DOMAIN.generate())
                .with_json(request)?
                .with_operation("video.generate");
            self.client.request_json(descriptor).await
        }
        .await;

        strict(DOMAIN, "generate", result)
    }

    /// Upload a local video file as `multipart/form-data`.
    pub async fn upload(&self, upload: &VideoUpload) -> ApiResult<UploadResult> {
        let title = if upload.title.trim().is_empty() {
            upload.file_name.clone()
        } else {
            upload.title.clone()
        };

        let body = MultipartBody::new()
            .file(
                "file",
                upload.file_name.clone(),
                upload.content_type.clone(),
                upload.bytes.clone(),
            )
            .text("title", title)
            .text("description", upload.description.clone())
            .text("tags", upload.tags_field());

        let descriptor = RequestDescriptor::post(endpoints::video::UPLOAD)
            .with_multipart(body)
            .with_operation("video.upload");

        strict(DOMAIN, "upload", self.client.request_json(descriptor).await)
    }

    /// Publish a previously uploaded video to YouTube.
    pub async fn youtube_upload(
        &self,
        request: &YoutubeUploadRequest,
    ) -> ApiResult<YoutubeUploadResult> {
        let result: ApiResult<YoutubeUploadResult> = async {
            let descriptor = RequestDescriptor::post(endpoints::video::YOUTUBE_UPLOAD)
                .with_json(request)?
                .with_operation("video.youtube_upload");
            self.client.request_json(descriptor).await
        }
        .await;

        strict(DOMAIN, "youtube_upload", result)
    }

    pub async fn save(&self, request: &VideoGenerateRequest) -> ApiResult<SavedAsset> {
        let result: ApiResult<SavedAsset> = async {
            let descriptor = RequestDescriptor::post(DOMAIN.save())
                .with_json(request)?
                .with_operation("video.save");
            self.client.request_json(descriptor).await
        }
        .await;

        strict(DOMAIN, "save", result)
    }

    pub async fn saved(&self) -> ApiResult<Vec<SavedAsset>> {
        let descriptor = RequestDescriptor::get(DOMAIN.saved()).with_operation("video.saved");
        let result = self
            .client
            .request_json::<SavedList>(descriptor)
            .await
            .map(SavedList::into_vec);

        strict(DOMAIN, "saved", result)
    }

    pub async fn delete_video(&self, id: &str) -> ApiResult<DeleteAck> {
        let descriptor =
            RequestDescriptor::delete(DOMAIN.delete(id)).with_operation("video.delete");
        let result = self
            .client
            .request(descriptor)
            .await
            .and_then(|body| delete_ack(body, id));

        strict(DOMAIN, "delete", result)
    }

    /// Processing status of a video job.
    pub async fn status(&self, id: &str) -> ApiResult<VideoStatusReport> {
        let descriptor =
            RequestDescriptor::get(endpoints::video::status(id)).with_operation("video.status");

        strict(DOMAIN, "status", self.client.request_json(descriptor).await)
    }

    pub async fn supported_formats(&self) -> ApiResult<Vec<VideoFormat>> {
        let descriptor =
            RequestDescriptor::get(endpoints::video::FORMATS).with_operation("video.formats");
        let result = self
            .client
            .request_json::<VideoFormatList>(descriptor)
            .await
            .map(VideoFormatList::into_vec);

        strict(DOMAIN, "formats", result)
    }

    /// Download an assembled video by URL.
    pub async fn download(&self, url: &str) -> ApiResult<Vec<u8>> {
        let result = self.client.download(url, "video", "video.download").await;

        strict(DOMAIN, "download", result)
    }
}
