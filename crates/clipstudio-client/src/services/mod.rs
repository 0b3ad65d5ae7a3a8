//! Feature service facades over the shared [`ApiClient`].
//!
//! | Domain | generate/fetch | save | list-saved | delete | download |
//! |---|---|---|---|---|---|
//! | story | mock | n/a | n/a | n/a | n/a |
//! | image | mock | mock | mock | mock | propagate |
//! | tts | mock | mock | mock | mock | propagate |
//! | video | propagate | propagate | propagate | propagate | propagate |

mod fallback;
pub mod image;
pub mod story;
pub mod tts;
pub mod video;

use std::sync::Arc;

use crate::client::ApiClient;

pub use image::ImageService;
pub use story::StoryService;
pub use tts::TtsService;
pub use video::VideoService;

/// All facades over one shared client.
#[derive(Debug, Clone)]
pub struct ClipStudio {
    pub client: Arc<ApiClient>,
    pub story: StoryService,
    pub image: ImageService,
    pub tts: TtsService,
    pub video: VideoService,
}

impl ClipStudio {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            story: StoryService::new(Arc::clone(&client)),
            image: ImageService::new(Arc::clone(&client)),
            tts: TtsService::new(Arc::clone(&client)),
            video: VideoService::new(Arc::clone(&client)),
            client,
        }
    }
}
