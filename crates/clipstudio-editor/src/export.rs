//! Timeline to video-assembly request.

use clipstudio_models::{Track, TrackKind, VideoGenerateRequest};

use crate::error::{EditorError, EditorResult};

/// Collect the visible image tracks, in timeline order, into a video assembly
/// request. Hidden tracks and non-image tracks are skipped.
pub fn build_export_request(tracks: &[Track], duration_secs: u32) -> EditorResult<VideoGenerateRequest> {
    let images: Vec<String> = tracks
        .iter()
        .filter(|t| t.visible && t.kind == TrackKind::Image)
        .map(|t| t.source.as_str().to_string())
        .collect();

    if images.is_empty() {
        return Err(EditorError::NothingToExport(
            "timeline has no visible image tracks".to_string(),
        ));
    }

    Ok(VideoGenerateRequest {
        images,
        audio_base64: None,
        duration: duration_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipstudio_models::SourceHandle;

    fn image(url: &str) -> Track {
        Track::new(TrackKind::Image, url, SourceHandle::Url(url.to_string()))
    }

    #[test]
    fn test_export_uses_visible_images_in_order() {
        let mut hidden = image("https://cdn/hidden.png");
        hidden.visible = false;
        let tracks = vec![
            image("https://cdn/1.png"),
            Track::new(TrackKind::Audio, "voice", SourceHandle::Url("https://cdn/v.mp3".into())),
            hidden,
            image("https://cdn/2.png"),
        ];

        let request = build_export_request(&tracks, 15).unwrap();
        assert_eq!(request.images, ["https://cdn/1.png", "https://cdn/2.png"]);
        assert_eq!(request.duration, 15);
        assert!(request.audio_base64.is_none());
    }

    #[test]
    fn test_export_without_images_fails() {
        let tracks = vec![Track::new(
            TrackKind::Video,
            "clip",
            SourceHandle::File("/tmp/clip.mp4".into()),
        )];
        assert!(matches!(
            build_export_request(&tracks, 10),
            Err(EditorError::NothingToExport(_))
        ));
    }
}
