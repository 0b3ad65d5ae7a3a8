//! Editor timeline: an ordered track list with linear undo/redo history.
//!
//! Every successful mutation pushes the pre-mutation track list onto the undo
//! stack and clears the redo stack. Rejected and no-op mutations leave both
//! stacks untouched.

use clipstudio_models::{SourceHandle, Track, TrackId, TrackKind};
use tracing::debug;

use crate::error::{EditorError, EditorResult};
use crate::filters::FilterPreset;

/// A media item picked for import.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaImport {
    pub name: String,
    pub mime_type: String,
    pub source: SourceHandle,
    pub duration_secs: f64,
}

impl MediaImport {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        source: SourceHandle,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            source,
            duration_secs: 0.0,
        }
    }

    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    fn into_track(self) -> Track {
        Track::new(TrackKind::from_mime(&self.mime_type), self.name, self.source)
            .with_duration(self.duration_secs)
    }
}

/// Track list plus undo/redo history.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    tracks: Vec<Track>,
    undo_stack: Vec<Vec<Track>>,
    redo_stack: Vec<Vec<Track>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing track list (e.g. a restored snapshot) with empty history.
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            ..Self::default()
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append one track per imported item, kind derived from the MIME type.
    pub fn import(&mut self, items: Vec<MediaImport>) -> EditorResult<Vec<TrackId>> {
        if items.is_empty() {
            return Err(EditorError::EmptyImport);
        }

        self.checkpoint();
        let ids = items
            .into_iter()
            .map(|item| {
                let track = item.into_track();
                let id = track.id.clone();
                self.tracks.push(track);
                id
            })
            .collect::<Vec<_>>();

        debug!(count = ids.len(), "Imported media tracks");
        Ok(ids)
    }

    /// Append a ready-made track, such as a generated image or narration.
    pub fn add_track(&mut self, track: Track) -> EditorResult<TrackId> {
        if self.get(&track.id).is_some() {
            return Err(EditorError::DuplicateTrack(track.id));
        }

        self.checkpoint();
        let id = track.id.clone();
        self.tracks.push(track);
        Ok(id)
    }

    /// Move the track at `from` so it ends up at index `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> EditorResult<()> {
        let len = self.tracks.len();
        for index in [from, to] {
            if index >= len {
                return Err(EditorError::IndexOutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(());
        }

        self.checkpoint();
        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);
        Ok(())
    }

    /// Drag release: move `active` to the position currently held by `over`.
    pub fn reorder_by_id(&mut self, active: &TrackId, over: &TrackId) -> EditorResult<()> {
        let from = self.index_of(active)?;
        let to = self.index_of(over)?;
        self.reorder(from, to)
    }

    /// Flip visibility and return the new value.
    pub fn toggle_visibility(&mut self, id: &TrackId) -> EditorResult<bool> {
        let index = self.index_of(id)?;
        self.checkpoint();
        let track = &mut self.tracks[index];
        track.visible = !track.visible;
        Ok(track.visible)
    }

    /// Remove a track and return it.
    pub fn delete(&mut self, id: &TrackId) -> EditorResult<Track> {
        let index = self.index_of(id)?;
        self.checkpoint();
        Ok(self.tracks.remove(index))
    }

    pub fn set_volume(&mut self, id: &TrackId, percent: u32) -> EditorResult<()> {
        let index = self.index_of(id)?;
        let volume = u8::try_from(percent)
            .ok()
            .filter(|v| *v <= 100)
            .ok_or(EditorError::InvalidVolume(percent))?;

        if self.tracks[index].volume_percent == volume {
            return Ok(());
        }
        self.checkpoint();
        self.tracks[index].volume_percent = volume;
        Ok(())
    }

    pub fn set_start_offset(&mut self, id: &TrackId, secs: f64) -> EditorResult<()> {
        let index = self.index_of(id)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(EditorError::InvalidOffset(secs));
        }

        if self.tracks[index].start_offset_secs == secs {
            return Ok(());
        }
        self.checkpoint();
        self.tracks[index].start_offset_secs = secs;
        Ok(())
    }

    /// Append a filter id to the track's filter chain.
    pub fn append_filter(&mut self, id: &TrackId, filter: impl Into<String>) -> EditorResult<()> {
        let index = self.index_of(id)?;
        self.checkpoint();
        self.tracks[index].filters.push(filter.into());
        Ok(())
    }

    pub fn apply_preset(&mut self, id: &TrackId, preset: FilterPreset) -> EditorResult<()> {
        self.append_filter(id, preset.id())
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Restore the previous track list. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.tracks, previous);
                self.redo_stack.push(current);
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone change. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.tracks, next);
                self.undo_stack.push(current);
                true
            }
            None => false,
        }
    }

    fn checkpoint(&mut self) {
        self.undo_stack.push(self.tracks.clone());
        self.redo_stack.clear();
    }

    fn index_of(&self, id: &TrackId) -> EditorResult<usize> {
        self.tracks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| EditorError::unknown_track(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn media(name: &str, mime: &str) -> MediaImport {
        MediaImport::new(name, mime, SourceHandle::File(format!("/tmp/{}", name)))
    }

    fn timeline_with(names: &[&str]) -> (Timeline, Vec<TrackId>) {
        let mut timeline = Timeline::new();
        let ids = timeline
            .import(names.iter().map(|n| media(n, "image/png")).collect())
            .unwrap();
        (timeline, ids)
    }

    fn ids(timeline: &Timeline) -> Vec<TrackId> {
        timeline.tracks().iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_import_derives_kind_from_mime() {
        let mut timeline = Timeline::new();
        let ids = timeline
            .import(vec![
                media("a.mp4", "video/mp4"),
                media("b.mp3", "audio/mpeg"),
                media("c.png", "image/png"),
                media("d.bin", ""),
            ])
            .unwrap();

        let kinds: Vec<TrackKind> = ids.iter().map(|id| timeline.get(id).unwrap().kind).collect();
        assert_eq!(
            kinds,
            [TrackKind::Video, TrackKind::Audio, TrackKind::Image, TrackKind::Image]
        );
        let first = &timeline.tracks()[0];
        assert!(first.visible);
        assert_eq!(first.volume_percent, 100);
        assert!(first.filters.is_empty());
        assert!(timeline.can_undo());
    }

    #[test]
    fn test_empty_import_is_rejected_without_history() {
        let mut timeline = Timeline::new();
        assert!(matches!(timeline.import(vec![]), Err(EditorError::EmptyImport)));
        assert!(!timeline.can_undo());
    }

    #[test]
    fn test_reorder_by_id_moves_active_to_over() {
        let (mut timeline, ids) = timeline_with(&["a", "b", "c"]);

        timeline.reorder_by_id(&ids[0], &ids[2]).unwrap();
        assert_eq!(self::ids(&timeline), [ids[1].clone(), ids[2].clone(), ids[0].clone()]);

        timeline.reorder_by_id(&ids[0], &ids[1]).unwrap();
        assert_eq!(self::ids(&timeline), [ids[0].clone(), ids[1].clone(), ids[2].clone()]);
    }

    #[test]
    fn test_reorder_same_position_is_noop() {
        let (mut timeline, ids) = timeline_with(&["a", "b"]);
        let undo_depth = timeline.undo_stack.len();
        timeline.reorder_by_id(&ids[1], &ids[1]).unwrap();
        assert_eq!(timeline.undo_stack.len(), undo_depth);
    }

    #[test]
    fn test_reorder_out_of_range() {
        let (mut timeline, _) = timeline_with(&["a"]);
        let err = timeline.reorder(0, 3).unwrap_err();
        assert!(matches!(err, EditorError::IndexOutOfRange { index: 3, len: 1 }));
    }

    #[test]
    fn test_toggle_delete_and_unknown_track() {
        let (mut timeline, ids) = timeline_with(&["a", "b"]);

        assert!(!timeline.toggle_visibility(&ids[0]).unwrap());
        assert!(timeline.toggle_visibility(&ids[0]).unwrap());

        let removed = timeline.delete(&ids[1]).unwrap();
        assert_eq!(removed.id, ids[1]);
        assert_eq!(timeline.len(), 1);

        let missing = TrackId::from("track-missing");
        assert!(matches!(
            timeline.delete(&missing),
            Err(EditorError::UnknownTrack(id)) if id == missing
        ));
    }

    #[test]
    fn test_volume_and_offset_validation() {
        let (mut timeline, ids) = timeline_with(&["a"]);
        let depth = timeline.undo_stack.len();

        assert!(matches!(
            timeline.set_volume(&ids[0], 101),
            Err(EditorError::InvalidVolume(101))
        ));
        assert!(matches!(
            timeline.set_volume(&ids[0], 300),
            Err(EditorError::InvalidVolume(300))
        ));
        assert!(timeline.set_start_offset(&ids[0], -1.0).is_err());
        assert!(timeline.set_start_offset(&ids[0], f64::NAN).is_err());
        // Same value: accepted but not recorded.
        timeline.set_volume(&ids[0], 100).unwrap();
        assert_eq!(timeline.undo_stack.len(), depth);

        timeline.set_volume(&ids[0], 40).unwrap();
        timeline.set_start_offset(&ids[0], 2.5).unwrap();
        let track = timeline.get(&ids[0]).unwrap();
        assert_eq!(track.volume_percent, 40);
        assert_eq!(track.start_offset_secs, 2.5);
        assert_eq!(timeline.undo_stack.len(), depth + 2);
    }

    #[test]
    fn test_filters_append_in_order() {
        let (mut timeline, ids) = timeline_with(&["a"]);
        timeline.apply_preset(&ids[0], FilterPreset::Warm).unwrap();
        timeline.append_filter(&ids[0], "blur").unwrap();
        assert_eq!(timeline.get(&ids[0]).unwrap().filters, ["warm", "blur"]);
    }

    #[test]
    fn test_add_track_rejects_duplicate_id() {
        let (mut timeline, ids) = timeline_with(&["a"]);
        let mut dup = Track::new(TrackKind::Audio, "tts", SourceHandle::Url("u".into()));
        dup.id = ids[0].clone();
        assert!(matches!(timeline.add_track(dup), Err(EditorError::DuplicateTrack(_))));

        let narration = Track::new(TrackKind::Audio, "tts", SourceHandle::Url("u".into()));
        let id = timeline.add_track(narration).unwrap();
        assert_eq!(timeline.tracks().last().unwrap().id, id);
    }

    #[test]
    fn test_new_mutation_clears_redo() {
        let (mut timeline, ids) = timeline_with(&["a", "b"]);
        timeline.toggle_visibility(&ids[0]).unwrap();
        assert!(timeline.undo());
        assert!(timeline.can_redo());

        timeline.set_volume(&ids[1], 10).unwrap();
        assert!(!timeline.can_redo());
        assert!(!timeline.redo());
    }

    #[test]
    fn test_undo_on_fresh_timeline_is_noop() {
        let mut timeline = Timeline::new();
        assert!(!timeline.undo());
        assert!(!timeline.redo());
        assert!(timeline.is_empty());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Toggle(usize),
        Volume(usize, u32),
        Offset(usize, f64),
        Filter(usize),
        Reorder(usize, usize),
        Delete(usize),
        Import(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..8).prop_map(Op::Toggle),
            (0usize..8, 0u32..=100).prop_map(|(i, v)| Op::Volume(i, v)),
            (0usize..8, 0.0f64..60.0).prop_map(|(i, s)| Op::Offset(i, s)),
            (0usize..8).prop_map(Op::Filter),
            (0usize..8, 0usize..8).prop_map(|(a, b)| Op::Reorder(a, b)),
            (0usize..8).prop_map(Op::Delete),
            (1u8..3).prop_map(Op::Import),
        ]
    }

    fn apply(timeline: &mut Timeline, op: &Op) {
        let pick = |t: &Timeline, i: usize| -> Option<TrackId> {
            (!t.is_empty()).then(|| t.tracks()[i % t.len()].id.clone())
        };
        match op {
            Op::Toggle(i) => {
                if let Some(id) = pick(timeline, *i) {
                    timeline.toggle_visibility(&id).unwrap();
                }
            }
            Op::Volume(i, v) => {
                if let Some(id) = pick(timeline, *i) {
                    timeline.set_volume(&id, *v).unwrap();
                }
            }
            Op::Offset(i, s) => {
                if let Some(id) = pick(timeline, *i) {
                    timeline.set_start_offset(&id, *s).unwrap();
                }
            }
            Op::Filter(i) => {
                if let Some(id) = pick(timeline, *i) {
                    timeline.apply_preset(&id, FilterPreset::Vintage).unwrap();
                }
            }
            Op::Reorder(a, b) => {
                if !timeline.is_empty() {
                    let len = timeline.len();
                    timeline.reorder(a % len, b % len).unwrap();
                }
            }
            Op::Delete(i) => {
                if let Some(id) = pick(timeline, *i) {
                    timeline.delete(&id).unwrap();
                }
            }
            Op::Import(n) => {
                let items = (0..*n).map(|k| media(&format!("m{}", k), "video/mp4")).collect();
                timeline.import(items).unwrap();
            }
        }
    }

    proptest! {
        #[test]
        fn undo_then_redo_round_trips(ops in prop::collection::vec(op_strategy(), 1..20)) {
            let (mut timeline, _) = timeline_with(&["a", "b", "c"]);
            let start = timeline.tracks().to_vec();
            let base_depth = timeline.undo_stack.len();

            for op in &ops {
                apply(&mut timeline, op);
            }
            let end = timeline.tracks().to_vec();
            let n = timeline.undo_stack.len() - base_depth;

            for _ in 0..n {
                prop_assert!(timeline.undo());
            }
            prop_assert_eq!(timeline.tracks(), &start[..]);

            for _ in 0..n {
                prop_assert!(timeline.redo());
            }
            prop_assert_eq!(timeline.tracks(), &end[..]);
            prop_assert!(!timeline.can_redo());
        }

        #[test]
        fn reorder_preserves_ids(count in 1usize..12, from in 0usize..12, to in 0usize..12) {
            let names: Vec<String> = (0..count).map(|i| format!("t{}", i)).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let (mut timeline, original) = timeline_with(&refs);

            timeline.reorder(from % count, to % count).unwrap();

            let mut after = ids(&timeline);
            prop_assert_eq!(after.len(), original.len());
            after.sort();
            let mut expected = original.clone();
            expected.sort();
            prop_assert_eq!(after, expected);
        }
    }
}
