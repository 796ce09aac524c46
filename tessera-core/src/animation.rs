//! Animation runtime state
//!
//! [`AnimationState`] is the container the timeline and playback code read
//! from. It is only ever changed through two capabilities: a partial update
//! ([`AnimationState::patch`]) and [`AnimationState::set_active_clip`]. It is
//! never replaced wholesale, so anything attached to it survives a scene
//! load.
//!
//! Loading a scene produces an [`AnimationSnapshot`]; applying it first
//! resets all scene animation data to an empty baseline and then populates
//! it, so no clip or track from a previous scene can survive.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Frame rate of a fresh animation state
pub const DEFAULT_FPS: f64 = 24.0;

/// How values are interpolated between a keyframe and the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Linear,
    Step,
    Bezier,
}

/// What kind of entity a track animates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackTargetType {
    SceneObject,
}

/// A single keyed value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub id: String,
    /// Time in frames
    pub time: f64,
    pub value: f64,
    pub interpolation: Interpolation,
}

/// A sequence of keyframes for one animated value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationChannel {
    pub id: String,
    pub keyframes: Vec<Keyframe>,
}

/// Animation of one property of one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationTrack {
    pub id: String,
    pub target_type: TrackTargetType,
    pub target_id: String,
    /// Animated property path, e.g. `position.x`
    pub property: String,
    pub channels: Vec<AnimationChannel>,
}

/// A named time range grouping a set of tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub id: String,
    pub name: String,
    pub start: f64,
    pub end: f64,
    pub looping: bool,
    pub speed: f64,
    pub track_ids: Vec<String>,
}

/// A labelled point on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub time: f64,
    pub label: String,
}

/// Timeline UI preferences kept across scene loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationUiPrefs {
    pub timeline_open: bool,
    pub last_used_fps: f64,
}

/// The process-wide animation runtime container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationState {
    pub active_clip_id: Option<String>,
    /// Clips in document order
    pub clips: Vec<AnimationClip>,
    pub tracks: HashMap<String, AnimationTrack>,
    pub markers: Vec<Marker>,
    pub playhead: f64,
    pub is_playing: bool,
    pub solo_tracks: HashSet<String>,
    pub fps: f64,
    pub ui: AnimationUiPrefs,
}

/// Partial update of the UI preferences
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationUiPatch {
    pub timeline_open: Option<bool>,
    pub last_used_fps: Option<f64>,
}

/// Partial update of an [`AnimationState`]; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationPatch {
    pub clips: Option<Vec<AnimationClip>>,
    pub tracks: Option<HashMap<String, AnimationTrack>>,
    pub markers: Option<Vec<Marker>>,
    pub playhead: Option<f64>,
    pub is_playing: Option<bool>,
    pub solo_tracks: Option<HashSet<String>>,
    pub fps: Option<f64>,
    pub ui: AnimationUiPatch,
}

/// Scene animation data ready to be applied to an [`AnimationState`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationSnapshot {
    /// Frame rate override, if the scene declares one
    pub fps: Option<f64>,
    pub clips: Vec<AnimationClip>,
    pub tracks: HashMap<String, AnimationTrack>,
    pub active_clip_id: Option<String>,
    pub ui: AnimationUiPatch,
}

impl Default for AnimationUiPrefs {
    fn default() -> Self {
        Self {
            timeline_open: false,
            last_used_fps: DEFAULT_FPS,
        }
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            active_clip_id: None,
            clips: Vec::new(),
            tracks: HashMap::new(),
            markers: Vec::new(),
            playhead: 0.0,
            is_playing: false,
            solo_tracks: HashSet::new(),
            fps: DEFAULT_FPS,
            ui: AnimationUiPrefs::default(),
        }
    }
}

impl AnimationState {
    /// Create an empty state with default frame rate and preferences
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every field the patch sets, leaving the rest untouched
    pub fn patch(&mut self, patch: AnimationPatch) {
        if let Some(clips) = patch.clips {
            self.clips = clips;
        }
        if let Some(tracks) = patch.tracks {
            self.tracks = tracks;
        }
        if let Some(markers) = patch.markers {
            self.markers = markers;
        }
        if let Some(playhead) = patch.playhead {
            self.playhead = playhead;
        }
        if let Some(is_playing) = patch.is_playing {
            self.is_playing = is_playing;
        }
        if let Some(solo_tracks) = patch.solo_tracks {
            self.solo_tracks = solo_tracks;
        }
        if let Some(fps) = patch.fps {
            self.fps = fps;
        }
        if let Some(timeline_open) = patch.ui.timeline_open {
            self.ui.timeline_open = timeline_open;
        }
        if let Some(last_used_fps) = patch.ui.last_used_fps {
            self.ui.last_used_fps = last_used_fps;
        }
    }

    /// Select the active clip, or clear it with `None`
    pub fn set_active_clip(&mut self, clip_id: Option<String>) {
        self.active_clip_id = clip_id;
    }

    /// Look up a clip by id
    pub fn clip(&self, id: &str) -> Option<&AnimationClip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// The currently active clip, if it exists
    pub fn active_clip(&self) -> Option<&AnimationClip> {
        self.active_clip_id.as_deref().and_then(|id| self.clip(id))
    }

    /// Whether the state holds no scene animation data
    pub fn is_baseline(&self) -> bool {
        self.active_clip_id.is_none()
            && self.clips.is_empty()
            && self.tracks.is_empty()
            && self.markers.is_empty()
            && self.playhead == 0.0
            && !self.is_playing
            && self.solo_tracks.is_empty()
    }
}

impl AnimationPatch {
    /// Patch clearing all scene animation data
    ///
    /// Frame rate and UI preferences are not part of the scene data and are
    /// left alone.
    pub fn reset() -> Self {
        Self {
            clips: Some(Vec::new()),
            tracks: Some(HashMap::new()),
            markers: Some(Vec::new()),
            playhead: Some(0.0),
            is_playing: Some(false),
            solo_tracks: Some(HashSet::new()),
            fps: None,
            ui: AnimationUiPatch::default(),
        }
    }
}

impl AnimationSnapshot {
    /// Snapshot that only resets the container
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reset `state` to the empty baseline, then populate it from this snapshot
    pub fn apply_to(&self, state: &mut AnimationState) {
        state.patch(AnimationPatch::reset());
        state.set_active_clip(None);

        state.patch(AnimationPatch {
            clips: Some(self.clips.clone()),
            tracks: Some(self.tracks.clone()),
            fps: self.fps,
            ui: self.ui.clone(),
            ..AnimationPatch::default()
        });
        state.set_active_clip(self.active_clip_id.clone());
    }

    /// Whether the snapshot carries no clips
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty() && self.tracks.is_empty()
    }
}
