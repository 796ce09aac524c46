//! Projection of scene animation payloads onto the animation runtime state
//!
//! The scene document nests tracks inside clips; the runtime container keeps
//! clips in order and tracks in a map keyed by id. Decoding happens here,
//! separately from the rest of the document, so that a damaged payload only
//! costs the animation data and never the import.

use crate::document::{AnimationsDoc, ClipDoc, KeyframeDoc, TrackDoc, UiDoc};
use crate::error::AnimationProjectionError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tessera_core::{
    AnimationChannel, AnimationClip, AnimationSnapshot, AnimationState, AnimationTrack,
    AnimationUiPatch, Keyframe, TrackTargetType,
};

/// Id of the single channel a scene track is materialized with
pub fn channel_id(track_id: &str) -> String {
    format!("{}:value", track_id)
}

fn materialize_track(doc: &TrackDoc) -> AnimationTrack {
    let keyframes = doc
        .keyframes
        .iter()
        .map(|k| Keyframe {
            id: k.id.clone(),
            time: k.time,
            value: k.value,
            interpolation: k.interpolation,
        })
        .collect();

    AnimationTrack {
        id: doc.id.clone(),
        target_type: TrackTargetType::SceneObject,
        target_id: doc.target_id.clone(),
        property: doc.property.clone(),
        channels: vec![AnimationChannel {
            id: channel_id(&doc.id),
            keyframes,
        }],
    }
}

fn materialize_clip(doc: &ClipDoc) -> AnimationClip {
    AnimationClip {
        id: doc.id.clone(),
        name: doc.name.clone(),
        start: doc.start,
        end: doc.end,
        looping: doc.looping,
        speed: doc.speed,
        track_ids: doc.tracks.iter().map(|t| t.id.clone()).collect(),
    }
}

/// Decode the `animations` and `ui` payloads into a snapshot
///
/// With neither payload present the result is the reset-only snapshot.
pub fn project_animation(
    animations: Option<&Value>,
    ui: Option<&Value>,
) -> Result<AnimationSnapshot, AnimationProjectionError> {
    let mut snapshot = AnimationSnapshot::empty();

    if let Some(value) = animations {
        let payload = AnimationsDoc::deserialize(value).map_err(AnimationProjectionError::Payload)?;

        snapshot.fps = payload.fps;
        let mut tracks = HashMap::new();
        for clip in &payload.clips {
            for track in &clip.tracks {
                tracks.insert(track.id.clone(), materialize_track(track));
            }
        }
        snapshot.clips = payload.clips.iter().map(materialize_clip).collect();
        snapshot.tracks = tracks;
        snapshot.active_clip_id = payload
            .active_clip_id
            .or_else(|| snapshot.clips.first().map(|c| c.id.clone()));
    }

    if let Some(value) = ui {
        let payload = UiDoc::deserialize(value).map_err(AnimationProjectionError::Ui)?;
        snapshot.ui = AnimationUiPatch {
            timeline_open: Some(payload.timeline_open),
            last_used_fps: payload.last_used_fps,
        };
    }

    Ok(snapshot)
}

/// Serialize runtime animation state back into the `animations` payload
///
/// Tracks are nested under the clips that list them; each track's keyframes
/// come from its channels in order.
pub fn animations_payload(state: &AnimationState) -> AnimationsDoc {
    let clips = state
        .clips
        .iter()
        .map(|clip| ClipDoc {
            id: clip.id.clone(),
            name: clip.name.clone(),
            start: clip.start,
            end: clip.end,
            looping: clip.looping,
            speed: clip.speed,
            tracks: clip
                .track_ids
                .iter()
                .filter_map(|id| state.tracks.get(id))
                .map(|track| TrackDoc {
                    id: track.id.clone(),
                    target_id: track.target_id.clone(),
                    property: track.property.clone(),
                    keyframes: track
                        .channels
                        .iter()
                        .flat_map(|c| c.keyframes.iter())
                        .map(|k| KeyframeDoc {
                            id: k.id.clone(),
                            time: k.time,
                            value: k.value,
                            interpolation: k.interpolation,
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    AnimationsDoc {
        fps: Some(state.fps),
        active_clip_id: state.active_clip_id.clone(),
        clips,
    }
}

/// Serialize timeline UI preferences into the `ui` payload
pub fn ui_payload(state: &AnimationState) -> UiDoc {
    UiDoc {
        timeline_open: state.ui.timeline_open,
        last_used_fps: Some(state.ui.last_used_fps),
    }
}
