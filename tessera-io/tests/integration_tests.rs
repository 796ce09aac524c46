//! Integration tests for tessera-io
//!
//! These go through the public API only: exporting workspaces, importing
//! them back, path-based reading and writing, and OBJ conversion.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tessera_core::{
    AnimationChannel, AnimationClip, AnimationState, AnimationTrack, Camera, Interpolation,
    Keyframe, Light, LightType, TrackTargetType, Vector3d,
};
use tessera_io::{
    export_scene, import_obj, import_scene, import_scene_into, read_mesh, read_scene,
    workspace_from_mesh, write_scene, ImportOptions, IoError,
};

const QUAD_OBJ: &str = "\
# unit quad split along its diagonal
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3
f 1 3 4
";

fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("tessera-io-tests");
    fs::create_dir_all(&dir).unwrap();
    dir.join(format!("{}-{}", std::process::id(), name))
}

fn quad_workspace() -> tessera_core::ImportedWorkspaceData {
    let mesh = import_obj(QUAD_OBJ.as_bytes(), "quad", "Quad").unwrap();
    let mut workspace = workspace_from_mesh(mesh, &ImportOptions::default());
    workspace.metadata.created = "2024-06-01T00:00:00Z".to_string();
    workspace.metadata.modified = "2024-06-02T00:00:00Z".to_string();
    workspace
}

fn animation_state() -> AnimationState {
    let mut state = AnimationState::new();
    state.fps = 25.0;
    state.ui.timeline_open = true;
    state.clips.push(AnimationClip {
        id: "spin".to_string(),
        name: "Spin".to_string(),
        start: 0.0,
        end: 50.0,
        looping: true,
        speed: 2.0,
        track_ids: vec!["rot".to_string()],
    });
    state.tracks.insert(
        "rot".to_string(),
        AnimationTrack {
            id: "rot".to_string(),
            target_type: TrackTargetType::SceneObject,
            target_id: "object-quad".to_string(),
            property: "rotation.y".to_string(),
            channels: vec![AnimationChannel {
                id: "rot:value".to_string(),
                keyframes: vec![
                    Keyframe {
                        id: "k0".to_string(),
                        time: 0.0,
                        value: 0.0,
                        interpolation: Interpolation::Linear,
                    },
                    Keyframe {
                        id: "k1".to_string(),
                        time: 50.0,
                        value: std::f64::consts::TAU,
                        interpolation: Interpolation::Linear,
                    },
                ],
            }],
        },
    );
    state.set_active_clip(Some("spin".to_string()));
    state
}

#[test]
fn test_export_import_round_trip() {
    let mut workspace = quad_workspace();
    let mut lights = HashMap::new();
    let mut sun = Light::new("sun", "Sun", LightType::Directional);
    sun.cast_shadow = true;
    lights.insert("sun".to_string(), sun);
    workspace.lights = Some(lights);
    let mut cameras = HashMap::new();
    cameras.insert("cam".to_string(), Camera::perspective("cam", "Main"));
    workspace.cameras = Some(cameras);

    let animation = animation_state();
    let bytes = export_scene(&workspace, Some(&animation)).unwrap();
    let import = import_scene(&bytes).unwrap();
    assert!(!import.has_warnings());

    let restored = &import.workspace;
    assert_eq!(restored.meshes, workspace.meshes);
    assert_eq!(restored.materials, workspace.materials);
    assert_eq!(restored.objects, workspace.objects);
    assert_eq!(restored.root_objects, workspace.root_objects);
    assert_eq!(restored.viewport, workspace.viewport);
    assert_eq!(restored.lights, workspace.lights);
    assert_eq!(restored.cameras, workspace.cameras);
    assert_eq!(restored.metadata.created, "2024-06-01T00:00:00Z");

    assert_eq!(import.animation.fps, Some(25.0));
    assert_eq!(import.animation.clips, animation.clips);
    assert_eq!(import.animation.tracks, animation.tracks);
    assert_eq!(import.animation.active_clip_id.as_deref(), Some("spin"));
}

#[test]
fn test_round_trip_without_optional_payloads() {
    let workspace = quad_workspace();
    let bytes = export_scene(&workspace, None).unwrap();
    let import = import_scene(&bytes).unwrap();

    assert!(import.workspace.lights.is_none());
    assert!(import.workspace.cameras.is_none());
    assert!(import.animation.is_empty());
}

#[test]
fn test_import_into_shared_state() {
    let bytes = export_scene(&quad_workspace(), Some(&animation_state())).unwrap();
    let state = Mutex::new(AnimationState::new());

    import_scene_into(&bytes, &ImportOptions::default(), &state).unwrap();
    {
        let state = state.lock().unwrap();
        assert_eq!(state.active_clip().map(|c| c.id.as_str()), Some("spin"));
        assert_eq!(state.fps, 25.0);
    }

    // a scene without animations clears what the previous import applied
    let plain = export_scene(&quad_workspace(), None).unwrap();
    import_scene_into(&plain, &ImportOptions::default(), &state).unwrap();
    let state = state.lock().unwrap();
    assert!(state.is_baseline());
    assert_eq!(state.fps, 25.0);
}

#[test]
fn test_obj_quad_to_scene() {
    let workspace = quad_workspace();
    let mesh = &workspace.meshes[0];

    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.face_count(), 2);
    assert_eq!(mesh.edge_count(), 5);
    assert_eq!(mesh.edge_between("v0", "v2").unwrap().face_ids.len(), 2);
    assert!(mesh.faces.iter().all(|f| f.material_id == "material-default"));
    assert!(mesh.faces.iter().all(|f| f.normal == Vector3d::z()));

    let object = &workspace.objects[0];
    assert_eq!(object.mesh_id.as_deref(), Some("quad"));
    assert_eq!(workspace.root_objects, vec![object.id.clone()]);
    assert_eq!(workspace.metadata.version, "1.0.0");
}

#[test]
fn test_wrapped_mesh_is_stamped_with_utc_time() {
    let mesh = import_obj(QUAD_OBJ.as_bytes(), "quad", "Quad").unwrap();
    let before = Utc::now().timestamp();
    let workspace = workspace_from_mesh(mesh, &ImportOptions::default());
    let after = Utc::now().timestamp();

    let created = DateTime::parse_from_rfc3339(&workspace.metadata.created).unwrap();
    assert!(workspace.metadata.created.ends_with('Z'));
    assert!(created.timestamp() >= before && created.timestamp() <= after);
    assert_eq!(workspace.metadata.modified, workspace.metadata.created);
}

#[test]
fn test_path_based_read_and_write() {
    let obj_path = temp_path("quad.obj");
    fs::write(&obj_path, QUAD_OBJ).unwrap();

    let mesh = read_mesh(&obj_path).unwrap();
    assert!(mesh.name.ends_with("quad"));
    assert_eq!(mesh.face_count(), 2);

    let scene_path = temp_path("quad.t3d");
    let workspace = workspace_from_mesh(mesh, &ImportOptions::default());
    write_scene(&workspace, None, &scene_path).unwrap();

    let import = read_scene(&scene_path).unwrap();
    assert_eq!(import.workspace.meshes, workspace.meshes);

    let _ = fs::remove_file(obj_path);
    let _ = fs::remove_file(scene_path);
}

#[test]
fn test_path_errors() {
    let missing = temp_path("missing.t3d");
    assert!(matches!(read_scene(&missing), Err(IoError::FileNotFound { .. })));

    let wrong = temp_path("scene.gltf");
    fs::write(&wrong, b"{}").unwrap();
    assert!(matches!(
        read_scene(&wrong),
        Err(IoError::UnsupportedFormat { ref format }) if format == "gltf"
    ));
    let _ = fs::remove_file(wrong);

    let workspace = quad_workspace();
    assert!(matches!(
        write_scene(&workspace, None, temp_path("scene.fbx")),
        Err(IoError::UnsupportedFormat { .. })
    ));
}
