//! Serialized shape of `scene.json`
//!
//! These types mirror the JSON document stored inside a `.t3d` archive
//! field-for-field (camelCase keys, vectors as `{x, y, z}` objects). They
//! are converted to the in-memory model by [`crate::convert`] and produced
//! from it by [`crate::export`].

use crate::version::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tessera_core::{CameraType, Interpolation, LightType, ObjectType, ShadingMode};

/// Top-level fields every scene document must carry
pub const REQUIRED_FIELDS: [&str; 6] = [
    "metadata",
    "meshes",
    "materials",
    "objects",
    "rootObjects",
    "viewport",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3Doc {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2Doc {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformDoc {
    pub position: Vec3Doc,
    pub rotation: Vec3Doc,
    pub scale: Vec3Doc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDoc {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDoc {
    pub version: Version,
    pub created: String,
    pub modified: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<ApplicationDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexDoc {
    pub id: String,
    pub position: Vec3Doc,
    pub normal: Vec3Doc,
    pub uv: Vec2Doc,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDoc {
    pub id: String,
    pub vertex_ids: [String; 2],
    pub face_ids: Vec<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceDoc {
    pub id: String,
    pub vertex_ids: Vec<String>,
    pub normal: Vec3Doc,
    pub material_id: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDoc {
    pub id: String,
    pub name: String,
    pub vertices: Vec<VertexDoc>,
    pub edges: Vec<EdgeDoc>,
    pub faces: Vec<FaceDoc>,
    pub transform: TransformDoc,
    pub visible: bool,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDoc {
    pub id: String,
    pub name: String,
    pub color: Vec3Doc,
    pub roughness: f64,
    pub metalness: f64,
    pub emissive: Vec3Doc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emissive_intensity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDoc {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub children: Vec<String>,
    pub transform: TransformDoc,
    pub visible: bool,
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportCameraDoc {
    pub position: Vec3Doc,
    pub target: Vec3Doc,
    pub up: Vec3Doc,
    pub fov: f64,
    pub near: f64,
    pub far: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportDoc {
    pub camera: ViewportCameraDoc,
    pub shading_mode: ShadingMode,
    pub show_grid: bool,
    pub show_axes: bool,
    pub grid_size: f64,
    pub background_color: Vec3Doc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_camera_object_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightDoc {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub light_type: LightType,
    pub color: Vec3Doc,
    pub intensity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decay: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penumbra: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_shadow: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraDoc {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub camera_type: CameraType,
    pub fov: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    pub near: f64,
    pub far: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ortho_height: Option<f64>,
}

/// The whole `scene.json` document
///
/// `animations` and `ui` stay as raw JSON here: they are decoded later on a
/// best-effort basis so a damaged animation payload cannot fail the import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDocument {
    pub metadata: MetadataDoc,
    pub meshes: Vec<MeshDoc>,
    pub materials: Vec<MaterialDoc>,
    pub objects: Vec<ObjectDoc>,
    pub root_objects: Vec<String>,
    pub viewport: ViewportDoc,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lights: Option<Vec<LightDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cameras: Option<Vec<CameraDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animations: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeDoc {
    pub id: String,
    pub time: f64,
    pub value: f64,
    pub interpolation: Interpolation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDoc {
    pub id: String,
    pub target_id: String,
    pub property: String,
    pub keyframes: Vec<KeyframeDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipDoc {
    pub id: String,
    pub name: String,
    pub start: f64,
    pub end: f64,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub speed: f64,
    pub tracks: Vec<TrackDoc>,
}

/// The `animations` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationsDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_clip_id: Option<String>,
    pub clips: Vec<ClipDoc>,
}

/// The `ui` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiDoc {
    #[serde(default)]
    pub timeline_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_fps: Option<f64>,
}
