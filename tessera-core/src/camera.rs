//! Scene cameras

use serde::{Deserialize, Serialize};

/// Projection used by a scene camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraType {
    Perspective,
    Orthographic,
}

/// A camera referenced by scene objects through `camera_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub id: String,
    pub name: String,
    pub camera_type: CameraType,
    /// Vertical field of view in degrees (perspective only)
    pub fov: f64,
    pub zoom: f64,
    pub near: f64,
    pub far: f64,
    /// Height of the view volume (orthographic only)
    pub ortho_height: Option<f64>,
}

impl Camera {
    /// Create a perspective camera with editor defaults
    pub fn perspective(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            camera_type: CameraType::Perspective,
            fov: 50.0,
            zoom: 1.0,
            near: 0.1,
            far: 1000.0,
            ortho_height: None,
        }
    }
}
