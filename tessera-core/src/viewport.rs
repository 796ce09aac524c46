//! Viewport state saved with a scene

use crate::vector::{Color, Vector3d};
use serde::{Deserialize, Serialize};

/// How the viewport shades geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    Wireframe,
    Solid,
    Material,
    Rendered,
}

/// The editor's orbit camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportCamera {
    pub position: Vector3d,
    pub target: Vector3d,
    pub up: Vector3d,
    /// Vertical field of view in degrees
    pub fov: f64,
    pub near: f64,
    pub far: f64,
}

/// Viewport display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub camera: ViewportCamera,
    pub shading_mode: ShadingMode,
    pub show_grid: bool,
    pub show_axes: bool,
    pub grid_size: f64,
    pub background_color: Color,
    /// Scene camera object the viewport looks through, if any
    pub active_camera_object_id: Option<String>,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self {
            position: Vector3d::new(5.0, 5.0, 5.0),
            target: Vector3d::zeros(),
            up: Vector3d::y(),
            fov: 50.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            camera: ViewportCamera::default(),
            shading_mode: ShadingMode::Solid,
            show_grid: true,
            show_axes: true,
            grid_size: 10.0,
            background_color: Color::new(0.1, 0.1, 0.1),
            active_camera_object_id: None,
        }
    }
}

impl ViewportCamera {
    /// Distance from the camera to its orbit target
    pub fn distance_to_target(&self) -> f64 {
        (self.position - self.target).norm()
    }
}
