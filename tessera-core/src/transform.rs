//! Object and mesh transforms

use crate::vector::Vector3d;
use nalgebra::{Matrix4, Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// Position / rotation / scale triple attached to meshes and scene objects
///
/// Rotation is stored as Euler angles in radians, applied in X, Y, Z order
/// (the rotation matrix is `Rx * Ry * Rz`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vector3d,
    pub rotation: Vector3d,
    pub scale: Vector3d,
}

impl Transform {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Vector3d::zeros(),
            rotation: Vector3d::zeros(),
            scale: Vector3d::new(1.0, 1.0, 1.0),
        }
    }

    /// Create a transform from its three components
    pub fn new(position: Vector3d, rotation: Vector3d, scale: Vector3d) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Create a pure translation
    pub fn from_position(position: Vector3d) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Rotation part as a matrix
    pub fn rotation_matrix(&self) -> Rotation3<f64> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.rotation.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.rotation.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), self.rotation.z);
        rx * ry * rz
    }

    /// Local-to-parent matrix: translation * rotation * scale
    pub fn to_matrix(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.position)
            * self.rotation_matrix().to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply the transform to a point
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.to_matrix().transform_point(point)
    }

    /// Check if this is approximately the identity transform
    pub fn is_identity(&self, epsilon: f64) -> bool {
        (self.to_matrix() - Matrix4::identity()).norm() < epsilon
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
