//! Vector types used throughout the scene model

use nalgebra::{Vector2, Vector3};

/// A 3D vector with double precision components
///
/// Scene documents store plain JSON numbers, so the model keeps full `f64`
/// precision to avoid rounding on import.
pub type Vector3d = Vector3<f64>;

/// A 2D vector with double precision components (texture coordinates)
pub type Vector2d = Vector2<f64>;

/// An RGB color stored as a 3D vector with components in `[0, 1]`
pub type Color = Vector3d;

/// Pure white
pub fn white() -> Color {
    Color::new(1.0, 1.0, 1.0)
}

/// Pure black
pub fn black() -> Color {
    Color::zeros()
}
