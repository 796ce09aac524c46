//! Core data structures for the Tessera editor
//!
//! This crate provides the in-memory scene representation shared by the
//! editor: editable meshes, materials, the scene object tree, viewport state,
//! lights, cameras and the animation runtime state container.

pub mod vector;
pub mod transform;
pub mod mesh;
pub mod material;
pub mod object;
pub mod viewport;
pub mod light;
pub mod camera;
pub mod animation;
pub mod workspace;
pub mod error;

pub use vector::*;
pub use transform::*;
pub use mesh::*;
pub use material::*;
pub use object::*;
pub use viewport::*;
pub use light::*;
pub use camera::*;
pub use animation::*;
pub use workspace::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Vector2, Vector3};

/// Common result type for Tessera operations
pub type Result<T> = std::result::Result<T, Error>;
