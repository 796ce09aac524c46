//! Surface materials

use crate::vector::{black, white, Color};
use serde::{Deserialize, Serialize};

/// Emissive intensity used when a material does not specify one
pub const DEFAULT_EMISSIVE_INTENSITY: f64 = 1.0;

/// A physically based surface material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: String,
    pub name: String,
    pub color: Color,
    pub roughness: f64,
    pub metalness: f64,
    pub emissive: Color,
    pub emissive_intensity: f64,
}

impl Material {
    /// Create a white, non-metallic, non-emissive material
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: white(),
            roughness: 0.5,
            metalness: 0.0,
            emissive: black(),
            emissive_intensity: DEFAULT_EMISSIVE_INTENSITY,
        }
    }

    /// Whether the material contributes any emitted light
    pub fn is_emissive(&self) -> bool {
        self.emissive_intensity > 0.0 && self.emissive != black()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material_is_not_emissive() {
        let mut material = Material::new("mat1", "Default");
        assert_eq!(material.emissive_intensity, DEFAULT_EMISSIVE_INTENSITY);
        assert!(!material.is_emissive());

        material.emissive = Color::new(1.0, 0.5, 0.0);
        assert!(material.is_emissive());

        material.emissive_intensity = 0.0;
        assert!(!material.is_emissive());
    }
}
