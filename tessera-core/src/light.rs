//! Scene lights

use crate::vector::{white, Color};
use serde::{Deserialize, Serialize};

/// Kind of light source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightType {
    Directional,
    Point,
    Spot,
    Ambient,
}

/// A light referenced by scene objects through `light_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub id: String,
    pub name: String,
    pub light_type: LightType,
    pub color: Color,
    pub intensity: f64,
    /// Cutoff distance for point and spot lights (0 means unlimited)
    pub distance: Option<f64>,
    pub decay: Option<f64>,
    /// Cone half-angle in radians for spot lights
    pub angle: Option<f64>,
    pub penumbra: Option<f64>,
    pub cast_shadow: bool,
}

impl Light {
    /// Create a white light of the given kind with unit intensity
    pub fn new(id: impl Into<String>, name: impl Into<String>, light_type: LightType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            light_type,
            color: white(),
            intensity: 1.0,
            distance: None,
            decay: None,
            angle: None,
            penumbra: None,
            cast_shadow: false,
        }
    }
}
