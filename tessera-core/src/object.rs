//! Scene graph objects

use crate::transform::Transform;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a scene object represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Mesh,
    Light,
    Camera,
    Empty,
    Group,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectType::Mesh => "mesh",
            ObjectType::Light => "light",
            ObjectType::Camera => "camera",
            ObjectType::Empty => "empty",
            ObjectType::Group => "group",
        };
        f.write_str(name)
    }
}

/// A node in the scene tree
///
/// The tree is expressed through `parent_id` / `children_ids`; objects with
/// no parent are listed in the workspace's root object list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: String,
    pub name: String,
    pub object_type: ObjectType,
    pub parent_id: Option<String>,
    pub children_ids: Vec<String>,
    pub transform: Transform,
    pub visible: bool,
    pub locked: bool,
    /// Whether the object is included in final renders
    pub render: bool,
    pub mesh_id: Option<String>,
    pub light_id: Option<String>,
    pub camera_id: Option<String>,
}

impl SceneObject {
    /// Create a visible, renderable root object with an identity transform
    pub fn new(id: impl Into<String>, name: impl Into<String>, object_type: ObjectType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            object_type,
            parent_id: None,
            children_ids: Vec::new(),
            transform: Transform::identity(),
            visible: true,
            locked: false,
            render: true,
            mesh_id: None,
            light_id: None,
            camera_id: None,
        }
    }

    /// Create a mesh object pointing at `mesh_id`
    pub fn with_mesh(id: impl Into<String>, name: impl Into<String>, mesh_id: impl Into<String>) -> Self {
        Self {
            mesh_id: Some(mesh_id.into()),
            ..Self::new(id, name, ObjectType::Mesh)
        }
    }

    /// Whether the object sits at the top of the tree
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
