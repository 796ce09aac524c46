//! The editor workspace produced by a scene import

use crate::camera::Camera;
use crate::error::Error;
use crate::light::Light;
use crate::material::Material;
use crate::mesh::Mesh;
use crate::object::SceneObject;
use crate::viewport::Viewport;
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Name and version of the application that wrote a scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInfo {
    pub name: String,
    pub version: String,
}

/// Descriptive metadata carried with a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceMetadata {
    /// Scene format version as `major.minor.patch`
    pub version: String,
    pub created: String,
    pub modified: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub application: ApplicationInfo,
}

/// Everything the editor needs to rebuild a scene
///
/// `lights` and `cameras` are `None` when the scene carried no such payload,
/// which is distinct from an empty map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedWorkspaceData {
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
    pub objects: Vec<SceneObject>,
    pub root_objects: Vec<String>,
    pub viewport: Viewport,
    pub selected_object_id: Option<String>,
    pub lights: Option<HashMap<String, Light>>,
    pub cameras: Option<HashMap<String, Camera>>,
    pub metadata: WorkspaceMetadata,
}

impl ImportedWorkspaceData {
    /// Look up a mesh by id
    pub fn mesh(&self, id: &str) -> Option<&Mesh> {
        self.meshes.iter().find(|m| m.id == id)
    }

    /// Look up a material by id
    pub fn material(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Look up a scene object by id
    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Look up a light by id
    pub fn light(&self, id: &str) -> Option<&Light> {
        self.lights.as_ref().and_then(|lights| lights.get(id))
    }

    /// Look up a camera by id
    pub fn camera(&self, id: &str) -> Option<&Camera> {
        self.cameras.as_ref().and_then(|cameras| cameras.get(id))
    }

    /// The selected object, if the selection points at an existing object
    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.selected_object_id.as_deref().and_then(|id| self.object(id))
    }

    /// Object-to-world matrix of `object_id`, composed along the parent chain
    pub fn world_matrix(&self, object_id: &str) -> Result<Matrix4<f64>, Error> {
        let mut matrix = Matrix4::identity();
        let mut visited = HashSet::new();
        let mut current = Some(object_id);

        while let Some(id) = current {
            if !visited.insert(id) {
                return Err(Error::InvalidData(format!(
                    "parent cycle through object '{}'",
                    id
                )));
            }
            let object = self.object(id).ok_or_else(|| Error::DanglingReference {
                owner: format!("object chain of '{}'", object_id),
                kind: "object",
                id: id.to_string(),
            })?;
            matrix = object.transform.to_matrix() * matrix;
            current = object.parent_id.as_deref();
        }

        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectType;
    use crate::transform::Transform;
    use crate::vector::Vector3d;
    use nalgebra::Point3;

    fn workspace() -> ImportedWorkspaceData {
        let mut parent = SceneObject::new("parent", "Parent", ObjectType::Group);
        parent.transform = Transform::from_position(Vector3d::new(10.0, 0.0, 0.0));
        parent.children_ids.push("child".to_string());

        let mut child = SceneObject::with_mesh("child", "Child", "mesh1");
        child.parent_id = Some("parent".to_string());
        child.transform = Transform::from_position(Vector3d::new(0.0, 1.0, 0.0));

        ImportedWorkspaceData {
            meshes: vec![Mesh::new("mesh1", "Cube")],
            materials: Vec::new(),
            objects: vec![parent, child],
            root_objects: vec!["parent".to_string()],
            viewport: Viewport::default(),
            selected_object_id: Some("child".to_string()),
            lights: None,
            cameras: None,
            metadata: WorkspaceMetadata {
                version: "1.0.0".to_string(),
                created: "2024-01-01T00:00:00Z".to_string(),
                modified: "2024-01-01T00:00:00Z".to_string(),
                author: None,
                description: None,
                application: ApplicationInfo {
                    name: "Tessera".to_string(),
                    version: "0.1.0".to_string(),
                },
            },
        }
    }

    #[test]
    fn test_world_matrix_composes_parents() {
        let ws = workspace();
        let m = ws.world_matrix("child").unwrap();
        let p = m.transform_point(&Point3::origin());
        assert_eq!(p, Point3::new(10.0, 1.0, 0.0));
    }

    #[test]
    fn test_world_matrix_detects_cycles() {
        let mut ws = workspace();
        ws.objects[0].parent_id = Some("child".to_string());
        assert!(matches!(ws.world_matrix("child"), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_lookups() {
        let ws = workspace();
        assert_eq!(ws.selected_object().map(|o| o.name.as_str()), Some("Child"));
        assert!(ws.mesh("mesh1").is_some());
        assert!(ws.light("sun").is_none());
        assert!(ws.camera("cam").is_none());
        assert!(matches!(
            ws.world_matrix("ghost"),
            Err(Error::DanglingReference { .. })
        ));
    }
}
