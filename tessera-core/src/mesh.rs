//! Editable mesh data structures
//!
//! Meshes are stored the way edit mode works on them: vertices, edges and
//! faces each carry a stable string id and a selection flag, and edges and
//! faces refer to vertices by id rather than by index.

use crate::error::Error;
use crate::transform::Transform;
use crate::vector::{Vector2d, Vector3d};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A mesh vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: String,
    pub position: Vector3d,
    pub normal: Vector3d,
    pub uv: Vector2d,
    pub selected: bool,
}

/// An edge between two vertices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub vertex_ids: [String; 2],
    /// Ids of the faces bordering this edge
    pub face_ids: Vec<String>,
    pub selected: bool,
}

/// A polygonal face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub id: String,
    /// Vertex ids in winding order
    pub vertex_ids: Vec<String>,
    pub normal: Vector3d,
    pub material_id: String,
    pub selected: bool,
}

/// An editable polygon mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub id: String,
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
    pub faces: Vec<Face>,
    pub transform: Transform,
    pub visible: bool,
    pub locked: bool,
}

impl Vertex {
    /// Create an unselected vertex at `position` with zero normal and uv
    pub fn new(id: impl Into<String>, position: Vector3d) -> Self {
        Self {
            id: id.into(),
            position,
            normal: Vector3d::zeros(),
            uv: Vector2d::zeros(),
            selected: false,
        }
    }
}

impl Edge {
    /// Whether this edge connects `a` and `b`, in either direction
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.vertex_ids[0] == a && self.vertex_ids[1] == b)
            || (self.vertex_ids[0] == b && self.vertex_ids[1] == a)
    }
}

impl Mesh {
    /// Create a new empty, visible mesh
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            transform: Transform::identity(),
            visible: true,
            locked: false,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no geometry
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Look up a vertex by id
    pub fn vertex(&self, id: &str) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    /// Look up a face by id
    pub fn face(&self, id: &str) -> Option<&Face> {
        self.faces.iter().find(|f| f.id == id)
    }

    /// Find the edge connecting two vertices
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.connects(a, b))
    }

    /// Check that every vertex id used by an edge or face exists in the mesh
    ///
    /// Importers do not call this; renderers and edit tools that index by
    /// vertex id should before trusting the data.
    pub fn validate_references(&self) -> Result<(), Error> {
        let known: HashSet<&str> = self.vertices.iter().map(|v| v.id.as_str()).collect();

        for edge in &self.edges {
            for vid in &edge.vertex_ids {
                if !known.contains(vid.as_str()) {
                    return Err(Error::DanglingReference {
                        owner: format!("edge '{}'", edge.id),
                        kind: "vertex",
                        id: vid.clone(),
                    });
                }
            }
        }

        for face in &self.faces {
            for vid in &face.vertex_ids {
                if !known.contains(vid.as_str()) {
                    return Err(Error::DanglingReference {
                        owner: format!("face '{}'", face.id),
                        kind: "vertex",
                        id: vid.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Ids of all selected vertices
    pub fn selected_vertex_ids(&self) -> Vec<&str> {
        self.vertices
            .iter()
            .filter(|v| v.selected)
            .map(|v| v.id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment() -> Mesh {
        let mut mesh = Mesh::new("m1", "Segment");
        mesh.vertices.push(Vertex::new("v1", Vector3d::new(0.0, 0.0, 0.0)));
        mesh.vertices.push(Vertex::new("v2", Vector3d::new(1.0, 0.0, 0.0)));
        mesh.edges.push(Edge {
            id: "e1".to_string(),
            vertex_ids: ["v1".to_string(), "v2".to_string()],
            face_ids: Vec::new(),
            selected: false,
        });
        mesh
    }

    #[test]
    fn test_counts_and_lookup() {
        let mesh = segment();
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.edge_count(), 1);
        assert_eq!(mesh.face_count(), 0);
        assert!(!mesh.is_empty());
        assert!(mesh.vertex("v2").is_some());
        assert!(mesh.edge_between("v2", "v1").is_some());
        assert!(mesh.face("f1").is_none());
    }

    #[test]
    fn test_validate_references() {
        let mut mesh = segment();
        assert!(mesh.validate_references().is_ok());

        mesh.faces.push(Face {
            id: "f1".to_string(),
            vertex_ids: vec!["v1".to_string(), "v2".to_string(), "v9".to_string()],
            normal: Vector3d::z(),
            material_id: String::new(),
            selected: false,
        });
        match mesh.validate_references() {
            Err(Error::DanglingReference { id, .. }) => assert_eq!(id, "v9"),
            other => panic!("expected dangling reference, got {:?}", other),
        }
    }

    #[test]
    fn test_selected_vertices() {
        let mut mesh = segment();
        mesh.vertices[1].selected = true;
        assert_eq!(mesh.selected_vertex_ids(), vec!["v2"]);
    }
}
