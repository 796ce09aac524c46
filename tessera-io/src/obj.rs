//! OBJ format support
//!
//! Wavefront OBJ files are loaded with the `obj` crate and turned into an
//! editable [`Mesh`]: one vertex per OBJ position, one face per polygon
//! across every object and group, and the edge list derived from face
//! boundaries.

use crate::error::{IoError, ObjImportError};
use crate::MeshReader;
use obj::{IndexTuple, ObjData};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tessera_core::{Edge, Face, Mesh, Vector2d, Vector3d, Vertex};

/// Reads `.obj` files from disk
pub struct ObjReader;

impl MeshReader for ObjReader {
    fn read_mesh(&self, path: &Path) -> Result<Mesh, IoError> {
        let file = File::open(path)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Mesh")
            .to_string();
        Ok(import_obj(BufReader::new(file), &format!("mesh-{}", name), &name)?)
    }

    fn format_name(&self) -> &'static str {
        "obj"
    }
}

/// Parse OBJ text into an editable mesh
pub fn import_obj<R: Read>(input: R, mesh_id: &str, name: &str) -> Result<Mesh, ObjImportError> {
    let data = ObjData::load_buf(input).map_err(|e| ObjImportError::Parse {
        message: e.to_string(),
    })?;
    obj_to_mesh(&data, mesh_id, name)
}

/// Polygons of every object and group, in file order
fn polygons(data: &ObjData) -> impl Iterator<Item = &[IndexTuple]> {
    data.objects
        .iter()
        .flat_map(|object| object.groups.iter())
        .flat_map(|group| group.polys.iter())
        .map(|poly| poly.0.as_slice())
}

fn check_corner(data: &ObjData, index: usize, corner: &IndexTuple) -> Result<(), ObjImportError> {
    let IndexTuple(p, t, n) = *corner;
    let invalid = |reason: String| ObjImportError::InvalidFace { index, reason };

    if p >= data.position.len() {
        return Err(invalid(format!("position index {} out of range", p)));
    }
    if let Some(t) = t {
        if t >= data.texture.len() {
            return Err(invalid(format!("texture coordinate index {} out of range", t)));
        }
    }
    if let Some(n) = n {
        if n >= data.normal.len() {
            return Err(invalid(format!("normal index {} out of range", n)));
        }
    }
    Ok(())
}

/// Face normal by Newell's method; zero for degenerate polygons
fn newell_normal(points: &[Vector3d]) -> Vector3d {
    let mut normal = Vector3d::zeros();
    for (i, current) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal.try_normalize(1e-12).unwrap_or_else(Vector3d::zeros)
}

fn obj_to_mesh(data: &ObjData, mesh_id: &str, name: &str) -> Result<Mesh, ObjImportError> {
    let mut mesh = Mesh::new(mesh_id, name);

    mesh.vertices = data
        .position
        .iter()
        .enumerate()
        .map(|(i, &[x, y, z])| {
            Vertex::new(format!("v{}", i), Vector3d::new(x as f64, y as f64, z as f64))
        })
        .collect();

    let mut normal_set = vec![false; mesh.vertices.len()];
    let mut uv_set = vec![false; mesh.vertices.len()];
    let mut edge_index: HashMap<(usize, usize), usize> = HashMap::new();

    for (face_index, corners) in polygons(data).enumerate() {
        if corners.len() < 3 {
            return Err(ObjImportError::InvalidFace {
                index: face_index,
                reason: format!("{} corners, need at least 3", corners.len()),
            });
        }
        for corner in corners {
            check_corner(data, face_index, corner)?;
        }

        let face_id = format!("f{}", face_index);

        for &IndexTuple(p, t, n) in corners {
            if let Some(t) = t {
                if !uv_set[p] {
                    let [u, v] = data.texture[t];
                    mesh.vertices[p].uv = Vector2d::new(u as f64, v as f64);
                    uv_set[p] = true;
                }
            }
            if let Some(n) = n {
                if !normal_set[p] {
                    let [nx, ny, nz] = data.normal[n];
                    mesh.vertices[p].normal = Vector3d::new(nx as f64, ny as f64, nz as f64);
                    normal_set[p] = true;
                }
            }
        }

        for i in 0..corners.len() {
            let a = corners[i].0;
            let b = corners[(i + 1) % corners.len()].0;
            if a == b {
                continue;
            }
            let key = (a.min(b), a.max(b));
            let edge = match edge_index.get(&key).copied() {
                Some(existing) => &mut mesh.edges[existing],
                None => {
                    edge_index.insert(key, mesh.edges.len());
                    mesh.edges.push(Edge {
                        id: format!("e{}", mesh.edges.len()),
                        vertex_ids: [format!("v{}", a), format!("v{}", b)],
                        face_ids: Vec::new(),
                        selected: false,
                    });
                    let last = mesh.edges.len() - 1;
                    &mut mesh.edges[last]
                }
            };
            if !edge.face_ids.contains(&face_id) {
                edge.face_ids.push(face_id.clone());
            }
        }

        let points: Vec<Vector3d> = corners.iter().map(|c| mesh.vertices[c.0].position).collect();
        mesh.faces.push(Face {
            id: face_id,
            vertex_ids: corners.iter().map(|c| format!("v{}", c.0)).collect(),
            normal: newell_normal(&points),
            material_id: String::new(),
            selected: false,
        });
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
f 1/1/1 3/3/1 4/4/1
";

    #[test]
    fn test_quad_topology() {
        let mesh = import_obj(QUAD.as_bytes(), "mesh-quad", "Quad").unwrap();
        assert_eq!(mesh.id, "mesh-quad");
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.edge_count(), 5);

        let diagonal = mesh.edge_between("v0", "v2").unwrap();
        assert_eq!(diagonal.face_ids, vec!["f0".to_string(), "f1".to_string()]);

        let border = mesh.edge_between("v2", "v3").unwrap();
        assert_eq!(border.face_ids, vec!["f1".to_string()]);

        assert!(mesh.validate_references().is_ok());
    }

    #[test]
    fn test_normals_and_uvs() {
        let mesh = import_obj(QUAD.as_bytes(), "m", "Quad").unwrap();
        for face in &mesh.faces {
            assert_relative_eq!(face.normal, Vector3d::z(), epsilon = 1e-12);
        }
        assert_eq!(mesh.vertices[2].uv, Vector2d::new(1.0, 1.0));
        assert_eq!(mesh.vertices[3].normal, Vector3d::z());
        assert!(mesh.transform.is_identity(1e-12));
    }

    #[test]
    fn test_polygon_face_kept_whole() {
        let pentagon = "v 0 0 0\nv 2 0 0\nv 3 1 0\nv 1 2 0\nv -1 1 0\nf 1 2 3 4 5\n";
        let mesh = import_obj(pentagon.as_bytes(), "m", "Pentagon").unwrap();
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.faces[0].vertex_ids.len(), 5);
        assert_eq!(mesh.edge_count(), 5);
        assert_eq!(mesh.vertices[0].normal, Vector3d::zeros());
    }

    #[test]
    fn test_out_of_range_index() {
        let bad = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 7\n";
        let err = import_obj(bad.as_bytes(), "m", "Bad").unwrap_err();
        match err {
            ObjImportError::InvalidFace { index, reason } => {
                assert_eq!(index, 0);
                assert!(reason.contains("position index 6"));
            }
            other => panic!("expected InvalidFace, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_normal_index() {
        let bad = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//2\n";
        let result = import_obj(bad.as_bytes(), "m", "Bad");
        assert!(matches!(result, Err(ObjImportError::InvalidFace { index: 0, .. })));
    }

    #[test]
    fn test_zero_index_is_parse_error() {
        let bad = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n";
        let result = import_obj(bad.as_bytes(), "m", "Bad");
        assert!(matches!(result, Err(ObjImportError::Parse { .. })));
    }

    #[test]
    fn test_two_corner_face_rejected() {
        let bad = "v 0 0 0\nv 1 0 0\nf 1 2\n";
        let result = import_obj(bad.as_bytes(), "m", "Bad");
        assert!(matches!(result, Err(ObjImportError::InvalidFace { index: 0, .. })));
    }

    #[test]
    fn test_faces_collected_across_objects_and_groups() {
        let text = "\
o first
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
g top
f 1 2 3
o second
g bottom
f -4 -2 -1
";
        let mesh = import_obj(text.as_bytes(), "m", "Split").unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.faces[0].id, "f0");
        assert_eq!(mesh.faces[1].vertex_ids, vec!["v0", "v2", "v3"]);
        assert_eq!(mesh.edge_count(), 5);
        assert!(mesh.validate_references().is_ok());
    }

    #[test]
    fn test_newell_degenerate() {
        let line = [Vector3d::zeros(), Vector3d::x(), Vector3d::x() * 2.0];
        assert_eq!(newell_normal(&line), Vector3d::zeros());
    }
}
