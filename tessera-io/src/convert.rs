//! Conversion from the serialized scene document to the in-memory model
//!
//! Every converter is a pure function of its input. Vectors are copied
//! component-wise with no change of basis or units, and id lists are copied
//! into freshly owned vectors so the result never shares storage with the
//! document. Declared defaults apply only when a field is absent.

use crate::document::{
    CameraDoc, EdgeDoc, FaceDoc, LightDoc, MaterialDoc, MeshDoc, MetadataDoc, ObjectDoc,
    SceneDocument, TransformDoc, Vec2Doc, Vec3Doc, VertexDoc, ViewportCameraDoc, ViewportDoc,
};
use crate::error::ImportWarning;
use crate::import::ImportOptions;
use log::warn;
use std::collections::HashMap;
use tessera_core::{
    ApplicationInfo, Camera, Edge, Face, ImportedWorkspaceData, Light, Material, Mesh,
    SceneObject, Transform, Vector2d, Vector3d, Vertex, Viewport, ViewportCamera,
    WorkspaceMetadata, DEFAULT_EMISSIVE_INTENSITY,
};

/// Zoom of a camera that does not declare one
pub const DEFAULT_CAMERA_ZOOM: f64 = 1.0;

pub fn vec3(v: &Vec3Doc) -> Vector3d {
    Vector3d::new(v.x, v.y, v.z)
}

pub fn vec2(v: &Vec2Doc) -> Vector2d {
    Vector2d::new(v.x, v.y)
}

pub fn convert_transform(t: &TransformDoc) -> Transform {
    Transform::new(vec3(&t.position), vec3(&t.rotation), vec3(&t.scale))
}

fn convert_vertex(v: &VertexDoc) -> Vertex {
    Vertex {
        id: v.id.clone(),
        position: vec3(&v.position),
        normal: vec3(&v.normal),
        uv: vec2(&v.uv),
        selected: v.selected,
    }
}

fn convert_edge(e: &EdgeDoc) -> Edge {
    Edge {
        id: e.id.clone(),
        vertex_ids: e.vertex_ids.clone(),
        face_ids: e.face_ids.to_vec(),
        selected: e.selected,
    }
}

fn convert_face(f: &FaceDoc) -> Face {
    Face {
        id: f.id.clone(),
        vertex_ids: f.vertex_ids.to_vec(),
        normal: vec3(&f.normal),
        material_id: f.material_id.clone(),
        selected: f.selected,
    }
}

pub fn convert_mesh(doc: &MeshDoc) -> Mesh {
    Mesh {
        id: doc.id.clone(),
        name: doc.name.clone(),
        vertices: doc.vertices.iter().map(convert_vertex).collect(),
        edges: doc.edges.iter().map(convert_edge).collect(),
        faces: doc.faces.iter().map(convert_face).collect(),
        transform: convert_transform(&doc.transform),
        visible: doc.visible,
        locked: doc.locked,
    }
}

pub fn convert_material(doc: &MaterialDoc) -> Material {
    Material {
        id: doc.id.clone(),
        name: doc.name.clone(),
        color: vec3(&doc.color),
        roughness: doc.roughness,
        metalness: doc.metalness,
        emissive: vec3(&doc.emissive),
        emissive_intensity: doc.emissive_intensity.unwrap_or(DEFAULT_EMISSIVE_INTENSITY),
    }
}

pub fn convert_object(doc: &ObjectDoc) -> SceneObject {
    SceneObject {
        id: doc.id.clone(),
        name: doc.name.clone(),
        object_type: doc.object_type,
        parent_id: doc.parent_id.clone(),
        children_ids: doc.children.to_vec(),
        transform: convert_transform(&doc.transform),
        visible: doc.visible,
        locked: doc.locked,
        render: doc.render.unwrap_or(true),
        mesh_id: doc.mesh_id.clone(),
        light_id: doc.light_id.clone(),
        camera_id: doc.camera_id.clone(),
    }
}

fn convert_viewport_camera(doc: &ViewportCameraDoc) -> ViewportCamera {
    ViewportCamera {
        position: vec3(&doc.position),
        target: vec3(&doc.target),
        up: vec3(&doc.up),
        fov: doc.fov,
        near: doc.near,
        far: doc.far,
    }
}

pub fn convert_viewport(doc: &ViewportDoc) -> Viewport {
    Viewport {
        camera: convert_viewport_camera(&doc.camera),
        shading_mode: doc.shading_mode,
        show_grid: doc.show_grid,
        show_axes: doc.show_axes,
        grid_size: doc.grid_size,
        background_color: vec3(&doc.background_color),
        active_camera_object_id: doc.active_camera_object_id.clone(),
    }
}

pub fn convert_light(doc: &LightDoc) -> Light {
    Light {
        id: doc.id.clone(),
        name: doc.name.clone(),
        light_type: doc.light_type,
        color: vec3(&doc.color),
        intensity: doc.intensity,
        distance: doc.distance,
        decay: doc.decay,
        angle: doc.angle,
        penumbra: doc.penumbra,
        cast_shadow: doc.cast_shadow.unwrap_or(false),
    }
}

pub fn convert_camera(doc: &CameraDoc) -> Camera {
    Camera {
        id: doc.id.clone(),
        name: doc.name.clone(),
        camera_type: doc.camera_type,
        fov: doc.fov,
        zoom: doc.zoom.unwrap_or(DEFAULT_CAMERA_ZOOM),
        near: doc.near,
        far: doc.far,
        ortho_height: doc.ortho_height,
    }
}

/// Metadata record; falls back to the importing application's identity
/// when the document does not say who wrote it
pub fn convert_metadata(doc: &MetadataDoc, options: &ImportOptions) -> WorkspaceMetadata {
    let application = match &doc.application {
        Some(app) => ApplicationInfo {
            name: app.name.clone(),
            version: app.version.clone(),
        },
        None => options.application.clone(),
    };

    WorkspaceMetadata {
        version: doc.version.to_string(),
        created: doc.created.clone(),
        modified: doc.modified.clone(),
        author: doc.author.clone(),
        description: doc.description.clone(),
        application,
    }
}

/// Build an id-keyed map; a repeated id replaces the earlier entry and is
/// reported as a warning
pub fn collect_by_id<D, T, F>(
    docs: &[D],
    kind: &'static str,
    convert: F,
    warnings: &mut Vec<ImportWarning>,
) -> HashMap<String, T>
where
    F: Fn(&D) -> (String, T),
{
    let mut map = HashMap::with_capacity(docs.len());
    for doc in docs {
        let (id, value) = convert(doc);
        if map.contains_key(&id) {
            warn!("duplicate {} id '{}' in scene document", kind, id);
            warnings.push(ImportWarning::DuplicateId {
                kind,
                id: id.clone(),
            });
        }
        map.insert(id, value);
    }
    map
}

/// Convert every entity of a validated document
pub fn convert_document(
    doc: &SceneDocument,
    options: &ImportOptions,
    warnings: &mut Vec<ImportWarning>,
) -> ImportedWorkspaceData {
    let meshes = doc.meshes.iter().map(convert_mesh).collect();
    let materials = doc.materials.iter().map(convert_material).collect();
    let objects = doc.objects.iter().map(convert_object).collect();
    let viewport = convert_viewport(&doc.viewport);

    let lights = doc.lights.as_ref().map(|lights| {
        collect_by_id(
            lights,
            "light",
            |l| (l.id.clone(), convert_light(l)),
            warnings,
        )
    });
    let cameras = doc.cameras.as_ref().map(|cameras| {
        collect_by_id(
            cameras,
            "camera",
            |c| (c.id.clone(), convert_camera(c)),
            warnings,
        )
    });

    ImportedWorkspaceData {
        meshes,
        materials,
        objects,
        root_objects: doc.root_objects.to_vec(),
        viewport,
        selected_object_id: doc.selected_object_id.clone(),
        lights,
        cameras,
        metadata: convert_metadata(&doc.metadata, options),
    }
}
