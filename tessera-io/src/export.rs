//! Writing workspaces as `.t3d` scene archives

use crate::animation::{animations_payload, ui_payload};
use crate::archive::write_archive;
use crate::document::{
    ApplicationDoc, CameraDoc, EdgeDoc, FaceDoc, LightDoc, MaterialDoc, MeshDoc, MetadataDoc,
    ObjectDoc, SceneDocument, TransformDoc, Vec2Doc, Vec3Doc, VertexDoc, ViewportCameraDoc,
    ViewportDoc,
};
use crate::error::ExportError;
use crate::import::ImportOptions;
use log::debug;
use std::collections::HashMap;
use tessera_core::{
    AnimationState, Camera, ImportedWorkspaceData, Light, Material, Mesh, SceneObject, Transform,
    Vector2d, Vector3d, Viewport,
};

fn vec3_doc(v: &Vector3d) -> Vec3Doc {
    Vec3Doc {
        x: v.x,
        y: v.y,
        z: v.z,
    }
}

fn vec2_doc(v: &Vector2d) -> Vec2Doc {
    Vec2Doc { x: v.x, y: v.y }
}

fn transform_doc(t: &Transform) -> TransformDoc {
    TransformDoc {
        position: vec3_doc(&t.position),
        rotation: vec3_doc(&t.rotation),
        scale: vec3_doc(&t.scale),
    }
}

fn mesh_doc(mesh: &Mesh) -> MeshDoc {
    MeshDoc {
        id: mesh.id.clone(),
        name: mesh.name.clone(),
        vertices: mesh
            .vertices
            .iter()
            .map(|v| VertexDoc {
                id: v.id.clone(),
                position: vec3_doc(&v.position),
                normal: vec3_doc(&v.normal),
                uv: vec2_doc(&v.uv),
                selected: v.selected,
            })
            .collect(),
        edges: mesh
            .edges
            .iter()
            .map(|e| EdgeDoc {
                id: e.id.clone(),
                vertex_ids: e.vertex_ids.clone(),
                face_ids: e.face_ids.clone(),
                selected: e.selected,
            })
            .collect(),
        faces: mesh
            .faces
            .iter()
            .map(|f| FaceDoc {
                id: f.id.clone(),
                vertex_ids: f.vertex_ids.clone(),
                normal: vec3_doc(&f.normal),
                material_id: f.material_id.clone(),
                selected: f.selected,
            })
            .collect(),
        transform: transform_doc(&mesh.transform),
        visible: mesh.visible,
        locked: mesh.locked,
    }
}

fn material_doc(material: &Material) -> MaterialDoc {
    MaterialDoc {
        id: material.id.clone(),
        name: material.name.clone(),
        color: vec3_doc(&material.color),
        roughness: material.roughness,
        metalness: material.metalness,
        emissive: vec3_doc(&material.emissive),
        emissive_intensity: Some(material.emissive_intensity),
    }
}

fn object_doc(object: &SceneObject) -> ObjectDoc {
    ObjectDoc {
        id: object.id.clone(),
        name: object.name.clone(),
        object_type: object.object_type,
        parent_id: object.parent_id.clone(),
        children: object.children_ids.clone(),
        transform: transform_doc(&object.transform),
        visible: object.visible,
        locked: object.locked,
        render: Some(object.render),
        mesh_id: object.mesh_id.clone(),
        light_id: object.light_id.clone(),
        camera_id: object.camera_id.clone(),
    }
}

fn viewport_doc(viewport: &Viewport) -> ViewportDoc {
    let camera = &viewport.camera;
    ViewportDoc {
        camera: ViewportCameraDoc {
            position: vec3_doc(&camera.position),
            target: vec3_doc(&camera.target),
            up: vec3_doc(&camera.up),
            fov: camera.fov,
            near: camera.near,
            far: camera.far,
        },
        shading_mode: viewport.shading_mode,
        show_grid: viewport.show_grid,
        show_axes: viewport.show_axes,
        grid_size: viewport.grid_size,
        background_color: vec3_doc(&viewport.background_color),
        active_camera_object_id: viewport.active_camera_object_id.clone(),
    }
}

fn light_doc(light: &Light) -> LightDoc {
    LightDoc {
        id: light.id.clone(),
        name: light.name.clone(),
        light_type: light.light_type,
        color: vec3_doc(&light.color),
        intensity: light.intensity,
        distance: light.distance,
        decay: light.decay,
        angle: light.angle,
        penumbra: light.penumbra,
        cast_shadow: Some(light.cast_shadow),
    }
}

fn camera_doc(camera: &Camera) -> CameraDoc {
    CameraDoc {
        id: camera.id.clone(),
        name: camera.name.clone(),
        camera_type: camera.camera_type,
        fov: camera.fov,
        zoom: Some(camera.zoom),
        near: camera.near,
        far: camera.far,
        ortho_height: camera.ortho_height,
    }
}

/// Map values sorted by id so exports are byte-for-byte reproducible
fn sorted_by_id<T, D>(map: &HashMap<String, T>, to_doc: impl Fn(&T) -> D) -> Vec<D> {
    let mut ids: Vec<&String> = map.keys().collect();
    ids.sort();
    ids.into_iter().map(|id| to_doc(&map[id])).collect()
}

/// Build the scene document for a workspace
///
/// The document is stamped with the current format version and the
/// application identity from `options`; timestamps, author and description
/// come from the workspace metadata.
pub fn scene_document(
    workspace: &ImportedWorkspaceData,
    animation: Option<&AnimationState>,
    options: &ImportOptions,
) -> Result<SceneDocument, ExportError> {
    let metadata = MetadataDoc {
        version: options.current_version,
        created: workspace.metadata.created.clone(),
        modified: workspace.metadata.modified.clone(),
        author: workspace.metadata.author.clone(),
        description: workspace.metadata.description.clone(),
        application: Some(ApplicationDoc {
            name: options.application.name.clone(),
            version: options.application.version.clone(),
        }),
    };

    let (animations, ui) = match animation {
        Some(state) => (
            Some(serde_json::to_value(animations_payload(state))?),
            Some(serde_json::to_value(ui_payload(state))?),
        ),
        None => (None, None),
    };

    Ok(SceneDocument {
        metadata,
        meshes: workspace.meshes.iter().map(mesh_doc).collect(),
        materials: workspace.materials.iter().map(material_doc).collect(),
        objects: workspace.objects.iter().map(object_doc).collect(),
        root_objects: workspace.root_objects.clone(),
        viewport: viewport_doc(&workspace.viewport),
        selected_object_id: workspace.selected_object_id.clone(),
        lights: workspace.lights.as_ref().map(|l| sorted_by_id(l, light_doc)),
        cameras: workspace.cameras.as_ref().map(|c| sorted_by_id(c, camera_doc)),
        animations,
        ui,
    })
}

/// Write a workspace as `.t3d` archive bytes with default options
pub fn export_scene(
    workspace: &ImportedWorkspaceData,
    animation: Option<&AnimationState>,
) -> Result<Vec<u8>, ExportError> {
    export_scene_with(workspace, animation, &ImportOptions::default())
}

/// Write a workspace as `.t3d` archive bytes
pub fn export_scene_with(
    workspace: &ImportedWorkspaceData,
    animation: Option<&AnimationState>,
    options: &ImportOptions,
) -> Result<Vec<u8>, ExportError> {
    let document = scene_document(workspace, animation, options)?;
    let json = serde_json::to_vec_pretty(&document)?;
    debug!("encoded scene document ({} bytes)", json.len());

    write_archive([(options.entry_name.as_str(), json.as_slice())])
}
