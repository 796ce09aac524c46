//! Scene and mesh I/O for Tessera workspaces
//!
//! This crate reads and writes `.t3d` scene archives (a zip container holding
//! a `scene.json` document) and imports Wavefront OBJ meshes into editable
//! meshes.
//!
//! The import pipeline runs in stages:
//!
//! 1. [`archive`] opens the container and reads the scene entry
//! 2. [`parser`] validates the JSON document and checks its version
//! 3. [`convert`] rebuilds the workspace domain model
//! 4. [`animation`] decodes animation data into an
//!    [`AnimationSnapshot`](tessera_core::AnimationSnapshot)
//!
//! [`import_scene`] runs them all over an in-memory archive.

pub mod animation;
pub mod archive;
pub mod convert;
pub mod document;
pub mod error;
pub mod export;
pub mod import;
pub mod obj;
pub mod parser;
pub mod version;

#[cfg(test)]
mod tests;

pub use archive::{MemoryArchive, SceneArchive, ZipSceneArchive};
pub use error::*;
pub use export::{export_scene, export_scene_with, scene_document};
pub use import::{
    import_from_archive, import_scene, import_scene_into, import_scene_with, ImportOptions,
    SceneImport, APPLICATION_NAME, SCENE_ENTRY,
};
pub use obj::{import_obj, ObjReader};
pub use version::{Version, CURRENT_VERSION};

use chrono::{SecondsFormat, Utc};
use std::fs;
use std::path::Path;
use tessera_core::{
    AnimationState, ImportedWorkspaceData, Material, Mesh, SceneObject, Viewport, WorkspaceMetadata,
};

/// File extension of scene archives
pub const T3D_EXTENSION: &str = "t3d";

/// Trait for reading scenes from files
pub trait SceneReader: Send + Sync {
    /// Read a scene from the given path
    fn read_scene(&self, path: &Path) -> Result<SceneImport, IoError>;

    /// Get the format name this reader handles
    fn format_name(&self) -> &'static str;
}

/// Trait for writing scenes to files
pub trait SceneWriter: Send + Sync {
    /// Write a workspace and optional animation state to the given path
    fn write_scene(
        &self,
        workspace: &ImportedWorkspaceData,
        animation: Option<&AnimationState>,
        path: &Path,
    ) -> Result<(), IoError>;

    /// Get the format name this writer handles
    fn format_name(&self) -> &'static str;
}

/// Trait for reading meshes from files
pub trait MeshReader: Send + Sync {
    /// Read a mesh from the given path
    fn read_mesh(&self, path: &Path) -> Result<Mesh, IoError>;

    /// Get the format name this reader handles
    fn format_name(&self) -> &'static str;
}

/// Reads `.t3d` scene archives
#[derive(Debug, Clone, Default)]
pub struct T3dReader {
    pub options: ImportOptions,
}

impl T3dReader {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }
}

impl SceneReader for T3dReader {
    fn read_scene(&self, path: &Path) -> Result<SceneImport, IoError> {
        let bytes = fs::read(path)?;
        Ok(import_scene_with(&bytes, &self.options)?)
    }

    fn format_name(&self) -> &'static str {
        T3D_EXTENSION
    }
}

/// Writes `.t3d` scene archives
#[derive(Debug, Clone, Default)]
pub struct T3dWriter {
    pub options: ImportOptions,
}

impl T3dWriter {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }
}

impl SceneWriter for T3dWriter {
    fn write_scene(
        &self,
        workspace: &ImportedWorkspaceData,
        animation: Option<&AnimationState>,
        path: &Path,
    ) -> Result<(), IoError> {
        let bytes = export_scene_with(workspace, animation, &self.options)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    fn format_name(&self) -> &'static str {
        T3D_EXTENSION
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}

fn require_file(path: &Path) -> Result<(), IoError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(IoError::FileNotFound {
            path: path.display().to_string(),
        })
    }
}

/// Auto-detect format and read a scene
pub fn read_scene<P: AsRef<Path>>(path: P) -> Result<SceneImport, IoError> {
    let path = path.as_ref();
    require_file(path)?;
    match extension_of(path).as_str() {
        T3D_EXTENSION => T3dReader::default().read_scene(path),
        other => Err(IoError::UnsupportedFormat {
            format: other.to_string(),
        }),
    }
}

/// Auto-detect format and write a scene
pub fn write_scene<P: AsRef<Path>>(
    workspace: &ImportedWorkspaceData,
    animation: Option<&AnimationState>,
    path: P,
) -> Result<(), IoError> {
    let path = path.as_ref();
    match extension_of(path).as_str() {
        T3D_EXTENSION => T3dWriter::default().write_scene(workspace, animation, path),
        other => Err(IoError::UnsupportedFormat {
            format: other.to_string(),
        }),
    }
}

/// Auto-detect format and read a mesh
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<Mesh, IoError> {
    let path = path.as_ref();
    require_file(path)?;
    match extension_of(path).as_str() {
        "obj" => ObjReader.read_mesh(path),
        other => Err(IoError::UnsupportedFormat {
            format: other.to_string(),
        }),
    }
}

/// Wrap a single mesh in a workspace with one root object and a default material
///
/// Faces without a material are pointed at the default material. Metadata is
/// stamped with the format version and application from `options`, and
/// `created`/`modified` are set to the current UTC time in RFC 3339.
pub fn workspace_from_mesh(mut mesh: Mesh, options: &ImportOptions) -> ImportedWorkspaceData {
    let material = Material::new("material-default", "Default");
    for face in mesh.faces.iter_mut().filter(|f| f.material_id.is_empty()) {
        face.material_id = material.id.clone();
    }

    let object_id = format!("object-{}", mesh.id);
    let object = SceneObject::with_mesh(&object_id, &mesh.name, &mesh.id);
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    ImportedWorkspaceData {
        meshes: vec![mesh],
        materials: vec![material],
        objects: vec![object],
        root_objects: vec![object_id],
        viewport: Viewport::default(),
        selected_object_id: None,
        lights: None,
        cameras: None,
        metadata: WorkspaceMetadata {
            version: options.current_version.to_string(),
            created: now.clone(),
            modified: now,
            author: None,
            description: None,
            application: options.application.clone(),
        },
    }
}
