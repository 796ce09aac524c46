//! The T3D scene import pipeline
//!
//! `archive bytes -> scene document -> workspace + animation snapshot`.
//! Each call owns its decoded document and result; nothing is shared between
//! concurrent imports. Animation data is returned as a value rather than
//! written into a global container, and best-effort failures are returned as
//! warnings next to the result.

use crate::animation::project_animation;
use crate::archive::{SceneArchive, ZipSceneArchive};
use crate::convert::convert_document;
use crate::error::{AnimationProjectionError, ImportError, ImportWarning};
use crate::parser::parse_scene_document;
use crate::version::{Version, CURRENT_VERSION};
use log::{debug, info, warn};
use std::sync::Mutex;
use tessera_core::{AnimationSnapshot, AnimationState, ApplicationInfo, ImportedWorkspaceData};

/// Name of the archive entry holding the scene document
pub const SCENE_ENTRY: &str = "scene.json";

/// Name this application writes into scene metadata
pub const APPLICATION_NAME: &str = "Tessera";

/// Configuration for scene import
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Archive entry holding the scene document
    pub entry_name: String,
    /// Format version documents are checked against
    pub current_version: Version,
    /// Identity recorded when a document does not name its application
    pub application: ApplicationInfo,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            entry_name: SCENE_ENTRY.to_string(),
            current_version: CURRENT_VERSION,
            application: ApplicationInfo {
                name: APPLICATION_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

impl ImportOptions {
    /// Read the scene document from a different entry
    pub fn with_entry_name<S: Into<String>>(mut self, name: S) -> Self {
        self.entry_name = name.into();
        self
    }

    /// Check documents against a different format version
    pub fn with_current_version(mut self, version: Version) -> Self {
        self.current_version = version;
        self
    }

    /// Record a different application identity
    pub fn with_application<S: Into<String>>(mut self, name: S, version: S) -> Self {
        self.application = ApplicationInfo {
            name: name.into(),
            version: version.into(),
        };
        self
    }
}

/// Result of a successful import
#[derive(Debug)]
pub struct SceneImport {
    pub workspace: ImportedWorkspaceData,
    /// Animation data to apply to the runtime container
    pub animation: AnimationSnapshot,
    /// Non-fatal problems; the workspace is complete regardless
    pub warnings: Vec<ImportWarning>,
}

impl SceneImport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Import a `.t3d` archive with default options
pub fn import_scene(bytes: &[u8]) -> Result<SceneImport, ImportError> {
    import_scene_with(bytes, &ImportOptions::default())
}

/// Import a `.t3d` archive
pub fn import_scene_with(bytes: &[u8], options: &ImportOptions) -> Result<SceneImport, ImportError> {
    let mut archive = ZipSceneArchive::from_bytes(bytes)?;
    import_from_archive(&mut archive, options)
}

/// Import from any archive implementation
pub fn import_from_archive<A>(archive: &mut A, options: &ImportOptions) -> Result<SceneImport, ImportError>
where
    A: SceneArchive + ?Sized,
{
    let document = parse_scene_document(archive, options)?;

    let mut warnings = Vec::new();
    let workspace = convert_document(&document, options, &mut warnings);
    debug!(
        "converted {} meshes, {} materials, {} objects",
        workspace.meshes.len(),
        workspace.materials.len(),
        workspace.objects.len()
    );

    let animation = match project_animation(document.animations.as_ref(), document.ui.as_ref()) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("animation data skipped: {}", e);
            warnings.push(ImportWarning::AnimationProjection(e));
            AnimationSnapshot::empty()
        }
    };

    info!(
        "imported scene version {} ({} objects, {} clips, {} warnings)",
        workspace.metadata.version,
        workspace.objects.len(),
        animation.clips.len(),
        warnings.len()
    );

    Ok(SceneImport {
        workspace,
        animation,
        warnings,
    })
}

/// Import an archive and apply its animation data to a shared container
///
/// The reset and the population happen under one lock, so two imports
/// racing on the same container cannot interleave: the last one to take the
/// lock wins completely. A poisoned lock is reported as a warning and does
/// not fail the import.
pub fn import_scene_into(
    bytes: &[u8],
    options: &ImportOptions,
    state: &Mutex<AnimationState>,
) -> Result<SceneImport, ImportError> {
    let mut import = import_scene_with(bytes, options)?;

    match state.lock() {
        Ok(mut guard) => import.animation.apply_to(&mut guard),
        Err(_) => {
            warn!("animation state lock is poisoned; animation data not applied");
            import.warnings.push(ImportWarning::AnimationProjection(
                AnimationProjectionError::ContainerUnavailable,
            ));
        }
    }

    Ok(import)
}
