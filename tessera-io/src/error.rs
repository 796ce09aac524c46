//! Error types for scene and mesh I/O

use crate::version::Version;
use thiserror::Error;

/// Fatal errors raised while importing a T3D scene
///
/// No partial workspace is produced when any of these is returned.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Invalid scene archive: {message}")]
    Format { message: String },

    #[error("Scene archive is missing required entry '{entry}'")]
    MissingEntry { entry: String },

    #[error("Entry '{entry}' is not valid JSON: {source}")]
    MalformedJson {
        entry: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Scene document is missing required fields: {}", .fields.join(", "))]
    MissingField { fields: Vec<String> },

    #[error("Incompatible scene version {found}: this application reads version {current} (major {})", .current.major)]
    VersionMismatch { found: Version, current: Version },

    /// Anything else. The message is fixed; inspect the source for details.
    #[error("Failed to import scene")]
    ImportFailed {
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ImportError {
    pub(crate) fn failed<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ImportError::ImportFailed {
            source: Some(Box::new(source)),
        }
    }
}

/// Failure while projecting animation data; never fatal to an import
#[derive(Error, Debug)]
pub enum AnimationProjectionError {
    #[error("Malformed animation payload: {0}")]
    Payload(#[source] serde_json::Error),

    #[error("Malformed timeline UI payload: {0}")]
    Ui(#[source] serde_json::Error),

    #[error("Animation state container is unavailable")]
    ContainerUnavailable,
}

/// Non-fatal conditions observed during an import
#[derive(Error, Debug)]
pub enum ImportWarning {
    #[error("Animation data was not restored: {0}")]
    AnimationProjection(#[from] AnimationProjectionError),

    #[error("Duplicate {kind} id '{id}'; the later entry replaced the earlier one")]
    DuplicateId { kind: &'static str, id: String },
}

/// Errors raised while writing a T3D scene
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to encode scene document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write scene archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while importing a Wavefront OBJ mesh
#[derive(Error, Debug)]
pub enum ObjImportError {
    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Invalid face {index}: {reason}")]
    InvalidFace { index: usize, reason: String },
}

/// Errors from the path-based convenience functions
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Obj(#[from] ObjImportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
