//! Error types for the Tessera scene model

use thiserror::Error;

/// Main error type for scene model operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("{owner} references unknown {kind} '{id}'")]
    DanglingReference {
        owner: String,
        kind: &'static str,
        id: String,
    },

    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },
}
