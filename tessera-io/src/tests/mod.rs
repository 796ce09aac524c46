//! Test modules for tessera-io
//!
//! Shared fixtures live in [`fixtures`]; the pipeline-level tests exercise
//! whole imports through the archive layer.
