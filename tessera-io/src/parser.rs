//! Locating, decoding and validating `scene.json`

use crate::archive::SceneArchive;
use crate::document::{SceneDocument, REQUIRED_FIELDS};
use crate::error::ImportError;
use crate::import::ImportOptions;
use crate::version::Version;
use log::{debug, error};
use serde::Deserialize;
use serde_json::Value;

/// Read and validate the scene document from an archive
///
/// Checks run in a fixed order: entry present, JSON syntax, required
/// top-level fields, version compatibility, and finally the typed shape of
/// the whole document.
pub fn parse_scene_document<A>(
    archive: &mut A,
    options: &ImportOptions,
) -> Result<SceneDocument, ImportError>
where
    A: SceneArchive + ?Sized,
{
    let entry = options.entry_name.as_str();
    if !archive.has_entry(entry) {
        return Err(ImportError::MissingEntry {
            entry: entry.to_string(),
        });
    }

    let text = archive.read_text(entry)?;
    debug!("read {} bytes from '{}'", text.len(), entry);

    let value: Value = serde_json::from_str(&text).map_err(|source| ImportError::MalformedJson {
        entry: entry.to_string(),
        source,
    })?;

    check_required_fields(&value)?;

    let found = document_version(&value)?;
    if !found.is_compatible_with(&options.current_version) {
        return Err(ImportError::VersionMismatch {
            found,
            current: options.current_version,
        });
    }
    debug!("scene format version {} accepted", found);

    serde_json::from_value(value).map_err(|e| {
        error!("scene document has an unexpected shape: {}", e);
        ImportError::failed(e)
    })
}

/// Fail with every required top-level field that is absent
fn check_required_fields(value: &Value) -> Result<(), ImportError> {
    let object = value.as_object().ok_or_else(|| ImportError::MissingField {
        fields: REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect(),
    })?;

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ImportError::MissingField { fields: missing })
    }
}

fn document_version(value: &Value) -> Result<Version, ImportError> {
    let raw = value
        .get("metadata")
        .and_then(|metadata| metadata.get("version"))
        .filter(|version| !version.is_null())
        .ok_or_else(|| ImportError::MissingField {
            fields: vec!["metadata.version".to_string()],
        })?;

    Version::deserialize(raw).map_err(|e| {
        error!("scene version is not a major/minor/patch record: {}", e);
        ImportError::failed(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemoryArchive;
    use crate::tests::fixtures;

    fn parse(json: &str) -> Result<SceneDocument, ImportError> {
        let mut archive = MemoryArchive::new().with_entry("scene.json", json);
        parse_scene_document(&mut archive, &ImportOptions::default())
    }

    #[test]
    fn test_parses_minimal_document() {
        let doc = parse(&fixtures::minimal_scene_json()).unwrap();
        assert_eq!(doc.meshes.len(), 1);
        assert_eq!(doc.root_objects, vec!["obj1".to_string()]);
        assert!(doc.lights.is_none());
        assert!(doc.animations.is_none());
    }

    #[test]
    fn test_missing_entry() {
        let mut archive = MemoryArchive::new().with_entry("other.json", "{}");
        let err = parse_scene_document(&mut archive, &ImportOptions::default()).unwrap_err();
        assert!(matches!(err, ImportError::MissingEntry { ref entry } if entry == "scene.json"));
    }

    #[test]
    fn test_malformed_json_names_entry() {
        let err = parse(r#"{"metadata": {"#).unwrap_err();
        assert!(matches!(err, ImportError::MalformedJson { .. }));
        assert!(err.to_string().contains("scene.json"));
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let err = parse(r#"{"metadata": {}, "meshes": []}"#).unwrap_err();
        match err {
            ImportError::MissingField { fields } => {
                assert_eq!(fields, vec!["materials", "objects", "rootObjects", "viewport"]);
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_document() {
        assert!(matches!(parse("[1, 2, 3]"), Err(ImportError::MissingField { .. })));
    }

    #[test]
    fn test_missing_version() {
        let mut value: Value = serde_json::from_str(&fixtures::minimal_scene_json()).unwrap();
        value["metadata"].as_object_mut().unwrap().remove("version");
        let err = parse(&value.to_string()).unwrap_err();
        assert!(matches!(err, ImportError::MissingField { ref fields } if fields == &["metadata.version"]));
    }

    #[test]
    fn test_newer_minor_is_accepted() {
        let json = fixtures::scene_json_with_version(1, 4, 2);
        assert!(parse(&json).is_ok());
    }

    #[test]
    fn test_version_mismatch() {
        let err = parse(&fixtures::scene_json_with_version(2, 0, 0)).unwrap_err();
        assert!(matches!(err, ImportError::VersionMismatch { .. }));
        let message = err.to_string();
        assert!(message.contains("2.0.0"));
        assert!(message.contains("1.0.0"));
    }

    #[test]
    fn test_bad_entity_shape_is_import_failed() {
        let mut value: Value = serde_json::from_str(&fixtures::minimal_scene_json()).unwrap();
        value["meshes"][0]["vertices"] = Value::String("nope".to_string());
        let err = parse(&value.to_string()).unwrap_err();
        assert!(matches!(err, ImportError::ImportFailed { .. }));
        assert_eq!(err.to_string(), "Failed to import scene");
    }

    #[test]
    fn test_custom_entry_name() {
        let mut archive = MemoryArchive::new().with_entry("project.json", fixtures::minimal_scene_json());
        let options = ImportOptions::default().with_entry_name("project.json");
        assert!(parse_scene_document(&mut archive, &options).is_ok());
    }
}
