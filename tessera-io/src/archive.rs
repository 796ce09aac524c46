//! Access to the entries of a packaged scene archive
//!
//! A `.t3d` file is a zip container. The import pipeline only needs to ask
//! whether an entry exists and to read it as UTF-8 text, which is what
//! [`SceneArchive`] exposes. [`ZipSceneArchive`] reads real archives and
//! [`MemoryArchive`] serves entries already held in memory.

use crate::error::{ExportError, ImportError};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Read access to named archive entries
pub trait SceneArchive {
    /// Check whether an entry with this exact name exists
    fn has_entry(&self, name: &str) -> bool;

    /// Read a whole entry as UTF-8 text
    fn read_text(&mut self, name: &str) -> Result<String, ImportError>;

    /// Names of all entries, sorted
    fn entry_names(&self) -> Vec<String>;
}

/// A zip-backed scene archive
pub struct ZipSceneArchive<R: Read + Seek> {
    inner: ZipArchive<R>,
}

impl<R: Read + Seek> ZipSceneArchive<R> {
    /// Open a zip container, failing with a format error if it is not one
    pub fn new(reader: R) -> Result<Self, ImportError> {
        let inner = ZipArchive::new(reader).map_err(|e| ImportError::Format {
            message: e.to_string(),
        })?;
        Ok(Self { inner })
    }

    /// Number of entries in the archive
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }
}

impl<'a> ZipSceneArchive<Cursor<&'a [u8]>> {
    /// Open an archive held in memory
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, ImportError> {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> SceneArchive for ZipSceneArchive<R> {
    fn has_entry(&self, name: &str) -> bool {
        self.inner.file_names().any(|n| n == name)
    }

    fn read_text(&mut self, name: &str) -> Result<String, ImportError> {
        let mut file = self.inner.by_name(name).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => ImportError::MissingEntry {
                entry: name.to_string(),
            },
            other => ImportError::Format {
                message: format!("cannot open entry '{}': {}", name, other),
            },
        })?;

        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes).map_err(|e| ImportError::Format {
            message: format!("cannot read entry '{}': {}", name, e),
        })?;

        String::from_utf8(bytes).map_err(|_| ImportError::Format {
            message: format!("entry '{}' is not valid UTF-8", name),
        })
    }

    fn entry_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.file_names().map(str::to_string).collect();
        names.sort();
        names
    }
}

/// An archive whose entries are already in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry
    pub fn insert(&mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.entries.insert(name.into(), contents.into());
    }

    /// Builder-style [`MemoryArchive::insert`]
    pub fn with_entry(mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(name, contents);
        self
    }
}

impl SceneArchive for MemoryArchive {
    fn has_entry(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn read_text(&mut self, name: &str) -> Result<String, ImportError> {
        let bytes = self
            .entries
            .get(name)
            .ok_or_else(|| ImportError::MissingEntry {
                entry: name.to_string(),
            })?;
        String::from_utf8(bytes.clone()).map_err(|_| ImportError::Format {
            message: format!("entry '{}' is not valid UTF-8", name),
        })
    }

    fn entry_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Pack named entries into a deflate-compressed zip container
pub fn write_archive<'a, I>(entries: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, contents) in entries {
        writer.start_file(name, options)?;
        writer.write_all(contents)?;
    }

    Ok(writer.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_round_trip() {
        let bytes = write_archive([
            ("scene.json", b"{}".as_slice()),
            ("textures/a.png", b"\x89PNG".as_slice()),
        ])
        .unwrap();

        let mut archive = ZipSceneArchive::from_bytes(&bytes).unwrap();
        assert_eq!(archive.len(), 2);
        assert!(archive.has_entry("scene.json"));
        assert!(!archive.has_entry("scene.JSON"));
        assert_eq!(archive.read_text("scene.json").unwrap(), "{}");
        assert_eq!(
            archive.entry_names(),
            vec!["scene.json".to_string(), "textures/a.png".to_string()]
        );
    }

    #[test]
    fn test_not_a_zip() {
        let result = ZipSceneArchive::from_bytes(b"definitely not a zip file");
        assert!(matches!(result, Err(ImportError::Format { .. })));
    }

    #[test]
    fn test_missing_entry() {
        let bytes = write_archive([("other.json", b"{}".as_slice())]).unwrap();
        let mut archive = ZipSceneArchive::from_bytes(&bytes).unwrap();
        assert!(matches!(
            archive.read_text("scene.json"),
            Err(ImportError::MissingEntry { .. })
        ));
    }

    #[test]
    fn test_memory_archive_rejects_invalid_utf8() {
        let mut archive = MemoryArchive::new().with_entry("scene.json", vec![0xff, 0xfe]);
        assert!(archive.has_entry("scene.json"));
        assert!(matches!(
            archive.read_text("scene.json"),
            Err(ImportError::Format { .. })
        ));
    }
}
