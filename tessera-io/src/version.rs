//! Scene format versioning

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version of the scene format this application reads and writes
pub const CURRENT_VERSION: Version = Version::new(1, 0, 0);

/// A `major.minor.patch` format version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Two versions are compatible when their major versions match.
    /// Minor and patch never affect compatibility.
    pub fn is_compatible_with(&self, other: &Version) -> bool {
        self.major == other.major
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Version::new(2, 10, 3).to_string(), "2.10.3");
        assert_eq!(CURRENT_VERSION.to_string(), "1.0.0");
    }

    #[test]
    fn test_compatibility_ignores_minor_and_patch() {
        assert!(Version::new(1, 7, 2).is_compatible_with(&CURRENT_VERSION));
        assert!(!Version::new(2, 0, 0).is_compatible_with(&CURRENT_VERSION));
        assert!(!Version::new(0, 9, 9).is_compatible_with(&CURRENT_VERSION));
    }

    #[test]
    fn test_document_shape() {
        let v: Version = serde_json::from_str(r#"{"major":1,"minor":2,"patch":3}"#).unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }
}
