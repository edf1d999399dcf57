use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Canonical identifier for a module in the bundle graph.
///
/// Always an absolute path with `.` and `..` collapsed, so two specifiers that
/// name the same file from different directories compare equal. The same
/// string is used as the key of the factory table in the emitted bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(PathBuf);

impl ModuleId {
    /// Create a module identifier from an absolute filesystem path.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ModuleIdError> {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            return Err(ModuleIdError::EmptyPath);
        }

        if !path.is_absolute() {
            return Err(ModuleIdError::NotAbsolute(path.to_path_buf()));
        }

        Ok(Self(path.clean()))
    }

    /// Returns the underlying path representation.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Consume the identifier and return the owned path.
    pub fn into_path(self) -> PathBuf {
        self.0
    }

    /// Directory that relative specifiers inside this module resolve against.
    pub fn dir(&self) -> &Path {
        self.0.parent().unwrap_or(&self.0)
    }

    /// Borrow the identifier as a string for logging/serialization.
    pub fn path_string(&self) -> Cow<'_, str> {
        self.0.to_string_lossy()
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_string())
    }
}

impl Serialize for ModuleId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.path_string())
    }
}

impl<'de> Deserialize<'de> for ModuleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        ModuleId::new(value).map_err(serde::de::Error::custom)
    }
}

/// Error type for `ModuleId` construction failures.
#[derive(Debug, Error)]
pub enum ModuleIdError {
    /// The provided path was empty.
    #[error("module id path is empty")]
    EmptyPath,

    /// Module ids are absolute; relative paths must be resolved first.
    #[error("module id path is not absolute: {}", .0.display())]
    NotAbsolute(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_dot_segments() {
        let id = ModuleId::new("/p/src/./lib/../util.js").unwrap();
        assert_eq!(id.as_path(), Path::new("/p/src/util.js"));
        assert_eq!(id.dir(), Path::new("/p/src"));
    }

    #[test]
    fn rejects_empty_path() {
        let err = ModuleId::new(PathBuf::new()).unwrap_err();
        assert!(matches!(err, ModuleIdError::EmptyPath));
    }

    #[test]
    fn rejects_relative_path() {
        let err = ModuleId::new("src/index.js").unwrap_err();
        assert!(matches!(err, ModuleIdError::NotAbsolute(_)));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = ModuleId::new("/p/src/index.js").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"/p/src/index.js\"");

        let restored: ModuleId = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, id);
    }
}
