//! Build error taxonomy.
//!
//! Every variant is fatal to the current build. Graph errors carry the
//! [`ModuleId`] they concern so callers can report the failing module.

use std::path::PathBuf;

use thiserror::Error;

use crate::module_id::ModuleId;

/// Result type alias for build operations.
pub type Result<T, E = BuildError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum BuildError {
    /// An import specifier that cannot name any module (empty, NUL byte).
    #[error("invalid import specifier {specifier:?}: {reason}")]
    InvalidSpecifier { specifier: String, reason: String },

    /// Module source failed to parse.
    #[error("syntax error in {id}: {message}")]
    SyntaxError { id: ModuleId, message: String },

    /// A resolved module does not exist on disk.
    #[error("module not found: {id}")]
    ModuleNotFound { id: ModuleId },

    /// Import chain deeper than the configured limit.
    #[error("import chain too deep at {id}: depth {depth} exceeds maximum of {max}")]
    GraphTooDeep {
        id: ModuleId,
        depth: usize,
        max: usize,
    },

    /// A loader transform rejected a module.
    #[error("loader failed for {id}: {message}")]
    LoaderFailed { id: ModuleId, message: String },

    /// Reading a module failed for a reason other than absence.
    #[error("failed to read {id}: {message}")]
    Io { id: ModuleId, message: String },

    /// Creating the output directory or writing the bundle failed.
    #[error("failed to write bundle to {}: {message}", .path.display())]
    OutputWriteError { path: PathBuf, message: String },
}

impl BuildError {
    /// The module this error concerns, if it is a graph error.
    pub fn module_id(&self) -> Option<&ModuleId> {
        match self {
            BuildError::SyntaxError { id, .. }
            | BuildError::ModuleNotFound { id }
            | BuildError::GraphTooDeep { id, .. }
            | BuildError::LoaderFailed { id, .. }
            | BuildError::Io { id, .. } => Some(id),
            BuildError::InvalidSpecifier { .. } | BuildError::OutputWriteError { .. } => None,
        }
    }
}
