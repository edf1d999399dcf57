//! Per-extension source transforms applied before parsing.
//!
//! The bundler core only understands JavaScript. A [`Loader`] registered for
//! an extension turns other file types into JavaScript source before the
//! scanner sees them; files with no registered loader pass through unchanged.
//!
//! ```rust
//! use std::sync::Arc;
//! use webale::loader::{Loader, LoaderError, LoaderRegistry};
//! use webale::ModuleId;
//!
//! #[derive(Debug)]
//! struct TextLoader;
//!
//! impl Loader for TextLoader {
//!     fn transform(&self, _id: &ModuleId, source: String) -> Result<String, LoaderError> {
//!         let literal = serde_json::to_string(&source).map_err(|e| LoaderError(e.to_string()))?;
//!         Ok(format!("module.exports = {literal};"))
//!     }
//! }
//!
//! let loaders = LoaderRegistry::new().register("txt", Arc::new(TextLoader));
//! assert!(loaders.get("txt").is_some());
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::{BuildError, Result};
use crate::module_id::ModuleId;

/// Failure reported by a loader.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct LoaderError(pub String);

/// Source transform for one kind of file.
pub trait Loader: Send + Sync + std::fmt::Debug {
    fn transform(&self, id: &ModuleId, source: String) -> Result<String, LoaderError>;
}

/// Loaders keyed by file extension (without the leading dot).
#[derive(Debug, Clone, Default)]
pub struct LoaderRegistry {
    loaders: FxHashMap<String, Arc<dyn Loader>>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `loader` for `extension`, replacing any previous one.
    pub fn register(mut self, extension: impl Into<String>, loader: Arc<dyn Loader>) -> Self {
        let extension = extension.into();
        let extension = extension.trim_start_matches('.').to_string();
        self.loaders.insert(extension, loader);
        self
    }

    pub fn get(&self, extension: &str) -> Option<&Arc<dyn Loader>> {
        self.loaders.get(extension)
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Run the loader registered for `id`'s extension, if any.
    pub fn apply(&self, id: &ModuleId, source: String) -> Result<String> {
        let extension = id
            .as_path()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        match self.loaders.get(extension) {
            Some(loader) => {
                tracing::debug!(module = %id, extension, "applying loader");
                loader
                    .transform(id, source)
                    .map_err(|e| BuildError::LoaderFailed {
                        id: id.clone(),
                        message: e.to_string(),
                    })
            }
            None => Ok(source),
        }
    }
}
