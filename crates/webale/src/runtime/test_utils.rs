//! In-memory runtime for tests.
//!
//! Lets tests describe a project as a handful of `(path, source)` pairs with
//! paths such as `/p/src/index.js` that never exist on the real disk.

use async_trait::async_trait;
use parking_lot::Mutex;
use path_clean::PathClean;
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use super::{Runtime, RuntimeError, RuntimeResult};

/// Filesystem held entirely in memory.
///
/// ```rust
/// use webale::runtime::test_utils::MemoryRuntime;
///
/// let runtime = MemoryRuntime::new("/p")
///     .with_file("/p/src/index.js", "require('./util')")
///     .with_file("/p/src/util.js", "module.exports = 1");
/// assert!(runtime.contains("/p/src/util.js"));
/// ```
#[derive(Debug)]
pub struct MemoryRuntime {
    cwd: PathBuf,
    files: Mutex<FxHashMap<PathBuf, Vec<u8>>>,
    dirs: Mutex<FxHashSet<PathBuf>>,
    read_only: AtomicBool,
}

impl MemoryRuntime {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            files: Mutex::new(FxHashMap::default()),
            dirs: Mutex::new(FxHashSet::default()),
            read_only: AtomicBool::new(false),
        }
    }

    /// Add a file, registering its ancestors as directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a file.
    pub fn insert(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        let path = path.as_ref().clean();
        self.register_ancestors(&path);
        self.files.lock().insert(path, content.as_ref().to_vec());
    }

    /// Make every mutating operation fail, as on a read-only volume.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.files.lock().contains_key(&path.as_ref().clean())
    }

    /// Contents of a file as UTF-8, if present.
    pub fn read_string(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .get(&path.as_ref().clean())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Every file path currently stored, sorted.
    pub fn file_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.files.lock().keys().cloned().collect();
        paths.sort();
        paths
    }

    fn register_ancestors(&self, path: &Path) {
        let mut dirs = self.dirs.lock();
        for ancestor in path.ancestors().skip(1) {
            dirs.insert(ancestor.to_path_buf());
        }
    }

    fn check_writable(&self, path: &Path) -> RuntimeResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(RuntimeError::Io(format!(
                "Read-only filesystem: {}",
                path.display()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Runtime for MemoryRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        self.files
            .lock()
            .get(&path.clean())
            .cloned()
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }

    async fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()> {
        self.check_writable(path)?;
        let path = path.clean();
        let parent_exists = path
            .parent()
            .is_none_or(|parent| self.dirs.lock().contains(parent));
        if !parent_exists {
            return Err(RuntimeError::Io(format!(
                "Parent directory missing for {}",
                path.display()
            )));
        }
        self.files.lock().insert(path, content.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let path = path.clean();
        self.files.lock().contains_key(&path) || self.dirs.lock().contains(&path)
    }

    async fn create_dir(&self, path: &Path, _recursive: bool) -> RuntimeResult<()> {
        self.check_writable(path)?;
        let path = path.clean();
        self.register_ancestors(&path);
        self.dirs.lock().insert(path);
        Ok(())
    }

    async fn rename(&self, from: &Path, to: &Path) -> RuntimeResult<()> {
        self.check_writable(to)?;
        let mut files = self.files.lock();
        let content = files
            .remove(&from.clean())
            .ok_or_else(|| RuntimeError::FileNotFound(from.to_path_buf()))?;
        files.insert(to.clean(), content);
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> RuntimeResult<()> {
        self.files
            .lock()
            .remove(&path.clean())
            .map(|_| ())
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(self.cwd.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_inserted_file() {
        let runtime = MemoryRuntime::new("/p").with_file("/p/src/../src/a.js", "1");

        let content = runtime.read_file(Path::new("/p/src/a.js")).await.unwrap();
        assert_eq!(content, b"1");
        assert!(runtime.exists(Path::new("/p/src")));
    }

    #[tokio::test]
    async fn test_write_requires_parent_dir() {
        let runtime = MemoryRuntime::new("/p");

        let err = runtime
            .write_file(Path::new("/p/dist/out.js"), b"x")
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Io(_)));

        runtime.create_dir(Path::new("/p/dist"), true).await.unwrap();
        runtime
            .write_file(Path::new("/p/dist/out.js"), b"x")
            .await
            .unwrap();
        assert_eq!(runtime.read_string("/p/dist/out.js").unwrap(), "x");
    }

    #[tokio::test]
    async fn test_read_only_rejects_writes() {
        let runtime = MemoryRuntime::new("/p");
        runtime.set_read_only(true);

        assert!(runtime.create_dir(Path::new("/p/dist"), true).await.is_err());
    }
}
