//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use pyseed_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{PyseedError, PyseedResult},
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to a service and inspect
/// the other afterwards. Paths whose parent is empty count as top-level and
/// can always be created.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    /// Writes to this path fail, for exercising error paths.
    fail_writes_to: Option<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-create a directory (and its ancestors).
    pub fn with_directory(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let mut current = PathBuf::new();
            for component in path.as_ref().components() {
                current.push(component);
                inner.directories.insert(current.clone());
            }
        }
        self
    }

    /// Make every write to `path` fail.
    pub fn failing_writes_to(self, path: impl Into<PathBuf>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.fail_writes_to = Some(path.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// All files, sorted by path.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// All directories, sorted by path.
    pub fn list_directories(&self) -> Vec<PathBuf> {
        self.read()
            .map(|inner| inner.directories.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> PyseedResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_poisoned())
    }

    fn write(&self) -> PyseedResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_poisoned())
    }
}

impl MemoryFilesystemInner {
    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            None => true,
            Some(parent) if parent.as_os_str().is_empty() => true,
            Some(parent) => self.directories.contains(parent),
        }
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir(&self, path: &Path) -> PyseedResult<()> {
        let mut inner = self.write()?;

        if inner.directories.contains(path) || inner.files.contains_key(path) {
            return Err(ApplicationError::ProjectExists {
                path: path.to_path_buf(),
            }
            .into());
        }
        if !inner.parent_exists(path) {
            return Err(missing_parent(path));
        }

        inner.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> PyseedResult<()> {
        let mut inner = self.write()?;

        if inner.fail_writes_to.as_deref() == Some(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Permission denied (simulated)".into(),
            }
            .into());
        }
        if !inner.parent_exists(path) {
            return Err(missing_parent(path));
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> PyseedResult<()> {
        let mut inner = self.write()?;

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }
}

fn lock_poisoned() -> PyseedError {
    PyseedError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

fn missing_parent(path: &Path) -> PyseedError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "Parent directory does not exist".into(),
    }
    .into()
}
