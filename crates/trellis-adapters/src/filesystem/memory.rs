//! In-memory filesystem adapter used by the scenario suites.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use trellis_core::application::{
    error::{FileSystemError, FsErrorReason, FsResult},
    ports::{Ensured, Filesystem},
};

/// In-memory filesystem.
///
/// Cloning shares the same tree, so a test can keep a handle while the
/// service owns another. Every created directory or file bumps a mutation
/// counter.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
    read_only: BTreeSet<PathBuf>,
    mutations: usize,
}

impl MemoryFilesystemInner {
    fn is_read_only(&self, path: &Path) -> bool {
        self.read_only.iter().any(|ro| path.starts_with(ro))
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a file with content, creating its parents. Seeding is not
    /// counted as a mutation.
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        {
            let mut inner = self.write();
            let path = path.as_ref();
            for dir in path.ancestors().skip(1) {
                inner.directories.insert(dir.to_path_buf());
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Make `path` and everything under it refuse new entries.
    pub fn with_read_only(self, path: impl AsRef<Path>) -> Self {
        self.write().read_only.insert(path.as_ref().to_path_buf());
        self
    }

    pub fn read_file(&self, path: &Path) -> Option<Vec<u8>> {
        self.read().files.get(path).cloned()
    }

    pub fn has_directory(&self, path: &Path) -> bool {
        self.read().directories.contains(path)
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read().files.keys().cloned().collect()
    }

    /// Directories and files created through the [`Filesystem`] port.
    pub fn mutations(&self) -> usize {
        self.read().mutations
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        let mut inner = self.write();

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if inner.files.contains_key(&current) {
                return Err(FileSystemError::new(
                    current,
                    FsErrorReason::NameCollision,
                    "a file exists where a directory is needed",
                ));
            }
            if !inner.directories.contains(&current) {
                if inner.is_read_only(&current) {
                    return Err(FileSystemError::new(
                        current,
                        FsErrorReason::PermissionDenied,
                        "read-only",
                    ));
                }
                inner.directories.insert(current.clone());
                inner.mutations += 1;
            }
        }

        Ok(())
    }

    fn create_file(&self, path: &Path) -> FsResult<Ensured> {
        let mut inner = self.write();

        if inner.files.contains_key(path) || inner.directories.contains(path) {
            return Ok(Ensured::AlreadyExisted);
        }
        if inner.is_read_only(path) {
            return Err(FileSystemError::new(
                path,
                FsErrorReason::PermissionDenied,
                "read-only",
            ));
        }

        match path.parent() {
            Some(parent) if inner.files.contains_key(parent) => {
                return Err(FileSystemError::new(
                    path,
                    FsErrorReason::NameCollision,
                    "parent is a file",
                ));
            }
            Some(parent) if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) => {
                return Err(FileSystemError::new(
                    path,
                    FsErrorReason::Other,
                    "parent directory does not exist",
                ));
            }
            _ => {}
        }

        inner.files.insert(path.to_path_buf(), Vec::new());
        inner.mutations += 1;
        Ok(Ensured::Created)
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.read();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn count_files(&self, root: &Path) -> FsResult<usize> {
        Ok(self.read().files.keys().filter(|p| p.starts_with(root)).count())
    }
}
