//! Create-if-absent materialization of a single spec.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::application::{
    error::FsResult,
    ports::{Ensured, Filesystem},
    services::report::EntryOutcome,
};
use crate::domain::PathSpec;

/// Ensures directories and empty files exist without touching anything
/// that is already there.
///
/// Directories ensured once are remembered, so workers sharing an ancestor
/// only ask the filesystem for it once per run.
pub struct Materializer<'a> {
    filesystem: &'a dyn Filesystem,
    ensured: Mutex<HashSet<PathBuf>>,
}

impl<'a> Materializer<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self {
            filesystem,
            ensured: Mutex::new(HashSet::new()),
        }
    }

    /// Create `path` and its missing parents. No-op for known directories.
    pub fn ensure_directory(&self, path: &Path) -> FsResult<()> {
        if self.ensured().contains(path) {
            return Ok(());
        }

        self.filesystem.create_dir_all(path)?;

        let mut ensured = self.ensured();
        for dir in path.ancestors() {
            if !ensured.insert(dir.to_path_buf()) {
                break;
            }
        }
        Ok(())
    }

    /// Create an empty file at `path` unless something is already there.
    pub fn ensure_file(&self, path: &Path) -> FsResult<Ensured> {
        self.filesystem.create_file(path)
    }

    /// Parent directory first, then the file. Never fails: errors become a
    /// `Failed` outcome.
    pub fn materialize(&self, spec: &PathSpec) -> EntryOutcome {
        let result = spec
            .parent()
            .map_or(Ok(()), |parent| self.ensure_directory(parent))
            .and_then(|()| self.ensure_file(spec.path()));

        match result {
            Ok(ensured) => {
                debug!(path = %spec.path().display(), ?ensured, "entry ensured");
                EntryOutcome::ensured(spec, ensured)
            }
            Err(err) => {
                warn!(
                    path = %err.path.display(),
                    reason = %err.reason,
                    origin = %spec.origin(),
                    "entry failed"
                );
                EntryOutcome::failed(spec, err)
            }
        }
    }

    /// Number of distinct directories confirmed so far (ancestors included).
    pub fn ensured_count(&self) -> usize {
        self.ensured().len()
    }

    fn ensured(&self) -> MutexGuard<'_, HashSet<PathBuf>> {
        // The set only caches work; a poisoned guard is still usable.
        self.ensured.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
