//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `trellis-adapters` crate provides implementations.

use std::path::Path;

use serde::Serialize;

use crate::application::error::FsResult;
use crate::application::services::report::{EntryOutcome, RunReport};
use crate::domain::Blueprint;
use crate::error::TrellisResult;

/// What `create_file` found at the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ensured {
    /// Nothing was there; an empty file now is.
    Created,
    /// Something (file or directory) was already there and was left alone.
    AlreadyExisted,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `trellis_adapters::filesystem::LocalFilesystem` (production)
/// - `trellis_adapters::filesystem::MemoryFilesystem` (tests and scenario suites)
///
/// Implementations must be safe to call from several threads at once;
/// the runner may materialize entries in parallel.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all missing parents. Existing directories are
    /// not an error.
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Create an empty file only if nothing exists at `path`.
    ///
    /// Must never truncate, overwrite, or otherwise modify an existing entry.
    fn create_file(&self, path: &Path) -> FsResult<Ensured>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Number of regular files under `root`, recursively. A missing root
    /// counts as zero.
    fn count_files(&self, root: &Path) -> FsResult<usize>;
}

/// Port for blueprint storage and retrieval.
///
/// Implemented by:
/// - `trellis_adapters::blueprint_store::InMemoryStore` (built-in and loaded blueprints)
pub trait BlueprintStore: Send + Sync {
    /// Get a blueprint by name.
    fn get(&self, name: &str) -> TrellisResult<Blueprint>;

    /// List all available blueprints, sorted by name.
    fn list(&self) -> TrellisResult<Vec<Blueprint>>;

    /// Insert or replace a blueprint.
    fn insert(&self, blueprint: Blueprint) -> TrellisResult<()>;
}

/// Progress callbacks for a scaffold run.
///
/// `on_entry` may be called from worker threads, in completion order.
pub trait RunObserver: Send + Sync {
    fn on_start(&self, _total: usize) {}

    fn on_entry(&self, _outcome: &EntryOutcome) {}

    fn on_finish(&self, _report: &RunReport) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
