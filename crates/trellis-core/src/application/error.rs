//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not blueprint
//! shape. Structural errors are `DomainError` from `crate::domain`.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Why a single materialization step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FsErrorReason {
    PermissionDenied,
    /// A path component exists with the wrong type (file where a directory
    /// is needed, or the other way round).
    NameCollision,
    /// The host filesystem rejected the name.
    InvalidPath,
    StorageFull,
    Other,
}

impl FsErrorReason {
    /// Map an I/O error kind onto a reason code.
    pub fn from_io_kind(kind: io::ErrorKind) -> Self {
        use io::ErrorKind as K;
        match kind {
            K::PermissionDenied | K::ReadOnlyFilesystem => Self::PermissionDenied,
            K::AlreadyExists | K::NotADirectory | K::IsADirectory => Self::NameCollision,
            K::InvalidInput => Self::InvalidPath,
            K::StorageFull => Self::StorageFull,
            _ => Self::Other,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission denied",
            Self::NameCollision => "name collision",
            Self::InvalidPath => "invalid path",
            Self::StorageFull => "storage full",
            Self::Other => "i/o error",
        }
    }
}

impl fmt::Display for FsErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed directory or file creation, tagged with the offending path.
///
/// Recoverable per entry: the runner records it and moves on.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("{reason}: {detail}")]
pub struct FileSystemError {
    pub path: PathBuf,
    pub reason: FsErrorReason,
    pub detail: String,
}

impl FileSystemError {
    pub fn new(path: impl Into<PathBuf>, reason: FsErrorReason, detail: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason,
            detail: detail.into(),
        }
    }

    pub fn from_io(path: impl Into<PathBuf>, err: &io::Error) -> Self {
        Self::new(path, FsErrorReason::from_io_kind(err.kind()), err.to_string())
    }
}

pub type FsResult<T> = Result<T, FileSystemError>;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A filesystem failure outside the per-entry loop (e.g. counting files).
    #[error("Filesystem error at {}: {source}", .source.path.display())]
    Filesystem {
        #[from]
        source: FileSystemError,
    },

    #[error("Blueprint '{name}' not found")]
    BlueprintNotFound { name: String },

    /// A manifest could not be read or parsed.
    #[error("Failed to load blueprint from {origin}: {reason}")]
    BlueprintLoad { origin: String, reason: String },

    /// Store access failed (lock poisoned).
    #[error("Blueprint store error")]
    StoreLockError,

    /// Entries failed during materialization.
    #[error("{failed} of {total} entries failed")]
    MaterializationFailed { failed: usize, total: usize },

    /// The run was interrupted before every entry was attempted.
    #[error("Run cancelled after {completed} of {total} entries")]
    Cancelled { completed: usize, total: usize },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Filesystem { source } => vec![
                format!("Failed to access: {}", source.path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::BlueprintNotFound { name } => vec![
                format!("No built-in blueprint or manifest file named '{name}'"),
                "Try: trellis list to see available blueprints".into(),
                "Or pass a path to a .toml manifest".into(),
            ],
            Self::BlueprintLoad { .. } => vec![
                "Check the manifest against the blueprint format".into(),
                "Run: trellis check <manifest> to validate it".into(),
            ],
            Self::StoreLockError => vec![
                "The blueprint store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::MaterializationFailed { .. } => vec![
                "Fix the listed paths and run again; existing files are kept".into(),
            ],
            Self::Cancelled { .. } => vec![
                "Run again to finish; entries already created are kept".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::BlueprintNotFound { .. } => ErrorCategory::NotFound,
            Self::BlueprintLoad { .. } => ErrorCategory::Validation,
            Self::Filesystem { .. } | Self::MaterializationFailed { .. } => {
                ErrorCategory::Filesystem
            }
            Self::StoreLockError => ErrorCategory::Internal,
            Self::Cancelled { .. } => ErrorCategory::Cancelled,
        }
    }
}
