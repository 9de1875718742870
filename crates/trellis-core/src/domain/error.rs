// ============================================================================
// domain/error.rs - STRUCTURAL ERRORS (detected before any I/O)
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant is raised while the blueprint is being validated or the
/// registry is being built, so none of them can leave a half-built tree
/// behind.
///
/// All errors are:
/// - Cloneable (reported more than once: log + stderr)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Path validation
    // ========================================================================
    #[error("Invalid stem '{stem}': {violation}")]
    InvalidStem { stem: String, violation: PathViolation },

    #[error("Invalid extension '{extension}': {reason}")]
    InvalidExtension { extension: String, reason: String },

    #[error("Target root '{root}' needs an absolute base directory, got '{base}'")]
    RelativeBase { root: String, base: String },

    #[error("Resolved path '{path}' escapes target root '{root}'")]
    OutOfBounds { root: String, path: String },

    // ========================================================================
    // Registry conflicts
    // ========================================================================
    #[error("Duplicate path '{path}': contributed by '{first}' and '{second}'")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    #[error("Path '{path}' is a file for '{file_origin}' but a directory for '{dir_origin}'")]
    PathConflict {
        path: String,
        file_origin: String,
        dir_origin: String,
    },

    #[error("Duplicate target root id '{0}'")]
    DuplicateRoot(String),

    #[error("Duplicate category group '{0}'")]
    DuplicateGroup(String),

    // ========================================================================
    // Blueprint structure
    // ========================================================================
    #[error("Group '{group}' references unknown target root '{root}'")]
    UnknownRoot { group: String, root: String },

    #[error("Group '{group}' has no stems")]
    EmptyGroup { group: String },

    #[error("Invalid blueprint: {0}")]
    InvalidBlueprint(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Unknown {what} '{value}'")]
    UnknownValue { what: &'static str, value: String },
}

/// Why a stem (or root path) was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PathViolation {
    #[error("path is empty")]
    Empty,

    #[error("contains an empty segment")]
    EmptySegment,

    #[error("contains a parent-directory segment '..'")]
    Traversal,

    #[error("contains a current-directory segment '.'")]
    CurrentDir,

    #[error("contains forbidden character {0:?}")]
    ForbiddenChar(char),
}

impl DomainError {
    /// `true` for errors that reject an individual path rather than the
    /// shape of the blueprint.
    pub fn is_path_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidStem { .. }
                | Self::InvalidExtension { .. }
                | Self::RelativeBase { .. }
                | Self::OutOfBounds { .. }
        )
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidStem { violation, .. } => match violation {
                PathViolation::Traversal => vec![
                    "Stems are resolved inside their target root and may not climb out of it".into(),
                    "Declare another [[roots]] entry for files that live elsewhere".into(),
                ],
                PathViolation::ForbiddenChar(_) => vec![
                    "Use only characters that are valid on every filesystem".into(),
                    "Forbidden: < > : \" | ? * and control characters".into(),
                ],
                _ => vec![
                    "Write stems as slash-separated segments, e.g. core/di/AppModule".into(),
                    "Leave the extension off; it comes from the group".into(),
                ],
            },
            Self::InvalidExtension { .. } => vec![
                "Extensions are a single token such as \"kt\" or \"xml\"".into(),
                "Use kind = \"marker\" for files whose full name is spelled out in the stem".into(),
            ],
            Self::DuplicatePath { first, second, .. } => vec![
                format!("Remove one of '{first}' or '{second}'"),
                "Every stem must resolve to a distinct file".into(),
            ],
            Self::PathConflict { file_origin, .. } => vec![
                format!("Rename '{file_origin}' or move the nested entries"),
            ],
            Self::UnknownRoot { root, .. } => vec![
                format!("Declare a [[roots]] entry with id = \"{root}\""),
                "Or point the group at an existing root".into(),
            ],
            Self::EmptyGroup { group } => vec![
                format!("Add at least one stem to group '{group}' or remove it"),
            ],
            _ => vec!["See the blueprint format documentation".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicatePath { .. }
            | Self::PathConflict { .. }
            | Self::DuplicateRoot(_)
            | Self::DuplicateGroup(_) => ErrorCategory::Conflict,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
}
