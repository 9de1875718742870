//! Unified error handling for Trellis Core.
//!
//! Wraps domain and application errors behind one type with a display
//! category and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Trellis Core operations.
#[derive(Debug, Error, Clone)]
pub enum TrellisError {
    /// Blueprint shape or path validation (nothing was written).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Orchestration or I/O failures.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl TrellisError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Conflict => ErrorCategory::Conflict,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// `true` when the error was raised before any filesystem mutation.
    pub fn is_pre_mutation(&self) -> bool {
        matches!(
            self,
            Self::Domain(_)
                | Self::Application(
                    ApplicationError::BlueprintNotFound { .. }
                        | ApplicationError::BlueprintLoad { .. }
                )
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Filesystem,
    Cancelled,
    Internal,
}

/// Convenient result type alias.
pub type TrellisResult<T> = Result<T, TrellisError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PathViolation;

    #[test]
    fn domain_errors_map_categories() {
        let conflict: TrellisError = DomainError::DuplicateGroup("core".into()).into();
        assert_eq!(conflict.category(), ErrorCategory::Conflict);

        let invalid: TrellisError = DomainError::InvalidStem {
            stem: "..".into(),
            violation: PathViolation::Traversal,
        }
        .into();
        assert_eq!(invalid.category(), ErrorCategory::Validation);
        assert!(invalid.is_pre_mutation());
    }

    #[test]
    fn application_errors_map_categories() {
        let cases = [
            (
                ApplicationError::BlueprintNotFound { name: "x".into() },
                ErrorCategory::NotFound,
            ),
            (
                ApplicationError::BlueprintLoad {
                    origin: "x.toml".into(),
                    reason: "bad".into(),
                },
                ErrorCategory::Validation,
            ),
            (
                ApplicationError::MaterializationFailed { failed: 1, total: 2 },
                ErrorCategory::Filesystem,
            ),
            (
                ApplicationError::Cancelled {
                    completed: 1,
                    total: 2,
                },
                ErrorCategory::Cancelled,
            ),
            (ApplicationError::StoreLockError, ErrorCategory::Internal),
        ];
        for (err, category) in cases {
            let err: TrellisError = err.into();
            assert_eq!(err.category(), category, "{err}");
            assert!(!err.suggestions().is_empty());
        }
    }

    #[test]
    fn transparent_display() {
        let err: TrellisError = ApplicationError::BlueprintNotFound {
            name: "nope".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Blueprint 'nope' not found");
        assert!(err.is_pre_mutation());
    }
}
