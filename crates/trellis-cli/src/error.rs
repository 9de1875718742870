//! Error handling for the Trellis CLI.
//!
//! Every failure the binary reports goes through [`CliError`], which maps
//! to an exit code, renders suggestions and logs itself.

use std::error::Error;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use trellis_core::application::ApplicationError;
use trellis_core::error::{ErrorCategory as CoreCategory, TrellisError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// `trellis check` found one or more problems; each was already printed.
    #[error("Blueprint '{name}' has {count} problem(s)")]
    CheckFailed { name: String, count: usize },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// An error propagated from `trellis-core` or the adapters.
    #[error(transparent)]
    Core(#[from] TrellisError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render JSON output")]
    Json(#[from] serde_json::Error),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<ApplicationError> for CliError {
    fn from(err: ApplicationError) -> Self {
        CliError::Core(err.into())
    }
}

impl CliError {
    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["Use --help for usage information".into()],
            Self::CheckFailed { .. } => vec![
                "Fix the problems listed above and run: trellis check again".into(),
            ],
            Self::ConfigError { .. } => vec![
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Environment overrides use TRELLIS_<SECTION>__<KEY>".into(),
                "Run: trellis init --force to write a fresh default".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],
            Self::Json(_) => vec!["This appears to be a bug in Trellis".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::CheckFailed { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Cancelled => ErrorCategory::Cancelled,
                CoreCategory::Filesystem | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } | Self::Json(_) => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | Internal / filesystem | 1 |
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Cancelled     | 130  |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Cancelled => 130,
        }
    }

    /// The error block printed on stderr: message, causes when `verbose`,
    /// then suggestions.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: Style| {
            if color {
                text.style(style).to_string()
            } else {
                text.to_owned()
            }
        };

        let label = if color { "\u{2717} Error:" } else { "Error:" };
        let mut out = format!(
            "\n{} {}\n",
            paint(label, Style::new().red().bold()),
            paint(&self.to_string(), Style::new().red())
        );

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!(
                    "  {} {}\n",
                    paint("Caused by:", Style::new().dimmed()),
                    err
                ));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!("\n{}\n", paint("Suggestions:", Style::new().yellow().bold())));
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str(&format!(
                "\n{}\n",
                paint("Use -v / --verbose for more details.", Style::new().dimmed())
            ));
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Cancelled => tracing::warn!("Cancelled: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid arguments or an invalid blueprint.
    UserError,
    NotFound,
    Configuration,
    /// Interrupted by the user.
    Cancelled,
    /// Filesystem failures and bugs.
    Internal,
}

/// Attach a context message to foreign errors at the call-site.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use trellis_core::domain::DomainError;

    fn core(err: impl Into<TrellisError>) -> CliError {
        CliError::Core(err.into())
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn validation_errors_exit_2() {
        let err = core(DomainError::DuplicateGroup("core".into()));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_blueprint_exits_3() {
        let err = core(ApplicationError::BlueprintNotFound {
            name: "nope".into(),
        });
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn configuration_exits_4() {
        let err = CliError::ConfigError {
            message: "x".into(),
            source: None,
        };
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn entry_failures_exit_1() {
        let err = core(ApplicationError::MaterializationFailed {
            failed: 1,
            total: 3,
        });
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn cancellation_exits_130() {
        let err: CliError = ApplicationError::Cancelled {
            completed: 2,
            total: 5,
        }
        .into();
        assert_eq!(err.exit_code(), 130);
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn render_lists_core_suggestions() {
        let err = core(ApplicationError::BlueprintNotFound {
            name: "nope".into(),
        });
        let s = err.render(false, false);
        assert!(s.contains("Error: Blueprint 'nope' not found"));
        assert!(s.contains("trellis list"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn render_verbose_shows_cause() {
        let err = CliError::IoError {
            message: "writing config".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let s = err.render(true, false);
        assert!(s.contains("Caused by: denied"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { ref message, .. }) if message == "reading config"));
    }
}
