//! Run outcomes and their human-readable summary.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::application::{error::FileSystemError, ports::Ensured};
use crate::domain::{PathSpec, canonical_display};

/// Result of materializing one spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Created,
    AlreadyExisted,
    Failed,
}

impl From<Ensured> for EntryStatus {
    fn from(ensured: Ensured) -> Self {
        match ensured {
            Ensured::Created => Self::Created,
            Ensured::AlreadyExisted => Self::AlreadyExisted,
        }
    }
}

/// Per-entry record kept by the runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryOutcome {
    pub path: PathBuf,
    /// `group:stem` of the contributing spec.
    pub origin: String,
    pub status: EntryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FileSystemError>,
}

impl EntryOutcome {
    pub fn ensured(spec: &PathSpec, ensured: Ensured) -> Self {
        Self {
            path: spec.path().to_path_buf(),
            origin: spec.origin(),
            status: ensured.into(),
            error: None,
        }
    }

    pub fn failed(spec: &PathSpec, error: FileSystemError) -> Self {
        Self {
            path: spec.path().to_path_buf(),
            origin: spec.origin(),
            status: EntryStatus::Failed,
            error: Some(error),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status == EntryStatus::Failed
    }
}

/// Aggregated result of one run. Outcomes are in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub total: usize,
    pub created: usize,
    pub already_existed: usize,
    pub failed: usize,
    /// Entries never attempted because the run was cancelled.
    pub skipped: usize,
    pub cancelled: bool,
    pub outcomes: Vec<EntryOutcome>,
}

impl RunReport {
    /// Tally `outcomes`; anything short of `total` counts as skipped.
    pub fn from_outcomes(outcomes: Vec<EntryOutcome>, total: usize) -> Self {
        let count = |status| outcomes.iter().filter(|o| o.status == status).count();
        let created = count(EntryStatus::Created);
        let already_existed = count(EntryStatus::AlreadyExisted);
        let failed = count(EntryStatus::Failed);
        let skipped = total.saturating_sub(outcomes.len());

        Self {
            total,
            created,
            already_existed,
            failed,
            skipped,
            cancelled: skipped > 0,
            outcomes,
        }
    }

    /// Files confirmed present: created plus already existing.
    pub fn present(&self) -> usize {
        self.created + self.already_existed
    }

    /// `(path, error)` for every failed entry, in registry order.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &FileSystemError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.error.as_ref().map(|e| (o.path.as_path(), e)))
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && !self.cancelled
    }
}

/// Overall status of a run as the user sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    PartialFailure,
    Cancelled,
}

impl RunStatus {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

/// Text produced by [`ReportEmitter::summarize`].
///
/// `headline` goes to stdout; `failures` (already numbered) go to stderr.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub headline: String,
    pub failures: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: RunStatus,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.headline)?;
        if !self.failures.is_empty() {
            write!(f, "\n{} failed:", self.failures.len())?;
            for line in &self.failures {
                write!(f, "\n{line}")?;
            }
        }
        if let Some(note) = &self.note {
            write!(f, "\n{note}")?;
        }
        Ok(())
    }
}

pub struct ReportEmitter;

impl ReportEmitter {
    /// Summarize `report` for an output rooted at `base`.
    ///
    /// # Example
    /// ```rust
    /// use std::path::Path;
    /// use trellis_core::application::{ReportEmitter, RunReport};
    ///
    /// let summary = ReportEmitter::summarize(&RunReport::default(), Path::new("/out"));
    /// assert_eq!(summary.headline, "0 files present under /out");
    /// ```
    pub fn summarize(report: &RunReport, base: &Path) -> Summary {
        let headline = format!(
            "{} files present under {}",
            report.present(),
            canonical_display(base)
        );

        let failures = report
            .failures()
            .enumerate()
            .map(|(i, (path, err))| format!("  {}. {}: {err}", i + 1, canonical_display(path)))
            .collect();

        let note = report.cancelled.then(|| {
            format!(
                "cancelled: {} of {} entries not attempted; run again to finish",
                report.skipped, report.total
            )
        });

        let status = if report.cancelled {
            RunStatus::Cancelled
        } else if report.failed > 0 {
            RunStatus::PartialFailure
        } else {
            RunStatus::Success
        };

        Summary {
            headline,
            failures,
            note,
            status,
        }
    }
}
