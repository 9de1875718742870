//! Scaffold Service - main application orchestrator.
//!
//! Coordinates the whole workflow:
//! 1. Validate the blueprint and build the registry (fail fast, no I/O)
//! 2. Materialize every spec through the runner (per-entry failures)
//! 3. Summarize the run
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::Filesystem,
        services::{
            report::{ReportEmitter, RunReport, Summary},
            scaffold_runner::{RunOptions, ScaffoldRunner},
        },
    },
    domain::{Blueprint, FileKind, RegistryBuilder, ValidatedSpecSet},
    error::TrellisResult,
};

/// Whether a planned file is already on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannedState {
    New,
    Exists,
}

/// One line of a dry-run plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedEntry {
    pub path: PathBuf,
    pub origin: String,
    pub kind: FileKind,
    pub state: PlannedState,
}

/// Everything a caller needs after a run.
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldOutcome {
    pub output_dir: PathBuf,
    pub report: RunReport,
    pub summary: Summary,
    /// Regular files found under the output directory afterwards, if the
    /// count succeeded. Includes files the blueprint does not mention.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_on_disk: Option<usize>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given filesystem adapter.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use trellis_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(Box::new(filesystem));
    /// let outcome = service.scaffold(&blueprint, "/abs/out".as_ref(), &Default::default())?;
    /// println!("{}", outcome.summary.headline);
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Validate and resolve without touching the filesystem.
    pub fn prepare(&self, blueprint: &Blueprint, output_dir: &Path) -> TrellisResult<ValidatedSpecSet> {
        Ok(RegistryBuilder::from_blueprint(blueprint, output_dir)?)
    }

    /// Materialize `blueprint` under `output_dir`.
    ///
    /// Structural errors return `Err` before anything is created. Per-entry
    /// filesystem failures do not: they are in the report and make the
    /// summary status non-successful.
    #[instrument(
        skip_all,
        fields(blueprint = %blueprint.name, output_dir = %output_dir.display())
    )]
    pub fn scaffold(
        &self,
        blueprint: &Blueprint,
        output_dir: &Path,
        options: &RunOptions<'_>,
    ) -> TrellisResult<ScaffoldOutcome> {
        let specs = self.prepare(blueprint, output_dir)?;
        info!(
            specs = specs.len(),
            groups = specs.group_count(),
            roots = specs.roots().len(),
            "registry validated"
        );

        let report = ScaffoldRunner::new(self.filesystem.as_ref()).run_with(&specs, options);
        let summary = ReportEmitter::summarize(&report, output_dir);

        let files_on_disk = match self.filesystem.count_files(output_dir) {
            Ok(count) => {
                info!(count, "files on disk under output directory");
                Some(count)
            }
            Err(e) => {
                warn!(error = %e, "could not count files under output directory");
                None
            }
        };

        Ok(ScaffoldOutcome {
            output_dir: output_dir.to_path_buf(),
            report,
            summary,
            files_on_disk,
        })
    }

    /// Resolved paths and whether each already exists. Mutates nothing.
    pub fn plan(&self, blueprint: &Blueprint, output_dir: &Path) -> TrellisResult<Vec<PlannedEntry>> {
        let specs = self.prepare(blueprint, output_dir)?;
        Ok(specs
            .iter()
            .map(|spec| PlannedEntry {
                path: spec.path().to_path_buf(),
                origin: spec.origin(),
                kind: spec.kind(),
                state: if self.filesystem.exists(spec.path()) {
                    PlannedState::Exists
                } else {
                    PlannedState::New
                },
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::always;

    use super::*;
    use crate::application::ports::{Ensured, MockFilesystem};
    use crate::domain::{CategoryGroup, DomainError, PlatformTag, RootDef};
    use crate::error::TrellisError;

    fn blueprint(stems: &[&str]) -> Blueprint {
        Blueprint::builder("demo")
            .root(RootDef::new("shared", "shared", PlatformTag::SharedSource).unwrap())
            .group(
                CategoryGroup::builder("core")
                    .root("shared")
                    .kind(FileKind::Source)
                    .extension("src")
                    .stems(stems.iter().copied())
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn invalid_blueprint_touches_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().never();
        fs.expect_create_file().never();
        fs.expect_count_files().never();

        let service = ScaffoldService::new(Box::new(fs));
        let err = service
            .scaffold(&blueprint(&["a/b", "a/b"]), Path::new("/out"), &RunOptions::default())
            .unwrap_err();

        assert!(matches!(err, TrellisError::Domain(DomainError::DuplicatePath { .. })));
    }

    #[test]
    fn scaffold_reports_and_counts() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_file().returning(|_| Ok(Ensured::Created));
        fs.expect_count_files()
            .with(always())
            .times(1)
            .returning(|_| Ok(2));

        let service = ScaffoldService::new(Box::new(fs));
        let outcome = service
            .scaffold(
                &blueprint(&["core/App", "core/di/AppModule"]),
                Path::new("/out"),
                &RunOptions::default(),
            )
            .unwrap();

        assert_eq!(outcome.report.created, 2);
        assert_eq!(outcome.files_on_disk, Some(2));
        assert_eq!(outcome.summary.headline, "2 files present under /out");
        assert!(outcome.summary.status.is_success());
    }

    #[test]
    fn plan_marks_existing_paths() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|path| path.ends_with("App.src"));
        fs.expect_create_file().never();

        let service = ScaffoldService::new(Box::new(fs));
        let plan = service
            .plan(&blueprint(&["core/App", "core/Other"]), Path::new("/out"))
            .unwrap();

        assert_eq!(plan[0].state, PlannedState::Exists);
        assert_eq!(plan[1].state, PlannedState::New);
        assert_eq!(plan[1].origin, "core:core/Other");
    }
}
