//! `trellis check`: build the registry without touching the filesystem.

use serde::Serialize;
use tracing::{info, instrument};

use trellis_adapters::LocalFilesystem;
use trellis_core::{
    application::ScaffoldService,
    domain::{DomainValidator, canonical_display},
};

use crate::{
    cli::CheckArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct CheckReport {
    blueprint: String,
    output_dir: String,
    files: usize,
    groups: usize,
    roots: usize,
}

#[instrument(skip_all)]
pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let blueprint = super::load_blueprint(args.blueprint.as_deref(), &config)?;

    let issues = DomainValidator::collect_issues(&blueprint);
    if !issues.is_empty() {
        for issue in &issues {
            output.error(&issue.to_string())?;
        }
        return Err(CliError::CheckFailed {
            name: blueprint.name,
            count: issues.len(),
        });
    }

    let output_dir = super::output_dir(None, &config, &blueprint)?;
    let specs = ScaffoldService::new(Box::new(LocalFilesystem::new()))
        .prepare(&blueprint, &output_dir)?;
    info!(files = specs.len(), groups = specs.group_count(), "registry built");

    let report = CheckReport {
        blueprint: blueprint.name,
        output_dir: canonical_display(&output_dir),
        files: specs.len(),
        groups: specs.group_count(),
        roots: specs.roots().len(),
    };

    if output.is_json() {
        return output.json(&report);
    }

    output.success(&format!(
        "{}: {} files in {} groups across {} roots under {}",
        report.blueprint, report.files, report.groups, report.roots, report.output_dir
    ))?;
    Ok(())
}
