//! `trellis run`: validate, materialize and report.
//!
//! Also the command executed when `trellis` is invoked without one.

use std::path::Path;

use tracing::{info, instrument, warn};

use trellis_adapters::LocalFilesystem;
use trellis_core::{
    application::{
        ApplicationError, CancellationToken, PlannedState, RunOptions, RunStatus,
        ScaffoldOutcome, ScaffoldService,
    },
    domain::{Blueprint, canonical_display},
};

use crate::{
    cli::{OutputFormat, RunArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(args: RunArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let blueprint = super::load_blueprint(args.blueprint.as_deref(), &config)?;
    let output_dir = super::output_dir(args.output.as_deref(), &config, &blueprint)?;
    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()));

    if args.dry_run {
        return dry_run(&service, &blueprint, &output_dir, &output);
    }

    let jobs = args.jobs.map(usize::from).unwrap_or(config.scaffold.jobs);
    let cancel = CancellationToken::new();
    install_interrupt_handler(&cancel);

    let progress = output.progress();
    let mut options = RunOptions::default().jobs(jobs).cancel(cancel);
    if let Some(observer) = &progress {
        options = options.observer(observer);
    }

    info!(output_dir = %output_dir.display(), jobs, "materializing blueprint");
    let outcome = service.scaffold(&blueprint, &output_dir, &options)?;
    render(&outcome, &output)?;

    let report = &outcome.report;
    match outcome.summary.status {
        RunStatus::Success => Ok(()),
        RunStatus::PartialFailure => Err(ApplicationError::MaterializationFailed {
            failed: report.failed,
            total: report.total,
        }
        .into()),
        RunStatus::Cancelled => Err(ApplicationError::Cancelled {
            completed: report.total - report.skipped,
            total: report.total,
        }
        .into()),
    }
}

/// Ctrl-C stops the run between entries. Installing a second handler in
/// the same process fails; that only happens in tests.
fn install_interrupt_handler(cancel: &CancellationToken) {
    let token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || token.cancel()) {
        warn!(error = %e, "could not install Ctrl-C handler");
    }
}

fn render(outcome: &ScaffoldOutcome, output: &OutputManager) -> CliResult<()> {
    let summary = &outcome.summary;

    if output.is_json() {
        output.json(&outcome.report)?;
    } else if output.format() == OutputFormat::Human && summary.status.is_success() {
        output.success(&summary.headline)?;
    } else {
        output.print(&summary.headline)?;
    }

    if !summary.failures.is_empty() {
        output.report_line(&format!("{} failed:", summary.failures.len()))?;
        for line in &summary.failures {
            output.report_line(line)?;
        }
    }
    if let Some(note) = &summary.note {
        output.report_line(note)?;
    }

    let extra = outcome
        .files_on_disk
        .map_or(0, |on_disk| on_disk.saturating_sub(outcome.report.present()));
    if extra > 0 && !output.is_json() {
        output.info(&format!(
            "{extra} other file(s) under {} are not part of the blueprint",
            canonical_display(&outcome.output_dir)
        ))?;
    }

    Ok(())
}

fn dry_run(
    service: &ScaffoldService,
    blueprint: &Blueprint,
    output_dir: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    let plan = service.plan(blueprint, output_dir)?;

    if output.is_json() {
        return output.json(&plan);
    }

    output.header(&format!(
        "Dry run: {} into {}",
        blueprint.name,
        canonical_display(output_dir)
    ))?;

    let mut existing = 0;
    for entry in &plan {
        let state = match entry.state {
            PlannedState::New => "new",
            PlannedState::Exists => {
                existing += 1;
                "exists"
            }
        };
        output.print(&format!("  {state:<7}{}", canonical_display(&entry.path)))?;
    }

    output.print(&format!(
        "{} to create, {existing} already present under {}",
        plan.len() - existing,
        canonical_display(output_dir)
    ))?;
    Ok(())
}
