//! ScaffoldRunner - drives the materializer across a validated spec set.
//!
//! Entries are independent once the registry has proven their paths unique,
//! so a failure is recorded and the run moves on. Parallel runs pull entry
//! indices from a shared counter and are sorted back into registry order.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use tracing::{info, instrument};

use crate::application::{
    ports::{Filesystem, NoopObserver, RunObserver},
    services::{
        materializer::Materializer,
        report::{EntryOutcome, RunReport},
    },
};
use crate::domain::{PathSpec, ValidatedSpecSet};

/// Cooperative cancellation flag, checked between entries.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Knobs for [`ScaffoldRunner::run_with`].
pub struct RunOptions<'a> {
    /// Worker threads; `0` and `1` both mean sequential.
    pub jobs: usize,
    pub cancel: CancellationToken,
    pub observer: &'a dyn RunObserver,
}

impl Default for RunOptions<'_> {
    fn default() -> Self {
        Self {
            jobs: 1,
            cancel: CancellationToken::default(),
            observer: &NoopObserver,
        }
    }
}

impl<'a> RunOptions<'a> {
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn observer(mut self, observer: &'a dyn RunObserver) -> Self {
        self.observer = observer;
        self
    }
}

pub struct ScaffoldRunner<'a> {
    materializer: Materializer<'a>,
}

impl<'a> ScaffoldRunner<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self {
            materializer: Materializer::new(filesystem),
        }
    }

    /// Sequential run with no cancellation.
    pub fn run(&self, specs: &ValidatedSpecSet) -> RunReport {
        self.run_with(specs, &RunOptions::default())
    }

    #[instrument(skip_all, fields(specs = specs.len(), jobs = options.jobs))]
    pub fn run_with(&self, specs: &ValidatedSpecSet, options: &RunOptions<'_>) -> RunReport {
        let entries = specs.specs();
        options.observer.on_start(entries.len());

        let outcomes = if options.jobs > 1 && entries.len() > 1 {
            self.run_parallel(entries, options)
        } else {
            self.run_sequential(entries, options)
        };

        let report = RunReport::from_outcomes(outcomes, entries.len());
        info!(
            created = report.created,
            already_existed = report.already_existed,
            failed = report.failed,
            skipped = report.skipped,
            "run finished"
        );
        options.observer.on_finish(&report);
        report
    }

    fn run_sequential(&self, entries: &[PathSpec], options: &RunOptions<'_>) -> Vec<EntryOutcome> {
        let mut outcomes = Vec::with_capacity(entries.len());
        for spec in entries {
            if options.cancel.is_cancelled() {
                break;
            }
            let outcome = self.materializer.materialize(spec);
            options.observer.on_entry(&outcome);
            outcomes.push(outcome);
        }
        outcomes
    }

    fn run_parallel(&self, entries: &[PathSpec], options: &RunOptions<'_>) -> Vec<EntryOutcome> {
        let next = AtomicUsize::new(0);
        let workers = options.jobs.min(entries.len());

        let mut indexed: Vec<(usize, EntryOutcome)> = thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let next = &next;
                    let materializer = &self.materializer;
                    scope.spawn(move || {
                        let mut local = Vec::new();
                        while !options.cancel.is_cancelled() {
                            let i = next.fetch_add(1, Ordering::Relaxed);
                            let Some(spec) = entries.get(i) else {
                                break;
                            };
                            let outcome = materializer.materialize(spec);
                            options.observer.on_entry(&outcome);
                            local.push((i, outcome));
                        }
                        local
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        });

        indexed.sort_unstable_by_key(|(i, _)| *i);
        indexed.into_iter().map(|(_, outcome)| outcome).collect()
    }
}
