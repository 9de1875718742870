//! Application layer for Trellis.
//!
//! This layer contains:
//! - **Services**: materializer, runner, report emitter and the
//!   `ScaffoldService` that ties them together
//! - **Ports**: traits for the filesystem, blueprint storage and progress
//! - **Errors**: `ApplicationError` and the per-entry `FileSystemError`
//!
//! All blueprint rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    BlueprintInfo, BlueprintService, CancellationToken, EntryOutcome, EntryStatus, Materializer,
    PlannedEntry, PlannedState, ReportEmitter, RunOptions, RunReport, RunStatus, ScaffoldOutcome,
    ScaffoldRunner, ScaffoldService, Summary,
};

pub use ports::{BlueprintStore, Ensured, Filesystem, NoopObserver, RunObserver};

pub use error::{ApplicationError, FileSystemError, FsErrorReason, FsResult};
