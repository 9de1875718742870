//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a blueprint" or "list blueprints".

pub mod blueprint_service;
pub mod materializer;
pub mod report;
pub mod scaffold_runner;
pub mod scaffold_service;

pub use blueprint_service::{BlueprintInfo, BlueprintService};
pub use materializer::Materializer;
pub use report::{EntryOutcome, EntryStatus, ReportEmitter, RunReport, RunStatus, Summary};
pub use scaffold_runner::{CancellationToken, RunOptions, ScaffoldRunner};
pub use scaffold_service::{PlannedEntry, PlannedState, ScaffoldOutcome, ScaffoldService};
