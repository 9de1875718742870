//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world.
//! Adapters in `trellis-adapters` implement them.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the application, implemented by infrastructure
//!   - `Filesystem`: create-if-absent directory and file operations
//!   - `BlueprintStore`: blueprint storage/retrieval
//!   - `RunObserver`: progress reporting during a run

pub mod output;

#[cfg(test)]
pub use output::MockFilesystem;
pub use output::{BlueprintStore, Ensured, Filesystem, NoopObserver, RunObserver};
