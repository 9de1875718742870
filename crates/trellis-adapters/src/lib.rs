//! Infrastructure adapters for Trellis.
//!
//! This crate implements the ports defined in `trellis-core::application::ports`
//! and owns every I/O concern: the real and in-memory filesystems, the TOML
//! blueprint loader, and the built-in blueprint catalogue.

pub mod blueprint_loader;
pub mod blueprint_store;
pub mod builtin_blueprints;
pub mod filesystem;

// Re-export commonly used adapters
pub use blueprint_loader::BlueprintLoader;
pub use blueprint_store::InMemoryStore;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
