//! Trellis Core - Hexagonal Architecture Implementation
//!
//! Domain and application layers for the Trellis scaffolding engine,
//! following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           trellis-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ScaffoldService, ScaffoldRunner, ...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, BlueprintStore, Observer)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     trellis-adapters (Infrastructure)   │
//! │ (LocalFilesystem, BlueprintLoader, ...) │
//! └─────────────────────────────────────────┘
//!
//!  Domain layer (pure): Blueprint, PathResolver, RegistryBuilder
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trellis_core::prelude::*;
//!
//! let blueprint = Blueprint::builder("demo")
//!     .root(RootDef::new("shared", "shared", PlatformTag::SharedSource)?)
//!     .group(
//!         CategoryGroup::builder("core")
//!             .root("shared")
//!             .kind(FileKind::Source)
//!             .extension("kt")
//!             .stems(["core/App", "core/di/AppModule"])
//!             .build()?,
//!     )
//!     .build()?;
//!
//! let service = ScaffoldService::new(Box::new(filesystem));
//! let outcome = service.scaffold(&blueprint, "/abs/out".as_ref(), &RunOptions::default())?;
//! println!("{}", outcome.summary);
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod prelude {
    pub use crate::application::{
        BlueprintService, CancellationToken, ReportEmitter, RunOptions, RunReport, ScaffoldRunner,
        ScaffoldService,
        ports::{BlueprintStore, Ensured, Filesystem, RunObserver},
    };
    pub use crate::domain::{
        Blueprint, CategoryGroup, Extension, FileKind, PathResolver, PathSpec, PlatformTag,
        RegistryBuilder, RootDef, TargetRoot, ValidatedSpecSet,
    };
    pub use crate::error::{TrellisError, TrellisResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
