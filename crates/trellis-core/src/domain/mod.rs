//! Core domain layer for Trellis.
//!
//! Pure business logic: the blueprint model, path resolution, and the
//! registry that turns category groups into a validated set of path specs.
//! All I/O goes through ports defined in the application layer.
//!
//! - **No I/O**: nothing here touches the filesystem
//! - **Immutable values**: roots, groups and specs are read-only once built
//! - **Fail fast**: every structural problem surfaces before materialization

pub mod entities;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod value_objects;

mod validation;

pub use entities::{
    blueprint::{Blueprint, BlueprintBuilder},
    category_group::{CategoryGroup, CategoryGroupBuilder},
    common::{Stem, canonical_display},
    path_spec::PathSpec,
    target_root::{RootDef, TargetRoot},
};

pub use error::{DomainError, ErrorCategory, PathViolation};
pub use registry::{RegistryBuilder, ValidatedSpecSet};
pub use resolver::PathResolver;
pub use validation::DomainValidator;
pub use value_objects::{Extension, FileKind, PlatformTag};
