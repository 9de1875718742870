pub mod blueprint;
pub mod category_group;
pub mod common;
pub mod path_spec;
pub mod target_root;

pub use crate::domain::DomainError;
pub use blueprint::{Blueprint, BlueprintBuilder};
pub use category_group::{CategoryGroup, CategoryGroupBuilder};
pub use common::Stem;
pub use path_spec::PathSpec;
pub use target_root::{RootDef, TargetRoot};
