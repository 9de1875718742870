//! Blueprint Service - blueprint lookup and metadata queries.
//!
//! Separated from ScaffoldService for single responsibility.

use serde::Serialize;

use crate::{
    application::ports::BlueprintStore,
    domain::Blueprint,
    error::TrellisResult,
};

/// Information about a blueprint for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlueprintInfo {
    pub name: String,
    pub description: String,
    pub default_output: String,
    pub roots: usize,
    pub groups: usize,
    pub files: usize,
}

impl From<&Blueprint> for BlueprintInfo {
    fn from(blueprint: &Blueprint) -> Self {
        Self {
            name: blueprint.name.clone(),
            description: blueprint.description.clone().unwrap_or_default(),
            default_output: blueprint.default_output.clone(),
            roots: blueprint.roots.len(),
            groups: blueprint.groups.len(),
            files: blueprint.stem_count(),
        }
    }
}

/// Service for blueprint operations.
pub struct BlueprintService {
    store: Box<dyn BlueprintStore>,
}

impl BlueprintService {
    pub fn new(store: Box<dyn BlueprintStore>) -> Self {
        Self { store }
    }

    /// Get a blueprint by name.
    pub fn get(&self, name: &str) -> TrellisResult<Blueprint> {
        self.store.get(name)
    }

    /// Display metadata for every blueprint.
    pub fn list_info(&self) -> TrellisResult<Vec<BlueprintInfo>> {
        Ok(self.store.list()?.iter().map(BlueprintInfo::from).collect())
    }
}
