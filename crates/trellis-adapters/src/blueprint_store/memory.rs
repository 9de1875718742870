//! In-memory blueprint store with built-in blueprints.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use trellis_core::{
    application::{ApplicationError, ports::BlueprintStore},
    domain::{Blueprint, DomainValidator as validator},
    error::TrellisResult,
};

use crate::builtin_blueprints;

/// Thread-safe in-memory blueprint store, keyed by name.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<String, Blueprint>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with built-in blueprints loaded.
    pub fn with_builtin() -> TrellisResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    /// Load built-in blueprints (and any from `$TRELLIS_BLUEPRINTS_DIR`).
    pub fn load_builtin(&self) -> TrellisResult<()> {
        for blueprint in builtin_blueprints::all_blueprints()? {
            self.insert(blueprint)?;
        }
        Ok(())
    }

    /// Get the number of blueprints.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlueprintStore for InMemoryStore {
    fn get(&self, name: &str) -> TrellisResult<Blueprint> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(name).cloned().ok_or_else(|| {
            ApplicationError::BlueprintNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    fn list(&self) -> TrellisResult<Vec<Blueprint>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.values().cloned().collect())
    }

    fn insert(&self, blueprint: Blueprint) -> TrellisResult<()> {
        validator::validate_blueprint(&blueprint)?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.insert(blueprint.name.clone(), blueprint);
        Ok(())
    }
}
