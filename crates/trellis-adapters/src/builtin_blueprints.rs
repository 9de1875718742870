//! Built-in blueprint discovery.
//!
//! [`all_blueprints`] is the single entry point for the blueprints that ship
//! with Trellis, plus any extra manifests the user points at.
//!
//! # Sources, in order
//!
//! 1. **Embedded manifests** compiled into the binary (`picnic`).
//! 2. **`$TRELLIS_BLUEPRINTS_DIR`**: every `*.toml` in that directory. A
//!    blueprint with the same name as an embedded one replaces it.
//!
//! ```env
//! TRELLIS_BLUEPRINTS_DIR=./blueprints
//! ```

use std::path::PathBuf;

use tracing::{debug, info, instrument, warn};

use trellis_core::{domain::Blueprint, error::TrellisResult};

use crate::blueprint_loader::BlueprintLoader;

/// Name of the blueprint used when none is requested.
pub const DEFAULT_BLUEPRINT: &str = "picnic";

/// Environment variable naming an extra blueprints directory.
pub const BLUEPRINTS_DIR_ENV: &str = "TRELLIS_BLUEPRINTS_DIR";

const EMBEDDED: &[(&str, &str)] = &[("picnic", include_str!("../blueprints/picnic.toml"))];

/// Names of the embedded blueprints.
pub fn embedded_names() -> impl Iterator<Item = &'static str> {
    EMBEDDED.iter().map(|(name, _)| *name)
}

/// Parse only the embedded blueprints.
pub fn embedded_blueprints() -> TrellisResult<Vec<Blueprint>> {
    EMBEDDED
        .iter()
        .map(|(name, raw)| BlueprintLoader::parse_str(raw, &format!("builtin:{name}")))
        .collect()
}

/// Embedded blueprints plus any found under `$TRELLIS_BLUEPRINTS_DIR`.
///
/// A missing or unreadable override directory is logged and ignored; the
/// embedded set is always returned.
#[instrument]
pub fn all_blueprints() -> TrellisResult<Vec<Blueprint>> {
    let mut blueprints = embedded_blueprints()?;

    if let Some(dir) = override_dir() {
        debug!(path = %dir.display(), "checking blueprints override directory");
        match BlueprintLoader::load_dir(&dir) {
            Ok(extra) => {
                info!(path = %dir.display(), count = extra.len(), "extra blueprints loaded");
                for blueprint in extra {
                    blueprints.retain(|b| b.name != blueprint.name);
                    blueprints.push(blueprint);
                }
            }
            Err(e) => warn!(path = %dir.display(), error = %e, "ignoring blueprints directory"),
        }
    }

    Ok(blueprints)
}

fn override_dir() -> Option<PathBuf> {
    std::env::var_os(BLUEPRINTS_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
