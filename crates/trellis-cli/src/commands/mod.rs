//! Subcommand implementations.
//!
//! Each module turns parsed arguments into calls on the core services and
//! renders the result. Blueprint and output-directory resolution is shared.

pub mod check;
pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod run;

use std::path::{Path, PathBuf};

use tracing::debug;

use trellis_adapters::{BlueprintLoader, InMemoryStore};
use trellis_core::{
    application::{ApplicationError, BlueprintService},
    domain::Blueprint,
};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult, IntoCli as _},
};

/// Resolve `requested` (or `scaffold.blueprint`) to a blueprint.
///
/// Anything that looks like a path is read as a manifest; everything else
/// is looked up among the built-ins.
pub(crate) fn load_blueprint(requested: Option<&str>, config: &AppConfig) -> CliResult<Blueprint> {
    let name = requested.unwrap_or(&config.scaffold.blueprint);

    if looks_like_manifest(name) {
        let path = Path::new(name);
        if !path.is_file() {
            return Err(ApplicationError::BlueprintNotFound { name: name.into() }.into());
        }
        debug!(path = %path.display(), "loading blueprint manifest");
        return Ok(BlueprintLoader::load_file(path)?);
    }

    let service = BlueprintService::new(Box::new(InMemoryStore::with_builtin()?));
    Ok(service.get(name)?)
}

fn looks_like_manifest(name: &str) -> bool {
    let path = Path::new(name);
    path.extension().is_some_and(|ext| ext == "toml")
        || path.components().count() > 1
        || path.is_file()
}

/// Absolute output directory: `--output`, then `scaffold.output_dir`, then
/// the blueprint's own default, relative to the working directory.
pub(crate) fn output_dir(
    flag: Option<&Path>,
    config: &AppConfig,
    blueprint: &Blueprint,
) -> CliResult<PathBuf> {
    let chosen = flag
        .map(Path::to_path_buf)
        .or_else(|| config.output_dir())
        .unwrap_or_else(|| PathBuf::from(&blueprint.default_output));

    if chosen.as_os_str().is_empty() {
        return Err(CliError::InvalidInput {
            message: "output directory must not be empty".into(),
        });
    }

    std::path::absolute(&chosen).with_cli_context(|| {
        format!("cannot resolve output directory '{}'", chosen.display())
    })
}
