//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and handed to the commands. The
//! core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied by the commands)
//! 2. Environment variables `TRELLIS_*`, `__` between sections
//!    (`TRELLIS_SCAFFOLD__JOBS=4`)
//! 3. The file passed with `--config`
//! 4. `.trellis.toml` in the current directory
//! 5. The user config file (see [`AppConfig::config_path`])
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".trellis.toml";

const ENV_PREFIX: &str = "TRELLIS";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub scaffold: ScaffoldConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Blueprint used when none is named on the command line.
    pub blueprint: String,
    /// Output directory; empty means the blueprint's own default.
    pub output_dir: String,
    pub jobs: usize,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            blueprint: trellis_adapters::builtin_blueprints::DEFAULT_BLUEPRINT.into(),
            output_dir: String::new(),
            jobs: 1,
        }
    }
}

impl AppConfig {
    /// Merge defaults, config files and the environment.
    ///
    /// `config_file` is the `--config` argument; unlike the implicit
    /// locations it must exist.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_from(config_file, &Self::config_path(), Path::new(LOCAL_CONFIG_FILE))
    }

    fn load_from(
        config_file: Option<&PathBuf>,
        user_file: &Path,
        local_file: &Path,
    ) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("output.no_color", defaults.output.no_color)?
            .set_default("output.format", defaults.output.format.as_str())?
            .set_default("scaffold.blueprint", defaults.scaffold.blueprint.as_str())?
            .set_default("scaffold.output_dir", defaults.scaffold.output_dir.as_str())?
            .set_default("scaffold.jobs", defaults.scaffold.jobs as i64)?
            .add_source(file_source(user_file, false))
            .add_source(file_source(local_file, false));

        if let Some(path) = config_file {
            builder = builder.add_source(file_source(path, true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?;

        let app: Self = config
            .try_deserialize()
            .context("invalid configuration values")?;

        if app.scaffold.jobs == 0 {
            anyhow::bail!("scaffold.jobs must be at least 1");
        }

        Ok(app)
    }

    /// Path of the user configuration file, or `.trellis.toml` when no home
    /// directory can be determined.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "trellis", "trellis")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The configured output directory, if any.
    pub fn output_dir(&self) -> Option<PathBuf> {
        let raw = self.scaffold.output_dir.trim();
        (!raw.is_empty()).then(|| PathBuf::from(raw))
    }

    /// Value of a dotted key, as printed by `trellis config get`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "output.no_color" => Some(self.output.no_color.to_string()),
            "output.format" => Some(self.output.format.clone()),
            "scaffold.blueprint" => Some(self.scaffold.blueprint.clone()),
            "scaffold.output_dir" => Some(self.scaffold.output_dir.clone()),
            "scaffold.jobs" => Some(self.scaffold.jobs.to_string()),
            _ => None,
        }
    }

    pub const KEYS: [&'static str; 5] = [
        "output.no_color",
        "output.format",
        "scaffold.blueprint",
        "scaffold.output_dir",
        "scaffold.jobs",
    ];
}

fn file_source(path: &Path, required: bool) -> impl config::Source + Send + Sync + 'static {
    config::File::from(path)
        .format(config::FileFormat::Toml)
        .required(required)
}
