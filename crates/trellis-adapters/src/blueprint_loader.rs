//! TOML blueprint loader.
//!
//! Parses blueprint manifests into domain [`Blueprint`] values, from a
//! string, a single file, or every `*.toml` under a directory.
//!
//! # Manifest format
//!
//! ```toml
//! [blueprint]
//! name        = "picnic"
//! description = "Kotlin Multiplatform social app"   # optional
//! output      = "picnic-app"                        # optional, defaults to name
//!
//! [[roots]]
//! id       = "shared"
//! path     = "composeApp/src/commonMain/kotlin/com/picnic/app"  # "" = output dir
//! platform = "shared-source"
//!
//! [[groups]]
//! name      = "core"
//! root      = "shared"
//! kind      = "source"     # source | markup | marker
//! extension = "kt"         # required for source/markup, forbidden for marker
//! stems     = ["App", "core/di/AppModule"]
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use trellis_core::{
    application::ApplicationError,
    domain::{Blueprint, CategoryGroup, DomainError, FileKind, PlatformTag, RootDef},
    error::TrellisResult,
};

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a blueprint manifest.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct BlueprintManifest {
    pub blueprint: BlueprintSection,
    #[serde(default)]
    pub roots: Vec<RootEntry>,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
}

/// `[blueprint]` section.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct BlueprintSection {
    pub name: String,
    pub description: Option<String>,
    /// Default output directory name.
    pub output: Option<String>,
}

/// One entry under `[[roots]]`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RootEntry {
    pub id: String,
    /// Relative to the output directory; empty means the output directory.
    #[serde(default)]
    pub path: String,
    pub platform: String,
}

/// One entry under `[[groups]]`.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct GroupEntry {
    pub name: String,
    pub root: String,
    pub kind: String,
    pub extension: Option<String>,
    pub stems: Vec<String>,
}

impl BlueprintManifest {
    /// Convert into a validated domain blueprint.
    pub fn into_blueprint(self) -> Result<Blueprint, DomainError> {
        let mut builder = Blueprint::builder(self.blueprint.name);
        if let Some(description) = self.blueprint.description {
            builder = builder.description(description);
        }
        if let Some(output) = self.blueprint.output {
            builder = builder.default_output(output);
        }

        for root in self.roots {
            let platform: PlatformTag = root.platform.parse()?;
            builder = builder.root(RootDef::new(root.id, &root.path, platform)?);
        }

        for group in self.groups {
            let kind: FileKind = group.kind.parse()?;
            let mut group_builder = CategoryGroup::builder(group.name)
                .root(group.root)
                .kind(kind)
                .stems(group.stems);
            if let Some(extension) = group.extension {
                group_builder = group_builder.extension(extension);
            }
            builder = builder.group(group_builder.build()?);
        }

        builder.build()
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`Blueprint`]s from TOML manifests.
///
/// # Example
///
/// ```no_run
/// use trellis_adapters::BlueprintLoader;
///
/// let blueprint = BlueprintLoader::load_file("./blueprints/picnic.toml")?;
/// println!("{} files", blueprint.stem_count());
/// # Ok::<(), trellis_core::error::TrellisError>(())
/// ```
pub struct BlueprintLoader;

impl BlueprintLoader {
    /// Parse a manifest held in memory. `origin` names it in errors.
    pub fn parse_str(raw: &str, origin: &str) -> TrellisResult<Blueprint> {
        let manifest: BlueprintManifest =
            toml::from_str(raw).map_err(|e| ApplicationError::BlueprintLoad {
                origin: origin.to_string(),
                reason: e.to_string(),
            })?;

        Ok(manifest.into_blueprint()?)
    }

    /// Load one manifest file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_file(path: impl AsRef<Path>) -> TrellisResult<Blueprint> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ApplicationError::BlueprintLoad {
            origin: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let blueprint = Self::parse_str(&raw, &path.display().to_string())?;
        debug!(name = %blueprint.name, stems = blueprint.stem_count(), "loaded blueprint");
        Ok(blueprint)
    }

    /// Load every `*.toml` under `dir` (two levels deep).
    ///
    /// Manifests that fail to parse or validate emit a `WARN` log and are
    /// skipped so one bad file does not hide the others.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::BlueprintLoad`] if `dir` does not exist or
    /// cannot be walked.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn load_dir(dir: impl AsRef<Path>) -> TrellisResult<Vec<Blueprint>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ApplicationError::BlueprintLoad {
                origin: dir.display().to_string(),
                reason: "blueprints directory not found".into(),
            }
            .into());
        }

        let mut manifests: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(2) {
            let entry = entry.map_err(|e| ApplicationError::BlueprintLoad {
                origin: dir.display().to_string(),
                reason: format!("directory walk error: {e}"),
            })?;
            let is_toml = entry.path().extension().is_some_and(|ext| ext == "toml");
            if entry.file_type().is_file() && is_toml {
                manifests.push(entry.into_path());
            }
        }
        manifests.sort();

        let mut blueprints = Vec::new();
        for path in manifests {
            match Self::load_file(&path) {
                Ok(blueprint) => blueprints.push(blueprint),
                Err(e) => warn!(
                    path  = %path.display(),
                    error = %e,
                    "skipping blueprint manifest due to load error"
                ),
            }
        }

        debug!(count = blueprints.len(), "finished loading blueprints");
        Ok(blueprints)
    }
}
