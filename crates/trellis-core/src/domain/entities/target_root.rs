//! Target roots: named base directories that stems resolve under.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{entities::common::Stem, error::DomainError, value_objects::PlatformTag};

/// A target root as written in a blueprint: an id, a path relative to the
/// output directory, and a platform tag.
///
/// `path == None` denotes the output directory itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootDef {
    pub id: String,
    pub path: Option<Stem>,
    pub platform: PlatformTag,
}

impl RootDef {
    /// Build a root definition. An empty `path` means the output directory.
    pub fn new(
        id: impl Into<String>,
        path: &str,
        platform: PlatformTag,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "root.id" });
        }

        if Path::new(path).is_absolute() || path.starts_with(['/', '\\']) {
            return Err(DomainError::InvalidBlueprint(format!(
                "root '{id}' path must be relative to the output directory, got '{path}'"
            )));
        }

        let path = match path.trim_end_matches(['/', '\\']) {
            "" => None,
            relative => Some(Stem::parse(relative)?),
        };

        Ok(Self { id, path, platform })
    }

    /// Anchor this definition under an absolute output directory.
    pub fn anchor(&self, output_dir: &Path) -> Result<TargetRoot, DomainError> {
        let base = match &self.path {
            Some(path) => output_dir.join(path.to_path_buf()),
            None => output_dir.to_path_buf(),
        };
        TargetRoot::new(self.id.clone(), base, self.platform.clone())
    }
}

/// A named, absolute base directory for one family of stems.
///
/// Created once per run from a [`RootDef`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetRoot {
    id: String,
    base: PathBuf,
    platform: PlatformTag,
}

impl TargetRoot {
    /// Fallible constructor.
    ///
    /// The base directory must be absolute; `.` components are dropped so
    /// that containment checks compare like with like.
    pub fn new(
        id: impl Into<String>,
        base: impl Into<PathBuf>,
        platform: PlatformTag,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        let base: PathBuf = base.into();

        if !base.is_absolute() {
            return Err(DomainError::RelativeBase {
                root: id,
                base: base.display().to_string(),
            });
        }

        Ok(Self {
            id,
            base: base.components().collect(),
            platform,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn platform(&self) -> &PlatformTag {
        &self.platform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_root_requires_absolute_base() {
        let err = TargetRoot::new("shared", "relative/dir", PlatformTag::SharedSource).unwrap_err();
        assert!(matches!(err, DomainError::RelativeBase { .. }));
    }

    #[test]
    fn target_root_drops_cur_dir_components() {
        let root = TargetRoot::new("shared", "/out/./shared", PlatformTag::SharedSource).unwrap();
        assert_eq!(root.base(), Path::new("/out/shared"));
    }

    #[test]
    fn empty_root_path_is_output_dir() {
        let def = RootDef::new("project", "", PlatformTag::Project).unwrap();
        assert!(def.path.is_none());
        let root = def.anchor(Path::new("/out")).unwrap();
        assert_eq!(root.base(), Path::new("/out"));
    }

    #[test]
    fn root_path_joins_under_output_dir() {
        let def = RootDef::new(
            "android",
            "composeApp/src/androidMain",
            PlatformTag::PlatformSource("android".into()),
        )
        .unwrap();
        let root = def.anchor(Path::new("/out")).unwrap();
        assert_eq!(root.base(), Path::new("/out/composeApp/src/androidMain"));
        assert_eq!(root.platform().to_string(), "android-source");
    }

    #[test]
    fn root_path_cannot_escape() {
        assert!(RootDef::new("bad", "../elsewhere", PlatformTag::Project).is_err());
        assert!(RootDef::new("bad", "/abs", PlatformTag::Project).is_err());
    }

    #[test]
    fn root_id_is_required() {
        assert!(matches!(
            RootDef::new("  ", "src", PlatformTag::Project),
            Err(DomainError::MissingRequiredField { .. })
        ));
    }
}
