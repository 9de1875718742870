use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    entities::common::Stem,
    value_objects::{Extension, FileKind},
};

/// One desired file: which root it belongs to, which group declared it, and
/// the absolute path the resolver derived for it.
///
/// PathSpecs only come out of the registry, so holding one means the path is
/// valid, in bounds, and unique within its run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathSpec {
    root: String,
    group: String,
    stem: Stem,
    kind: FileKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    extension: Option<Extension>,
    path: PathBuf,
}

impl PathSpec {
    pub(crate) fn new(
        root: impl Into<String>,
        group: impl Into<String>,
        stem: Stem,
        kind: FileKind,
        extension: Option<Extension>,
        path: PathBuf,
    ) -> Self {
        Self {
            root: root.into(),
            group: group.into(),
            stem,
            kind,
            extension,
            path,
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn stem(&self) -> &Stem {
        &self.stem
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn extension(&self) -> Option<&Extension> {
        self.extension.as_ref()
    }

    /// Absolute, resolved file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that must exist before the file can be created.
    pub fn parent(&self) -> Option<&Path> {
        self.path.parent()
    }

    /// `group:stem`, used to name the contributor in conflict errors.
    pub fn origin(&self) -> String {
        format!("{}:{}", self.group, self.stem)
    }
}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path.display(), self.origin())
    }
}
