//! Stem → absolute path resolution.

use std::path::PathBuf;

use crate::domain::{
    entities::{common::Stem, target_root::TargetRoot},
    error::DomainError,
    value_objects::Extension,
};

/// Joins a root's base directory with a stem and an extension rule.
///
/// Pure: never touches the filesystem, so it is safe to call for every
/// stem before anything is created.
pub struct PathResolver;

impl PathResolver {
    /// Validate `stem` and resolve it under `root`.
    ///
    /// `extension == None` means the stem already is the full file name
    /// (marker files).
    ///
    /// # Example
    /// ```rust
    /// use std::path::Path;
    /// use trellis_core::domain::{Extension, PathResolver, PlatformTag, TargetRoot};
    ///
    /// let root = TargetRoot::new("shared", "/out/shared", PlatformTag::SharedSource).unwrap();
    /// let ext = Extension::parse("kt").unwrap();
    /// let path = PathResolver::resolve(&root, "core/di/AppModule", Some(&ext)).unwrap();
    /// assert_eq!(path, Path::new("/out/shared/core/di/AppModule.kt"));
    /// ```
    pub fn resolve(
        root: &TargetRoot,
        stem: &str,
        extension: Option<&Extension>,
    ) -> Result<PathBuf, DomainError> {
        let stem = Stem::parse(stem)?;
        Self::resolve_stem(root, &stem, extension)
    }

    /// Resolve an already validated stem.
    pub fn resolve_stem(
        root: &TargetRoot,
        stem: &Stem,
        extension: Option<&Extension>,
    ) -> Result<PathBuf, DomainError> {
        let mut path = root.base().to_path_buf();
        let mut segments = stem.segments().peekable();

        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                path.push(segment);
                continue;
            }
            match extension {
                Some(ext) => path.push(format!("{segment}.{ext}")),
                None => path.push(segment),
            }
        }

        // Containment, independent of how the stem was parsed.
        if !path.starts_with(root.base()) || path == root.base() {
            return Err(DomainError::OutOfBounds {
                root: root.id().to_string(),
                path: path.display().to_string(),
            });
        }

        Ok(path)
    }
}
