//! Registry builder: category groups in, validated spec set out.
//!
//! Everything here runs before the first filesystem call. If `build`
//! succeeds, every spec has a unique, in-bounds path and no spec's file path
//! is another spec's directory, so entries can be materialized in any order.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::{
    entities::{
        blueprint::Blueprint, category_group::CategoryGroup, common::Stem, path_spec::PathSpec,
        target_root::TargetRoot,
    },
    error::DomainError,
    resolver::PathResolver,
};

/// The flat, deduplicated output of [`RegistryBuilder::build`].
///
/// Specs are in group order, then stem order.
#[derive(Debug, Clone, Serialize)]
pub struct ValidatedSpecSet {
    roots: Vec<TargetRoot>,
    specs: Vec<PathSpec>,
}

impl ValidatedSpecSet {
    pub fn specs(&self) -> &[PathSpec] {
        &self.specs
    }

    pub fn roots(&self) -> &[TargetRoot] {
        &self.roots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Distinct parent directories, in first-use order.
    pub fn directories(&self) -> Vec<&Path> {
        let mut seen = HashSet::new();
        self.specs
            .iter()
            .filter_map(PathSpec::parent)
            .filter(|dir| seen.insert(*dir))
            .collect()
    }

    /// Number of distinct groups that contributed specs.
    pub fn group_count(&self) -> usize {
        self.specs
            .iter()
            .map(PathSpec::group)
            .collect::<HashSet<_>>()
            .len()
    }
}

impl<'a> IntoIterator for &'a ValidatedSpecSet {
    type Item = &'a PathSpec;
    type IntoIter = std::slice::Iter<'a, PathSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}

/// Expands `(group, stem)` pairs into [`PathSpec`]s against a fixed set of
/// target roots.
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    roots: Vec<TargetRoot>,
    index: HashMap<String, usize>,
}

impl RegistryBuilder {
    /// Fails on duplicate root ids.
    pub fn new(roots: Vec<TargetRoot>) -> Result<Self, DomainError> {
        let mut index = HashMap::with_capacity(roots.len());
        for (i, root) in roots.iter().enumerate() {
            if index.insert(root.id().to_string(), i).is_some() {
                return Err(DomainError::DuplicateRoot(root.id().to_string()));
            }
        }
        Ok(Self { roots, index })
    }

    /// Validate `blueprint`, anchor it under `output_dir`, and build.
    pub fn from_blueprint(
        blueprint: &Blueprint,
        output_dir: &Path,
    ) -> Result<ValidatedSpecSet, DomainError> {
        blueprint.validate()?;
        Self::new(blueprint.anchor(output_dir)?)?.build(&blueprint.groups)
    }

    pub fn root(&self, id: &str) -> Option<&TargetRoot> {
        self.index.get(id).map(|&i| &self.roots[i])
    }

    /// Resolve every stem of every group.
    ///
    /// Stops at the first error: an invalid stem, a path produced twice, or
    /// a file path that another spec needs as a directory.
    ///
    /// Paths are compared byte for byte. On a case-insensitive filesystem
    /// (the macOS and Windows defaults) `core/App` and `core/app` are
    /// accepted here but land on the same file, and the later entry reports
    /// `AlreadyExisted` instead of failing as a duplicate.
    #[instrument(skip_all, fields(groups = groups.len(), roots = self.roots.len()))]
    pub fn build(&self, groups: &[CategoryGroup]) -> Result<ValidatedSpecSet, DomainError> {
        let mut seen_groups = HashSet::new();
        let mut origins: HashMap<PathBuf, usize> = HashMap::new();
        let mut specs = Vec::new();

        for group in groups {
            if !seen_groups.insert(group.name()) {
                return Err(DomainError::DuplicateGroup(group.name().to_string()));
            }

            let root = self.root(group.root()).ok_or_else(|| DomainError::UnknownRoot {
                group: group.name().to_string(),
                root: group.root().to_string(),
            })?;

            for raw in group.stems() {
                let stem = Stem::parse(raw)?;
                let path = PathResolver::resolve_stem(root, &stem, group.extension())?;
                let spec = PathSpec::new(
                    root.id(),
                    group.name(),
                    stem,
                    group.kind(),
                    group.extension().cloned(),
                    path,
                );

                if let Some(&first) = origins.get(spec.path()) {
                    let first: &PathSpec = &specs[first];
                    return Err(DomainError::DuplicatePath {
                        path: spec.path().display().to_string(),
                        first: first.origin(),
                        second: spec.origin(),
                    });
                }

                origins.insert(spec.path().to_path_buf(), specs.len());
                specs.push(spec);
            }

            debug!(group = group.name(), root = root.id(), stems = group.stems().len(), "group expanded");
        }

        check_file_dir_conflicts(&specs, &origins)?;

        debug!(specs = specs.len(), "registry built");
        Ok(ValidatedSpecSet {
            roots: self.roots.clone(),
            specs,
        })
    }
}

/// A spec whose file path is an ancestor of another spec's path would need
/// the same path to be both a file and a directory.
fn check_file_dir_conflicts(
    specs: &[PathSpec],
    origins: &HashMap<PathBuf, usize>,
) -> Result<(), DomainError> {
    for spec in specs {
        for ancestor in spec.path().ancestors().skip(1) {
            if let Some(&i) = origins.get(ancestor) {
                return Err(DomainError::PathConflict {
                    path: ancestor.display().to_string(),
                    file_origin: specs[i].origin(),
                    dir_origin: spec.origin(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        error::PathViolation,
        value_objects::{FileKind, PlatformTag},
    };

    fn roots() -> Vec<TargetRoot> {
        vec![
            TargetRoot::new("shared", "/out/shared", PlatformTag::SharedSource).unwrap(),
            TargetRoot::new("project", "/out", PlatformTag::Project).unwrap(),
        ]
    }

    fn group(name: &str, root: &str, stems: &[&str]) -> CategoryGroup {
        CategoryGroup::builder(name)
            .root(root)
            .kind(FileKind::Source)
            .extension(".src")
            .stems(stems.iter().copied())
            .build()
            .unwrap()
    }

    #[test]
    fn expands_groups_in_order() {
        let registry = RegistryBuilder::new(roots()).unwrap();
        let set = registry
            .build(&[
                group("core", "shared", &["core/App", "core/di/AppModule"]),
                group("feature", "shared", &["feature/Home"]),
            ])
            .unwrap();

        let paths: Vec<_> = set.iter().map(|s| s.path().to_path_buf()).collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("/out/shared/core/App.src"),
                PathBuf::from("/out/shared/core/di/AppModule.src"),
                PathBuf::from("/out/shared/feature/Home.src"),
            ]
        );
        assert_eq!(set.group_count(), 2);
        assert_eq!(
            set.directories(),
            [
                Path::new("/out/shared/core"),
                Path::new("/out/shared/core/di"),
                Path::new("/out/shared/feature"),
            ]
        );
    }

    #[test]
    fn duplicate_stem_names_both_origins() {
        let registry = RegistryBuilder::new(roots()).unwrap();
        let err = registry
            .build(&[group("core", "shared", &["a/b", "a/b"])])
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::DuplicatePath {
                path: "/out/shared/a/b.src".into(),
                first: "core:a/b".into(),
                second: "core:a/b".into(),
            }
        );
    }

    #[test]
    fn duplicate_across_roots_is_detected() {
        // project root + "shared/x" lands on the same file as shared root + "x".
        let registry = RegistryBuilder::new(roots()).unwrap();
        let err = registry
            .build(&[
                group("a", "shared", &["x"]),
                group("b", "project", &["shared/x"]),
            ])
            .unwrap_err();

        assert!(matches!(err, DomainError::DuplicatePath { first, second, .. }
            if first == "a:x" && second == "b:shared/x"));
    }

    #[test]
    fn stems_differing_only_in_case_are_distinct() {
        let registry = RegistryBuilder::new(roots()).unwrap();
        let set = registry
            .build(&[group("core", "shared", &["core/App", "core/app"])])
            .unwrap();

        assert_eq!(set.len(), 2);
        assert_ne!(set.specs()[0].path(), set.specs()[1].path());
    }

    #[test]
    fn file_used_as_directory_is_a_conflict() {
        let registry = RegistryBuilder::new(roots()).unwrap();
        let marker = CategoryGroup::builder("keep")
            .root("shared")
            .kind(FileKind::Marker)
            .stem("core")
            .build()
            .unwrap();

        let err = registry
            .build(&[marker, group("core", "shared", &["core/App"])])
            .unwrap_err();

        assert!(matches!(err, DomainError::PathConflict { file_origin, dir_origin, .. }
            if file_origin == "keep:core" && dir_origin == "core:core/App"));
    }

    #[test]
    fn traversal_aborts_build() {
        let registry = RegistryBuilder::new(roots()).unwrap();
        let err = registry
            .build(&[group("core", "shared", &["ok/Fine", "../outside"])])
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::InvalidStem {
                violation: PathViolation::Traversal,
                ..
            }
        ));
    }

    #[test]
    fn unknown_root_is_rejected() {
        let registry = RegistryBuilder::new(roots()).unwrap();
        let err = registry
            .build(&[group("core", "android", &["App"])])
            .unwrap_err();
        assert!(matches!(err, DomainError::UnknownRoot { .. }));
    }

    #[test]
    fn duplicate_root_ids_are_rejected() {
        let mut dup = roots();
        dup.push(TargetRoot::new("shared", "/elsewhere", PlatformTag::SharedSource).unwrap());
        assert!(matches!(
            RegistryBuilder::new(dup),
            Err(DomainError::DuplicateRoot(id)) if id == "shared"
        ));
    }

    #[test]
    fn duplicate_group_names_are_rejected() {
        let registry = RegistryBuilder::new(roots()).unwrap();
        let err = registry
            .build(&[group("core", "shared", &["A"]), group("core", "shared", &["B"])])
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateGroup("core".into()));
    }
}
