use std::collections::HashSet;
use std::path::Path;

use crate::domain::{
    entities::{category_group::CategoryGroup, target_root::RootDef, target_root::TargetRoot},
    error::DomainError,
};

/// A complete scaffold description: where files go (roots) and which files
/// go there (groups).
///
/// ## Invariants (enforced by `validate()`)
///
/// 1. `name` is non-empty
/// 2. at least one root and one group
/// 3. root ids are unique, group names are unique
/// 4. every group references a declared root
///
/// A blueprint is configuration: it is built once (by the loader or by hand)
/// and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    pub name: String,
    pub description: Option<String>,
    /// Directory name used when the caller does not pick an output directory.
    pub default_output: String,
    pub roots: Vec<RootDef>,
    pub groups: Vec<CategoryGroup>,
}

impl Blueprint {
    pub fn builder(name: impl Into<String>) -> BlueprintBuilder {
        BlueprintBuilder {
            name: name.into(),
            ..BlueprintBuilder::default()
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "blueprint.name",
            });
        }
        if self.roots.is_empty() {
            return Err(DomainError::InvalidBlueprint(format!(
                "blueprint '{}' declares no roots",
                self.name
            )));
        }
        if self.groups.is_empty() {
            return Err(DomainError::InvalidBlueprint(format!(
                "blueprint '{}' declares no groups",
                self.name
            )));
        }

        let mut root_ids = HashSet::new();
        for root in &self.roots {
            if !root_ids.insert(root.id.as_str()) {
                return Err(DomainError::DuplicateRoot(root.id.clone()));
            }
        }

        let mut group_names = HashSet::new();
        for group in &self.groups {
            if !group_names.insert(group.name()) {
                return Err(DomainError::DuplicateGroup(group.name().to_string()));
            }
            if !root_ids.contains(group.root()) {
                return Err(DomainError::UnknownRoot {
                    group: group.name().to_string(),
                    root: group.root().to_string(),
                });
            }
        }

        Ok(())
    }

    /// Turn every root definition into an absolute [`TargetRoot`] under
    /// `output_dir`.
    pub fn anchor(&self, output_dir: &Path) -> Result<Vec<TargetRoot>, DomainError> {
        self.roots.iter().map(|r| r.anchor(output_dir)).collect()
    }

    /// Number of stems across all groups.
    pub fn stem_count(&self) -> usize {
        self.groups.iter().map(|g| g.stems().len()).sum()
    }
}

#[derive(Debug, Default)]
pub struct BlueprintBuilder {
    name: String,
    description: Option<String>,
    default_output: Option<String>,
    roots: Vec<RootDef>,
    groups: Vec<CategoryGroup>,
}

impl BlueprintBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_output(mut self, dir: impl Into<String>) -> Self {
        self.default_output = Some(dir.into());
        self
    }

    pub fn root(mut self, root: RootDef) -> Self {
        self.roots.push(root);
        self
    }

    pub fn group(mut self, group: CategoryGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Build and validate.
    ///
    /// The default output directory falls back to the blueprint name.
    pub fn build(self) -> Result<Blueprint, DomainError> {
        let default_output = self
            .default_output
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| self.name.clone());

        let blueprint = Blueprint {
            name: self.name,
            description: self.description,
            default_output,
            roots: self.roots,
            groups: self.groups,
        };
        blueprint.validate()?;
        Ok(blueprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{FileKind, PlatformTag};

    fn shared_root() -> RootDef {
        RootDef::new("shared", "shared", PlatformTag::SharedSource).unwrap()
    }

    fn core_group(root: &str) -> CategoryGroup {
        CategoryGroup::builder("core")
            .root(root)
            .kind(FileKind::Source)
            .extension("src")
            .stems(["core/App", "core/di/AppModule"])
            .build()
            .unwrap()
    }

    #[test]
    fn builds_and_defaults_output_to_name() {
        let blueprint = Blueprint::builder("demo")
            .root(shared_root())
            .group(core_group("shared"))
            .build()
            .unwrap();

        assert_eq!(blueprint.default_output, "demo");
        assert_eq!(blueprint.stem_count(), 2);
    }

    #[test]
    fn rejects_group_with_unknown_root() {
        let err = Blueprint::builder("demo")
            .root(shared_root())
            .group(core_group("android"))
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::UnknownRoot {
                group: "core".into(),
                root: "android".into()
            }
        );
    }

    #[test]
    fn rejects_duplicate_roots_and_groups() {
        let dup_root = Blueprint::builder("demo")
            .root(shared_root())
            .root(shared_root())
            .group(core_group("shared"))
            .build();
        assert!(matches!(dup_root, Err(DomainError::DuplicateRoot(id)) if id == "shared"));

        let dup_group = Blueprint::builder("demo")
            .root(shared_root())
            .group(core_group("shared"))
            .group(core_group("shared"))
            .build();
        assert!(matches!(dup_group, Err(DomainError::DuplicateGroup(name)) if name == "core"));
    }

    #[test]
    fn rejects_blueprint_without_groups() {
        let result = Blueprint::builder("demo").root(shared_root()).build();
        assert!(matches!(result, Err(DomainError::InvalidBlueprint(_))));
    }

    #[test]
    fn anchors_all_roots() {
        let blueprint = Blueprint::builder("demo")
            .root(shared_root())
            .root(RootDef::new("project", "", PlatformTag::Project).unwrap())
            .group(core_group("shared"))
            .build()
            .unwrap();

        let roots = blueprint.anchor(Path::new("/out")).unwrap();
        assert_eq!(roots[0].base(), Path::new("/out/shared"));
        assert_eq!(roots[1].base(), Path::new("/out"));
    }
}
