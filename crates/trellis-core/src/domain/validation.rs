use crate::domain::{
    entities::{Blueprint, Stem},
    error::DomainError,
};

/// Whole-blueprint validation that keeps going after the first problem.
///
/// The registry builder is fail-fast; this is for reporting every problem
/// in one pass (`trellis check`).
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_blueprint(blueprint: &Blueprint) -> Result<(), DomainError> {
        blueprint.validate()
    }

    /// Structural errors first, then every malformed stem in group order.
    pub fn collect_issues(blueprint: &Blueprint) -> Vec<DomainError> {
        let mut issues = Vec::new();
        if let Err(e) = Self::validate_blueprint(blueprint) {
            issues.push(e);
        }
        for group in &blueprint.groups {
            issues.extend(group.stems().iter().filter_map(|raw| Stem::parse(raw).err()));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{CategoryGroup, RootDef},
        value_objects::{FileKind, PlatformTag},
    };

    #[test]
    fn collects_every_bad_stem() {
        let blueprint = Blueprint {
            name: "demo".into(),
            description: None,
            default_output: "demo".into(),
            roots: vec![RootDef::new("shared", "shared", PlatformTag::SharedSource).unwrap()],
            groups: vec![
                CategoryGroup::builder("core")
                    .root("shared")
                    .kind(FileKind::Marker)
                    .stems(["ok", "../up", "a//b"])
                    .build()
                    .unwrap(),
            ],
        };

        let issues = DomainValidator::collect_issues(&blueprint);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(DomainError::is_path_validation));
    }

    #[test]
    fn structural_problem_comes_first() {
        let blueprint = Blueprint {
            name: "demo".into(),
            description: None,
            default_output: "demo".into(),
            roots: vec![RootDef::new("shared", "shared", PlatformTag::SharedSource).unwrap()],
            groups: vec![
                CategoryGroup::builder("core")
                    .root("missing")
                    .kind(FileKind::Marker)
                    .stems(["../up"])
                    .build()
                    .unwrap(),
            ],
        };

        let issues = DomainValidator::collect_issues(&blueprint);
        assert!(matches!(issues[0], DomainError::UnknownRoot { .. }));
        assert_eq!(issues.len(), 2);
    }
}
