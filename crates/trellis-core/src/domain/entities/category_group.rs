use crate::domain::{
    error::DomainError,
    value_objects::{Extension, FileKind},
};

/// A named batch of stems sharing a target root and a file kind.
///
/// Stems are kept exactly as the author wrote them; they are validated by the
/// resolver when the registry is built, so every bad stem is reported with
/// the group it came from. Order is preserved for deterministic reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    name: String,
    root: String,
    kind: FileKind,
    extension: Option<Extension>,
    stems: Vec<String>,
}

impl CategoryGroup {
    /// Start the builder pattern for fluent construction.
    ///
    /// # Example
    /// ```rust
    /// use trellis_core::domain::{CategoryGroup, FileKind};
    ///
    /// let group = CategoryGroup::builder("core")
    ///     .root("shared")
    ///     .kind(FileKind::Source)
    ///     .extension("kt")
    ///     .stem("App")
    ///     .stem("core/di/AppModule")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(group.stems().len(), 2);
    /// ```
    pub fn builder(name: impl Into<String>) -> CategoryGroupBuilder {
        CategoryGroupBuilder {
            name: name.into(),
            ..CategoryGroupBuilder::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the owning target root.
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn extension(&self) -> Option<&Extension> {
        self.extension.as_ref()
    }

    pub fn stems(&self) -> &[String] {
        &self.stems
    }
}

/// Builder for [`CategoryGroup`].
///
/// `build()` enforces:
/// - a non-empty name and a root id
/// - an extension for `source`/`markup` groups and none for `marker` groups
/// - at least one stem
#[derive(Debug, Default)]
pub struct CategoryGroupBuilder {
    name: String,
    root: Option<String>,
    kind: Option<FileKind>,
    extension: Option<String>,
    stems: Vec<String>,
}

impl CategoryGroupBuilder {
    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn kind(mut self, kind: FileKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Add a single stem (accumulates).
    pub fn stem(mut self, stem: impl Into<String>) -> Self {
        self.stems.push(stem.into());
        self
    }

    /// Add many stems (accumulates).
    pub fn stems<I, S>(mut self, stems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stems.extend(stems.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<CategoryGroup, DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "group.name" });
        }

        let root = self
            .root
            .filter(|r| !r.trim().is_empty())
            .ok_or(DomainError::MissingRequiredField { field: "group.root" })?;

        let kind = self
            .kind
            .ok_or(DomainError::MissingRequiredField { field: "group.kind" })?;

        let extension = match (kind.requires_extension(), self.extension) {
            (true, Some(raw)) => Some(Extension::parse(&raw)?),
            (true, None) => {
                return Err(DomainError::InvalidExtension {
                    extension: String::new(),
                    reason: format!("group '{}' of kind {kind} needs an extension", self.name),
                });
            }
            (false, Some(raw)) => {
                return Err(DomainError::InvalidExtension {
                    extension: raw,
                    reason: format!(
                        "group '{}' is a marker group; spell the full file name in each stem",
                        self.name
                    ),
                });
            }
            (false, None) => None,
        };

        if self.stems.is_empty() {
            return Err(DomainError::EmptyGroup { group: self.name });
        }

        Ok(CategoryGroup {
            name: self.name,
            root,
            kind,
            extension,
            stems: self.stems,
        })
    }
}
