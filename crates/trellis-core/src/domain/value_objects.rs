//! Domain value objects: FileKind, Extension, PlatformTag.
//!
//! # Design
//!
//! These are pure value types, equality-by-value, no identity. This file's
//! only job is to define the types, their string representations, and their
//! `FromStr` parsers. Path rules live in `entities::common` and the
//! resolver.

use crate::domain::entities::common::forbidden_char;
use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── FileKind ─────────────────────────────────────────────────────────────────

/// What a placeholder file is.
///
/// Every kind is materialized the same way (a zero-byte file). The kind only
/// decides whether the group's extension is appended to the stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// A code file, e.g. `core/App` + `kt`.
    Source,
    /// A markup/resource file, e.g. `values/strings` + `xml`.
    Markup,
    /// An opaque file whose full name is the stem itself (`.gitkeep`,
    /// `build.gradle.kts`). No extension is appended.
    Marker,
}

impl FileKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Markup => "markup",
            Self::Marker => "marker",
        }
    }

    /// Whether groups of this kind must declare an extension.
    pub const fn requires_extension(self) -> bool {
        !matches!(self, Self::Marker)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "source" | "src" => Ok(Self::Source),
            "markup" | "resource" => Ok(Self::Markup),
            "marker" | "opaque" => Ok(Self::Marker),
            other => Err(DomainError::UnknownValue {
                what: "file kind",
                value: other.to_string(),
            }),
        }
    }
}

// ── Extension ────────────────────────────────────────────────────────────────

/// A file extension without the leading dot.
///
/// Invariant: non-empty, no separators, no forbidden characters, does not
/// end with `.`. A single leading dot in the input is accepted and dropped,
/// so `".kt"` and `"kt"` are the same extension. Compound extensions such as
/// `gradle.kts` are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Extension(String);

impl Extension {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.strip_prefix('.').unwrap_or(raw);

        let invalid = |reason: &str| DomainError::InvalidExtension {
            extension: raw.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("extension is empty"));
        }
        if trimmed.contains(['/', '\\']) {
            return Err(invalid("extension cannot contain path separators"));
        }
        if trimmed.starts_with('.') || trimmed.ends_with('.') || trimmed.contains("..") {
            return Err(invalid("extension has an empty part"));
        }
        if let Some(c) = forbidden_char(trimmed) {
            return Err(invalid(&format!("contains forbidden character {c:?}")));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Extension {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── PlatformTag ──────────────────────────────────────────────────────────────

/// Which source set a target root belongs to.
///
/// String forms: `shared-source`, `test-source`, `server-source`,
/// `resources`, `project`, and `<platform>-source` for any other platform
/// (`android-source`, `ios-source`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlatformTag {
    /// Code shared by every platform.
    SharedSource,
    /// Code for one platform, named by the tag's prefix.
    PlatformSource(String),
    TestSource,
    ServerSource,
    /// Non-code resources (manifests, values, drawables).
    Resources,
    /// The project root itself (build files, app shells).
    Project,
}

impl PlatformTag {
    /// `true` for tags that hold compiled sources.
    pub fn is_source(&self) -> bool {
        !matches!(self, Self::Resources | Self::Project)
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SharedSource => f.write_str("shared-source"),
            Self::PlatformSource(name) => write!(f, "{name}-source"),
            Self::TestSource => f.write_str("test-source"),
            Self::ServerSource => f.write_str("server-source"),
            Self::Resources => f.write_str("resources"),
            Self::Project => f.write_str("project"),
        }
    }
}

impl FromStr for PlatformTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "shared-source" | "shared" | "common" => Ok(Self::SharedSource),
            "test-source" | "test" => Ok(Self::TestSource),
            "server-source" | "server" => Ok(Self::ServerSource),
            "resources" => Ok(Self::Resources),
            "project" => Ok(Self::Project),
            other => match other.strip_suffix("-source") {
                Some(name)
                    if !name.is_empty()
                        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') =>
                {
                    Ok(Self::PlatformSource(name.to_string()))
                }
                _ => Err(DomainError::UnknownValue {
                    what: "platform tag",
                    value: s.to_string(),
                }),
            },
        }
    }
}

impl Serialize for PlatformTag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlatformTag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
