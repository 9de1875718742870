use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::error::{DomainError, PathViolation};

/// Characters no portable filesystem accepts inside a name.
const FORBIDDEN: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// First character in `s` that is forbidden in a path segment, if any.
pub(crate) fn forbidden_char(s: &str) -> Option<char> {
    s.chars().find(|c| FORBIDDEN.contains(c) || c.is_control())
}

/// A slash-delimited relative path without extension, e.g. `core/di/AppModule`.
///
/// Invariant: at least one segment; no segment is empty, `.` or `..`; no
/// forbidden characters. Both `/` and `\` are accepted on input and stored
/// in the canonical `/` form, so a stem reads the same on every host.
///
/// Because of the invariant a stem joined under any directory can never
/// leave that directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Stem(String);

impl Stem {
    /// Validate and normalize `raw`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let invalid = |violation| DomainError::InvalidStem {
            stem: raw.to_string(),
            violation,
        };

        if raw.is_empty() {
            return Err(invalid(PathViolation::Empty));
        }

        let normalized = raw.replace('\\', "/");
        for segment in normalized.split('/') {
            match segment {
                "" => return Err(invalid(PathViolation::EmptySegment)),
                "." => return Err(invalid(PathViolation::CurrentDir)),
                ".." => return Err(invalid(PathViolation::Traversal)),
                _ => {}
            }
            if let Some(c) = forbidden_char(segment) {
                return Err(invalid(PathViolation::ForbiddenChar(c)));
            }
        }

        Ok(Self(normalized))
    }

    /// Segments in order, e.g. `["core", "di", "AppModule"]`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Last segment (the file name before the extension is applied).
    pub fn file_name(&self) -> &str {
        self.segments().last().unwrap_or(&self.0)
    }

    /// Canonical `/`-separated form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Host-native relative path built from the segments.
    pub fn to_path_buf(&self) -> PathBuf {
        self.segments().collect()
    }
}

impl AsRef<str> for Stem {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render a path with `/` separators regardless of host.
pub fn canonical_display(path: &Path) -> String {
    let raw = path.display().to_string();
    if std::path::MAIN_SEPARATOR == '/' {
        raw
    } else {
        raw.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
