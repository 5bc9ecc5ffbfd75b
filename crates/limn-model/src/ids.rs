#![deny(unsafe_code)]

use std::fmt;

use serde::Serialize;

use crate::ModelError;

/// Identifier for datasources, graphs and dashboards.
///
/// Slugs are used verbatim as file stems (`datasources/{slug}.yaml`), so they
/// must be non-empty and must not contain path separators, control
/// characters or surrounding whitespace. Invalid ids are rejected, never
/// rewritten.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let reason = if value.trim().is_empty() {
            Some("must not be empty")
        } else if value.trim() != value {
            Some("must not start or end with whitespace")
        } else if value == "." || value == ".." {
            Some("must not be a relative path component")
        } else if value.contains(['/', '\\']) {
            Some("must not contain path separators")
        } else if value.chars().any(char::is_control) {
            Some("must not contain control characters")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(ModelError::InvalidSlug { value, reason }),
            None => Ok(Self(value)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
