//! Validated title type shared by tools, tasks, issues, and job requests.

use super::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a title, matching the `VARCHAR(100)` columns.
const MAX_TITLE_LENGTH: usize = 100;

/// Validated record title or tool name.
///
/// Titles are trimmed and must be non-empty and at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyTitle`] when the value is empty after
    /// trimming, or [`DomainError::TitleTooLong`] when it exceeds 100
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(DomainError::EmptyTitle);
        }

        if normalized.chars().count() > MAX_TITLE_LENGTH {
            return Err(DomainError::TitleTooLong(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Builds a title by prefixing an existing one.
    ///
    /// Used when an approved job request becomes a task. The combined text
    /// is truncated on a character boundary to fit the title cap, keeping
    /// the prefix intact.
    #[must_use]
    pub fn prefixed(prefix: &str, original: &Self) -> Self {
        let combined: String = prefix
            .chars()
            .chain(original.0.chars())
            .take(MAX_TITLE_LENGTH)
            .collect();
        Self(combined.trim_end().to_owned())
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Title {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
