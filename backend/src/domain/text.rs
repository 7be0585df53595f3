//! Free-text value type shared by titles, locations and descriptions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors for [`BoundedText`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextValidationError {
    /// Text was blank once trimmed.
    #[error("must not be empty")]
    Empty,
    /// Text exceeded the maximum number of characters.
    #[error("must be at most {max} characters")]
    TooLong {
        /// Maximum length in characters.
        max: usize,
    },
}

/// Trimmed, non-empty text with an upper length bound.
///
/// # Examples
/// ```
/// use eventhub::domain::BoundedText;
///
/// let city = BoundedText::new("  Pune ", 64).unwrap();
/// assert_eq!(city.as_ref(), "Pune");
/// assert!(BoundedText::new("   ", 64).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundedText(String);

impl BoundedText {
    /// Validate and trim `raw`, enforcing `max` characters.
    pub fn new(raw: impl AsRef<str>, max: usize) -> Result<Self, TextValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextValidationError::Empty);
        }
        if trimmed.chars().count() > max {
            return Err(TextValidationError::TooLong { max });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wrap a value loaded from trusted storage without re-validating.
    pub(crate) fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for BoundedText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BoundedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Length limits for the free-text fields used across the marketplace.
pub mod limits {
    /// Short labels: titles, categories, cities, event types.
    pub const LABEL: usize = 120;
    /// Locations and business names.
    pub const LINE: usize = 200;
    /// Descriptions, notes and notification bodies.
    pub const PARAGRAPH: usize = 2000;
}
