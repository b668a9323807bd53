//! Slug validation
//!
//! Slug format: lowercase alphanumeric words joined by single hyphens

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for a post slug (matches `posts.slug VARCHAR(255)`)
pub const MAX_POST_SLUG_LEN: usize = 255;

/// Maximum length for a category slug (matches `categories.slug VARCHAR(100)`)
pub const MAX_CATEGORY_SLUG_LEN: usize = 100;

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("invalid slug regex"));

/// Validated URL-safe slug
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Create a new slug of at most [`MAX_POST_SLUG_LEN`] characters.
    ///
    /// # Rules
    /// - Lowercase ASCII letters and digits
    /// - Words separated by single hyphens, no leading/trailing hyphen
    ///
    /// # Example
    /// ```
    /// use quill_server::models::Slug;
    ///
    /// assert!(Slug::new("getting-started-nextjs").is_ok());
    /// assert!(Slug::new("Getting Started").is_err());
    /// assert!(Slug::new("trailing-").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        Self::with_max(s, MAX_POST_SLUG_LEN)
    }

    /// Create a new slug with an explicit maximum length.
    pub fn with_max(s: &str, max: usize) -> Result<Self, ValidationError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(ValidationError::Empty { field: "slug" });
        }

        if s.len() > max {
            return Err(ValidationError::TooLong { field: "slug", max });
        }

        if !SLUG_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "slug",
                reason: "must be lowercase alphanumeric words separated by single hyphens",
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
