//! Category input validation

use super::slug::MAX_CATEGORY_SLUG_LEN;
use super::validation::{optional, required};
use super::{Slug, ValidationError};

/// Maximum length for category names (matches `categories.name VARCHAR(100)`)
const MAX_NAME_LEN: usize = 100;

/// Validated input for creating a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub slug: Slug,
    pub description: Option<String>,
}

impl NewCategory {
    /// Validate a category.
    ///
    /// # Rules
    /// - Name non-empty after trimming, max 100 characters
    /// - Slug in slug format, max 100 characters
    /// - Blank description is stored as NULL
    pub fn new(name: &str, slug: &str, description: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("name", name, MAX_NAME_LEN)?,
            slug: Slug::with_max(slug, MAX_CATEGORY_SLUG_LEN)?,
            description: optional("description", description, None)?,
        })
    }
}
