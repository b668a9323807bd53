//! Post input validation and request coercions

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::validation::{optional, required};
use super::{Slug, ValidationError};

/// Maximum length for post titles (matches `posts.title VARCHAR(255)`)
const MAX_TITLE_LEN: usize = 255;

/// Maximum length for excerpts (matches `posts.excerpt VARCHAR(500)`)
const MAX_EXCERPT_LEN: usize = 500;

/// Validated input for creating or replacing a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub slug: Slug,
    pub content: String,
    pub excerpt: Option<String>,
    pub category_id: Option<i32>,
    pub published: bool,
}

impl PostDraft {
    /// Validate a post.
    ///
    /// # Rules
    /// - Title non-empty, max 255 characters
    /// - Slug in slug format, max 255 characters
    /// - Content non-empty
    /// - Blank excerpt is stored as NULL, max 500 characters
    /// - Missing `published` means draft
    pub fn new(
        title: &str,
        slug: &str,
        content: &str,
        excerpt: Option<&str>,
        category_id: Option<i32>,
        published: Option<bool>,
    ) -> Result<Self, ValidationError> {
        let title = required("title", title, MAX_TITLE_LEN)?;
        let slug = Slug::new(slug)?;

        // Body text keeps its whitespace; only all-blank is rejected
        if content.trim().is_empty() {
            return Err(ValidationError::Empty { field: "content" });
        }

        Ok(Self {
            title,
            slug,
            content: content.to_owned(),
            excerpt: optional("excerpt", excerpt, Some(MAX_EXCERPT_LEN))?,
            category_id,
            published: published.unwrap_or(false),
        })
    }
}

/// Deserialize a loosely-typed `categoryId` into a nullable reference.
///
/// Forms send `""`, `null`, `0`, a number or a numeric string. Everything
/// falsy becomes `None` (uncategorized), never a zero id.
pub fn deserialize_category_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    coerce_category_id(value.as_ref()).map_err(serde::de::Error::custom)
}

fn coerce_category_id(value: Option<&Value>) -> Result<Option<i32>, &'static str> {
    const INVALID: &str = "categoryId must be a positive integer";

    let id = match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return Ok(None),
        Some(Value::Number(n)) => n.as_i64().ok_or(INVALID)?,
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| INVALID)?,
        Some(_) => return Err(INVALID),
    };

    match id {
        0 => Ok(None),
        id if id > 0 => i32::try_from(id).map(Some).map_err(|_| INVALID),
        _ => Err(INVALID),
    }
}
