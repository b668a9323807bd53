//! Validation error types and shared field checks

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., slug)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Input could not be decoded into the expected shape
    Malformed { field: &'static str, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::Malformed { field, reason } => write!(f, "malformed {}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim and require a non-empty value of at most `max` characters.
pub(crate) fn required(
    field: &'static str,
    s: &str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(trimmed.to_owned())
}

/// Like [`required`], but blank input becomes `None`.
pub(crate) fn optional(
    field: &'static str,
    s: Option<&str>,
    max: Option<usize>,
) -> Result<Option<String>, ValidationError> {
    let Some(trimmed) = s.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    if let Some(max) = max {
        if trimmed.chars().count() > max {
            return Err(ValidationError::TooLong { field, max });
        }
    }

    Ok(Some(trimmed.to_owned()))
}
