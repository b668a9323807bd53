//! Comment input validation

use super::validation::required;
use super::ValidationError;

const MAX_AUTHOR_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 255;

/// Validated input for a new comment.
///
/// Has no `approved` field; new comments always start unapproved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: i32,
    pub author: String,
    pub email: String,
    pub content: String,
}

impl NewComment {
    pub fn new(
        post_id: i64,
        author: &str,
        email: &str,
        content: &str,
    ) -> Result<Self, ValidationError> {
        let post_id = i32::try_from(post_id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or(ValidationError::InvalidFormat {
                field: "postId",
                reason: "must be a positive integer",
            })?;

        let email = required("email", email, MAX_EMAIL_LEN)?;
        let well_formed = email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        });
        if !well_formed {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must look like name@domain",
            });
        }

        if content.trim().is_empty() {
            return Err(ValidationError::Empty { field: "content" });
        }

        Ok(Self {
            post_id,
            author: required("author", author, MAX_AUTHOR_LEN)?,
            email,
            content: content.trim().to_owned(),
        })
    }
}
