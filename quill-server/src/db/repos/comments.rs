//! Comment repository
//!
//! New comments are always stored unapproved; only [`CommentRepo::approve`]
//! makes them visible to public listings and counts.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::NewComment;

/// Comment record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Comment {
    pub id: i32,
    pub post_id: i32,
    pub author: String,
    pub email: String,
    pub content: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Comment repository
pub struct CommentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CommentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add a comment to a post.
    ///
    /// A missing post surfaces as `DbError::ForeignKeyViolation`.
    pub async fn create(&self, comment: &NewComment) -> Result<Comment, DbError> {
        let created = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (post_id, author, email, content, approved)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING id, post_id, author, email, content, approved, created_at
            "#,
        )
        .bind(comment.post_id)
        .bind(&comment.author)
        .bind(&comment.email)
        .bind(&comment.content)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Approved comments for a post, oldest first.
    pub async fn list_approved(&self, post_id: i32) -> Result<Vec<Comment>, DbError> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, author, email, content, approved, created_at
            FROM comments
            WHERE post_id = $1 AND approved = TRUE
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(self.pool)
        .await?;

        Ok(comments)
    }

    /// Mark a comment approved.
    pub async fn approve(&self, id: i32) -> Result<Comment, DbError> {
        sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET approved = TRUE
            WHERE id = $1
            RETURNING id, post_id, author, email, content, approved, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "Comment",
            id: id.to_string(),
        })
    }
}
