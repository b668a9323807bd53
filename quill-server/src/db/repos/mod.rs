//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Lets PostgreSQL enforce uniqueness and references
//! - Classifies constraint violations into [`DbError`] variants

pub mod categories;
pub mod comments;
pub mod posts;

use sqlx::error::ErrorKind;

pub use categories::{Category, CategoryRepo};
pub use comments::{Comment, CommentRepo};
pub use posts::{CategoryRef, Post, PostRepo, PostWithCount};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    #[error("constraint rejected value: {constraint}")]
    Rejected { constraint: String },

    #[error("database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    #[error("database error: {0}")]
    Sqlx(#[source] sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            let constraint = db.constraint().unwrap_or("unknown").to_owned();
            match db.kind() {
                ErrorKind::UniqueViolation => return Self::UniqueViolation { constraint },
                ErrorKind::ForeignKeyViolation => return Self::ForeignKeyViolation { constraint },
                ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                    return Self::Rejected { constraint }
                }
                _ => {}
            }
        }

        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Unavailable(err),
            other => Self::Sqlx(other),
        }
    }
}
