//! API error types with IntoResponse
//!
//! Errors are converted to JSON `{"error": message, "kind": kind}` bodies
//! with a status code per kind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Body, query or path could not be decoded (400)
    InvalidInput { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Procedure called with the wrong HTTP method (405)
    MethodNotAllowed { message: String },

    /// Unique constraint violated (409)
    Conflict { constraint: String },

    /// Referenced row missing or still referenced (409)
    InvalidReference { constraint: String },

    /// Database unreachable (503, logged)
    Unavailable(DbError),

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    /// Machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::InvalidInput { .. } => "invalid_input",
            Self::NotFound { .. } => "not_found",
            Self::MethodNotAllowed { .. } => "method_not_allowed",
            Self::Conflict { .. } => "conflict",
            Self::InvalidReference { .. } => "invalid_reference",
            Self::Unavailable(_) => "unavailable",
            Self::Database(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::Conflict { .. } | Self::InvalidReference { .. } => StatusCode::CONFLICT,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::InvalidInput { message } | Self::MethodNotAllowed { message } => message.clone(),
            Self::NotFound { resource, .. } => format!("{} not found", resource),
            Self::Conflict { constraint } => {
                format!("a record with the same unique value already exists ({})", constraint)
            }
            Self::InvalidReference { constraint } => {
                format!("referenced record is missing or still in use ({})", constraint)
            }
            Self::Unavailable(_) => "database temporarily unavailable".to_owned(),
            Self::Database(_) => "an internal error occurred".to_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        match &self {
            // Log the actual error, return generic message
            Self::Unavailable(e) => tracing::error!(error = %e, "Database unavailable"),
            Self::Database(e) => tracing::error!(error = %e, "Database error"),
            Self::NotFound { resource, id } => tracing::debug!(resource, %id, "Not found"),
            other => tracing::warn!(kind, message = %other.message(), "Request rejected"),
        }

        let body = json!({
            "error": self.message(),
            "kind": kind,
        });

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::UniqueViolation { constraint } => Self::Conflict { constraint },
            DbError::ForeignKeyViolation { constraint } => Self::InvalidReference { constraint },
            DbError::Rejected { constraint } => Self::InvalidInput {
                message: format!("value rejected by constraint {}", constraint),
            },
            DbError::Unavailable(_) => Self::Unavailable(e),
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "title" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["kind"], "invalid_input");
        assert_eq!(body["error"], "title cannot be empty");
    }

    #[tokio::test]
    async fn not_found_is_404_with_resource_message() {
        let err = ApiError::from(DbError::NotFound {
            resource: "Post",
            id: "7".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Post not found");
        assert_eq!(body["kind"], "not_found");
    }

    #[tokio::test]
    async fn unique_violation_is_409_conflict() {
        let err = ApiError::from(DbError::UniqueViolation {
            constraint: "categories_slug_key".into(),
        });
        assert_eq!(err.kind(), "conflict");
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn foreign_key_violation_is_409_invalid_reference() {
        let err = ApiError::from(DbError::ForeignKeyViolation {
            constraint: "comments_post_id_fkey".into(),
        });
        assert_eq!(err.kind(), "invalid_reference");
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn pool_timeout_is_503() {
        let err = ApiError::from(DbError::from(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["kind"], "unavailable");
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let err = ApiError::from(DbError::from(sqlx::Error::RowNotFound));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "an internal error occurred");
        assert_eq!(body["kind"], "internal_error");
    }
}
