//! Comment endpoints
//!
//! New comments come in through the `addComment` procedure; these routes
//! read the public (approved) comments and flip the moderation flag.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};

use crate::db::repos::{CommentRepo, PostRepo};
use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::responses::CommentResponse;
use crate::http::server::AppState;

/// GET /posts/{id}/comments - approved comments, oldest first
async fn list_comments(
    State(state): State<Arc<AppState>>,
    ValidId(post_id): ValidId,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    // 404 for an unknown post rather than an empty list
    PostRepo::new(&state.pool).get(post_id).await?;

    let comments = CommentRepo::new(&state.pool).list_approved(post_id).await?;
    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// PUT /comments/{id}/approve - make a comment public
async fn approve_comment(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<CommentResponse>, ApiError> {
    let comment = CommentRepo::new(&state.pool).approve(id).await?;

    tracing::info!(comment_id = id, post_id = comment.post_id, "Comment approved");
    Ok(Json(CommentResponse::from(comment)))
}

/// Comment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/posts/{id}/comments", get(list_comments))
        .route("/comments/{id}/approve", put(approve_comment))
}
