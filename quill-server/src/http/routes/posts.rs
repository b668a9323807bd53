//! Post endpoints
//!
//! - GET    /posts?limit&published&slug&category
//! - POST   /posts
//! - GET    /posts/{id}
//! - PUT    /posts/{id}
//! - DELETE /posts/{id}

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;

use crate::db::repos::PostRepo;
use crate::db::PostFilter;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson, ValidQuery};
use crate::http::responses::{DeleteResponse, PostResponse};
use crate::http::server::AppState;
use crate::models::{deserialize_category_id, PostDraft, ValidationError};

/// Query parameters for listing posts (all optional, empty = absent)
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsParams {
    pub limit: Option<String>,
    pub published: Option<String>,
    pub slug: Option<String>,
    pub category: Option<String>,
}

impl TryFrom<ListPostsParams> for PostFilter {
    type Error = ValidationError;

    fn try_from(params: ListPostsParams) -> Result<Self, Self::Error> {
        // Only an explicit `true` adds the published clause
        let published = match params.published.as_deref().map(str::trim) {
            Some("true") => Some(true),
            _ => None,
        };

        let limit = match params.limit.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<i64>().ok().filter(|l| *l > 0).ok_or(
                ValidationError::InvalidFormat {
                    field: "limit",
                    reason: "must be a positive integer",
                },
            )?),
        };

        Ok(PostFilter {
            published,
            slug: params.slug,
            category: params.category,
            limit,
        })
    }
}

/// Create/update post request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "deserialize_category_id")]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub published: Option<bool>,
}

impl TryFrom<PostRequest> for PostDraft {
    type Error = ValidationError;

    fn try_from(req: PostRequest) -> Result<Self, Self::Error> {
        PostDraft::new(
            &req.title,
            &req.slug,
            &req.content,
            req.excerpt.as_deref(),
            req.category_id,
            req.published,
        )
    }
}

/// GET /posts - list posts, newest first
async fn list_posts(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListPostsParams>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let filter = PostFilter::try_from(params)?;
    let posts = PostRepo::new(&state.pool).list(&filter).await?;

    tracing::debug!(count = posts.len(), ?filter, "Fetched posts");
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// POST /posts - create a post
async fn create_post(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<PostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let draft = PostDraft::try_from(req)?;
    let post = PostRepo::new(&state.pool).create(&draft).await?;

    tracing::info!(post_id = post.id, slug = %post.slug, "Post created");
    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// GET /posts/{id} - get a single post
async fn get_post(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<PostResponse>, ApiError> {
    let post = PostRepo::new(&state.pool).get(id).await?;
    Ok(Json(PostResponse::from(post)))
}

/// PUT /posts/{id} - replace a post
async fn update_post(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(req): ValidJson<PostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let draft = PostDraft::try_from(req)?;
    let post = PostRepo::new(&state.pool).update(id, &draft).await?;

    tracing::info!(post_id = post.id, "Post updated");
    Ok(Json(PostResponse::from(post)))
}

/// DELETE /posts/{id} - delete a post and its comments
async fn delete_post(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<DeleteResponse>, ApiError> {
    let removed = PostRepo::new(&state.pool).delete(id).await?;

    tracing::info!(post_id = id, removed, "Post deleted");
    Ok(Json(DeleteResponse { success: true }))
}

/// Post routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}
