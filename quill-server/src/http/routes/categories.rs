//! Category endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::repos::CategoryRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::responses::{CategoryResponse, DeleteResponse};
use crate::http::server::AppState;
use crate::models::NewCategory;

/// Create category request
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// GET /categories - list all categories ordered by name
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = CategoryRepo::new(&state.pool).list().await?;

    tracing::debug!(count = categories.len(), "Fetched categories");
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

/// POST /categories - create a category
async fn create_category(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let category = NewCategory::new(&req.name, &req.slug, req.description.as_deref())?;
    let created = CategoryRepo::new(&state.pool).create(&category).await?;

    tracing::info!(category_id = created.id, slug = %created.slug, "Category created");
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(created))))
}

/// GET /categories/{slug} - get a single category
async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = CategoryRepo::new(&state.pool).get_by_slug(&slug).await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// DELETE /categories/{id} - delete an unused category
async fn delete_category(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<DeleteResponse>, ApiError> {
    let removed = CategoryRepo::new(&state.pool).delete(id).await?;

    tracing::info!(category_id = id, removed, "Category deleted");
    Ok(Json(DeleteResponse { success: true }))
}

/// Category routes
///
/// `{key}` is a slug for GET and a numeric id for DELETE.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{key}", get(get_category).delete(delete_category))
}
