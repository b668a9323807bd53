//! Route modules

pub mod categories;
pub mod comments;
pub mod health;
pub mod posts;
pub mod rpc;

use std::sync::Arc;

use axum::Router;

use crate::http::server::AppState;

/// Everything served under `/api`
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(categories::router())
        .merge(posts::router())
        .merge(comments::router())
        .merge(rpc::router())
}
