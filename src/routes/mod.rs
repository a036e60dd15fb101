pub mod api;

use std::sync::Arc;

use axum::Router;
use axum::response::Redirect;
use axum::routing::get;

use crate::error::AppError;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/api") }))
        .nest("/api", api::router(state))
        .fallback(not_found)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
