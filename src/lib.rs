//! Job board aggregation API.
//!
//! Each request fetches one page from one board, extracts listings with the
//! board's static rule tables, normalizes and deduplicates them, and returns
//! them in a uniform envelope.

pub mod config;
pub mod cookies;
pub mod dedupe;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod models;
pub mod normalize;
pub mod pagination;
pub mod routes;
pub mod sources;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// All routes with request tracing. CORS is layered on by the binary.
pub fn build_router(state: Arc<AppState>) -> Router {
    routes::router(state).layer(TraceLayer::new_for_http())
}
