use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};

use crate::error::AppError;
use crate::models::job::JobsPayload;
use crate::models::response::ApiResponse;
use crate::sources::{self, JobSource};
use crate::state::AppState;

/// `GET /api/<source>`: scrape one page of `S` with the request's query parameters.
pub async fn scrape<S: JobSource>(
    State(state): State<Arc<AppState>>,
    query: Result<Query<S::Params>, QueryRejection>,
) -> Result<ApiResponse<JobsPayload>, AppError> {
    let Query(params) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    sources::scrape(&S::default(), state.fetcher.as_ref(), &state.cookie_dir, params).await
}
