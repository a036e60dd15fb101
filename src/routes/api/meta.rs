use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

pub async fn info(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "message": "Welcome to Job Scraper API",
        "version": state.api_version,
        "runtime": "Rust",
        "endpoints": {
            "glints": "/api/glints",
            "jobstreet": "/api/jobstreet",
            "remoteok": "/api/remoteok",
            "indeed": "/api/indeed",
            "disnaker_bandung": "/api/disnaker_bandung",
            "devjobscanner": "/api/devjobscanner",
            "health": "/api/health",
        },
    }))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": "Job Scraper API is running",
        "version": state.api_version,
    }))
}
