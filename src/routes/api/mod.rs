pub mod jobs;
pub mod meta;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::sources::{DevJobsScanner, DisnakerBandung, Glints, Indeed, JobStreet, RemoteOk};
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(meta::info))
        .route("/health", get(meta::health))
        // Sources
        .route("/glints", get(jobs::scrape::<Glints>))
        .route("/jobstreet", get(jobs::scrape::<JobStreet>))
        .route("/indeed", get(jobs::scrape::<Indeed>))
        .route("/disnaker_bandung", get(jobs::scrape::<DisnakerBandung>))
        .route("/remoteok", get(jobs::scrape::<RemoteOk>))
        .route("/devjobscanner", get(jobs::scrape::<DevJobsScanner>))
        .with_state(state)
}
