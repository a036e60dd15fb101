use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use jobscraper::build_router;
use jobscraper::error::AppError;
use jobscraper::fetcher::Fetcher;
use jobscraper::state::AppState;

pub const API_VERSION: &str = "9.9.9-test";

/// Fetcher double: serves a canned body for URLs containing a registered
/// fragment and records every call.
#[derive(Default)]
pub struct CannedFetcher {
    bodies: Vec<(String, Result<String, String>)>,
    pub calls: Mutex<Vec<(String, Option<PathBuf>)>>,
}

impl CannedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, url_fragment: &str, body: &str) -> Self {
        self.bodies.push((url_fragment.to_string(), Ok(body.to_string())));
        self
    }

    pub fn failure(mut self, url_fragment: &str, cause: &str) -> Self {
        self.bodies.push((url_fragment.to_string(), Err(cause.to_string())));
        self
    }
}

#[async_trait]
impl Fetcher for CannedFetcher {
    async fn fetch(&self, url: &str, cookies: Option<&Path>) -> Result<String, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), cookies.map(Path::to_path_buf)));

        match self.bodies.iter().find(|(fragment, _)| url.contains(fragment.as_str())) {
            Some((_, Ok(body))) => Ok(body.clone()),
            Some((_, Err(cause))) => Err(AppError::Transport(cause.clone())),
            None => Err(AppError::Transport(format!("no canned body for {url}"))),
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub fetcher: Arc<CannedFetcher>,
}

pub fn setup_test_app(fetcher: CannedFetcher) -> TestApp {
    let fetcher = Arc::new(fetcher);
    let state = Arc::new(AppState {
        fetcher: fetcher.clone(),
        cookie_dir: PathBuf::from("/etc/jobscraper/cookies"),
        api_version: API_VERSION.to_string(),
    });

    TestApp {
        router: build_router(state),
        fetcher,
    }
}

/// GET `uri` and return the status and decoded JSON body.
pub async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}
