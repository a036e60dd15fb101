use std::path::PathBuf;
use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use clap::{Parser, ValueEnum};
use tower_http::cors::CorsLayer;

#[derive(Parser, Debug, Clone)]
#[command(name = "jobscraper", about = "Job board aggregation API")]
pub struct Config {
    /// Listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8000")]
    pub listen_addr: String,

    /// Allowed CORS origin; `*` allows any
    #[arg(long, env = "CORS_ORIGIN", default_value = "*")]
    pub cors_origin: String,

    /// Directory holding glints.json / indeed.json cookie exports
    #[arg(long, env = "COOKIE_DIR", default_value = "config")]
    pub cookie_dir: PathBuf,

    /// Upstream fetch timeout in seconds
    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value = "30")]
    pub fetch_timeout_secs: u64,

    /// Version reported by /api and /api/health
    #[arg(long, env = "API_VERSION", default_value = "2.0.0")]
    pub api_version: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// CORS policy for the configured origin.
    pub fn cors_layer(&self) -> anyhow::Result<CorsLayer> {
        if self.cors_origin.trim() == "*" {
            return Ok(CorsLayer::permissive());
        }

        let origin: HeaderValue = self.cors_origin.trim().parse()?;
        Ok(CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true))
    }
}
