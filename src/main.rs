use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobscraper::config::{Config, LogFormat};
use jobscraper::fetcher::HttpFetcher;
use jobscraper::state::AppState;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("jobscraper=info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();
    init_tracing(config.log_format);

    let fetcher = HttpFetcher::new(config.fetch_timeout())?;
    let state = Arc::new(AppState {
        fetcher: Arc::new(fetcher),
        cookie_dir: config.cookie_dir.clone(),
        api_version: config.api_version.clone(),
    });

    let app = jobscraper::build_router(state).layer(config.cors_layer()?);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Listening on {}", config.listen_addr);
    tracing::info!("Cookie exports read from {}", config.cookie_dir.display());
    axum::serve(listener, app).await?;

    Ok(())
}
