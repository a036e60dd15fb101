use std::path::PathBuf;
use std::sync::Arc;

use crate::fetcher::Fetcher;

/// Shared, read-only state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    pub fetcher: Arc<dyn Fetcher>,
    /// Directory holding per-source cookie exports.
    pub cookie_dir: PathBuf,
    pub api_version: String,
}
