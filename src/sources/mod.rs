//! Job board sources.
//!
//! Every source is a unit struct implementing [`JobSource`]: `plan` validates
//! the query and builds the upstream URL, `parse` turns the fetched body into
//! a payload using the source's static rule tables. The shared [`scrape`]
//! runner drives the fetch in between.

pub mod devjobscanner;
pub mod disnaker;
pub mod glints;
pub mod indeed;
pub mod jobstreet;
pub mod remoteok;

use std::path::Path;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::dedupe::{KeyPolicy, dedupe};
use crate::error::AppError;
use crate::fetcher::Fetcher;
use crate::models::job::{JobRecord, JobsPayload, RawCandidate};
use crate::models::response::ApiResponse;
use crate::normalize::{DiscardPolicy, normalize};

pub use devjobscanner::DevJobsScanner;
pub use disnaker::DisnakerBandung;
pub use glints::Glints;
pub use indeed::Indeed;
pub use jobstreet::JobStreet;
pub use remoteok::RemoteOk;

/// Characters left as-is in query values: the encodeURIComponent set plus
/// `+` and `/`, which the boards use literally in defaults such as
/// `All+Cities/Provinces`.
const QUERY_VALUE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'+')
    .remove(b'/');

pub trait JobSource: Default + Send + Sync + 'static {
    /// Raw query parameters; every field is an optional string.
    type Params: DeserializeOwned + Send + 'static;

    fn name(&self) -> &'static str;

    /// Validate parameters and build the upstream request.
    fn plan(&self, params: Self::Params) -> Result<SourceRequest, AppError>;

    /// Turn a fetched body into the response payload. Pure: the same body
    /// always yields the same payload.
    fn parse(&self, body: &str, request: &SourceRequest) -> Result<Scraped, AppError>;
}

#[derive(Debug, Clone)]
pub struct SourceRequest {
    pub url: String,
    /// Base that relative links on the fetched page resolve against.
    pub origin: Url,
    pub page: u32,
    /// Cookie export to send, relative to the configured cookie directory.
    pub cookies: Option<&'static str>,
}

#[derive(Debug)]
pub struct Scraped {
    pub message: &'static str,
    pub payload: JobsPayload,
}

/// Plan, fetch and parse one request against `source`.
pub async fn scrape<S: JobSource>(
    source: &S,
    fetcher: &dyn Fetcher,
    cookie_dir: &Path,
    params: S::Params,
) -> Result<ApiResponse<JobsPayload>, AppError> {
    let request = source.plan(params)?;
    let cookies = request.cookies.map(|file| cookie_dir.join(file));

    tracing::info!("Scraping {} page {}: {}", source.name(), request.page, request.url);
    let body = fetcher.fetch(&request.url, cookies.as_deref()).await?;

    let scraped = source.parse(&body, &request)?;
    tracing::info!(
        "{}: {} jobs on page {}",
        source.name(),
        scraped.payload.jobs.len(),
        request.page
    );

    Ok(ApiResponse::success(scraped.message, scraped.payload))
}

/// Normalize every candidate, then drop duplicates.
pub fn collect_records(
    candidates: Vec<RawCandidate>,
    discard: DiscardPolicy,
    keys: KeyPolicy<'_>,
) -> Vec<JobRecord> {
    let found = candidates.len();
    let records: Vec<JobRecord> = candidates
        .into_iter()
        .filter_map(|candidate| normalize(candidate, discard))
        .collect();

    if records.len() < found {
        tracing::debug!("Discarded {} blank candidates", found - records.len());
    }
    dedupe(records, keys)
}

/// A page number: a positive integer, `default` when omitted or empty.
pub fn parse_page(raw: Option<&str>, default: u32) -> Result<u32, AppError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(raw) => raw,
    };

    match raw.parse::<u32>() {
        Ok(page) if page > 0 => Ok(page),
        _ => Err(AppError::Validation(
            "Page must be a positive integer".to_string(),
        )),
    }
}

/// Accept `value` only when it is one of `accepted`, naming them all otherwise.
pub fn one_of<'a>(param: &str, value: &'a str, accepted: &[&str]) -> Result<&'a str, AppError> {
    if accepted.iter().any(|candidate| *candidate == value) {
        return Ok(value);
    }
    Err(invalid(param, value, accepted))
}

/// Entry keyed by `value` in a static table, naming every key otherwise.
pub fn lookup<'t, T>(
    param: &str,
    value: &str,
    table: &'t [(&'static str, T)],
) -> Result<&'t T, AppError> {
    table
        .iter()
        .find(|(key, _)| *key == value)
        .map(|(_, entry)| entry)
        .ok_or_else(|| {
            let keys: Vec<&str> = table.iter().map(|(key, _)| *key).collect();
            invalid(param, value, &keys)
        })
}

fn invalid(param: &str, value: &str, accepted: &[&str]) -> AppError {
    AppError::Validation(format!(
        "Invalid {param}: {value}. Valid options: {}",
        accepted.join(", ")
    ))
}

/// Percent-encode a value for interpolation into an upstream URL.
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE_SET).to_string()
}

/// Parse a source's fixed origin.
pub fn origin(base: &str) -> Result<Url, AppError> {
    Url::parse(base).map_err(|e| AppError::Transport(format!("Invalid source URL {base}: {e}")))
}
