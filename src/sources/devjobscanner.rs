use serde::Deserialize;
use serde_json::Value;

use crate::dedupe::KeyPolicy;
use crate::error::AppError;
use crate::extract::engine::record;
use crate::extract::{JsonRules, JsonStrategy, SalaryRange, json};
use crate::models::job::{JobsPayload, Pagination, TotalJobs};
use crate::normalize::DiscardPolicy;
use crate::pagination::next_offset;
use crate::sources::{
    JobSource, Scraped, SourceRequest, collect_records, encode, origin, parse_page,
};

const ORIGIN: &str = "https://www.devjobsscanner.com";

static RECORD: JsonRules = JsonRules {
    title: &[JsonStrategy::Text(&["title"])],
    salary: &[JsonStrategy::Derived(salary)],
    location: &[JsonStrategy::Text(&["location"])],
    company_name: &[JsonStrategy::Text(&["company"])],
    company_logo: &[JsonStrategy::Text(&["img"])],
    link: &[JsonStrategy::Text(&["url"])],
    source_id: &[JsonStrategy::Ident(&["id"])],
};

// Any absolute link is canonical here; listings point at many different boards.
const KEYS: KeyPolicy<'static> = KeyPolicy { link_prefix: "http" };

fn salary(job: &Value) -> Option<String> {
    SalaryRange {
        min: json::number(job, &["salaryMin"]),
        max: json::number(job, &["salaryMax"]),
        currency: json::text(job, &["salaryCurrency"]),
    }
    .grouped()
}

#[derive(Debug, Default, Deserialize)]
pub struct DevJobsScannerParams {
    pub keywords: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Default)]
pub struct DevJobsScanner;

impl JobSource for DevJobsScanner {
    type Params = DevJobsScannerParams;

    fn name(&self) -> &'static str {
        "devjobscanner"
    }

    fn plan(&self, params: DevJobsScannerParams) -> Result<SourceRequest, AppError> {
        let keywords = params.keywords.as_deref().unwrap_or("web developer");
        let page = parse_page(params.page.as_deref(), 1)?;

        Ok(SourceRequest {
            url: format!(
                "{ORIGIN}/api/searchFull/?search={}&page={page}&db=prod",
                encode(keywords)
            ),
            origin: origin(ORIGIN)?,
            page,
            cookies: None,
        })
    }

    fn parse(&self, body: &str, request: &SourceRequest) -> Result<Scraped, AppError> {
        let data: Value = serde_json::from_str(body).map_err(|e| AppError::Parse(e.to_string()))?;

        let listed = json::at(&data, &["jobs"])
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        if listed.is_empty() {
            return Ok(Scraped {
                message: "No jobs found",
                payload: JobsPayload {
                    total_jobs: Some(TotalJobs::Count(0)),
                    ..Default::default()
                },
            });
        }

        let skipped = listed.iter().filter(|job| !job.is_object()).count();
        if skipped > 0 {
            tracing::debug!("Skipping {skipped} non-object job entries");
        }

        let candidates = listed
            .iter()
            .filter(|job| job.is_object())
            .map(|job| record(job, &RECORD, &request.origin))
            .collect();
        let jobs = collect_records(candidates, DiscardPolicy::Keep, KEYS);

        let next_page = if jobs.is_empty() {
            None
        } else {
            Some(next_offset(request.page, 1, None))
        };

        Ok(Scraped {
            message: "Success find job",
            payload: JobsPayload {
                total_jobs: Some(TotalJobs::Count(jobs.len())),
                jobs,
                pagination: Some(Pagination {
                    next_page,
                    ..Pagination::current(request.page)
                }),
                ..Default::default()
            },
        })
    }
}
