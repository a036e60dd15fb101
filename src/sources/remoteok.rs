use scraper::{ElementRef, Html};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::dedupe::KeyPolicy;
use crate::error::AppError;
use crate::extract::engine::record;
use crate::extract::strategy::{element_text, select};
use crate::extract::{JsonRules, JsonStrategy, SalaryRange, json, link};
use crate::models::job::{JobsPayload, Pagination, RawCandidate};
use crate::normalize::DiscardPolicy;
use crate::pagination::{PaginationRule, reconstruct};
use crate::sources::{
    JobSource, Scraped, SourceRequest, collect_records, encode, origin, parse_page,
};

const ORIGIN: &str = "https://remoteok.com";
const PAGE_SIZE: u32 = 10;

const POSTING: &str = r#"script[type="application/ld+json"]"#;
/// How many following siblings of a posting may hold its job link.
const LINK_LOOKAHEAD: usize = 5;

static RECORD: JsonRules = JsonRules {
    title: &[JsonStrategy::Text(&["title"])],
    salary: &[JsonStrategy::Derived(salary)],
    location: &[JsonStrategy::Derived(location)],
    company_name: &[JsonStrategy::Text(&["hiringOrganization", "name"])],
    company_logo: &[
        JsonStrategy::Text(&["image"]),
        JsonStrategy::Text(&["hiringOrganization", "logo", "url"]),
        JsonStrategy::Text(&["hiringOrganization", "logo"]),
    ],
    link: &[],
    source_id: &[],
};

static PAGES: PaginationRule = PaginationRule::Offset { step: 1, links: None };

fn salary(posting: &Value) -> Option<String> {
    SalaryRange {
        min: json::number(posting, &["baseSalary", "value", "minValue"]),
        max: json::number(posting, &["baseSalary", "value", "maxValue"]),
        currency: json::text(posting, &["baseSalary", "currency"]),
    }
    .compact()
}

fn location(posting: &Value) -> Option<String> {
    let name = json::at(posting, &["applicantLocationRequirements"])
        .and_then(json::first)
        .and_then(|requirement| json::text(requirement, &["name"]));

    match name.as_deref() {
        None | Some("Anywhere") => Some("🌏 Worldwide".to_string()),
        Some(name) => Some(format!("🌏 {name}")),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RemoteOkParams {
    pub keywords: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Default)]
pub struct RemoteOk;

impl JobSource for RemoteOk {
    type Params = RemoteOkParams;

    fn name(&self) -> &'static str {
        "remoteok"
    }

    fn plan(&self, params: RemoteOkParams) -> Result<SourceRequest, AppError> {
        let keywords = params.keywords.as_deref().unwrap_or("engineer");
        let page = parse_page(params.page.as_deref(), 1)?;
        let offset = (page - 1).saturating_mul(PAGE_SIZE);

        Ok(SourceRequest {
            url: format!(
                "{ORIGIN}/?location=Worldwide&tags={}&action=get_jobs&premium=0&offset={offset}",
                encode(keywords)
            ),
            origin: origin(ORIGIN)?,
            page,
            cookies: None,
        })
    }

    fn parse(&self, body: &str, request: &SourceRequest) -> Result<Scraped, AppError> {
        let doc = Html::parse_document(body);
        let candidates = select(doc.root_element(), POSTING)
            .into_iter()
            .filter_map(|script| posting(script, &request.origin))
            .collect();

        let jobs = collect_records(candidates, DiscardPolicy::Keep, KeyPolicy { link_prefix: ORIGIN });
        let state = reconstruct(&doc, &PAGES, request.page, jobs.len());

        Ok(Scraped {
            message: "Success scraping RemoteOK jobs",
            payload: JobsPayload {
                jobs,
                pagination: Some(Pagination {
                    next_page: state.next_page,
                    ..Pagination::current(state.current_page)
                }),
                ..Default::default()
            },
        })
    }
}

/// One JSON-LD block. Blocks that are not well-formed `JobPosting`s are skipped.
fn posting(script: ElementRef<'_>, origin: &Url) -> Option<RawCandidate> {
    let value: Value = match serde_json::from_str(element_text(script).trim()) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Skipping unparseable JSON-LD block: {e}");
            return None;
        }
    };

    if json::text(&value, &["@type"]).as_deref() != Some("JobPosting") {
        return None;
    }

    let mut candidate = record(&value, &RECORD, origin);
    candidate.link = sibling_link(script).and_then(|href| link::resolve(origin, href));
    Some(candidate)
}

/// The job page anchor rendered shortly after a posting's script block.
fn sibling_link<'a>(script: ElementRef<'a>) -> Option<&'a str> {
    script
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take(LINK_LOOKAHEAD)
        .filter(|el| el.value().name() == "a")
        .find_map(|anchor| {
            anchor
                .value()
                .attr("href")
                .filter(|href| href.contains("/remote-jobs/"))
        })
}
