use scraper::Html;
use serde::Deserialize;
use url::Url;

use crate::dedupe::KeyPolicy;
use crate::error::AppError;
use crate::extract::strategy::{attr, element_text, first_of, select, text};
use crate::extract::{HtmlRules, Strategy, extract, link};
use crate::models::job::{JobsPayload, NOT_AVAILABLE, Pagination, SuggestionLocation, TotalJobs};
use crate::normalize::DiscardPolicy;
use crate::pagination::{Label, PageLinks, PaginationRule, reconstruct};
use crate::sources::{
    JobSource, Scraped, SourceRequest, collect_records, encode, lookup, origin, parse_page,
};

/// Country code to board host and the path prefix listings are served under.
const COUNTRIES: &[(&str, (&str, &str))] = &[
    ("id", ("id.jobstreet.com", "/id")),
    ("my", ("my.jobstreet.com", "")),
    ("sg", ("sg.jobstreet.com", "")),
    ("th", ("th.jobsdb.com", "/th")),
    ("hk", ("hk.jobsdb.com", "")),
    ("nz", ("www.seek.co.nz", "")),
    ("au", ("www.seek.com.au", "")),
];

const JOB_TITLE: &str = r#"a[data-automation="jobTitle"]"#;
const TOTAL_JOBS: &[Strategy] = &[
    text(r#"#SearchSummary[data-automation="totalJobsMessage"] [data-automation="totalJobsCount"]"#),
    text(r#"[data-automation="totalJobsCount"]"#),
];
const SUGGESTION_BLOCK: &str = "span._1ungv2r0._1viagsn4z._1viagsnr";
const SUGGESTION_LINK: &str = r#"a[data-automation*="didYouMeanLocation"]"#;

static RULES: HtmlRules = HtmlRules {
    containers: &[
        r#"article[data-automation="normalJob"]"#,
        r#"article[data-card-type="JobCard"]"#,
    ],
    title: &[text(JOB_TITLE)],
    salary: &[text(r#"span[data-automation="jobSalary"]"#)],
    location: &[
        Strategy::Joined {
            selector: r#"a[data-automation="jobLocation"]"#,
            separator: ", ",
        },
        text(r#"span[data-automation="jobLocation"]"#),
    ],
    company_name: &[
        text(r#"a[data-automation="jobCompany"]"#),
        text(r#"span[data-automation="jobCompany"]"#),
    ],
    company_logo: &[attr(r#"div[data-automation="company-logo-container"] img"#, "src")],
    link: &[attr(JOB_TITLE, "href")],
};

static PAGES: PaginationRule = PaginationRule::LinkList(PageLinks {
    containers: &[
        "ul._1ungv2r0._1ungv2r3._1viagsn5b._1viagsngv",
        r#"nav[aria-label="Pagination of results"]"#,
    ],
    links: r#"a[data-automation*="page-"]"#,
    label: Label::Text,
    next: Some(r#"a[rel="nofollow next"]"#),
});

#[derive(Debug, Default, Deserialize)]
pub struct JobStreetParams {
    pub work: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Default)]
pub struct JobStreet;

impl JobSource for JobStreet {
    type Params = JobStreetParams;

    fn name(&self) -> &'static str {
        "jobstreet"
    }

    fn plan(&self, params: JobStreetParams) -> Result<SourceRequest, AppError> {
        let work = params.work.as_deref().unwrap_or("Programmer");
        let location = params.location.as_deref().unwrap_or("").trim();
        let country = params.country.as_deref().unwrap_or("id").to_lowercase();
        let (host, prefix) = lookup("country code", &country, COUNTRIES)?;
        let page = parse_page(params.page.as_deref(), 1)?;

        let mut url = format!("https://{host}{prefix}/{}-jobs", encode(work));
        if !location.is_empty() {
            url.push_str(&format!("/in-{}", encode(location)));
        }
        url.push_str(&format!("?page={page}"));

        Ok(SourceRequest {
            url,
            origin: origin(&format!("https://{host}"))?,
            page,
            cookies: None,
        })
    }

    fn parse(&self, body: &str, request: &SourceRequest) -> Result<Scraped, AppError> {
        let doc = Html::parse_document(body);
        let jobs = collect_records(
            extract(&doc, &RULES, &request.origin),
            DiscardPolicy::Keep,
            KeyPolicy {
                link_prefix: request.origin.as_str(),
            },
        );

        let total_jobs = first_of(TOTAL_JOBS, doc.root_element())
            .unwrap_or_else(|| "0".to_string());
        let state = reconstruct(&doc, &PAGES, request.page, jobs.len());

        Ok(Scraped {
            message: "Success find job",
            payload: JobsPayload {
                total_jobs: Some(TotalJobs::Text(total_jobs)),
                jobs,
                pagination: Some(Pagination {
                    last_page: state.last_page,
                    has_next: state.has_next,
                    ..Pagination::current(state.current_page)
                }),
                suggestion_location: Some(suggestions(&doc, &request.origin)),
                ..Default::default()
            },
        })
    }
}

/// "Did you mean" location links, scoped to the suggestion banner when present.
fn suggestions(doc: &Html, origin: &Url) -> Vec<SuggestionLocation> {
    let root = doc.root_element();
    let scope = select(root, SUGGESTION_BLOCK).into_iter().next().unwrap_or(root);

    select(scope, SUGGESTION_LINK)
        .into_iter()
        .map(|anchor| SuggestionLocation {
            location_name: element_text(anchor).trim().to_string(),
            url: anchor
                .value()
                .attr("href")
                .and_then(|href| link::resolve(origin, href))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        })
        .collect()
}
