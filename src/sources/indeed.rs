use scraper::Html;
use serde::Deserialize;

use crate::dedupe::KeyPolicy;
use crate::error::AppError;
use crate::extract::strategy::{attr, text};
use crate::extract::{HtmlRules, extract};
use crate::models::job::{JobsPayload, Pagination};
use crate::normalize::{DiscardPolicy, Field};
use crate::pagination::{Label, PageLinks, PaginationRule, reconstruct};
use crate::sources::{
    JobSource, Scraped, SourceRequest, collect_records, encode, one_of, origin, parse_page,
};

const COUNTRIES: &[&str] = &[
    "id", "nl", "sa", "jp", "cn", "fr", "de", "ar", "ca", "pt", "co", "mx", "my", "tw", "in", "uk",
    "ru", "es", "it",
];

/// Results per page; `page` is a result offset in steps of this size.
const PAGE_SIZE: u32 = 10;

static RULES: HtmlRules = HtmlRules {
    containers: &["li.css-1ac2h1w.eu4oa1w0", "div.job_seen_beacon"],
    title: &[text("h2.jobTitle")],
    salary: &[
        text("ul"),
        text(r#"div[data-testid="attribute_snippet_testid"]"#),
        text("div.salary-snippet-container"),
    ],
    location: &[text(r#"div[data-testid="text-location"]"#)],
    company_name: &[text(r#"span[data-testid="company-name"]"#)],
    company_logo: &[],
    link: &[attr("a.jcs-JobTitle", "href")],
};

// Sponsored slots and separators share the listing markup but carry none of these.
const LISTING_FIELDS: &[Field] = &[Field::Title, Field::CompanyName, Field::Location, Field::Salary];

static PAGES: PaginationRule = PaginationRule::Offset {
    step: PAGE_SIZE,
    links: Some(PageLinks {
        containers: &["ul.css-1g90gv6.eu4oa1w0", r#"nav[role="navigation"]"#],
        links: r#"a[data-testid^="pagination-page-"]"#,
        label: Label::Attr("aria-label"),
        next: None,
    }),
};

#[derive(Debug, Default, Deserialize)]
pub struct IndeedParams {
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Default)]
pub struct Indeed;

impl JobSource for Indeed {
    type Params = IndeedParams;

    fn name(&self) -> &'static str {
        "indeed"
    }

    fn plan(&self, params: IndeedParams) -> Result<SourceRequest, AppError> {
        let keyword = params.keyword.as_deref().unwrap_or("programmer");
        let location = params.location.as_deref().unwrap_or("");
        let country = params.country.as_deref().unwrap_or("id").to_lowercase();
        let country = one_of("country code", &country, COUNTRIES)?;
        let start = parse_page(params.page.as_deref(), 0)?;

        let host = format!("https://{country}.indeed.com");
        let mut url = format!("{host}/jobs?q={}&l={}", encode(keyword), encode(location));
        if start > 0 {
            url.push_str(&format!("&start={start}"));
        }

        Ok(SourceRequest {
            url,
            origin: origin(&host)?,
            page: start,
            cookies: Some("indeed.json"),
        })
    }

    fn parse(&self, body: &str, request: &SourceRequest) -> Result<Scraped, AppError> {
        let doc = Html::parse_document(body);
        let jobs = collect_records(
            extract(&doc, &RULES, &request.origin),
            DiscardPolicy::AllEmpty(LISTING_FIELDS),
            KeyPolicy {
                link_prefix: request.origin.as_str(),
            },
        );
        let state = reconstruct(&doc, &PAGES, request.page, jobs.len());

        Ok(Scraped {
            message: "Success scraping Indeed jobs",
            payload: JobsPayload {
                jobs,
                pagination: Some(Pagination {
                    last_page: state.last_page,
                    next_page: state.next_page,
                    ..Pagination::current(state.current_page)
                }),
                ..Default::default()
            },
        })
    }
}
