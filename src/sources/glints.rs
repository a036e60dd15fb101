use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use serde::Deserialize;

use crate::dedupe::KeyPolicy;
use crate::error::AppError;
use crate::extract::strategy::{attr, text};
use crate::extract::{HtmlRules, Pattern, Strategy, Take, Test, extract};
use crate::models::job::{JobsPayload, Pagination, TotalJobs};
use crate::normalize::DiscardPolicy;
use crate::sources::{
    JobSource, Scraped, SourceRequest, collect_records, encode, one_of, origin, parse_page,
};

const ORIGIN: &str = "https://glints.com";

const JOB_TYPES: &[&str] = &["FULL_TIME", "PART_TIME", "CONTRACT", "INTERNSHIP"];
const WORK_OPTIONS: &[&str] = &["ONSITE", "HYBRID", "REMOTE"];
const LOCATION_NAMES: &[&str] = &[
    "All+Cities/Provinces",
    "Jabodetabek",
    "Banten",
    "Jawa Barat",
    "DKI Jakarta",
    "Jakarta Selatan, DKI Jakarta",
    "Jakarta Barat, DKI Jakarta",
    "Tangerang, Banten",
    "Jakarta Utara, DKI Jakarta",
    "Bandung, Jawa Barat",
];
const LOCATION_IDS: &[&str] = &[
    "",
    "JABODETABEK",
    "82f248c3-3fb3-4600-98fe-4afb47d7558d",
    "06c9e480-42e7-4f11-9d6c-67ad64ccc0f6",
    "78d63064-78a1-4577-8516-036a6c5e903e",
    "078b37b2-e791-4739-958e-c29192e5df3e",
    "af0ed74f-1b51-43cf-a14c-459996e39105",
    "ae3c458e-5947-4833-8f1b-e001ce2fad1d",
    "ea61f4ac-5864-4b2b-a2c8-aa744a2aafea",
    "86a3dc56-1bd7-4cd3-8225-d3e4b976e552",
];

const JOB_LINK: &str = r#"a[href*="/opportunities/jobs/"]"#;

// Word boundaries keep "Rp" inside words like "Enterprise" from counting.
static CURRENCY_HINT: Pattern =
    LazyLock::new(|| Regex::new(r"\bRp|\bIDR|\$").expect("currency hint pattern is valid"));
static MONEY: Pattern = LazyLock::new(|| {
    Regex::new(r"Rp[\d,.\s]+|IDR[\d,.\s]+|\$[\d,.\s]+").expect("money pattern is valid")
});

static RULES: HtmlRules = HtmlRules {
    containers: &[
        r#"div[role="presentation"][aria-label="Job Card"]"#,
        r#"div[class*="JobCard"]"#,
    ],
    title: &[text("h2"), text("h3"), text(JOB_LINK)],
    salary: &[
        Strategy::Scan {
            selector: "span",
            tests: &[Test::ClassContains("salary"), Test::TextMatches(&CURRENCY_HINT)],
            take: Take::Text,
        },
        Strategy::Pattern(&MONEY),
    ],
    location: &[
        Strategy::Scan {
            selector: "span",
            tests: &[Test::ClassContains("location")],
            take: Take::AttrOrText("title"),
        },
        attr("span[title]", "title"),
    ],
    company_name: &[Strategy::Scan {
        selector: "a",
        tests: &[
            Test::ClassContains("company"),
            Test::AttrContains("href", "/companies/"),
        ],
        take: Take::Text,
    }],
    company_logo: &[attr("img", "src")],
    link: &[attr(JOB_LINK, "href")],
};

#[derive(Debug, Default, Deserialize)]
pub struct GlintsParams {
    pub work: Option<String>,
    pub job_type: Option<String>,
    pub option_work: Option<String>,
    pub location_id: Option<String>,
    pub location_name: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Default)]
pub struct Glints;

impl JobSource for Glints {
    type Params = GlintsParams;

    fn name(&self) -> &'static str {
        "glints"
    }

    fn plan(&self, params: GlintsParams) -> Result<SourceRequest, AppError> {
        let work = params.work.as_deref().unwrap_or("Programmer");
        let job_type = one_of("job_type", params.job_type.as_deref().unwrap_or("FULL_TIME"), JOB_TYPES)?;
        let option_work = one_of(
            "option_work",
            params.option_work.as_deref().unwrap_or("ONSITE"),
            WORK_OPTIONS,
        )?;
        let location_id = one_of(
            "location_id",
            params.location_id.as_deref().unwrap_or(""),
            LOCATION_IDS,
        )?;
        let location_name = one_of(
            "location_name",
            params.location_name.as_deref().unwrap_or("All+Cities/Provinces"),
            LOCATION_NAMES,
        )?;
        let page = parse_page(params.page.as_deref(), 1)?;

        let url = format!(
            "{ORIGIN}/id/opportunities/jobs/explore?keyword={}+&country=ID&locationId={}&locationName={}\
             &lowestLocationLevel=1&jobTypes={job_type}&workArrangementOptions={option_work}&page={page}",
            encode(work),
            encode(location_id),
            encode(location_name),
        );

        Ok(SourceRequest {
            url,
            origin: origin(ORIGIN)?,
            page,
            cookies: Some("glints.json"),
        })
    }

    fn parse(&self, body: &str, request: &SourceRequest) -> Result<Scraped, AppError> {
        let doc = Html::parse_document(body);
        let jobs = collect_records(
            extract(&doc, &RULES, &request.origin),
            DiscardPolicy::Keep,
            KeyPolicy { link_prefix: ORIGIN },
        );

        Ok(Scraped {
            message: "Success find job",
            payload: JobsPayload {
                total_jobs: Some(TotalJobs::Count(jobs.len())),
                jobs,
                pagination: Some(Pagination::current(request.page)),
                ..Default::default()
            },
        })
    }
}
