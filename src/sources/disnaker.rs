use scraper::Html;
use serde::Deserialize;

use crate::dedupe::KeyPolicy;
use crate::error::AppError;
use crate::extract::strategy::{attr, text};
use crate::extract::{HtmlRules, Strategy, Take, extract};
use crate::models::job::{JobsPayload, PageCounters};
use crate::normalize::{DiscardPolicy, Field};
use crate::pagination::{Label, PageLinks, PaginationRule, reconstruct};
use crate::sources::{JobSource, Scraped, SourceRequest, collect_records, origin, parse_page};

const ORIGIN: &str = "https://disnaker.bandung.go.id";

static RULES: HtmlRules = HtmlRules {
    containers: &["div.col-sm-3.loker", "div.loker"],
    title: &[text("b")],
    // Salaries are only shown on the detail page.
    salary: &[Strategy::Fixed("Klik open untuk info gaji")],
    location: &[Strategy::First {
        selector: r#"p[style*="font-size:10px"]"#,
        take: Take::FlatText,
    }],
    company_name: &[text(r#"p[style*="font-size:13px"]"#)],
    company_logo: &[attr("img", "src")],
    link: &[attr("a.btn.btn-sm.btn-danger", "href")],
};

const LISTING_FIELDS: &[Field] = &[
    Field::CompanyLogo,
    Field::CompanyName,
    Field::Title,
    Field::Location,
];

static PAGES: PaginationRule = PaginationRule::Counter {
    summary: &["p.small.text-muted"],
    links: PageLinks {
        containers: &["ul.pagination"],
        links: "a.page-link",
        label: Label::Text,
        next: None,
    },
};

#[derive(Debug, Default, Deserialize)]
pub struct DisnakerParams {
    pub page: Option<String>,
}

#[derive(Debug, Default)]
pub struct DisnakerBandung;

impl JobSource for DisnakerBandung {
    type Params = DisnakerParams;

    fn name(&self) -> &'static str {
        "disnaker_bandung"
    }

    fn plan(&self, params: DisnakerParams) -> Result<SourceRequest, AppError> {
        let page = parse_page(params.page.as_deref(), 1)?;
        Ok(SourceRequest {
            url: format!("{ORIGIN}/loker?page={page}"),
            origin: origin(ORIGIN)?,
            page,
            cookies: None,
        })
    }

    fn parse(&self, body: &str, request: &SourceRequest) -> Result<Scraped, AppError> {
        let doc = Html::parse_document(body);
        let jobs = collect_records(
            extract(&doc, &RULES, &request.origin),
            DiscardPolicy::AllEmpty(LISTING_FIELDS),
            KeyPolicy { link_prefix: ORIGIN },
        );
        let state = reconstruct(&doc, &PAGES, request.page, jobs.len());

        let counters = PageCounters {
            total_results: state.total_results.unwrap_or(0),
            showing_start: state.showing_start.unwrap_or(0),
            showing_end: state.showing_end.unwrap_or(0),
            total_pages: state.total_pages.unwrap_or(0),
            current_page: state.current_page,
            is_last_page: state.is_last_page.unwrap_or(true),
        };

        if state.past_end {
            return Ok(Scraped {
                message: "No more data available.",
                payload: JobsPayload {
                    counters: Some(counters),
                    ..Default::default()
                },
            });
        }

        Ok(Scraped {
            message: "Success scraping Disnaker Bandung jobs",
            payload: JobsPayload {
                jobs,
                counters: Some(counters),
                ..Default::default()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const PAGE_TWO: &str = r#"
        <div class="row">
          <div class="col-sm-3 loker">
            <img src="/storage/logo/alpha.png">
            <p style="font-size:13px">CV Alpha</p>
            <b>Staff Gudang</b>
            <p style="font-size:10px">Kota
               Bandung</p>
            <a class="btn btn-sm btn-danger" href="/loker/detail/101">Open</a>
          </div>
          <div class="col-sm-3 loker"><div class="ad-slot"></div></div>
          <div class="col-sm-3 loker">
            <p style="font-size:13px">PT Beta</p>
            <b>Admin</b>
            <a class="btn btn-sm btn-danger" href="https://disnaker.bandung.go.id/loker/detail/102">Open</a>
          </div>
        </div>
        <p class="small text-muted">Showing <span class="fw-semibold">13</span> to
          <span class="fw-semibold">24</span> of <span class="fw-semibold">30</span> results</p>
        <ul class="pagination">
          <li><a class="page-link">&lsaquo;</a></li>
          <li><a class="page-link">1</a></li>
          <li><a class="page-link">2</a></li>
          <li><a class="page-link">3</a></li>
          <li><a class="page-link">&rsaquo;</a></li>
        </ul>"#;

    fn request(page: &str) -> SourceRequest {
        DisnakerBandung
            .plan(DisnakerParams {
                page: Some(page.into()),
            })
            .unwrap()
    }

    #[test]
    fn extracts_listings_and_counters() {
        let scraped = DisnakerBandung.parse(PAGE_TWO, &request("2")).unwrap();
        assert_eq!(scraped.message, "Success scraping Disnaker Bandung jobs");

        let payload = scraped.payload;
        assert_eq!(payload.jobs.len(), 2);

        let first = &payload.jobs[0];
        assert_eq!(first.title, "Staff Gudang");
        assert_eq!(first.company_name, "CV Alpha");
        assert!(first.location.starts_with("Kota ") && first.location.ends_with("Bandung"));
        assert!(!first.location.contains('\n'));
        assert_eq!(first.salary, "Klik open untuk info gaji");
        assert_eq!(first.company_logo, "/storage/logo/alpha.png");
        assert_eq!(first.link, "https://disnaker.bandung.go.id/loker/detail/101");

        assert_eq!(
            payload.counters,
            Some(PageCounters {
                total_results: 30,
                showing_start: 13,
                showing_end: 24,
                total_pages: 3,
                current_page: 2,
                is_last_page: false,
            })
        );
    }

    #[test]
    fn last_page_when_end_reaches_total() {
        let html = PAGE_TWO.replace(">24<", ">30<");
        let scraped = DisnakerBandung.parse(&html, &request("3")).unwrap();
        assert_eq!(scraped.payload.counters.map(|c| c.is_last_page), Some(true));
    }

    #[test]
    fn past_the_end_is_not_an_error() {
        let scraped = DisnakerBandung
            .parse("<div class=\"row\"><p>Belum ada lowongan.</p></div>", &request("99"))
            .unwrap();
        assert_eq!(scraped.message, "No more data available.");

        let body = serde_json::to_value(&scraped.payload).unwrap();
        assert_eq!(
            body,
            json!({
                "jobs": [],
                "total_results": 0,
                "showing_start": 0,
                "showing_end": 0,
                "total_pages": 0,
                "current_page": 99,
                "is_last_page": true
            })
        );
    }
}
