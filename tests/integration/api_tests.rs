use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use tower::ServiceExt;

use crate::common::{API_VERSION, CannedFetcher, get_json, setup_test_app};

const GLINTS_PAGE: &str = r#"
    <div role="presentation" aria-label="Job Card">
      <h2>Backend Engineer</h2>
      <a href="/id/companies/acme/1">PT Acme</a>
      <span class="LocationWrapper" title="Jakarta Selatan, DKI Jakarta">Jakarta Selatan</span>
      <span class="SalaryWrapper">Rp 8.000.000 - 12.000.000</span>
      <a href="/id/opportunities/jobs/backend-engineer/aaa-111">Detail</a>
    </div>
    <div role="presentation" aria-label="Job Card">
      <img src="https://images.glints.com/beta.png">
      <h2>Frontend Developer</h2>
      <a href="/id/companies/beta/2">PT Beta</a>
      <span class="LocationWrapper" title="Bandung, Jawa Barat">Bandung</span>
      <span class="SalaryWrapper">IDR 6.000.000</span>
      <a href="/id/opportunities/jobs/frontend-developer/bbb-222">Detail</a>
    </div>
    <div role="presentation" aria-label="Job Card">
      <h2>Backend Engineer</h2>
      <a href="/id/opportunities/jobs/backend-engineer/aaa-111">Detail</a>
    </div>"#;

#[tokio::test]
async fn health_reports_version() {
    let app = setup_test_app(CannedFetcher::new());
    let (status, body) = get_json(app.router, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "success",
            "message": "Job Scraper API is running",
            "version": API_VERSION
        })
    );
}

#[tokio::test]
async fn info_lists_endpoints() {
    let app = setup_test_app(CannedFetcher::new());
    let (status, body) = get_json(app.router, "/api").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], API_VERSION);
    assert_eq!(body["endpoints"]["disnaker_bandung"], "/api/disnaker_bandung");
    assert_eq!(body["endpoints"]["devjobscanner"], "/api/devjobscanner");
}

#[tokio::test]
async fn root_redirects_to_api() {
    let app = setup_test_app(CannedFetcher::new());
    let response = app
        .router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[header::LOCATION], "/api");
}

#[tokio::test]
async fn unknown_routes_get_failure_envelope() {
    for uri in ["/nope", "/api/linkedin"] {
        let app = setup_test_app(CannedFetcher::new());
        let (status, body) = get_json(app.router, uri).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({ "status": "failed", "message": "Route not found" }));
    }
}

#[tokio::test]
async fn invalid_enum_lists_accepted_values() {
    let app = setup_test_app(CannedFetcher::new());
    let (status, body) = get_json(app.router, "/api/glints?option_work=MOON").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "failed");
    assert_eq!(
        body["message"],
        "Invalid option_work: MOON. Valid options: ONSITE, HYBRID, REMOTE"
    );
    assert!(body.get("data").is_none());
    assert!(app.fetcher.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_country_lists_accepted_values() {
    let app = setup_test_app(CannedFetcher::new());
    let (status, body) = get_json(app.router, "/api/jobstreet?country=us").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Invalid country code: us. Valid options: id, my, sg, th, hk, nz, au"
    );
}

#[tokio::test]
async fn non_positive_page_is_rejected() {
    for page in ["0", "-1", "two"] {
        let app = setup_test_app(CannedFetcher::new());
        let (status, body) =
            get_json(app.router, &format!("/api/disnaker_bandung?page={page}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "page={page}");
        assert_eq!(body["message"], "Page must be a positive integer");
    }
}

#[tokio::test]
async fn glints_duplicate_cards_collapse() {
    let app = setup_test_app(CannedFetcher::new().body("glints.com", GLINTS_PAGE));
    let (status, body) = get_json(app.router, "/api/glints?work=Rust&page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Success find job");

    let data = &body["data"];
    assert_eq!(data["total_jobs"], 2);
    assert_eq!(data["pagination"], json!({ "current_page": 2 }));

    let jobs = data["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0]["company_name"], "PT Acme");
    assert_eq!(
        jobs[1],
        json!({
            "title": "Frontend Developer",
            "salary": "IDR 6.000.000",
            "location": "Bandung, Jawa Barat",
            "company_name": "PT Beta",
            "company_logo": "https://images.glints.com/beta.png",
            "link": "https://glints.com/id/opportunities/jobs/frontend-developer/bbb-222"
        })
    );

    let calls = app.fetcher.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.contains("keyword=Rust+&"));
    assert_eq!(
        calls[0].1,
        Some(PathBuf::from("/etc/jobscraper/cookies/glints.json"))
    );
}

#[tokio::test]
async fn past_last_page_is_empty_success() {
    let app = setup_test_app(
        CannedFetcher::new().body("disnaker.bandung.go.id", "<div class=\"row\"></div>"),
    );
    let (status, body) = get_json(app.router, "/api/disnaker_bandung?page=500").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No more data available.");
    assert_eq!(body["data"]["jobs"], json!([]));
    assert_eq!(body["data"]["is_last_page"], true);
    assert_eq!(body["data"]["current_page"], 500);
}

#[tokio::test]
async fn transport_failure_is_500() {
    let app = setup_test_app(CannedFetcher::new().failure("remoteok.com", "timeout of 30000ms exceeded"));
    let (status, body) = get_json(app.router, "/api/remoteok").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "status": "failed", "message": "Error: timeout of 30000ms exceeded" })
    );
}

#[tokio::test]
async fn malformed_api_body_is_parse_failure() {
    let app = setup_test_app(CannedFetcher::new().body("devjobsscanner.com", "<html>502</html>"));
    let (status, body) = get_json(app.router, "/api/devjobscanner?keywords=rust").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Failed to parse response: "), "{message}");
}

#[tokio::test]
async fn indeed_sends_cookie_export_and_offset() {
    let app = setup_test_app(CannedFetcher::new().body("indeed.com", "<main></main>"));
    let (status, body) = get_json(app.router, "/api/indeed?country=uk&page=30").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Success scraping Indeed jobs");
    assert_eq!(body["data"]["pagination"]["current_page"], 30);
    assert_eq!(body["data"]["pagination"]["next_page"], serde_json::Value::Null);

    let calls = app.fetcher.calls.lock().unwrap();
    assert_eq!(calls[0].0, "https://uk.indeed.com/jobs?q=programmer&l=&start=30");
    assert_eq!(
        calls[0].1,
        Some(PathBuf::from("/etc/jobscraper/cookies/indeed.json"))
    );
}
