use serde::Serialize;

/// Placeholder stored in any field the extractors could not resolve.
pub const NOT_AVAILABLE: &str = "N/A";

/// One advertised opening in the canonical output shape.
///
/// Every field is either a non-empty trimmed string or [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    pub title: String,
    pub salary: String,
    pub location: String,
    pub company_name: String,
    pub company_logo: String,
    pub link: String,
    /// Identifier the source assigned to the listing, used only for deduplication.
    #[serde(skip)]
    pub source_id: Option<String>,
}

impl JobRecord {
    pub fn has_title(&self) -> bool {
        is_resolved(&self.title)
    }

    pub fn has_company(&self) -> bool {
        is_resolved(&self.company_name)
    }
}

pub fn is_resolved(value: &str) -> bool {
    value != NOT_AVAILABLE
}

/// Extractor output for one listing before sentinel filling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCandidate {
    pub title: Option<String>,
    pub salary: Option<String>,
    pub location: Option<String>,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub link: Option<String>,
    pub source_id: Option<String>,
}

/// `total_jobs` is a rendered counter on some boards and a plain count on others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TotalJobs {
    Count(usize),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
    /// `Some(None)` is serialized as an explicit `null` cursor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<Option<u32>>,
}

impl Pagination {
    pub fn current(current_page: u32) -> Self {
        Self {
            current_page,
            last_page: None,
            has_next: None,
            next_page: None,
        }
    }
}

/// "Showing X to Y of Z" counters, emitted as top-level payload fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageCounters {
    pub total_results: u32,
    pub showing_start: u32,
    pub showing_end: u32,
    pub total_pages: u32,
    pub current_page: u32,
    pub is_last_page: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionLocation {
    pub location_name: String,
    pub url: String,
}

/// Success payload shared by all job endpoints.
#[derive(Debug, Default, Serialize)]
pub struct JobsPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_jobs: Option<TotalJobs>,
    pub jobs: Vec<JobRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(flatten)]
    pub counters: Option<PageCounters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion_location: Option<Vec<SuggestionLocation>>,
}
