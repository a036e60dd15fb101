//! Page-state reconstruction from whatever metadata a source renders.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use crate::extract::strategy::{element_text, select};

static SHOWING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)showing\s+(\d[\d.,]*)\s+to\s+(\d[\d.,]*)\s+of\s+(\d[\d.,]*)")
        .expect("showing-counter pattern is valid")
});

/// Where a page link keeps its page number.
#[derive(Debug, Clone, Copy)]
pub enum Label {
    Text,
    Attr(&'static str),
}

/// Rendered page-number links.
#[derive(Debug)]
pub struct PageLinks {
    /// Pagination containers, tried in order; empty means the whole page.
    pub containers: &'static [&'static str],
    pub links: &'static str,
    pub label: Label,
    /// Selector of a "next page" control, when the source renders one.
    pub next: Option<&'static str>,
}

#[derive(Debug)]
pub enum PaginationRule {
    /// "Showing X to Y of Z" text plus a numbered link list.
    Counter {
        summary: &'static [&'static str],
        links: PageLinks,
    },
    /// Numbered link list; the highest label is the last page.
    LinkList(PageLinks),
    /// Forward cursor `current + step`, capped at `last_page * step` when links exist.
    Offset {
        step: u32,
        links: Option<PageLinks>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: u32,
    pub total_results: Option<u32>,
    pub showing_start: Option<u32>,
    pub showing_end: Option<u32>,
    pub total_pages: Option<u32>,
    pub last_page: Option<u32>,
    pub has_next: Option<bool>,
    pub next_page: Option<Option<u32>>,
    pub is_last_page: Option<bool>,
    /// The request ran past the final page: no listings, no counters, no links.
    pub past_end: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub start: u32,
    pub end: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkScan {
    pub last_page: Option<u32>,
    pub has_next: bool,
}

/// Derive page state for `requested`, given how many listings the page held.
pub fn reconstruct(doc: &Html, rule: &PaginationRule, requested: u32, listed: usize) -> PaginationState {
    match rule {
        PaginationRule::Counter { summary, links } => {
            let counters = counters(doc, summary).unwrap_or_default();
            let total_pages = scan_links(doc, links).last_page.unwrap_or(0);
            let silent = counters == Counters::default() && total_pages == 0;

            let past_end = silent && listed == 0;
            if past_end {
                tracing::debug!("Page {requested} has no listings or counters; treating as past the end");
            }

            PaginationState {
                current_page: requested,
                total_results: Some(counters.total),
                showing_start: Some(counters.start),
                showing_end: Some(counters.end),
                total_pages: Some(total_pages),
                is_last_page: Some(past_end || counters.end == counters.total),
                past_end,
                ..Default::default()
            }
        }
        PaginationRule::LinkList(links) => {
            let scan = scan_links(doc, links);
            PaginationState {
                current_page: requested,
                last_page: Some(scan.last_page.unwrap_or(1)),
                has_next: links.next.map(|_| scan.has_next),
                ..Default::default()
            }
        }
        PaginationRule::Offset { step, links } => {
            let last_page = links
                .as_ref()
                .map(|links| scan_links(doc, links).last_page.unwrap_or(1));
            PaginationState {
                current_page: requested,
                last_page,
                next_page: Some(next_offset(requested, *step, last_page)),
                ..Default::default()
            }
        }
    }
}

/// Parse the first "Showing X to Y of Z" summary found under `selectors`.
pub fn counters(doc: &Html, selectors: &[&str]) -> Option<Counters> {
    selectors
        .iter()
        .flat_map(|css| select(doc.root_element(), css))
        .find_map(|summary| {
            let text = element_text(summary);
            let caps = SHOWING.captures(&text)?;
            Some(Counters {
                start: number(&caps[1])?,
                end: number(&caps[2])?,
                total: number(&caps[3])?,
            })
        })
}

pub fn scan_links(doc: &Html, rule: &PageLinks) -> LinkScan {
    let Some(scope) = scope(doc, rule.containers) else {
        return LinkScan::default();
    };

    let last_page = select(scope, rule.links)
        .into_iter()
        .filter_map(|link| match rule.label {
            Label::Text => leading_int(&element_text(link)),
            Label::Attr(name) => link.value().attr(name).and_then(leading_int),
        })
        .max();

    let has_next = rule
        .next
        .is_some_and(|css| !select(scope, css).is_empty());

    LinkScan {
        last_page,
        has_next,
    }
}

/// Best-effort forward cursor. With a `last_page` bound the cursor stops at
/// `last_page * step`; without one it is never validated.
pub fn next_offset(current: u32, step: u32, last_page: Option<u32>) -> Option<u32> {
    let next = current.checked_add(step)?;
    match last_page {
        Some(last) if u64::from(next) >= u64::from(last) * u64::from(step) => None,
        _ => Some(next),
    }
}

fn scope<'a>(doc: &'a Html, containers: &[&str]) -> Option<ElementRef<'a>> {
    if containers.is_empty() {
        return Some(doc.root_element());
    }
    containers
        .iter()
        .find_map(|css| select(doc.root_element(), css).into_iter().next())
}

/// Leading integer of a label, ignoring surrounding whitespace: `" 12 "` and `"3 of 9"` parse.
fn leading_int(label: &str) -> Option<u32> {
    let label = label.trim();
    let end = label
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(label.len());
    label[..end].parse().ok()
}

fn number(raw: &str) -> Option<u32> {
    raw.chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .ok()
}
