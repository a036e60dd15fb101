use scraper::{ElementRef, Html};
use serde_json::Value;
use url::Url;

use crate::extract::strategy::{Strategy, first_of, select};
use crate::extract::{json, link};
use crate::models::job::RawCandidate;

/// Static description of how one HTML source lays out its listings.
#[derive(Debug)]
pub struct HtmlRules {
    /// Selectors for one listing, tried in order until one matches anything.
    pub containers: &'static [&'static str],
    pub title: &'static [Strategy],
    pub salary: &'static [Strategy],
    pub location: &'static [Strategy],
    pub company_name: &'static [Strategy],
    pub company_logo: &'static [Strategy],
    /// Yields an href; resolved against the request origin.
    pub link: &'static [Strategy],
}

/// Run `rules` over a parsed page, one candidate per listing container.
pub fn extract(doc: &Html, rules: &HtmlRules, origin: &Url) -> Vec<RawCandidate> {
    containers(doc, rules.containers)
        .into_iter()
        .map(|card| candidate(card, rules, origin))
        .collect()
}

/// Elements matched by the first selector in `selectors` that matches anything.
pub fn containers<'a>(doc: &'a Html, selectors: &[&str]) -> Vec<ElementRef<'a>> {
    for (i, css) in selectors.iter().enumerate() {
        let found = select(doc.root_element(), css);
        if found.is_empty() {
            continue;
        }
        if i > 0 {
            tracing::debug!(
                "Primary container selector missed; {css:?} matched {} elements",
                found.len()
            );
        }
        return found;
    }

    tracing::debug!("No listing containers matched {selectors:?}");
    Vec::new()
}

pub fn candidate(card: ElementRef<'_>, rules: &HtmlRules, origin: &Url) -> RawCandidate {
    RawCandidate {
        title: first_of(rules.title, card),
        salary: first_of(rules.salary, card),
        location: first_of(rules.location, card),
        company_name: first_of(rules.company_name, card),
        company_logo: first_of(rules.company_logo, card),
        link: first_of(rules.link, card).and_then(|href| link::resolve(origin, &href)),
        source_id: None,
    }
}

/// One step of a fallback chain over a JSON record.
#[derive(Debug, Clone, Copy)]
pub enum JsonStrategy {
    /// Non-empty string at the path.
    Text(&'static [&'static str]),
    /// String or integer identifier at the path.
    Ident(&'static [&'static str]),
    /// Source-specific derivation over the whole record.
    Derived(fn(&Value) -> Option<String>),
}

impl JsonStrategy {
    pub fn apply(&self, record: &Value) -> Option<String> {
        match *self {
            JsonStrategy::Text(path) => json::text(record, path),
            JsonStrategy::Ident(path) => json::ident(record, path),
            JsonStrategy::Derived(derive) => derive(record),
        }
    }
}

/// Field mapping for a source that publishes structured records.
#[derive(Debug)]
pub struct JsonRules {
    pub title: &'static [JsonStrategy],
    pub salary: &'static [JsonStrategy],
    pub location: &'static [JsonStrategy],
    pub company_name: &'static [JsonStrategy],
    pub company_logo: &'static [JsonStrategy],
    pub link: &'static [JsonStrategy],
    pub source_id: &'static [JsonStrategy],
}

/// Map one JSON record to a candidate. Never fails: every missing or
/// mis-shaped field is simply unresolved.
pub fn record(value: &Value, rules: &JsonRules, origin: &Url) -> RawCandidate {
    let pick = |chain: &[JsonStrategy]| chain.iter().find_map(|s| s.apply(value));

    RawCandidate {
        title: pick(rules.title),
        salary: pick(rules.salary),
        location: pick(rules.location),
        company_name: pick(rules.company_name),
        company_logo: pick(rules.company_logo),
        link: pick(rules.link).and_then(|href| link::resolve(origin, &href)),
        source_id: pick(rules.source_id),
    }
}
