//! Field extraction strategies.
//!
//! A field rule is a static, ordered slice of [`Strategy`] values. The first
//! strategy that yields a non-empty trimmed string wins; the rest are never
//! evaluated.

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, PoisonError};

use regex::Regex;
use scraper::{ElementRef, Selector};

/// A regex compiled on first use, so rule tables can stay `static`.
pub type Pattern = LazyLock<Regex>;

/// What to read from an element once a strategy has picked it.
#[derive(Debug, Clone, Copy)]
pub enum Take {
    /// Concatenated descendant text.
    Text,
    /// Descendant text with line breaks dropped.
    FlatText,
    Attr(&'static str),
    /// The attribute when present and non-empty, otherwise the text.
    AttrOrText(&'static str),
}

/// Element predicate used by [`Strategy::Scan`].
#[derive(Debug, Clone, Copy)]
pub enum Test {
    /// Case-insensitive substring of the `class` attribute. The needle must be lowercase.
    ClassContains(&'static str),
    AttrContains(&'static str, &'static str),
    TextMatches(&'static Pattern),
}

#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    /// The first element matching `selector` that yields a value.
    First { selector: &'static str, take: Take },
    /// Text of every match, joined with `separator`.
    Joined {
        selector: &'static str,
        separator: &'static str,
    },
    /// The first element matching `selector` that passes any of `tests`.
    Scan {
        selector: &'static str,
        tests: &'static [Test],
        take: Take,
    },
    /// Regex match over the whole scope's text.
    Pattern(&'static Pattern),
    /// A constant the source always shows in place of the field.
    Fixed(&'static str),
}

pub const fn text(selector: &'static str) -> Strategy {
    Strategy::First {
        selector,
        take: Take::Text,
    }
}

pub const fn attr(selector: &'static str, name: &'static str) -> Strategy {
    Strategy::First {
        selector,
        take: Take::Attr(name),
    }
}

impl Strategy {
    pub fn apply(&self, scope: ElementRef<'_>) -> Option<String> {
        match *self {
            Strategy::First { selector, take } => {
                select(scope, selector).into_iter().find_map(|el| take.read(el))
            }
            Strategy::Joined {
                selector,
                separator,
            } => {
                let parts: Vec<String> = select(scope, selector)
                    .into_iter()
                    .filter_map(|el| Take::Text.read(el))
                    .collect();
                non_empty(parts.join(separator))
            }
            Strategy::Scan {
                selector,
                tests,
                take,
            } => select(scope, selector)
                .into_iter()
                .find(|el| tests.iter().any(|test| test.matches(*el)))
                .and_then(|el| take.read(el)),
            Strategy::Pattern(pattern) => pattern
                .find(&element_text(scope))
                .and_then(|m| non_empty(m.as_str().to_string())),
            Strategy::Fixed(value) => non_empty(value.to_string()),
        }
    }
}

/// Evaluate a fallback chain against `scope`.
pub fn first_of(chain: &[Strategy], scope: ElementRef<'_>) -> Option<String> {
    chain.iter().find_map(|strategy| strategy.apply(scope))
}

impl Take {
    pub fn read(self, el: ElementRef<'_>) -> Option<String> {
        match self {
            Take::Text => non_empty(element_text(el)),
            Take::FlatText => non_empty(element_text(el).replace(['\n', '\r'], "")),
            Take::Attr(name) => el.value().attr(name).and_then(|v| non_empty(v.to_string())),
            Take::AttrOrText(name) => Take::Attr(name).read(el).or_else(|| Take::Text.read(el)),
        }
    }
}

impl Test {
    pub fn matches(self, el: ElementRef<'_>) -> bool {
        match self {
            Test::ClassContains(needle) => el
                .value()
                .attr("class")
                .is_some_and(|class| class.to_lowercase().contains(needle)),
            Test::AttrContains(name, needle) => el
                .value()
                .attr(name)
                .is_some_and(|value| value.contains(needle)),
            Test::TextMatches(pattern) => pattern.is_match(&element_text(el)),
        }
    }
}

/// Parsed rule-table selectors, keyed by their CSS text. Invalid ones are cached as `None`.
static SELECTORS: LazyLock<Mutex<HashMap<String, Option<Selector>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Parse a CSS selector from a rule table, once per process. Invalid selectors match nothing.
pub fn selector(css: &str) -> Option<Selector> {
    let mut cache = SELECTORS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(cached) = cache.get(css) {
        return cached.clone();
    }

    let parsed = match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!("Invalid selector {css:?}: {e}");
            None
        }
    };
    cache.insert(css.to_string(), parsed.clone());
    parsed
}

/// Descendants of `scope` matching `css`, in document order.
pub fn select<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(selector) => scope.select(&selector).collect(),
        None => Vec::new(),
    }
}

pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}
