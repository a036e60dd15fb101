use url::Url;

/// Resolve a scraped href against the source's origin.
///
/// Absolute http(s) URLs are returned untouched, relative paths are joined
/// onto `origin`, anything else (empty, `javascript:`, `mailto:`) is `None`.
pub fn resolve(origin: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    match Url::parse(href) {
        Ok(absolute) => {
            matches!(absolute.scheme(), "http" | "https").then(|| href.to_string())
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            origin.join(href).ok().map(String::from)
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glints() -> Url {
        Url::parse("https://glints.com").unwrap()
    }

    #[test]
    fn relative_path_joins_origin() {
        assert_eq!(
            resolve(&glints(), "/opportunities/jobs/123").as_deref(),
            Some("https://glints.com/opportunities/jobs/123")
        );
    }

    #[test]
    fn absolute_href_passes_through() {
        let href = "https://glints.com/id/opportunities/jobs/abc?utm=x";
        assert_eq!(resolve(&glints(), href).as_deref(), Some(href));

        let foreign = "http://example.org/job";
        assert_eq!(resolve(&glints(), foreign).as_deref(), Some(foreign));
    }

    #[test]
    fn unresolvable_links_are_none() {
        assert_eq!(resolve(&glints(), "   "), None);
        assert_eq!(resolve(&glints(), "javascript:void(0)"), None);
        assert_eq!(resolve(&glints(), "mailto:hr@example.org"), None);
    }

    #[test]
    fn protocol_relative_takes_origin_scheme() {
        assert_eq!(
            resolve(&glints(), "//cdn.glints.com/a.png").as_deref(),
            Some("https://cdn.glints.com/a.png")
        );
    }
}
