//! Outbound link extraction with same-site containment.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

/// True when `host` is the start host itself or one of its subdomains.
pub fn is_contained(host: &str, start_host: &str) -> bool {
    host == start_host || host.ends_with(&format!(".{start_host}"))
}

/// Extracts crawlable links from a page.
///
/// Relative hrefs are resolved against `base_url`; fragments are stripped;
/// only links contained within `start_host` survive. Order is preserved with
/// first occurrence winning.
pub fn extract_links(html_content: &str, base_url: &str, start_host: &str) -> Vec<String> {
    if html_content.is_empty() {
        return Vec::new();
    }

    let Ok(base) = url::Url::parse(base_url) else {
        return Vec::new();
    };

    let mut base_page = base.clone();
    base_page.set_fragment(None);

    let document = Html::parse_document(html_content);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty()
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
        {
            continue;
        }

        let Ok(mut resolved) = base.join(href) else {
            continue;
        };
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }

        // Fragments never change the fetched document.
        resolved.set_fragment(None);

        let Some(host) = resolved.host_str() else {
            continue;
        };
        if !is_contained(&host.to_lowercase(), start_host) {
            continue;
        }

        // A fragment-only link points back at the page being scanned.
        if resolved == base_page {
            continue;
        }

        let link = resolved.to_string();
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_contained() {
        assert!(is_contained("example.com", "example.com"));
        assert!(is_contained("shop.example.com", "example.com"));
        assert!(!is_contained("example.org", "example.com"));
        // A lookalike suffix is not a subdomain.
        assert!(!is_contained("evilexample.com", "example.com"));
    }

    #[test]
    fn test_extract_links_resolves_relative() {
        let html = r#"<a href="/team">Team</a>"#;
        let links = extract_links(html, "https://example.com", "example.com");
        assert_eq!(links, vec!["https://example.com/team"]);
    }

    #[test]
    fn test_extract_links_drops_offsite() {
        let html = r#"
            <a href="https://example.com/a">in</a>
            <a href="https://sub.example.com/b">sub</a>
            <a href="https://other.org/c">out</a>
        "#;
        let links = extract_links(html, "https://example.com", "example.com");
        assert_eq!(
            links,
            vec![
                "https://example.com/a",
                "https://sub.example.com/b"
            ]
        );
    }

    #[test]
    fn test_extract_links_strips_fragments() {
        let html = r#"<a href="/page#section">x</a>"#;
        let links = extract_links(html, "https://example.com", "example.com");
        assert_eq!(links, vec!["https://example.com/page"]);
    }

    #[test]
    fn test_extract_links_skips_self_fragment() {
        let html = r##"<a href="#top">top</a>"##;
        let links = extract_links(html, "https://example.com", "example.com");
        assert!(links.is_empty());
    }

    #[test]
    fn test_extract_links_skips_pseudo_schemes() {
        let html = r#"
            <a href="mailto:a@b.com">mail</a>
            <a href="tel:+123">tel</a>
            <a href="javascript:void(0)">js</a>
        "#;
        let links = extract_links(html, "https://example.com", "example.com");
        assert!(links.is_empty());
    }

    #[test]
    fn test_extract_links_dedupes() {
        let html = r#"<a href="/a">1</a><a href="/a">2</a>"#;
        let links = extract_links(html, "https://example.com", "example.com");
        assert_eq!(links.len(), 1);
    }
}
