//! Contact-page discovery.
//!
//! Two complementary mechanisms: scanning a fetched page for anchors that
//! look like contact links, and synthesizing candidate contact URLs from
//! common paths and language-specific keywords when no links pan out.

pub mod keywords;

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::config::MAX_CANDIDATE_URLS;
use self::keywords::{
    keywords_for, COMMON_CONTACT_PATHS, GENERIC, GENERIC_KEYWORDS, LANGUAGE_KEYWORDS,
};

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

// Navigation containers get a dedicated pass; contact links routinely live
// only in the footer.
static NAV_ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("nav a[href], header a[href], footer a[href]")
        .expect("nav anchor selector is valid")
});

/// Locates likely contact pages for a site.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContactPageLocator;

impl ContactPageLocator {
    pub fn new() -> Self {
        ContactPageLocator
    }

    /// Detects the likely language of a site from its URL.
    ///
    /// The TLD label is checked against the language table; for generic TLDs
    /// (com/org/net) the leftmost subdomain label is tried instead
    /// (`de.example.com`). Everything else falls back to the generic bucket.
    pub fn detect_language(&self, url: &str) -> &'static str {
        let Some(host) = crate::app::url::domain_of(url) else {
            return GENERIC;
        };

        let labels: Vec<&str> = host.split('.').collect();
        let Some(&tld) = labels.last() else {
            return GENERIC;
        };

        if let Some(lang) = language_tag(tld) {
            return lang;
        }

        if matches!(tld, "com" | "org" | "net") {
            if let Some(&subdomain) = labels.first() {
                if let Some(lang) = language_tag(subdomain) {
                    return lang;
                }
            }
        }

        GENERIC
    }

    /// Finds contact page links in HTML content.
    ///
    /// An anchor qualifies when its href, visible text, or title attribute
    /// contains any language-specific or generic keyword (case-insensitive
    /// substring). `javascript:`, `mailto:`, and `tel:` hrefs are excluded;
    /// relative hrefs are resolved against `base_url`. The result preserves
    /// document order with first occurrence winning.
    pub fn find_contact_links(&self, html_content: &str, base_url: &str) -> Vec<String> {
        if html_content.is_empty() {
            return Vec::new();
        }

        let document = Html::parse_document(html_content);
        let language = self.detect_language(base_url);

        let mut keyword_set: Vec<&str> = keywords_for(language).unwrap_or(&[]).to_vec();
        keyword_set.extend_from_slice(GENERIC_KEYWORDS);

        let mut contact_urls = Vec::new();

        for selector in [&*ANCHOR_SELECTOR, &*NAV_ANCHOR_SELECTOR] {
            for anchor in document.select(selector) {
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

                let href_lower = href.to_lowercase();
                let text = anchor.text().collect::<String>().trim().to_lowercase();
                let title = anchor
                    .value()
                    .attr("title")
                    .unwrap_or_default()
                    .trim()
                    .to_lowercase();

                let qualifies = keyword_set.iter().any(|keyword| {
                    href_lower.contains(keyword)
                        || text.contains(keyword)
                        || title.contains(keyword)
                });
                if !qualifies {
                    continue;
                }

                if let Some(resolved) = resolve_href(base_url, href) {
                    contact_urls.push(resolved);
                }
            }
        }

        dedupe_preserving_order(contact_urls)
    }

    /// Generates candidate contact-page URLs for a site.
    ///
    /// Union of common paths, language-keyword paths, cross-language
    /// `/{lang}/{keyword}` paths, and prefix/suffix variations over the
    /// first five language paths. Deduplicated, capped at
    /// `MAX_CANDIDATE_URLS` to bound request fan-out.
    pub fn generate_candidate_urls(&self, base_url: &str) -> Vec<String> {
        let Some(base) = crate::app::url::validate_and_normalize_url(base_url) else {
            return Vec::new();
        };

        let language = self.detect_language(&base);
        let language_keywords = keywords_for(language).unwrap_or(&[]);

        let mut paths: Vec<String> = COMMON_CONTACT_PATHS
            .iter()
            .map(|p| (*p).to_string())
            .collect();

        paths.extend(language_keywords.iter().map(|k| format!("/{k}")));

        // International variants for sites hosting several language trees.
        for (lang, lang_keywords) in LANGUAGE_KEYWORDS {
            for keyword in lang_keywords.iter().take(3) {
                paths.push(format!("/{lang}/{keyword}"));
            }
        }

        const PREFIXES: &[&str] = &["/", "/about/", "/company/", "/info/"];
        const SUFFIXES: &[&str] = &["", ".html", ".php", ".aspx", "/index.html"];
        for keyword in language_keywords.iter().take(5) {
            for prefix in PREFIXES {
                for suffix in SUFFIXES {
                    paths.push(format!("{prefix}{keyword}{suffix}"));
                }
            }
        }

        let mut urls = dedupe_preserving_order(
            paths.into_iter().map(|path| format!("{base}{path}")).collect(),
        );
        urls.truncate(MAX_CANDIDATE_URLS);
        urls
    }
}

fn language_tag(label: &str) -> Option<&'static str> {
    LANGUAGE_KEYWORDS
        .iter()
        .find(|(lang, _)| *lang == label)
        .map(|(lang, _)| *lang)
}

/// Resolves a possibly-relative href against the base URL.
fn resolve_href(base_url: &str, href: &str) -> Option<String> {
    let base = url::Url::parse(base_url).ok()?;
    let resolved = base.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}

fn dedupe_preserving_order(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_language_from_tld() {
        let locator = ContactPageLocator::new();
        assert_eq!(locator.detect_language("https://firma.de"), "de");
        assert_eq!(locator.detect_language("https://societe.fr"), "fr");
        assert_eq!(locator.detect_language("https://shop.pl"), "pl");
    }

    #[test]
    fn test_detect_language_from_subdomain() {
        let locator = ContactPageLocator::new();
        assert_eq!(locator.detect_language("https://de.example.com"), "de");
        assert_eq!(locator.detect_language("https://fr.example.org"), "fr");
    }

    #[test]
    fn test_detect_language_generic_fallback() {
        let locator = ContactPageLocator::new();
        assert_eq!(locator.detect_language("https://example.com"), GENERIC);
        assert_eq!(locator.detect_language("https://example.xyz"), GENERIC);
        assert_eq!(locator.detect_language("not a url"), GENERIC);
    }

    #[test]
    fn test_find_contact_links_by_href() {
        let html = r#"<html><body>
            <a href="/kontakt">Hier klicken</a>
            <a href="/products">Products</a>
        </body></html>"#;
        let links = ContactPageLocator::new().find_contact_links(html, "https://firma.de");
        assert_eq!(links, vec!["https://firma.de/kontakt"]);
    }

    #[test]
    fn test_find_contact_links_by_text_and_title() {
        let html = r#"<html><body>
            <a href="/page1">Contact us</a>
            <a href="/page2" title="Impressum">...</a>
            <a href="/page3">Unrelated</a>
        </body></html>"#;
        let links = ContactPageLocator::new().find_contact_links(html, "https://example.com");
        assert_eq!(
            links,
            vec![
                "https://example.com/page1",
                "https://example.com/page2"
            ]
        );
    }

    #[test]
    fn test_find_contact_links_excludes_pseudo_schemes() {
        let html = r#"<html><body>
            <a href="mailto:kontakt@firma.de">Kontakt</a>
            <a href="tel:+4912345">Kontakt</a>
            <a href="javascript:void(0)">Kontakt</a>
        </body></html>"#;
        let links = ContactPageLocator::new().find_contact_links(html, "https://firma.de");
        assert!(links.is_empty());
    }

    #[test]
    fn test_find_contact_links_in_footer() {
        let html = r#"<html><body>
            <footer><a href="/imprint/impressum.html">Rechtliches</a></footer>
        </body></html>"#;
        let links = ContactPageLocator::new().find_contact_links(html, "https://firma.de");
        assert_eq!(links, vec!["https://firma.de/imprint/impressum.html"]);
    }

    #[test]
    fn test_find_contact_links_dedupes_first_wins() {
        let html = r#"<html><body>
            <a href="/contact">Contact</a>
            <footer><a href="/contact">Contact</a></footer>
        </body></html>"#;
        let links = ContactPageLocator::new().find_contact_links(html, "https://example.com");
        assert_eq!(links, vec!["https://example.com/contact"]);
    }

    #[test]
    fn test_find_contact_links_resolves_absolute() {
        let html = r#"<a href="https://other.example.com/contact">Contact</a>"#;
        let links = ContactPageLocator::new().find_contact_links(html, "https://example.com");
        assert_eq!(links, vec!["https://other.example.com/contact"]);
    }

    #[test]
    fn test_generate_candidate_urls_capped_at_30() {
        let urls = ContactPageLocator::new().generate_candidate_urls("https://firma.de");
        assert!(urls.len() <= MAX_CANDIDATE_URLS);
        assert!(!urls.is_empty());
    }

    #[test]
    fn test_generate_candidate_urls_no_duplicates() {
        let urls = ContactPageLocator::new().generate_candidate_urls("https://example.com");
        let unique: HashSet<_> = urls.iter().collect();
        assert_eq!(unique.len(), urls.len());
    }

    #[test]
    fn test_generate_candidate_urls_common_paths_first() {
        let urls = ContactPageLocator::new().generate_candidate_urls("https://example.com");
        assert_eq!(urls[0], "https://example.com/contact");
        assert!(urls.contains(&"https://example.com/impressum".to_string()));
    }

    #[test]
    fn test_generate_candidate_urls_language_specific() {
        let urls = ContactPageLocator::new().generate_candidate_urls("https://firma.de");
        assert!(urls.contains(&"https://firma.de/kontakt".to_string()));
        assert!(urls.contains(&"https://firma.de/impressum".to_string()));
    }

    #[test]
    fn test_generate_candidate_urls_invalid_base() {
        let urls = ContactPageLocator::new().generate_candidate_urls("not a url!!!");
        assert!(urls.is_empty());
    }
}
