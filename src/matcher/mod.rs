//! Email recognition and validation.
//!
//! The matcher collects candidate addresses from four sources (direct
//! regex, split-token obfuscation, scripted concatenation, markup-split
//! elements), filters false positives, and canonicalizes survivors to
//! lowercase. It never fails on malformed input: no matches means an empty
//! set, not an error.

mod entities;
mod obfuscation;
mod validate;

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
        .expect("email pattern is valid")
});

// "E-Mail: foo@bar.de" style labels on legal-disclosure pages. The captured
// fragment runs to the end of the line or the next tag.
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:E-?Mail|Mailto|Mail|Kontakt|Contact)\s*:\s*([^\n<]+)")
        .expect("label pattern is valid")
});

/// Recognizes and validates email addresses in raw text or markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmailMatcher;

impl EmailMatcher {
    pub fn new() -> Self {
        EmailMatcher
    }

    /// Extracts all valid email addresses from text content.
    ///
    /// Handles entity-encoded, split-token, script-concatenated, and
    /// markup-split obfuscations. Results are canonical lowercase.
    pub fn extract_emails(&self, text: &str) -> BTreeSet<String> {
        if text.is_empty() {
            return BTreeSet::new();
        }

        let cleaned = entities::decode(text);

        let mut candidates: Vec<String> = EMAIL_RE
            .find_iter(&cleaned)
            .map(|m| m.as_str().to_string())
            .collect();
        candidates.extend(obfuscation::decode_all(&cleaned));

        let mut valid = BTreeSet::new();
        for candidate in candidates {
            if validate::has_asset_extension(&candidate) {
                continue;
            }
            if validate::is_placeholder(&candidate) {
                continue;
            }
            let clean = validate::clean_candidate(&candidate);
            if validate::is_valid_email(&clean) {
                valid.insert(clean.to_lowercase());
            }
        }

        valid
    }

    /// Stricter-context extraction for pages that label contact fields
    /// explicitly (legal-disclosure pages such as a German Impressum).
    ///
    /// Runs the standard extraction, then scans for contact-label tokens
    /// followed by a delimiter; the trailing fragment is tried as a direct
    /// address first and re-run through the obfuscation decoders when that
    /// fails.
    pub fn extract_from_labeled_page(&self, text: &str) -> BTreeSet<String> {
        let mut emails = self.extract_emails(text);

        for capture in LABEL_RE.captures_iter(text) {
            let fragment = capture[1].trim();

            if fragment.contains('@') && fragment.contains('.') {
                let clean = validate::clean_candidate(fragment);
                if validate::is_valid_email(&clean) {
                    emails.insert(clean.to_lowercase());
                    continue;
                }
            }
            for decoded in obfuscation::decode_all(&entities::decode(fragment)) {
                let clean = validate::clean_candidate(&decoded);
                if validate::is_valid_email(&clean) {
                    emails.insert(clean.to_lowercase());
                }
            }
        }

        emails
    }
}
