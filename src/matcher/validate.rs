//! Candidate cleaning and structural validation.

use std::sync::LazyLock;

use regex::Regex;

static VALID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("validation pattern is valid")
});

// Asset URLs embedded as `file.png@2x`-style tokens look like addresses to
// the structural regex.
static ASSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(?:png|jpg|jpeg|gif|bmp|svg|webp|css|js)@")
        .expect("asset pattern is valid")
});

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:example|sample|test|user|info|admin|mail)@(?:example|sample|test|domain|yoursite|yourcompany|yourdomain)\.",
    )
    .expect("placeholder pattern is valid")
});

static CONSECUTIVE_SPECIALS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[._%+-]{2,}").expect("specials pattern is valid"));

static RESIDUAL_ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&[a-zA-Z]+;").expect("residual entity pattern is valid"));

static RESIDUAL_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("residual tag pattern is valid"));

const TRAILING_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '\'', '"', '!', '?', '<', '>', '(', ')', '[', ']', '{', '}',
];

/// True when the candidate is an asset-filename artifact, not an address.
pub fn has_asset_extension(candidate: &str) -> bool {
    ASSET_RE.is_match(candidate)
}

/// True for placeholder/example addresses (`test@example.com` and friends).
pub fn is_placeholder(candidate: &str) -> bool {
    PLACEHOLDER_RE.is_match(candidate)
}

/// Strips trailing punctuation and residual markup fragments.
pub fn clean_candidate(candidate: &str) -> String {
    let mut email = candidate.trim().to_string();

    if email.ends_with(TRAILING_PUNCTUATION) {
        email.pop();
    }

    if email.contains('&') {
        email = RESIDUAL_ENTITY_RE.replace_all(&email, "").into_owned();
    }
    if email.contains('<') {
        email = RESIDUAL_TAG_RE.replace_all(&email, "").into_owned();
    }

    email.trim().to_string()
}

/// Structural validation of a cleaned candidate.
///
/// Beyond the grammar: no consecutive special characters in the local part,
/// at least two dot-separated domain labels, and a 2-7 letter alphabetic
/// top-level label.
pub fn is_valid_email(email: &str) -> bool {
    if !VALID_RE.is_match(email) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if CONSECUTIVE_SPECIALS_RE.is_match(local) {
        return false;
    }

    let domain_parts: Vec<&str> = domain.split('.').collect();
    if domain_parts.len() < 2 || domain_parts.iter().any(|p| p.is_empty()) {
        return false;
    }

    let tld = domain_parts[domain_parts.len() - 1];
    (2..=7).contains(&tld.len()) && tld.chars().all(|c| c.is_ascii_alphabetic())
}
