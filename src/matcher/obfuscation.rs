//! Obfuscated address decoding.
//!
//! Three encodings beyond entity references:
//! - split tokens: `office [at] company [dot] com`
//! - scripted concatenation: `'user' + '@' + 'domain.com'`
//! - markup-split: `<span>user</span><span>@</span><span>domain.com</span>`
//!
//! Each decoder reconstructs a plain candidate string; validation happens in
//! the caller, so a decoder may emit junk without consequence.

use std::sync::LazyLock;

use regex::Regex;

// local (at) domain (dot) tld, with bracketed/parenthesized/worded
// delimiters. The domain group may itself contain literal dots
// ("mail [at] sub.company [dot] de").
static SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ([a-z0-9._%+-]+)
        \s* (?: \[\s*at\s*\] | \(\s*at\s*\) | \{\s*at\s*\} | \s at \s | @ ) \s*
        ([a-z0-9.-]+)
        \s* (?: \[\s*dot\s*\] | \(\s*dot\s*\) | \{\s*dot\s*\} | \s dot \s ) \s*
        ([a-z]{2,7})",
    )
    .expect("split pattern is valid")
});

// 'user' + '@' + 'domain.com' in inline script text.
static JS_CONCAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"['"]([A-Za-z0-9._%+\-]+)['"]\s*\+\s*['"]@['"]\s*\+\s*['"]([A-Za-z0-9.\-]+\.[A-Za-z]{2,})['"]"#,
    )
    .expect("concat pattern is valid")
});

// Three adjacent inline elements holding local part, literal @, and
// domain+tld.
static MARKUP_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)<(span|b|i|em|strong)[^>]*>\s*([A-Za-z0-9._%+\-]+)\s*</\w+>\s*<(?:span|b|i|em|strong)[^>]*>\s*@\s*</\w+>\s*<(?:span|b|i|em|strong)[^>]*>\s*([A-Za-z0-9.\-]+\.[A-Za-z]{2,})\s*</\w+>",
    )
    .expect("markup pattern is valid")
});

/// Runs all obfuscation decoders over the text, returning raw candidates.
pub fn decode_all(text: &str) -> Vec<String> {
    let mut candidates = Vec::new();

    for caps in SPLIT_RE.captures_iter(text) {
        candidates.push(format!("{}@{}.{}", &caps[1], &caps[2], &caps[3]));
    }

    for caps in JS_CONCAT_RE.captures_iter(text) {
        candidates.push(format!("{}@{}", &caps[1], &caps[2]));
    }

    for caps in MARKUP_SPLIT_RE.captures_iter(text) {
        candidates.push(format!("{}@{}", &caps[2], &caps[3]));
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_bracketed() {
        let found = decode_all("mail me: office [at] company [dot] com");
        assert!(found.contains(&"office@company.com".to_string()));
    }

    #[test]
    fn test_split_parenthesized() {
        let found = decode_all("office(at)company(dot)com");
        assert!(found.contains(&"office@company.com".to_string()));
    }

    #[test]
    fn test_split_worded() {
        let found = decode_all("office at company dot com");
        assert!(found.contains(&"office@company.com".to_string()));
    }

    #[test]
    fn test_split_with_dotted_domain() {
        let found = decode_all("mail [at] post.company [dot] de");
        assert!(found.contains(&"mail@post.company.de".to_string()));
    }

    #[test]
    fn test_js_concat() {
        let found = decode_all(r#"var e = 'user' + '@' + 'domain.com';"#);
        assert!(found.contains(&"user@domain.com".to_string()));
    }

    #[test]
    fn test_js_concat_double_quotes() {
        let found = decode_all(r#"var e = "user" + "@" + "domain.com";"#);
        assert!(found.contains(&"user@domain.com".to_string()));
    }

    #[test]
    fn test_markup_split_spans() {
        let found = decode_all(
            r#"<span class="a">user</span><span class="b">@</span><span class="c">domain.com</span>"#,
        );
        assert!(found.contains(&"user@domain.com".to_string()));
    }

    #[test]
    fn test_markup_split_with_whitespace() {
        let found = decode_all("<span>user</span> <span>@</span> <span>domain.com</span>");
        assert!(found.contains(&"user@domain.com".to_string()));
    }

    #[test]
    fn test_at_sign_with_worded_dot() {
        let found = decode_all("kontakt@firma dot de");
        assert!(found.contains(&"kontakt@firma.de".to_string()));
    }

    #[test]
    fn test_no_candidates_in_plain_prose() {
        assert!(decode_all("we met at noon, dot on time").is_empty());
    }
}
