//! HTML character reference decoding.
//!
//! Pages hide addresses behind entity encodings (`&#64;` for `@`); decoding
//! happens before any pattern matching so the structural regexes see literal
//! characters.

use std::sync::LazyLock;

use regex::{Captures, Regex};

// Decimal (&#64;) and hexadecimal (&#x40;) numeric character references.
static NUMERIC_ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#([xX][0-9a-fA-F]{1,6}|[0-9]{1,7});").expect("entity pattern is valid"));

/// Named references that matter for address recognition. Anything else is
/// left alone; `clean_candidate` strips residual `&name;` fragments later.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("&commat;", "@"),
    ("&period;", "."),
    ("&amp;", "&"),
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
];

/// Decodes named and numeric HTML character references to literal characters.
pub fn decode(text: &str) -> String {
    let mut decoded = NUMERIC_ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            let code = if let Some(hex) = body.strip_prefix('x').or_else(|| body.strip_prefix('X'))
            {
                u32::from_str_radix(hex, 16).ok()
            } else {
                body.parse::<u32>().ok()
            };
            match code.and_then(char::from_u32) {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned();

    for (entity, replacement) in NAMED_ENTITIES {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, replacement);
        }
    }

    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_decimal_at() {
        assert_eq!(decode("user&#64;host.com"), "user@host.com");
    }

    #[test]
    fn test_decode_hex_at() {
        assert_eq!(decode("user&#x40;host.com"), "user@host.com");
    }

    #[test]
    fn test_decode_decimal_dot() {
        assert_eq!(decode("host&#46;com"), "host.com");
    }

    #[test]
    fn test_decode_named() {
        assert_eq!(decode("a&commat;b&period;de"), "a@b.de");
        assert_eq!(decode("x&nbsp;y"), "x y");
    }

    #[test]
    fn test_invalid_reference_left_alone() {
        assert_eq!(decode("&#99999999;"), "&#99999999;");
        assert_eq!(decode("&#xZZ;"), "&#xZZ;");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(decode("nothing encoded here"), "nothing encoded here");
    }
}
