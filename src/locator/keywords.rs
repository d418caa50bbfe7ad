//! Contact-page keyword tables.
//!
//! Static configuration data: per-language contact-page keywords (EU
//! coverage keyed by country-code TLD label) and common contact URL paths.
//! The tables are separate from the locator logic so adding a language never
//! touches the algorithm.

/// Language tag used when no specific language can be detected.
pub const GENERIC: &str = "generic";

/// Per-language contact-page keywords, keyed by the TLD/subdomain label.
pub const LANGUAGE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "en",
        &["contact", "contact-us", "contact_us", "contactus", "get-in-touch", "reach-us", "email-us"],
    ),
    (
        "de",
        &["kontakt", "impressum", "uber-uns", "ueber-uns", "about-us", "ansprechpartner"],
    ),
    ("fr", &["contact", "contactez-nous", "nous-contacter", "a-propos"]),
    ("it", &["contatti", "contattaci", "chi-siamo", "about"]),
    ("es", &["contacto", "contactenos", "sobre-nosotros", "acerca-de"]),
    ("pt", &["contacto", "contato", "fale-conosco", "sobre-nos"]),
    ("nl", &["contact", "neem-contact-op", "over-ons"]),
    ("pl", &["kontakt", "o-nas", "o-firmie"]),
    ("se", &["kontakt", "kontakta-oss", "om-oss"]),
    ("dk", &["kontakt", "om-os"]),
    ("fi", &["yhteystiedot", "ota-yhteytta", "meista"]),
    ("cz", &["kontakt", "o-nas", "o-spolecnosti"]),
    ("hu", &["kapcsolat", "rolunk", "cegunkrol"]),
    ("ro", &["contact", "despre-noi", "despre-companie"]),
    ("gr", &["epikoinonia", "contact", "sxetika-me"]),
    ("bg", &["kontakti", "za-nas"]),
    ("hr", &["kontakt", "o-nama"]),
    ("sk", &["kontakt", "o-nas"]),
    ("si", &["kontakt", "o-nas"]),
    ("ee", &["kontakt", "meist"]),
    ("lv", &["kontakti", "par-mums"]),
    ("lt", &["kontaktai", "apie-mus"]),
    ("ie", &["contact", "about-us", "about"]),
    ("mt", &["kuntatt", "dwarna"]),
];

/// Fallback keywords checked for every site regardless of language.
pub const GENERIC_KEYWORDS: &[&str] = &[
    "contact", "about", "info", "impressum", "kontakt", "contatti", "contacto",
];

/// Common contact URL paths probed on every site.
pub const COMMON_CONTACT_PATHS: &[&str] = &[
    "/contact",
    "/contact-us",
    "/contactus",
    "/kontakt",
    "/impressum",
    "/about/contact",
    "/about-us/contact",
    "/get-in-touch",
    "/about",
    "/about-us",
    "/about_us",
    "/aboutus",
    "/company/contact",
    "/support",
    "/help",
    "/reach-us",
    "/info/contact",
    "/contact/index.html",
    "/en/contact",
    "/en/about",
];

/// Looks up the keyword list for a language tag.
pub fn keywords_for(tag: &str) -> Option<&'static [&'static str]> {
    LANGUAGE_KEYWORDS
        .iter()
        .find(|(lang, _)| *lang == tag)
        .map(|(_, keywords)| *keywords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_for_known_language() {
        let de = keywords_for("de").expect("german keywords present");
        assert!(de.contains(&"impressum"));
    }

    #[test]
    fn test_keywords_for_unknown_language() {
        assert!(keywords_for("xx").is_none());
        assert!(keywords_for(GENERIC).is_none());
    }

    #[test]
    fn test_tables_are_lowercase() {
        // Keyword matching is case-insensitive by lowercasing the haystack,
        // so the needles themselves must already be lowercase.
        for (lang, keywords) in LANGUAGE_KEYWORDS {
            assert_eq!(*lang, lang.to_lowercase());
            for keyword in *keywords {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
        for keyword in GENERIC_KEYWORDS {
            assert_eq!(*keyword, keyword.to_lowercase());
        }
    }
}
