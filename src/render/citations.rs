//! Inline citation removal on merged text.

use regex::Regex;
use std::sync::LazyLock;

/// Parenthesized or bracketed citation with the whitespace before it:
/// author-year (`(Yılmaz, 2003: 45)`), page locator (`(s. 12-14)`) or
/// numeric (`[3]`, `(4, 7)`).
static RE_INLINE_CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\s*[(\[](?:",
        r"\p{Lu}[^()\[\]\n]{0,100}?[\s,][0-9]{4}[a-z]?(?:[^()\[\]\n]{0,60})?",
        r"|(?:s|ss|p|pp|vol|cilt)\.\s*[0-9]+(?:\s*[-–]\s*[0-9]+)?",
        r"|[0-9]{1,3}(?:\s*[,–-]\s*[0-9]{1,3})*",
        r")[)\]]",
    ))
    .unwrap()
});

/// Citation numeral fused to the preceding word (`teorisi12.`).
static RE_FUSED_NUMERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\p{L}{2,})[0-9]{1,3}([.,;:]?)(\s|$)").unwrap());

static RE_MULTIPLE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// Removes inline citations and fused citation numerals.
///
/// Running it on its own output changes nothing.
pub fn strip_citations(text: &str) -> String {
    let mut text = text.to_string();
    // a removed inner citation can expose an outer one: `(12 (Kaya, 2001))`
    while RE_INLINE_CITATION.is_match(&text) {
        text = RE_INLINE_CITATION.replace_all(&text, "").into_owned();
    }

    let text = RE_FUSED_NUMERAL.replace_all(&text, "${1}${2}${3}");
    let text = RE_MULTIPLE_SPACES.replace_all(&text, " ");
    text.trim().to_string()
}
