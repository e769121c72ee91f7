//! Removal of front/back-matter sections from page-marked text.
//!
//! A section runs from its heading to the next page-break marker. Runs on the
//! raw marked text before it is split into lines.

use crate::lexicon::{DISCARD_FULL_PAGE_SECTIONS, DISCARD_SECTIONS};
use crate::paginate::PAGE_BREAK;
use regex::Regex;
use std::sync::LazyLock;

/// Heading alone on its line, then everything up to the next marker.
static RE_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?mi)^[^\S\n]*(?:{})[^\S\n]*\n(?s:.*?){}",
        heading_alternation(DISCARD_SECTIONS),
        regex::escape(PAGE_BREAK)
    ))
    .unwrap()
});

/// Heading opening a line, then everything up to the second marker.
///
/// Case-sensitive: these headings are upper-case in practice, and a
/// title-case match would more likely be a sentence ("Teşekkür ederim").
static RE_FULL_PAGE_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    let marker = regex::escape(PAGE_BREAK);
    Regex::new(&format!(
        r"(?m)^[^\S\n]*(?:{})(?s:.*?){marker}(?s:.*?){marker}",
        heading_alternation(DISCARD_FULL_PAGE_SECTIONS),
    ))
    .unwrap()
});

/// Builds an alternation where spaces match any whitespace.
///
/// Case-insensitive matching does not pair `İ` with `i` or `I` with `ı`, so
/// both capitals are widened by hand.
fn heading_alternation(headings: &[&str]) -> String {
    headings
        .iter()
        .map(|h| {
            h.split_whitespace()
                .map(|word| {
                    regex::escape(word)
                        .chars()
                        .map(|c| match c {
                            'İ' => "[İIi]".to_string(),
                            'I' => "[Iı]".to_string(),
                            other => other.to_string(),
                        })
                        .collect::<String>()
                })
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Removes every discardable section from page-marked text.
///
/// The marker ending a removed section is consumed, so the page before the
/// section and the page after it stay separated by the marker preceding the
/// heading.
pub fn discard_sections(text: &str) -> String {
    let first = RE_SECTION.replace_all(text, "");
    let second = RE_FULL_PAGE_SECTION.replace_all(&first, "");
    let removed = text.len() - second.len();
    if removed > 0 {
        tracing::debug!(removed_bytes = removed, "discarded front/back-matter sections");
    }
    second.into_owned()
}
