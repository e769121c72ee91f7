//! Page-break inference for raw extracted text.
//!
//! Extraction tools separate physical pages with runs of blank lines whose
//! length varies by source, so the run length is estimated per document: the
//! most frequent blank-run length wins, and every run at least that long
//! becomes a [`PAGE_BREAK`] marker line. Standalone page numbers and roman
//! numerals are turned into markers first, since they sit on page boundaries.

use crate::options::FilterOptions;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Marker line separating pages.
pub const PAGE_BREAK: &str = "[PAGE_BREAK]";

/// Two or more newlines with only horizontal whitespace between them.
static RE_BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[^\S\n]*\n)+[^\S\n]*").unwrap());

static RE_PAGE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+\.?$").unwrap());

static RE_ROMAN_PAGE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:I|II|III|IV|V|VI|VII|VIII|IX|X|XI|XII|XIII|XIV|XV|XVI|XVII|XVIII|XIX|XX)$",
    )
    .unwrap()
});

/// Returns the most frequent newline count among blank-line runs.
///
/// Ties go to the length seen first. Returns `None` when the text has no run
/// of two or more newlines.
pub fn dominant_blank_run(text: &str) -> Option<usize> {
    // newline count -> (occurrences, first seen)
    let mut counts: HashMap<usize, (usize, usize)> = HashMap::new();

    for (order, m) in RE_BLANK_RUN.find_iter(text).enumerate() {
        let newlines = m.as_str().matches('\n').count();
        counts.entry(newlines).or_insert((0, order)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(newlines, _)| newlines)
}

/// Replaces blank-line runs of at least the dominant length with markers.
pub fn insert_page_breaks(text: &str) -> String {
    let Some(dominant) = dominant_blank_run(text) else {
        return text.to_string();
    };

    let marker = format!("\n{PAGE_BREAK}\n");
    RE_BLANK_RUN
        .replace_all(text, |caps: &regex::Captures| {
            let run = &caps[0];
            if run.matches('\n').count() >= dominant {
                marker.clone()
            } else {
                run.to_string()
            }
        })
        .into_owned()
}

/// Replaces standalone page-number and roman-numeral lines with markers.
pub fn mark_page_numbers(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let trimmed = line.trim();
            if RE_PAGE_NUMBER.is_match(trimmed) || RE_ROMAN_PAGE_NUMBER.is_match(trimmed) {
                PAGE_BREAK
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Produces page-marked text from raw extracted text.
pub fn paginate(text: &str, options: &FilterOptions) -> String {
    let text = text.replace("\r\n", "\n");
    let text = if options.mark_page_numbers {
        mark_page_numbers(&text)
    } else {
        text
    };
    insert_page_breaks(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_blank_run_estimated_per_document() {
        let text = "a\n\n\n\nb\n\nc\n\n\n\nd\n\n\n\ne";
        assert_eq!(dominant_blank_run(text), Some(4));

        let text = "a\n\nb\n\nc\n\n\n\nd";
        assert_eq!(dominant_blank_run(text), Some(2));
    }

    #[test]
    fn test_dominant_blank_run_ties_go_to_first_seen() {
        let text = "a\n\n\nb\n\nc\n\n\nd\n\ne";
        assert_eq!(dominant_blank_run(text), Some(3));
    }

    #[test]
    fn test_no_blank_runs() {
        assert_eq!(dominant_blank_run("single\nspaced\nlines"), None);
        assert_eq!(insert_page_breaks("a\nb"), "a\nb");
    }

    #[test]
    fn test_insert_page_breaks_keeps_shorter_runs() {
        let text = "p1 a\n\np1 b\n\n\n\np2\n \n\n\np3";
        let marked = insert_page_breaks(text);
        assert_eq!(marked, "p1 a\n\np1 b\n[PAGE_BREAK]\np2\n[PAGE_BREAK]\np3");
    }

    #[test]
    fn test_mark_page_numbers() {
        let text = "body text\n12\nmore 3.5\n  IV \n7.\n3.5\nend";
        let marked = mark_page_numbers(text);
        assert_eq!(
            marked,
            "body text\n[PAGE_BREAK]\nmore 3.5\n[PAGE_BREAK]\n[PAGE_BREAK]\n3.5\nend"
        );
    }

    #[test]
    fn test_paginate_without_page_numbers() {
        let options = FilterOptions::default().without_page_number_marks();
        let marked = paginate("a\r\n12\r\nb", &options);
        assert_eq!(marked, "a\n12\nb");
    }
}
