//! Per-line feature extraction.
//!
//! Most features depend only on the line's own text. Two need the whole
//! document: the repetition count (running headers and footers repeat across
//! pages) and the index-block flag (decided from a line and its predecessor).
//! Every ratio is guarded against empty input, so featurizing never fails.

use crate::lexicon::{
    alternation, fold_case, AFFILIATION_INDICATORS, AFFILIATION_INDICATORS_UPPER,
    CAPTION_LABELS, CITIES, DISCARD_TOKENS, INDEX_HEADINGS, INDEX_HEADING_LINES,
    INDEX_ITEM_TYPES,
};
use crate::model::LineFeatures;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static RE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]+(?:\.[0-9]+)?\b").unwrap());

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

static RE_CAPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^({})\s*[0-9]+(?:\.[0-9]+)*\s*[.:\-–]",
        alternation(CAPTION_LABELS)
    ))
    .unwrap()
});

static RE_VOLUME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bvol\.?\s*[0-9]+.+?\bno\.?\s*[0-9]+.+?p").unwrap());

static RE_VOLUME_TR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bcilt\s*[0-9]+.+?\bsay[ıi]\s*[0-9]+.+?s").unwrap());

static RE_ELLIPSIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\.\s?){5,}|…{2,}").unwrap());

static RE_NAME_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\p{Lu}\p{Ll}+(?:[-'’]\p{Lu}?\p{Ll}+)?|\p{Lu}{2,}|\p{Lu}\.)$").unwrap()
});

static RE_CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((?:[\p{L}–§¶\s0-9'’,:&.]+[\s,][0-9]{4}[a-z]?|[0-9]+)\)").unwrap()
});

static RE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b[0-9]{1,2}[/.\-][0-9]{1,2}[/.\-][0-9]{4}\b",
        r"|\b[0-9]{4}[/.\-][0-9]{1,2}[/.\-][0-9]{1,2}\b",
        r"|\b[0-9]{1,2}\s(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec",
        r"|Ocak|Şubat|Mart|Nisan|Mayıs|Haziran|Temmuz|Ağustos|Eylül|Ekim|Kasım|Aralık)\p{L}*\s[0-9]{4}\b",
    ))
    .unwrap()
});

static RE_INDEX_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?:{})\s*:?$|^(?:{})\s*:?$",
        alternation(INDEX_HEADINGS),
        alternation(INDEX_HEADING_LINES)
    ))
    .unwrap()
});

static RE_INDEX_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:{})\s*[.:\-–]?\s*[0-9]+",
        alternation(INDEX_ITEM_TYPES)
    ))
    .unwrap()
});

/// Computes one feature record per line.
///
/// Callers pass trimmed, non-blank lines; blank lines still featurize to
/// zeros and sentinels.
pub fn featurize<S: AsRef<str>>(lines: &[S]) -> Vec<LineFeatures> {
    let texts: Vec<&str> = lines.iter().map(|l| l.as_ref()).collect();
    let repetitions = repetition_counts(&texts);
    let folded: Vec<String> = texts.iter().map(|t| fold_case(t)).collect();

    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let previous = i.checked_sub(1).map(|p| folded[p].as_str());
            let mut features = line_features(text);
            features.repetition = repetitions[i];
            features.in_index_block = is_index_line(previous, &folded[i]);
            features
        })
        .collect()
}

/// Computes the features that depend only on the line itself.
pub fn line_features(line: &str) -> LineFeatures {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let token_count = tokens.len();
    let number_count = RE_NUMBER.find_iter(line).count();

    LineFeatures {
        char_count: line.chars().count(),
        token_count,
        number_count,
        number_ratio: if token_count == 0 {
            -1.0
        } else {
            number_count as f64 / token_count as f64
        },
        average_token_length: average_token_length(&tokens),
        digit_ratio: digit_ratio(line),
        uppercase_ratio: uppercase_ratio(line),
        leading_number: leading_integer(line),
        trailing_number: trailing_integer(line),
        caption: caption_label(line),
        affiliation_ratio: affiliation_ratio(line),
        has_email: RE_EMAIL.is_match(line),
        has_volume_format: has_volume_format(line),
        has_discard_token: has_discard_token(line),
        is_person_name: is_person_name(&tokens),
        has_citation: RE_CITATION.is_match(line),
        date_count: RE_DATE.find_iter(line).count(),
        repetition: 0,
        in_index_block: false,
    }
}

/// Mean token length in characters, or -1 when there are no tokens.
pub fn average_token_length(tokens: &[&str]) -> f64 {
    if tokens.is_empty() {
        return -1.0;
    }
    let total: usize = tokens.iter().map(|t| t.chars().count()).sum();
    total as f64 / tokens.len() as f64
}

/// Share of ASCII digits among the characters of the line.
pub fn digit_ratio(line: &str) -> f64 {
    char_ratio(line, |c| c.is_ascii_digit())
}

/// Share of upper-case letters among the characters of the line.
pub fn uppercase_ratio(line: &str) -> f64 {
    char_ratio(line, char::is_uppercase)
}

fn char_ratio(line: &str, predicate: impl Fn(char) -> bool) -> f64 {
    let (total, hits) = line.chars().fold((0usize, 0usize), |(total, hits), c| {
        (total + 1, hits + usize::from(predicate(c)))
    });
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

/// Leading ASCII digit run, unless it continues as a decimal (`12.5`).
fn leading_digits(text: &str) -> Option<&str> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    let mut rest = text[end..].chars();
    if rest.next() == Some('.') && rest.next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(&text[..end])
}

/// Integer the line starts with.
pub fn leading_integer(line: &str) -> Option<u64> {
    leading_digits(line.trim()).and_then(|d| d.parse().ok())
}

/// Integer the line ends with.
///
/// The reversed line is scanned with the leading-integer rule, so a trailing
/// decimal such as `3.14` yields nothing.
pub fn trailing_integer(line: &str) -> Option<u64> {
    let reversed: String = line.trim().chars().rev().collect();
    let digits: String = leading_digits(&reversed)?.chars().rev().collect();
    digits.parse().ok()
}

/// Caption label the line opens with, e.g. `Şekil` for `Şekil 2: Harita`.
pub fn caption_label(line: &str) -> Option<&'static str> {
    let caps = RE_CAPTION.captures(line.trim_start())?;
    let label = caps.get(1)?.as_str();
    CAPTION_LABELS.iter().copied().find(|l| *l == label)
}

/// Fixed-denominator hit rate of academic titles and place names.
///
/// Every indicator and upper-case indicator found counts once; any number of
/// city hits together count once. The denominator is the indicator count
/// plus one, independent of the line.
pub fn affiliation_ratio(line: &str) -> f64 {
    let indicator_hits = AFFILIATION_INDICATORS
        .iter()
        .filter(|w| line.contains(*w))
        .count();
    let upper_hits = AFFILIATION_INDICATORS_UPPER
        .iter()
        .filter(|w| line.contains(*w))
        .count();
    let city_hit = usize::from(CITIES.iter().any(|c| line.contains(c)));

    (indicator_hits + upper_hits + city_hit) as f64 / (AFFILIATION_INDICATORS.len() + 1) as f64
}

/// Journal reference shaped like `vol 3 ... no 2 ... p` or `cilt 3 ... sayı 2 ... s`.
pub fn has_volume_format(line: &str) -> bool {
    RE_VOLUME.is_match(line) || RE_VOLUME_TR.is_match(line)
}

/// Persistent identifier markers and long ellipsis runs.
pub fn has_discard_token(line: &str) -> bool {
    DISCARD_TOKENS.iter().any(|t| line.contains(t)) || RE_ELLIPSIS.is_match(line)
}

/// A line made of 2-3 capitalized name-shaped tokens.
pub fn is_person_name(tokens: &[&str]) -> bool {
    (2..=3).contains(&tokens.len()) && tokens.iter().all(|t| RE_NAME_TOKEN.is_match(t))
}

/// Reduces a line to the text shared by its copies on other pages.
///
/// Strips a leading digit run, or failing that a trailing one, never both.
pub fn repetition_key(line: &str) -> &str {
    let trimmed = line.trim();
    let without_leading = trimmed.trim_start_matches(|c: char| c.is_ascii_digit());
    let stripped = if without_leading.len() != trimmed.len() {
        without_leading
    } else {
        trimmed.trim_end_matches(|c: char| c.is_ascii_digit())
    };
    stripped.trim()
}

/// Counts, for every line, how many lines share its repetition key
/// (the line itself included).
pub fn repetition_counts(lines: &[&str]) -> Vec<usize> {
    let keys: Vec<&str> = lines.iter().map(|l| repetition_key(l)).collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for key in &keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    keys.iter().map(|k| counts[k]).collect()
}

/// Decides whether a line belongs to an index or table-of-contents block.
///
/// Both arguments are case-folded. The line is flagged when it or its
/// predecessor is an index/list/abbreviation heading, or when it opens with
/// an item type followed by a number (`Tablo 3`, `Şekil 2.1`). The following
/// line takes no part in the decision.
pub fn is_index_line(previous: Option<&str>, current: &str) -> bool {
    RE_INDEX_HEADING.is_match(current)
        || previous.is_some_and(|p| RE_INDEX_HEADING.is_match(p))
        || RE_INDEX_ITEM.is_match(current)
}
