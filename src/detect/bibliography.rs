//! Bibliography onset detection.

use crate::lexicon::{fold_case, BIBLIOGRAPHY_KEYWORDS};
use crate::options::BibliographyFallback;
use regex::Regex;
use std::sync::LazyLock;

/// Line opening with a keyword, numbered or letter-spaced
/// (`3. Kaynakça`, `K A Y N A K Ç A`). No word boundary is required.
static RE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    let spaced = BIBLIOGRAPHY_KEYWORDS
        .iter()
        .map(|kw| {
            kw.chars()
                .map(|c| regex::escape(&c.to_string()))
                .collect::<Vec<_>>()
                .join(" ?")
        })
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"^(?:[0-9]+\W?\s*)?(?:{spaced})")).unwrap()
});

/// Line opening with a whole keyword.
static RE_STRICT: LazyLock<Regex> = LazyLock::new(|| {
    let keywords = crate::lexicon::alternation(BIBLIOGRAPHY_KEYWORDS);
    Regex::new(&format!(r"^(?:[0-9]+[.)]?\s*)?(?:{keywords})\b")).unwrap()
});

/// Returns the index of the line where the bibliography starts.
///
/// With one candidate, that line is the onset. With several, the first one
/// matching the strict pattern wins; if none does, `fallback` picks the first
/// or last candidate. `None` means the document has no bibliography.
pub fn find_onset<S: AsRef<str>>(lines: &[S], fallback: BibliographyFallback) -> Option<usize> {
    let folded: Vec<(usize, String)> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| (i, fold_case(line.as_ref())))
        .filter(|(_, line)| RE_CANDIDATE.is_match(line))
        .collect();

    match folded.as_slice() {
        [] => None,
        [(only, _)] => Some(*only),
        candidates => candidates
            .iter()
            .find(|(_, line)| RE_STRICT.is_match(line))
            .or(match fallback {
                BibliographyFallback::First => candidates.first(),
                BibliographyFallback::Last => candidates.last(),
            })
            .map(|(i, _)| *i),
    }
}

/// Flags every line at or after the onset.
pub fn bibliography_flags(len: usize, onset: Option<usize>) -> Vec<bool> {
    match onset {
        Some(onset) => (0..len).map(|i| i >= onset).collect(),
        None => vec![false; len],
    }
}
