//! Reassembly of kept lines into continuous text.

/// Joins kept lines page by page, repairing word-wrap hyphenation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMerger {
    /// Pages whose merged text is not longer than this are discarded
    pub min_page_chars: usize,
    /// Only glue a hyphenated break when a letter precedes the hyphen
    pub letters_only_hyphens: bool,
}

impl Default for PageMerger {
    fn default() -> Self {
        Self {
            min_page_chars: 50,
            letters_only_hyphens: false,
        }
    }
}

/// Merged document text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedText {
    /// Space-joined text of the retained pages
    pub text: String,
    /// Number of pages that contributed text
    pub pages_kept: usize,
}

impl PageMerger {
    /// Creates a merger with the given minimum page length.
    pub fn new(min_page_chars: usize) -> Self {
        Self {
            min_page_chars,
            ..Self::default()
        }
    }

    /// Restricts hyphen repair to breaks after a letter.
    pub fn with_letters_only_hyphens(mut self, letters_only: bool) -> Self {
        self.letters_only_hyphens = letters_only;
        self
    }

    /// Merges kept lines, given as `(page, text)` pairs in document order.
    pub fn merge<'a, I>(&self, lines: I) -> MergedText
    where
        I: IntoIterator<Item = (usize, &'a str)>,
    {
        let mut pages: Vec<String> = Vec::new();
        let mut current_page: Option<usize> = None;
        let mut buffer: Vec<&str> = Vec::new();

        for (page, line) in lines {
            if current_page.is_some_and(|p| p != page) {
                self.push_page(&mut pages, &buffer);
                buffer.clear();
            }
            current_page = Some(page);
            buffer.push(line);
        }
        self.push_page(&mut pages, &buffer);

        MergedText {
            pages_kept: pages.len(),
            text: pages.join(" "),
        }
    }

    fn push_page(&self, pages: &mut Vec<String>, lines: &[&str]) {
        if lines.is_empty() {
            return;
        }
        let page = self.merge_page(lines);
        let chars = page.chars().count();
        if chars > self.min_page_chars {
            pages.push(page);
        } else {
            tracing::trace!(chars, "dropping short page");
        }
    }

    /// Joins the lines of one page with single spaces, gluing hyphenated
    /// breaks. A hyphen on the page's last line has nothing to glue to and
    /// stays.
    pub fn merge_page(&self, lines: &[&str]) -> String {
        let mut text = String::new();
        let mut glue = false;

        for (i, line) in lines.iter().enumerate() {
            let line = line.trim();
            if !text.is_empty() && !glue {
                text.push(' ');
            }
            let has_next = i + 1 < lines.len();
            match self.wrap_stem(line) {
                Some(stem) if has_next => {
                    text.push_str(stem);
                    glue = true;
                }
                _ => {
                    text.push_str(line);
                    glue = false;
                }
            }
        }

        text
    }

    /// Returns the line without its word-wrap hyphen (or soft hyphen) and
    /// the spaces before it.
    ///
    /// With `letters_only_hyphens` the hyphen must follow a letter, so
    /// numeric ranges such as `1990-` keep theirs.
    fn wrap_stem<'a>(&self, line: &'a str) -> Option<&'a str> {
        let stem = line
            .strip_suffix('-')
            .or_else(|| line.strip_suffix('\u{00AD}'))?;
        let after_letter = stem.chars().next_back().is_some_and(char::is_alphabetic);
        (after_letter || !self.letters_only_hyphens).then(|| stem.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge_page(lines: &[&str]) -> String {
        PageMerger::default().merge_page(lines)
    }

    #[test]
    fn test_hyphen_joins_without_space() {
        assert_eq!(merge_page(&["Bu bir exam-", "ple."]), "Bu bir example.");
        assert_eq!(merge_page(&["kelime\u{00AD}", "ler"]), "kelimeler");
        assert_eq!(merge_page(&["uzun bir söz -", "cük"]), "uzun bir sözcük");
    }

    #[test]
    fn test_plain_lines_join_with_space() {
        assert_eq!(merge_page(&["birinci satır", "ikinci satır"]), "birinci satır ikinci satır");
    }

    #[test]
    fn test_any_line_final_hyphen_joins_by_default() {
        assert_eq!(merge_page(&["1990-", "1995 arası"]), "19901995 arası");
    }

    #[test]
    fn test_letters_only_keeps_numeric_range() {
        let merger = PageMerger::default().with_letters_only_hyphens(true);
        assert_eq!(merger.merge_page(&["1990-", "1995 arası"]), "1990- 1995 arası");
        assert_eq!(merger.merge_page(&["exam-", "ple"]), "example");
    }

    #[test]
    fn test_last_line_keeps_hyphen() {
        assert_eq!(merge_page(&["satır", "sonu-"]), "satır sonu-");
    }

    #[test]
    fn test_short_pages_are_dropped() {
        let short = "a".repeat(40);
        let long = "b".repeat(51);
        let merged = PageMerger::default().merge([(0, short.as_str()), (1, long.as_str())]);
        assert_eq!(merged.text, long);
        assert_eq!(merged.pages_kept, 1);
    }

    #[test]
    fn test_boundary_length_is_dropped() {
        let exact = "c".repeat(50);
        let merged = PageMerger::default().merge([(0, exact.as_str())]);
        assert!(merged.text.is_empty());
        assert_eq!(merged.pages_kept, 0);
    }

    #[test]
    fn test_pages_are_space_joined() {
        let first = format!("{} son", "a".repeat(60));
        let second = format!("{} baş", "b".repeat(60));
        let merged = PageMerger::default().merge([
            (0, first.as_str()),
            (2, second.as_str()),
        ]);
        assert_eq!(merged.text, format!("{first} {second}"));
        assert_eq!(merged.pages_kept, 2);
    }
}
