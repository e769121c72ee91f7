//! Page-partitioned documents.

use super::Line;
use crate::paginate::PAGE_BREAK;

/// An ordered list of lines partitioned into pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Lines in reading order
    pub lines: Vec<Line>,
    /// Number of pages, including pages without lines
    pub page_count: usize,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document from text carrying `[PAGE_BREAK]` marker lines.
    ///
    /// Lines are trimmed and blank lines discarded. Every marker line starts a
    /// new page.
    pub fn from_marked_text(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut page = 0;

        for raw in text.lines() {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed == PAGE_BREAK {
                page += 1;
                continue;
            }
            lines.push(Line::new(lines.len(), page, trimmed));
        }

        Self {
            lines,
            page_count: page + 1,
        }
    }

    /// Builds a single-page document from already split lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<Line> = lines
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .enumerate()
            .map(|(i, text)| Line::new(i, 0, text))
            .collect();
        Self {
            lines,
            page_count: 1,
        }
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the document has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the line texts in order.
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    /// Returns the index of the first line of every page after the first.
    pub fn page_breaks(&self) -> Vec<usize> {
        self.lines
            .windows(2)
            .filter(|w| w[0].page != w[1].page)
            .map(|w| w[1].index)
            .collect()
    }
}
