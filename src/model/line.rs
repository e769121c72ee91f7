//! Lines and their derived features.

use serde::Serialize;

/// One trimmed, non-blank line of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    /// Position in the document (0-based, never reordered)
    pub index: usize,
    /// Page the line belongs to (0-based)
    pub page: usize,
    /// Line text
    pub text: String,
}

impl Line {
    /// Creates a new line.
    pub fn new(index: usize, page: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            page,
            text: text.into(),
        }
    }
}

/// Fixed-shape feature record computed for every line.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LineFeatures {
    /// Number of characters
    pub char_count: usize,
    /// Number of whitespace-separated tokens
    pub token_count: usize,
    /// Number of numeric tokens (integers or decimals)
    pub number_count: usize,
    /// `number_count / token_count`, -1 without tokens
    pub number_ratio: f64,
    /// Mean token length in characters, -1 without tokens
    pub average_token_length: f64,
    /// Share of ASCII digits among characters
    pub digit_ratio: f64,
    /// Share of upper-case letters among characters
    pub uppercase_ratio: f64,
    /// Integer the line starts with (decimals excluded)
    pub leading_number: Option<u64>,
    /// Integer the line ends with (decimals excluded)
    pub trailing_number: Option<u64>,
    /// Caption label the line opens with, e.g. `Tablo` in `Tablo 3. ...`
    pub caption: Option<&'static str>,
    /// Fixed-denominator hit rate of academic titles and place names
    pub affiliation_ratio: f64,
    /// Contains an e-mail address
    pub has_email: bool,
    /// Contains a "vol N ... no M ... p" journal reference
    pub has_volume_format: bool,
    /// Contains a persistent identifier marker or a long ellipsis run
    pub has_discard_token: bool,
    /// The whole line is a 2-3 token personal name
    pub is_person_name: bool,
    /// Contains a parenthetical citation
    pub has_citation: bool,
    /// Number of dates found in the line
    pub date_count: usize,
    /// How many lines of the document normalize to the same text
    pub repetition: usize,
    /// Part of an index, table of contents or list of figures
    pub in_index_block: bool,
}

impl LineFeatures {
    /// Returns true if the line opens with a caption label.
    pub fn is_caption(&self) -> bool {
        self.caption.is_some()
    }
}

/// Why a line was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Not in the target language (after smoothing)
    ForeignLanguage,
    /// Digit-heavy short tokens: table cells, page numbers
    Numeric,
    /// Figure, table or photo caption
    Caption,
    /// Inside the table region around a caption
    TableRegion,
    /// Contains an e-mail address
    Email,
    /// The line is a personal name
    PersonName,
    /// At or after the bibliography heading
    Bibliography,
    /// Part of a footnote run
    Footnote,
    /// Journal volume/issue/page reference
    CitationFormat,
    /// Persistent identifier or ellipsis run
    DiscardToken,
    /// Author/institution header
    Affiliation,
    /// Running header or footer
    Repeated,
    /// Index, table of contents or list of figures
    IndexBlock,
    /// Kept line stranded inside a dropped run
    Smoothed,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DropReason::ForeignLanguage => "foreign language",
            DropReason::Numeric => "numeric",
            DropReason::Caption => "caption",
            DropReason::TableRegion => "table region",
            DropReason::Email => "e-mail",
            DropReason::PersonName => "person name",
            DropReason::Bibliography => "bibliography",
            DropReason::Footnote => "footnote",
            DropReason::CitationFormat => "citation format",
            DropReason::DiscardToken => "discard token",
            DropReason::Affiliation => "affiliation",
            DropReason::Repeated => "repeated",
            DropReason::IndexBlock => "index block",
            DropReason::Smoothed => "smoothed",
        };
        f.write_str(name)
    }
}
