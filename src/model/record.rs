//! Per-line audit records and per-document results.

use super::{DropReason, LineFeatures};
use serde::Serialize;
use std::collections::BTreeMap;

/// Classification flags attached to a line by the detectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LineFlags {
    /// Target-language flag after smoothing
    pub target_language: bool,
    /// Table-like by the digit/length heuristic
    pub numeric: bool,
    /// Inside a caption-anchored table region
    pub table_region: bool,
    /// Part of a footnote run
    pub footnote: bool,
    /// At or after the bibliography heading
    pub bibliography: bool,
}

/// Everything known about one line, for auditing.
#[derive(Debug, Clone, Serialize)]
pub struct LineRecord {
    /// Line position
    pub index: usize,
    /// Page the line belongs to
    pub page: usize,
    /// Line text
    pub text: String,
    /// Derived features
    pub features: LineFeatures,
    /// Detector flags
    pub flags: LineFlags,
    /// Reasons the line was dropped (empty when kept)
    pub reasons: Vec<DropReason>,
}

impl LineRecord {
    /// Returns true if the line was dropped.
    pub fn dropped(&self) -> bool {
        !self.reasons.is_empty()
    }
}

/// Summary numbers for one processed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    /// Lines after blank stripping
    pub lines: usize,
    /// Lines dropped for any reason
    pub dropped: usize,
    /// Pages in the document
    pub pages: usize,
    /// Pages that contributed text to the output
    pub pages_kept: usize,
    /// How many lines carry each reason (a line may carry several)
    pub reasons: BTreeMap<DropReason, usize>,
}

/// The cleaned text of a document plus its audit trail.
#[derive(Debug, Clone, Serialize)]
pub struct CleanedDocument {
    /// Page-merged, citation-stripped body prose
    pub text: String,
    /// One record per line
    pub records: Vec<LineRecord>,
    /// Summary numbers
    pub stats: DocumentStats,
}

impl CleanedDocument {
    /// Serializes the per-line records as pretty JSON.
    pub fn records_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }
}

/// Why a document produced no output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No lines survived blank stripping and section discarding
    NoLines,
    /// No line is in the target language
    NoTargetLanguage,
    /// Every line was dropped by the classifier
    AllLinesDropped,
    /// Every page was shorter than the minimum page length
    NoPageLongEnough,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoLines => write!(f, "no lines"),
            SkipReason::NoTargetLanguage => write!(f, "no target-language lines"),
            SkipReason::AllLinesDropped => write!(f, "all lines dropped"),
            SkipReason::NoPageLongEnough => write!(f, "no page long enough"),
        }
    }
}

/// Result of running the pipeline on one document.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The document produced cleaned text.
    Cleaned(CleanedDocument),
    /// The document was empty after a filtering stage.
    Skipped {
        /// Stage that emptied the document
        reason: SkipReason,
        /// Audit records gathered before the stage (may be empty)
        records: Vec<LineRecord>,
    },
}

impl Outcome {
    /// Returns the cleaned text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Outcome::Cleaned(doc) => Some(&doc.text),
            Outcome::Skipped { .. } => None,
        }
    }

    /// Returns the audit records.
    pub fn records(&self) -> &[LineRecord] {
        match self {
            Outcome::Cleaned(doc) => &doc.records,
            Outcome::Skipped { records, .. } => records,
        }
    }

    /// Returns true if the document was skipped.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped { .. })
    }
}
