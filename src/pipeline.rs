//! Per-document orchestration.
//!
//! ```text
//! raw text ─▶ normalize ─▶ paginate ─▶ discard sections ─▶ lines
//!   lines ─▶ featurize ─▶ detect ─▶ classify + smooth ─▶ merge pages ─▶ strip citations
//! ```
//!
//! A document that becomes empty after a stage short-circuits into
//! [`Outcome::Skipped`]; that is logged at info level and is not an error.

use crate::classify::NoiseClassifier;
use crate::error::{Error, Result};
use crate::extract::Extractor;
use crate::features::featurize;
use crate::model::{
    CleanedDocument, Document, DocumentStats, DropReason, LineFlags, LineRecord, Outcome,
    SkipReason,
};
use crate::normalize::normalize_text;
use crate::options::FilterOptions;
use crate::paginate::paginate;
use crate::render::{merge_records, strip_citations, PageMerger};
use crate::sections::discard_sections;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Decides per line whether it is in the target language.
///
/// Language identification is external to this crate; implement this trait
/// to plug one in. `None` marks a line the detector could not decide.
pub trait LanguageDetector: Send + Sync {
    /// Returns one entry per input line.
    fn detect(&self, lines: &[&str]) -> Vec<Option<bool>>;
}

impl<F> LanguageDetector for F
where
    F: Fn(&str) -> Option<bool> + Send + Sync,
{
    fn detect(&self, lines: &[&str]) -> Vec<Option<bool>> {
        lines.iter().map(|line| self(line)).collect()
    }
}

/// Cleans documents with a fixed configuration.
///
/// Cheap to clone and safe to share between worker threads.
///
/// # Example
///
/// ```
/// use prosefilter::{FilterOptions, Pipeline};
///
/// let pipeline = Pipeline::new(FilterOptions::default())?;
/// let outcome = pipeline.process("")?;
/// assert!(outcome.is_skipped());
/// # Ok::<(), prosefilter::Error>(())
/// ```
#[derive(Clone)]
pub struct Pipeline {
    options: FilterOptions,
    language: Option<Arc<dyn LanguageDetector>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .field("language_detector", &self.language.is_some())
            .finish()
    }
}

impl Pipeline {
    /// Creates a pipeline after validating the options.
    pub fn new(options: FilterOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            language: None,
        })
    }

    /// Adds a language detector. Without one every line counts as target
    /// language.
    pub fn with_language_detector(mut self, detector: impl LanguageDetector + 'static) -> Self {
        self.language = Some(Arc::new(detector));
        self
    }

    /// Returns the options in use.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Runs the text stages: normalization, page-break inference, section
    /// discarding and line splitting.
    pub fn prepare(&self, raw: &str) -> Document {
        let text = if self.options.normalize_unicode {
            normalize_text(raw)
        } else {
            raw.to_string()
        };
        let marked = paginate(&text, &self.options);
        let marked = if self.options.discard_sections {
            discard_sections(&marked)
        } else {
            marked
        };
        Document::from_marked_text(&marked)
    }

    /// Cleans raw extracted text.
    pub fn process(&self, raw: &str) -> Result<Outcome> {
        let document = self.prepare(raw);
        self.process_document(&document)
    }

    /// Extracts and cleans one source document.
    pub fn process_path(&self, extractor: &dyn Extractor, path: &Path) -> Result<Outcome> {
        let raw = extractor.extract(path)?;
        tracing::debug!(path = %path.display(), bytes = raw.len(), "extracted");
        self.process(&raw)
    }

    /// Classifies the lines of a prepared document and rebuilds its text.
    pub fn process_document(&self, document: &Document) -> Result<Outcome> {
        if document.is_empty() {
            return Ok(skip(SkipReason::NoLines, Vec::new()));
        }

        let texts = document.texts();
        let features = featurize(&texts);
        tracing::debug!(lines = texts.len(), pages = document.page_count, "featurized");

        let classifier = NoiseClassifier::new(&self.options);
        let target_language = self.target_language(&classifier, &texts)?;

        if !target_language.iter().any(|t| *t) {
            let records = document
                .lines
                .iter()
                .zip(features)
                .map(|(line, features)| LineRecord {
                    index: line.index,
                    page: line.page,
                    text: line.text.clone(),
                    features,
                    flags: LineFlags::default(),
                    reasons: vec![DropReason::ForeignLanguage],
                })
                .collect();
            return Ok(skip(SkipReason::NoTargetLanguage, records));
        }

        let flags = classifier.detect(&texts, &features, &target_language);
        let reasons = classifier.classify(&features, &flags);

        let records: Vec<LineRecord> = document
            .lines
            .iter()
            .zip(features)
            .zip(flags)
            .zip(reasons)
            .map(|(((line, features), flags), reasons)| LineRecord {
                index: line.index,
                page: line.page,
                text: line.text.clone(),
                features,
                flags,
                reasons,
            })
            .collect();

        let mut stats = DocumentStats {
            lines: records.len(),
            pages: document.page_count,
            ..Default::default()
        };
        let mut by_reason: BTreeMap<DropReason, usize> = BTreeMap::new();
        for record in &records {
            if record.dropped() {
                stats.dropped += 1;
            }
            for reason in &record.reasons {
                *by_reason.entry(*reason).or_insert(0) += 1;
            }
        }
        stats.reasons = by_reason;
        tracing::debug!(dropped = stats.dropped, lines = stats.lines, "classified");

        if stats.dropped == stats.lines {
            return Ok(skip(SkipReason::AllLinesDropped, records));
        }

        let merger = PageMerger::new(self.options.min_page_chars)
            .with_letters_only_hyphens(self.options.hyphen_letters_only);
        let merged = merge_records(&records, &merger);
        if merged.text.is_empty() {
            return Ok(skip(SkipReason::NoPageLongEnough, records));
        }
        stats.pages_kept = merged.pages_kept;

        let text = if self.options.strip_citations {
            strip_citations(&merged.text)
        } else {
            merged.text
        };
        tracing::debug!(
            pages_kept = stats.pages_kept,
            chars = text.len(),
            "document cleaned"
        );

        Ok(Outcome::Cleaned(CleanedDocument {
            text,
            records,
            stats,
        }))
    }

    /// Smoothed target-language flags, all true without a detector.
    fn target_language(
        &self,
        classifier: &NoiseClassifier<'_>,
        texts: &[&str],
    ) -> Result<Vec<bool>> {
        let Some(detector) = &self.language else {
            return Ok(vec![true; texts.len()]);
        };

        let raw = detector.detect(texts);
        if raw.len() != texts.len() {
            return Err(Error::InvalidInput(format!(
                "language detector returned {} flags for {} lines",
                raw.len(),
                texts.len()
            )));
        }
        Ok(classifier.smoother().smooth(&raw))
    }
}

fn skip(reason: SkipReason, records: Vec<LineRecord>) -> Outcome {
    tracing::info!(%reason, "skipping document");
    Outcome::Skipped { reason, records }
}
