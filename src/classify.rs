//! Keep/drop decision per line.
//!
//! Structural detectors produce [`LineFlags`]; the classifier ORs them with
//! the feature-based conditions into a list of [`DropReason`]s and finally
//! smooths the drop decision so that lone kept lines inside dropped runs go
//! too. Over-dropping is preferred to leaking noise into the corpus.

use crate::detect::{bibliography_flags, find_onset, CaptionExpander, FootnoteDetector};
use crate::model::{DropReason, LineFeatures, LineFlags};
use crate::options::FilterOptions;
use crate::smooth::ConfidenceSmoother;

/// Combines features and structural flags into drop reasons.
#[derive(Debug, Clone)]
pub struct NoiseClassifier<'a> {
    options: &'a FilterOptions,
}

impl<'a> NoiseClassifier<'a> {
    /// Creates a classifier using the given thresholds.
    pub fn new(options: &'a FilterOptions) -> Self {
        Self { options }
    }

    /// Digit-heavy short tokens: table cells, numbered lists, page numbers.
    pub fn is_numeric(&self, features: &LineFeatures) -> bool {
        (features.digit_ratio >= self.options.digit_ratio_threshold
            && features.average_token_length < self.options.avg_token_length_threshold)
            || features.digit_ratio == 1.0
            || features.number_ratio > 1.0
    }

    /// Runs the structural detectors over the document.
    ///
    /// `texts`, `features` and `target_language` are parallel slices in
    /// document order.
    pub fn detect(
        &self,
        texts: &[&str],
        features: &[LineFeatures],
        target_language: &[bool],
    ) -> Vec<LineFlags> {
        let options = self.options;
        let numeric: Vec<bool> = features.iter().map(|f| self.is_numeric(f)).collect();

        let leading: Vec<Option<u64>> = features.iter().map(|f| f.leading_number).collect();
        let footnotes =
            FootnoteDetector::new(options.footnote_max_ascent, options.footnote_max_line_gap)
                .detect(&leading);

        let onset = find_onset(texts, options.bibliography_fallback);
        if let Some(onset) = onset {
            tracing::debug!(line = onset, "bibliography onset");
        }
        let bibliography = bibliography_flags(texts.len(), onset);

        let captions: Vec<bool> = features.iter().map(LineFeatures::is_caption).collect();
        let token_counts: Vec<usize> = features.iter().map(|f| f.token_count).collect();
        let table_region = CaptionExpander {
            window: options.caption_window,
            token_threshold: options.caption_token_threshold,
            drop_fraction: options.caption_drop_fraction,
            safety_valve: options.caption_safety_valve,
        }
        .expand(&captions, &token_counts, &numeric);

        (0..features.len())
            .map(|i| LineFlags {
                target_language: target_language[i],
                numeric: numeric[i],
                table_region: table_region[i],
                footnote: footnotes[i],
                bibliography: bibliography[i],
            })
            .collect()
    }

    /// Every condition that drops the line, in a fixed order.
    pub fn reasons(&self, features: &LineFeatures, flags: &LineFlags) -> Vec<DropReason> {
        let options = self.options;
        [
            (!flags.target_language, DropReason::ForeignLanguage),
            (flags.numeric, DropReason::Numeric),
            (features.is_caption(), DropReason::Caption),
            (flags.table_region, DropReason::TableRegion),
            (features.has_email, DropReason::Email),
            (features.is_person_name, DropReason::PersonName),
            (flags.bibliography, DropReason::Bibliography),
            (flags.footnote, DropReason::Footnote),
            (features.has_volume_format, DropReason::CitationFormat),
            (features.has_discard_token, DropReason::DiscardToken),
            (
                features.affiliation_ratio > options.affiliation_threshold,
                DropReason::Affiliation,
            ),
            (
                features.repetition > options.repetition_threshold,
                DropReason::Repeated,
            ),
            (features.in_index_block, DropReason::IndexBlock),
        ]
        .into_iter()
        .filter_map(|(hit, reason)| hit.then_some(reason))
        .collect()
    }

    /// Drop reasons for every line, with drop smoothing applied when enabled.
    pub fn classify(&self, features: &[LineFeatures], flags: &[LineFlags]) -> Vec<Vec<DropReason>> {
        let mut reasons: Vec<Vec<DropReason>> = features
            .iter()
            .zip(flags)
            .map(|(f, fl)| self.reasons(f, fl))
            .collect();

        if self.options.smooth_drops {
            let dropped: Vec<bool> = reasons.iter().map(|r| !r.is_empty()).collect();
            let smoothed = self.smoother().smooth_flags(&dropped);
            for (line, (was, now)) in reasons.iter_mut().zip(dropped.iter().zip(&smoothed)) {
                if *now && !*was {
                    line.push(DropReason::Smoothed);
                }
            }
        }

        reasons
    }

    /// Smoother configured from the options.
    pub fn smoother(&self) -> ConfidenceSmoother {
        ConfidenceSmoother::new(
            self.options.smoothing_before,
            self.options.smoothing_after,
            self.options.smoothing_fraction,
        )
    }
}
