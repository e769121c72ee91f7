//! Filtering options: every tunable threshold of the pipeline.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest accepted window or gap, in lines.
pub const MAX_WINDOW: usize = 10_000;

/// Options controlling line classification and page reconstruction.
///
/// All thresholds were tuned on a thesis/journal corpus and are exposed so
/// they can be re-tuned for other sources.
///
/// # Example
///
/// ```
/// use prosefilter::FilterOptions;
///
/// let options = FilterOptions::default()
///     .with_affiliation_threshold(0.1)
///     .with_min_page_chars(80);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Apply NFC normalization and strip control characters before featurizing.
    pub normalize_unicode: bool,
    /// Turn standalone page-number and roman-numeral lines into page breaks.
    pub mark_page_numbers: bool,
    /// Remove front/back-matter sections (acknowledgments, approval forms, ...).
    pub discard_sections: bool,
    /// Heal isolated kept lines inside dropped runs.
    pub smooth_drops: bool,
    /// Strip inline citations from the merged text.
    pub strip_citations: bool,

    /// Lines with at least this digit ratio (and short tokens) are table-like.
    pub digit_ratio_threshold: f64,
    /// Average token length below which a digit-heavy line is table-like.
    pub avg_token_length_threshold: f64,
    /// Affiliation ratio above which a line is an author/institution header.
    pub affiliation_threshold: f64,
    /// Lines repeated more than this many times are running headers/footers.
    pub repetition_threshold: usize,

    /// Largest allowed ascent between consecutive footnote numerals.
    pub footnote_max_ascent: u64,
    /// Largest allowed line distance between consecutive footnote numerals.
    pub footnote_max_line_gap: usize,

    /// What to do when several lines look like a bibliography heading
    /// and none of them matches the strict pattern.
    pub bibliography_fallback: BibliographyFallback,

    /// Width of the windows walked around a caption line.
    pub caption_window: usize,
    /// A walked window whose mean token count exceeds this ends the table region.
    pub caption_token_threshold: f64,
    /// A walked window whose table-like fraction falls below this ends the region.
    pub caption_drop_fraction: f64,
    /// Skip caption expansion when the document has more captions than this.
    pub caption_safety_valve: usize,

    /// Positions inspected before the current one while smoothing.
    pub smoothing_before: usize,
    /// Exclusive end offset of the smoothing window after the current position.
    pub smoothing_after: usize,
    /// Fraction of defined values that must be true to flip a false value.
    pub smoothing_fraction: f64,

    /// Pages whose merged text is not longer than this are discarded.
    pub min_page_chars: usize,
    /// Only join a line-final hyphen to the next line when a letter precedes
    /// it, so numeric ranges like `1990-` survive the merge. Off by default,
    /// which joins every line-final hyphen.
    pub hyphen_letters_only: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            mark_page_numbers: true,
            discard_sections: true,
            smooth_drops: true,
            strip_citations: true,
            digit_ratio_threshold: 0.2,
            avg_token_length_threshold: 4.0,
            affiliation_threshold: 0.15,
            repetition_threshold: 2,
            footnote_max_ascent: 2,
            footnote_max_line_gap: 6,
            bibliography_fallback: BibliographyFallback::Last,
            caption_window: 5,
            caption_token_threshold: 2.0,
            caption_drop_fraction: 0.5,
            caption_safety_valve: 25,
            smoothing_before: 5,
            smoothing_after: 6,
            smoothing_fraction: 0.9,
            min_page_chars: 50,
            hyphen_letters_only: false,
        }
    }
}

impl FilterOptions {
    /// Creates new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that keep more borderline lines.
    pub fn lenient() -> Self {
        Self {
            smooth_drops: false,
            affiliation_threshold: 0.2,
            repetition_threshold: 4,
            footnote_max_line_gap: 4,
            min_page_chars: 20,
            ..Self::default()
        }
    }

    /// Creates options that drop more aggressively (maximum purification).
    pub fn aggressive() -> Self {
        Self {
            digit_ratio_threshold: 0.15,
            affiliation_threshold: 0.09, // Lower threshold = more aggressive
            footnote_max_ascent: 3,
            footnote_max_line_gap: 8,
            smoothing_fraction: 0.8,
            min_page_chars: 100,
            ..Self::default()
        }
    }

    /// Parses options from a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let options: FilterOptions = toml::from_str(input)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serializes the options as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks every threshold. Called once before any document is processed.
    pub fn validate(&self) -> Result<()> {
        if self.caption_window == 0 {
            return Err(Error::InvalidConfig("caption_window must be at least 1".into()));
        }
        if self.smoothing_before == 0 && self.smoothing_after <= 1 {
            return Err(Error::InvalidConfig(
                "smoothing window must cover at least one neighbour".into(),
            ));
        }
        for (name, value) in [
            ("caption_window", self.caption_window),
            ("smoothing_before", self.smoothing_before),
            ("smoothing_after", self.smoothing_after),
            ("footnote_max_line_gap", self.footnote_max_line_gap),
        ] {
            if value > MAX_WINDOW {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be at most {MAX_WINDOW} lines, got {value}"
                )));
            }
        }
        if self.footnote_max_line_gap == 0 {
            return Err(Error::InvalidConfig(
                "footnote_max_line_gap must be at least 1".into(),
            ));
        }
        check_fraction("smoothing_fraction", self.smoothing_fraction)?;
        check_fraction("caption_drop_fraction", self.caption_drop_fraction)?;
        check_fraction("digit_ratio_threshold", self.digit_ratio_threshold)?;
        for (name, value) in [
            ("affiliation_threshold", self.affiliation_threshold),
            ("avg_token_length_threshold", self.avg_token_length_threshold),
            ("caption_token_threshold", self.caption_token_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Sets the digit-ratio threshold for table-like lines.
    pub fn with_digit_ratio_threshold(mut self, ratio: f64) -> Self {
        self.digit_ratio_threshold = ratio;
        self
    }

    /// Sets the affiliation-ratio threshold.
    pub fn with_affiliation_threshold(mut self, ratio: f64) -> Self {
        self.affiliation_threshold = ratio;
        self
    }

    /// Sets the repetition threshold for running headers/footers.
    pub fn with_repetition_threshold(mut self, count: usize) -> Self {
        self.repetition_threshold = count;
        self
    }

    /// Sets the footnote ascent and line-gap tolerances.
    pub fn with_footnote_tolerance(mut self, max_ascent: u64, max_line_gap: usize) -> Self {
        self.footnote_max_ascent = max_ascent;
        self.footnote_max_line_gap = max_line_gap;
        self
    }

    /// Sets the caption expansion window width.
    pub fn with_caption_window(mut self, window: usize) -> Self {
        self.caption_window = window;
        self
    }

    /// Sets the minimum merged page length.
    pub fn with_min_page_chars(mut self, chars: usize) -> Self {
        self.min_page_chars = chars;
        self
    }

    /// Joins hyphenated line breaks only after a letter.
    pub fn with_letters_only_hyphens(mut self) -> Self {
        self.hyphen_letters_only = true;
        self
    }

    /// Sets the bibliography multiple-match fallback.
    pub fn with_bibliography_fallback(mut self, fallback: BibliographyFallback) -> Self {
        self.bibliography_fallback = fallback;
        self
    }

    /// Disables section discarding.
    pub fn without_section_discarding(mut self) -> Self {
        self.discard_sections = false;
        self
    }

    /// Disables page-number placeholders.
    pub fn without_page_number_marks(mut self) -> Self {
        self.mark_page_numbers = false;
        self
    }

    /// Disables drop smoothing.
    pub fn without_drop_smoothing(mut self) -> Self {
        self.smooth_drops = false;
        self
    }

    /// Disables citation stripping.
    pub fn without_citation_stripping(mut self) -> Self {
        self.strip_citations = false;
        self
    }
}

fn check_fraction(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{name} must be in (0, 1], got {value}"
        )))
    }
}

/// Which candidate wins when several lines look like a bibliography heading
/// and none of them matches the strict heading pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BibliographyFallback {
    /// Take the first candidate.
    First,
    /// Take the last candidate.
    #[default]
    Last,
}

/// Options for processing many documents at once.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Number of documents processed concurrently.
    pub workers: usize,
    /// Per-document time budget. Only enforced by the async pool.
    pub timeout: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            workers: 4,
            timeout: Duration::from_secs(300),
        }
    }
}

impl BatchOptions {
    /// Creates new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the per-document timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Rejects a zero worker count or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::InvalidConfig("workers must be at least 1".into()));
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig("timeout must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_valid() {
        let options = FilterOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.caption_window, 5);
        assert_eq!(options.min_page_chars, 50);
        assert_eq!(options.bibliography_fallback, BibliographyFallback::Last);
        assert!(!options.hyphen_letters_only);
    }

    #[test]
    fn test_letters_only_hyphens_from_toml() {
        let options = FilterOptions::from_toml_str("hyphen_letters_only = true").unwrap();
        assert!(options.hyphen_letters_only);
        assert_eq!(options, FilterOptions::default().with_letters_only_hyphens());
    }

    #[test]
    fn test_presets() {
        let default = FilterOptions::default();
        let aggressive = FilterOptions::aggressive();
        let lenient = FilterOptions::lenient();
        assert!(aggressive.affiliation_threshold < default.affiliation_threshold);
        assert!(lenient.affiliation_threshold > default.affiliation_threshold);
        assert!(!lenient.smooth_drops);
        assert!(aggressive.validate().is_ok());
        assert!(lenient.validate().is_ok());
    }

    #[test]
    fn test_zero_width_window_rejected() {
        let options = FilterOptions::default().with_caption_window(0);
        assert!(matches!(options.validate(), Err(Error::InvalidConfig(_))));

        let options = FilterOptions {
            smoothing_before: 0,
            smoothing_after: 1,
            ..FilterOptions::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_oversized_window_rejected() {
        let options = FilterOptions::from_toml_str("caption_window = 9223372036854775807");
        assert!(matches!(options, Err(Error::InvalidConfig(_))));

        let options = FilterOptions {
            smoothing_after: usize::MAX,
            ..FilterOptions::default()
        };
        assert!(options.validate().is_err());

        let options = FilterOptions {
            smoothing_before: MAX_WINDOW,
            ..FilterOptions::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_fraction_out_of_range_rejected() {
        let options = FilterOptions {
            smoothing_fraction: 1.5,
            ..FilterOptions::default()
        };
        assert!(options.validate().is_err());

        let options = FilterOptions {
            caption_drop_fraction: 0.0,
            ..FilterOptions::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_toml_partial_override() {
        let options = FilterOptions::from_toml_str(
            "affiliation_threshold = 0.09\nbibliography_fallback = \"first\"\n",
        )
        .unwrap();
        assert_eq!(options.affiliation_threshold, 0.09);
        assert_eq!(options.bibliography_fallback, BibliographyFallback::First);
        assert_eq!(options.caption_window, 5);
    }

    #[test]
    fn test_toml_invalid_value_rejected() {
        let result = FilterOptions::from_toml_str("caption_window = 0\n");
        assert!(matches!(result, Err(Error::InvalidConfig(_))));

        let result = FilterOptions::from_toml_str("caption_window = \"wide\"\n");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_toml_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filter.toml");
        let options = FilterOptions::aggressive();
        std::fs::write(&path, options.to_toml_string().unwrap()).unwrap();

        let loaded = FilterOptions::from_path(&path).unwrap();
        assert_eq!(loaded, options);
    }

    #[test]
    fn test_batch_options_validation() {
        assert!(BatchOptions::default().validate().is_ok());
        assert!(BatchOptions::new().with_workers(0).validate().is_err());
        assert!(BatchOptions::new()
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }
}
