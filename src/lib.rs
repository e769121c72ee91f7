//! # prosefilter
//!
//! Recovers the body prose of page-segmented extracted document text
//! (theses, journal articles) for language-model corpora.
//!
//! Extraction output is full of non-prose: page numbers, running headers,
//! footnotes, captions and the tables next to them, bibliographies, tables of
//! contents, author affiliations, identifiers and inline citations. Every
//! line is featurized, run through structural detectors and classified; the
//! surviving lines are merged back into page-aware continuous text.
//!
//! ## Quick Start
//!
//! ```no_run
//! use prosefilter::{clean_file, Outcome};
//!
//! fn main() -> prosefilter::Result<()> {
//!     match clean_file("thesis.txt")? {
//!         Outcome::Cleaned(doc) => println!("{}", doc.text),
//!         Outcome::Skipped { reason, .. } => eprintln!("skipped: {reason}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `async` (default): tokio worker pool with a per-document timeout

pub mod batch;
pub mod classify;
pub mod detect;
pub mod error;
pub mod extract;
pub mod features;
pub mod lexicon;
pub mod model;
pub mod normalize;
pub mod options;
pub mod paginate;
pub mod pipeline;
pub mod render;
pub mod sections;
pub mod smooth;

#[cfg(feature = "async")]
pub mod async_api;

// Re-exports
pub use batch::{BatchSummary, TaskReport, TaskStatus};
pub use error::{Error, Result};
pub use extract::{Extractor, PlainTextExtractor};
pub use model::{
    CleanedDocument, Document, DocumentStats, DropReason, Line, LineFeatures, LineFlags,
    LineRecord, Outcome, SkipReason,
};
pub use options::{BatchOptions, BibliographyFallback, FilterOptions};
pub use pipeline::{LanguageDetector, Pipeline};

use std::path::Path;

/// Cleans raw extracted text with default options.
///
/// # Example
///
/// ```
/// let outcome = prosefilter::clean_text("12\n34")?;
/// assert!(outcome.is_skipped());
/// # Ok::<(), prosefilter::Error>(())
/// ```
pub fn clean_text(raw: &str) -> Result<Outcome> {
    clean_text_with_options(raw, &FilterOptions::default())
}

/// Cleans raw extracted text with custom options.
///
/// # Example
///
/// ```no_run
/// use prosefilter::{clean_text_with_options, FilterOptions};
///
/// let raw = std::fs::read_to_string("thesis.txt")?;
/// let outcome = clean_text_with_options(&raw, &FilterOptions::aggressive())?;
/// # Ok::<(), prosefilter::Error>(())
/// ```
pub fn clean_text_with_options(raw: &str, options: &FilterOptions) -> Result<Outcome> {
    Pipeline::new(options.clone())?.process(raw)
}

/// Cleans a pre-extracted UTF-8 text file with default options.
pub fn clean_file(path: impl AsRef<Path>) -> Result<Outcome> {
    clean_file_with_options(path, &FilterOptions::default())
}

/// Cleans a pre-extracted UTF-8 text file with custom options.
pub fn clean_file_with_options(
    path: impl AsRef<Path>,
    options: &FilterOptions,
) -> Result<Outcome> {
    Pipeline::new(options.clone())?.process_path(&PlainTextExtractor, path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_1: [&str; 2] = [
        "Bu çalışmada kırsal bölgelerdeki eğitim olanakları incelenmektedir.",
        "Araştırmanın verileri anket yoluyla toplanmış ve analiz edilmiştir.",
    ];
    const PAGE_3: [&str; 2] = [
        "Sonuç olarak eğitim olanaklarının iyileştirilmesi gerektiği görülmüştür.",
        "Gelecek çalışmalarda daha geniş örneklemler kullanılması önerilmektedir.",
    ];

    #[test]
    fn test_numeric_page_contributes_nothing() {
        let raw = format!(
            "{}\n\n\n12 34 56\n78 90 11\n23 45 67\n\n\n{}",
            PAGE_1.join("\n"),
            PAGE_3.join("\n")
        );

        let Outcome::Cleaned(doc) = clean_text(&raw).unwrap() else {
            panic!("expected cleaned document");
        };

        let expected = format!("{} {}", PAGE_1.join(" "), PAGE_3.join(" "));
        assert_eq!(doc.text, expected);
        assert_eq!(doc.stats.pages, 3);
        assert_eq!(doc.stats.pages_kept, 2);
        assert!(doc
            .records
            .iter()
            .filter(|r| r.page == 1)
            .all(|r| r.flags.numeric && r.dropped()));
    }

    #[test]
    fn test_numeric_rows_in_prepared_document() {
        let text = format!(
            "{}\n[PAGE_BREAK]\n12\n34\n56\n78\n[PAGE_BREAK]\n{}",
            PAGE_1.join("\n"),
            PAGE_3.join("\n")
        );
        let document = Document::from_marked_text(&text);
        let pipeline = Pipeline::new(FilterOptions::default()).unwrap();

        let outcome = pipeline.process_document(&document).unwrap();
        for record in outcome.records().iter().filter(|r| r.page == 1) {
            assert_eq!(record.features.digit_ratio, 1.0);
            assert_eq!(record.features.average_token_length, 2.0);
            assert!(record.reasons.contains(&DropReason::Numeric));
        }
        let text = outcome.text().unwrap();
        assert!(!text.contains("12"));
        assert!(text.starts_with(PAGE_1[0]));
        assert!(text.ends_with(PAGE_3[1]));
    }

    #[test]
    fn test_thesis_like_document() {
        let header = "Osmanlı Mektup Geleneği Üzerine Bir İnceleme";
        let body = format!(
            "{header}\n\
             Bu tez Osmanlı dönemi edebiyatında mektup türünü ayrıntılı biçimde incelemektedir1.\n\
             Mektupların dili ve üslubu dönemin sosyal yapısını yansıtır (Yılmaz, 2003: 45).\n\
             Çalışmada yüzlerce mektup taranmış ve sınıflandırılmıştır.\n\
             1 Bkz. Yılmaz, a.g.e., s. 12.\n\
             2 Aynı eser, s. 14."
        );
        let closing = format!(
            "{header}\n\
             Ondokuzuncu yüzyılda Osmanlı toplumunda mek-\n\
             tuplar önemli bir iletişim aracıydı ve yaygın biçimde kullanılırdı.\n\
             KAYNAKÇA\n\
             Yılmaz, A. (2003). Osmanlı Mektupları. İstanbul: Kitabevi."
        );
        let references = format!("{header}\nDemir, B. (2010). Mektup Sanatı. Ankara: Yayınevi.");
        let raw = [
            "TEŞEKKÜR\nDanışmanıma ve aileme sonsuz teşekkür ederim.",
            body.as_str(),
            closing.as_str(),
            references.as_str(),
        ]
        .join("\n\n\n\n");

        let Outcome::Cleaned(doc) = clean_text(&raw).unwrap() else {
            panic!("expected cleaned document");
        };

        assert_eq!(
            doc.text,
            "Bu tez Osmanlı dönemi edebiyatında mektup türünü ayrıntılı biçimde incelemektedir. \
             Mektupların dili ve üslubu dönemin sosyal yapısını yansıtır. \
             Çalışmada yüzlerce mektup taranmış ve sınıflandırılmıştır. \
             Ondokuzuncu yüzyılda Osmanlı toplumunda mektuplar önemli bir iletişim aracıydı \
             ve yaygın biçimde kullanılırdı."
        );
        assert_eq!(doc.stats.reasons.get(&DropReason::Footnote), Some(&2));
        assert_eq!(doc.stats.reasons.get(&DropReason::Repeated), Some(&3));
        assert!(doc
            .records
            .iter()
            .all(|r| !r.text.contains("Danışmanıma")));

        let json = doc.records_json().unwrap();
        assert!(json.contains("\"bibliography\": true"));
    }

    #[test]
    fn test_clean_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("girdi.txt");
        std::fs::write(&path, PAGE_1.join("\n")).unwrap();

        let outcome = clean_file(&path).unwrap();
        assert_eq!(outcome.text(), Some(PAGE_1.join(" ").as_str()));
    }

    #[test]
    fn test_invalid_options_fail_before_processing() {
        let options = FilterOptions::default().with_footnote_tolerance(2, 0);
        assert!(matches!(
            clean_text_with_options("metin", &options),
            Err(Error::InvalidConfig(_))
        ));
    }
}
