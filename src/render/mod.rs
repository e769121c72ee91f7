//! Output text reconstruction.
//!
//! Kept lines are merged page by page into continuous prose, then inline
//! citations are stripped from the merged text.

mod citations;
mod merge;

pub use citations::strip_citations;
pub use merge::{MergedText, PageMerger};

use crate::error::Result;
use crate::model::{LineRecord, Outcome};
use std::path::Path;

/// Merges the kept lines of audited records into text.
pub fn merge_records(records: &[LineRecord], merger: &PageMerger) -> MergedText {
    merger.merge(
        records
            .iter()
            .filter(|r| !r.dropped())
            .map(|r| (r.page, r.text.as_str())),
    )
}

/// Writes the cleaned text of an outcome to a file.
///
/// A skipped document writes nothing and returns `false`.
pub fn write_to_file(outcome: &Outcome, path: impl AsRef<Path>) -> Result<bool> {
    match outcome.text() {
        Some(text) => {
            std::fs::write(path, text)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SkipReason;

    #[test]
    fn test_skipped_outcome_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cikti.txt");
        let outcome = Outcome::Skipped {
            reason: SkipReason::NoLines,
            records: Vec::new(),
        };

        assert!(!write_to_file(&outcome, &path).unwrap());
        assert!(!path.exists());
    }
}
