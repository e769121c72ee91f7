//! Content extraction seam.
//!
//! OCR and PDF extraction happen outside this crate. An [`Extractor`] turns a
//! source path into raw text; its failures are reported per document as
//! [`Error::Extraction`] so a batch can carry on with the other documents.

use crate::error::{Error, Result};
use std::path::Path;

/// Produces raw page-segmented text for a source document.
pub trait Extractor: Send + Sync {
    /// Returns the raw extracted text of the document at `path`.
    fn extract(&self, path: &Path) -> Result<String>;
}

/// Reads text that was already extracted to a UTF-8 file.
///
/// Invalid UTF-8 sequences are replaced rather than rejected; extraction
/// tools regularly emit a few stray bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl Extractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| Error::Extraction {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl<F> Extractor for F
where
    F: Fn(&Path) -> Result<String> + Send + Sync,
{
    fn extract(&self, path: &Path) -> Result<String> {
        self(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_plain_text_extractor_is_lossy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"metin \xFF son").unwrap();

        let text = PlainTextExtractor.extract(file.path()).unwrap();
        assert_eq!(text, "metin \u{FFFD} son");
    }

    #[test]
    fn test_missing_file_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("yok.txt");
        let err = PlainTextExtractor.extract(&missing).unwrap_err();
        assert!(matches!(err, Error::Extraction { path, .. } if path == missing));
    }

    #[test]
    fn test_closure_extractor() {
        let extractor = |_: &Path| -> Result<String> { Ok("sabit".to_string()) };
        assert_eq!(extractor.extract(Path::new("x")).unwrap(), "sabit");
    }
}
