use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use super::{ExtractError, TextLayer};

/// Text layer reader backed by `pdf-extract`.
///
/// Parsing is CPU-bound and runs on the blocking pool. `pdf-extract` can panic
/// on malformed input; a panicked task surfaces as `ExtractError::Pdf`.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractText;

#[async_trait]
impl TextLayer for PdfExtractText {
    async fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = tokio::fs::read(path).await?;
        let size = bytes.len();

        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| ExtractError::Pdf(format!("extraction task aborted: {e}")))?
            .map_err(|e| ExtractError::Pdf(e.to_string()))?;

        debug!("Extracted {} chars from {} byte PDF", text.len(), size);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use crate::extraction::testing::{text_pdf, FixedOcr};
    use crate::extraction::{DocumentExtractor, ExtractionMethod, MIN_TEXT_CHARS};

    const CV_LINE: &str = "Ada Lovelace Analyst Wrote the first published algorithm";

    fn pdf_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&text_pdf(CV_LINE)).unwrap();
        file
    }

    #[tokio::test]
    async fn test_reads_text_layer() {
        let file = pdf_file();
        let text = PdfExtractText.extract_text(file.path()).await.unwrap();
        assert!(text.contains("Ada Lovelace"), "got {text:?}");
        assert!(text.contains("published algorithm"), "got {text:?}");
    }

    #[tokio::test]
    async fn test_text_layer_pdf_skips_ocr() {
        assert!(CV_LINE.chars().count() >= MIN_TEXT_CHARS);
        let file = pdf_file();
        let ocr = FixedOcr::new(Some("should not be used"));
        let extractor = DocumentExtractor::new(Arc::new(PdfExtractText), ocr.clone());

        let extraction = extractor.extract(file.path()).await.unwrap();
        assert_eq!(extraction.method, ExtractionMethod::TextLayer);
        assert!(extraction.text.contains("Ada Lovelace"));
        assert_eq!(ocr.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = PdfExtractText
            .extract_text(Path::new("/nonexistent/folio/cv.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_pdf_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a pdf").unwrap();
        let err = PdfExtractText.extract_text(file.path()).await.unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }
}
