//! Upload validation and PDF text extraction.
//!
//! Flow: validate_upload → text layer → OCR when the text layer yields
//! fewer than `MIN_TEXT_CHARS` characters.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

pub mod ocr;
pub mod pdf;
pub mod upload;

pub use ocr::TesseractOcr;
pub use pdf::PdfExtractText;
pub use upload::{read_form, FilePart, TempUpload};

pub const PDF_MIME: &str = "application/pdf";
/// Below this many characters the text layer is treated as missing.
pub const MIN_TEXT_CHARS: usize = 50;
/// Length of the preview returned alongside parsed results.
pub const EXCERPT_CHARS: usize = 1000;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file uploaded")]
    Missing,

    #[error("Only PDF files are allowed, received '{0}'")]
    NotPdf(String),

    #[error("File size {size} bytes exceeds the {max} byte limit")]
    TooLarge { size: u64, max: u64 },

    #[error("Uploaded file is empty")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No text could be extracted from the document")]
    NoText,
}

/// Checks MIME type and size. Runs before anything touches the file contents.
pub fn validate_upload(content_type: Option<&str>, size: u64, max: u64) -> Result<(), UploadError> {
    let mime = content_type
        .map(|ct| ct.split(';').next().unwrap_or_default().trim())
        .unwrap_or_default();
    if !mime.eq_ignore_ascii_case(PDF_MIME) {
        let received = if mime.is_empty() { "unknown" } else { mime };
        return Err(UploadError::NotPdf(received.to_string()));
    }
    if size == 0 {
        return Err(UploadError::Empty);
    }
    if size > max {
        return Err(UploadError::TooLarge { size, max });
    }
    Ok(())
}

/// First `EXCERPT_CHARS` characters of `text`.
pub fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_CHARS).collect()
}

/// True when the text layer is too thin to be useful.
pub fn needs_ocr(text: &str) -> bool {
    text.trim().chars().count() < MIN_TEXT_CHARS
}

/// Reads the embedded text layer of a PDF.
#[async_trait]
pub trait TextLayer: Send + Sync {
    async fn extract_text(&self, path: &Path) -> Result<String, ExtractError>;
}

/// Recognises text from the rendered pages of a PDF.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, path: &Path) -> Result<String, ExtractError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    TextLayer,
    Ocr,
}

#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub text: String,
    pub method: ExtractionMethod,
}

/// Text layer first, OCR fallback.
#[derive(Clone)]
pub struct DocumentExtractor {
    text_layer: Arc<dyn TextLayer>,
    ocr: Arc<dyn OcrEngine>,
}

impl DocumentExtractor {
    pub fn new(text_layer: Arc<dyn TextLayer>, ocr: Arc<dyn OcrEngine>) -> Self {
        Self { text_layer, ocr }
    }

    pub async fn extract(&self, path: &Path) -> Result<Extraction, ExtractError> {
        let text = match self.text_layer.extract_text(path).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Text layer extraction failed, trying OCR: {e}");
                String::new()
            }
        };

        if !needs_ocr(&text) {
            return Ok(Extraction {
                text,
                method: ExtractionMethod::TextLayer,
            });
        }

        info!(
            "Text layer yielded {} chars (< {MIN_TEXT_CHARS}), running OCR",
            text.trim().chars().count()
        );
        let recognized = self.ocr.recognize(path).await?;

        if recognized.trim().is_empty() && text.trim().is_empty() {
            return Err(ExtractError::NoText);
        }
        if recognized.trim().chars().count() < text.trim().chars().count() {
            return Ok(Extraction {
                text,
                method: ExtractionMethod::TextLayer,
            });
        }
        Ok(Extraction {
            text: recognized,
            method: ExtractionMethod::Ocr,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Text layer returning fixed text and counting calls.
    pub struct FixedText {
        pub text: String,
        pub calls: AtomicUsize,
    }

    impl FixedText {
        pub fn new(text: &str) -> Arc<Self> {
            Arc::new(Self {
                text: text.to_string(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextLayer for FixedText {
        async fn extract_text(&self, _path: &Path) -> Result<String, ExtractError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.clone())
        }
    }

    /// Single-page PDF whose text layer holds `line`, set in Helvetica.
    pub fn text_pdf(line: &str) -> Vec<u8> {
        let content = format!("BT /F1 12 Tf 72 720 Td ({line}) Tj ET");
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (index, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", index + 1).as_bytes());
        }

        let xref_at = pdf.len();
        let mut tail = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            tail.push_str(&format!("{offset:010} 00000 n \n"));
        }
        tail.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        ));
        pdf.extend_from_slice(tail.as_bytes());
        pdf
    }

    /// OCR engine returning fixed text (or failing) and counting calls.
    pub struct FixedOcr {
        pub text: Option<String>,
        pub calls: AtomicUsize,
    }

    impl FixedOcr {
        pub fn new(text: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                text: text.map(str::to_string),
                calls: AtomicUsize::new(0),
            })
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl OcrEngine for FixedOcr {
        async fn recognize(&self, _path: &Path) -> Result<String, ExtractError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.text
                .clone()
                .ok_or_else(|| ExtractError::Ocr("tesseract not installed".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{FixedOcr, FixedText};
    use super::*;

    const MAX: u64 = 10 * 1024 * 1024;
    const LONG_TEXT: &str = "Ada Lovelace, Analyst. Experience: Analytical Engine programme notes, 1843.";

    #[test]
    fn test_validate_accepts_pdf() {
        assert!(validate_upload(Some("application/pdf"), 1024, MAX).is_ok());
        assert!(validate_upload(Some("Application/PDF; charset=binary"), 1024, MAX).is_ok());
    }

    #[test]
    fn test_validate_rejects_non_pdf_types() {
        for mime in ["text/plain", "image/png", "application/msword", "application/json"] {
            let err = validate_upload(Some(mime), 10, MAX).unwrap_err();
            assert!(matches!(err, UploadError::NotPdf(ref m) if m == mime), "{mime}");
        }
        assert!(matches!(
            validate_upload(None, 10, MAX),
            Err(UploadError::NotPdf(_))
        ));
    }

    #[test]
    fn test_validate_size_limit() {
        assert!(validate_upload(Some(PDF_MIME), MAX, MAX).is_ok());
        assert!(matches!(
            validate_upload(Some(PDF_MIME), MAX + 1, MAX),
            Err(UploadError::TooLarge { .. })
        ));
        assert!(matches!(
            validate_upload(Some(PDF_MIME), 0, MAX),
            Err(UploadError::Empty)
        ));
    }

    #[test]
    fn test_excerpt_is_char_bounded() {
        let text = "é".repeat(1500);
        let ex = excerpt(&text);
        assert_eq!(ex.chars().count(), EXCERPT_CHARS);
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn test_needs_ocr_threshold() {
        assert!(needs_ocr(""));
        assert!(needs_ocr(&"a".repeat(49)));
        assert!(needs_ocr(&format!("   {}   ", "a".repeat(49))));
        assert!(!needs_ocr(&"a".repeat(50)));
    }

    #[tokio::test]
    async fn test_long_text_skips_ocr() {
        assert!(LONG_TEXT.chars().count() >= MIN_TEXT_CHARS);
        let ocr = FixedOcr::new(Some("unused"));
        let extractor = DocumentExtractor::new(FixedText::new(LONG_TEXT), ocr.clone());

        let result = extractor.extract(Path::new("cv.pdf")).await.unwrap();
        assert_eq!(result.method, ExtractionMethod::TextLayer);
        assert_eq!(result.text, LONG_TEXT);
        assert_eq!(ocr.call_count(), 0);
    }

    #[tokio::test]
    async fn test_short_text_falls_back_to_ocr() {
        let ocr = FixedOcr::new(Some(LONG_TEXT));
        let extractor = DocumentExtractor::new(FixedText::new("Scanned"), ocr.clone());

        let result = extractor.extract(Path::new("cv.pdf")).await.unwrap();
        assert_eq!(result.method, ExtractionMethod::Ocr);
        assert_eq!(result.text, LONG_TEXT);
        assert_eq!(ocr.call_count(), 1);
    }

    #[tokio::test]
    async fn test_ocr_failure_propagates() {
        let extractor = DocumentExtractor::new(FixedText::new(""), FixedOcr::new(None));
        let err = extractor.extract(Path::new("cv.pdf")).await.unwrap_err();
        assert!(matches!(err, ExtractError::Ocr(_)));
    }

    #[tokio::test]
    async fn test_no_text_anywhere() {
        let extractor = DocumentExtractor::new(FixedText::new("  "), FixedOcr::new(Some("")));
        let err = extractor.extract(Path::new("cv.pdf")).await.unwrap_err();
        assert!(matches!(err, ExtractError::NoText));
    }

    #[tokio::test]
    async fn test_thin_text_kept_when_ocr_is_thinner() {
        let extractor = DocumentExtractor::new(FixedText::new("Ada Lovelace"), FixedOcr::new(Some("Ada")));
        let result = extractor.extract(Path::new("cv.pdf")).await.unwrap();
        assert_eq!(result.method, ExtractionMethod::TextLayer);
        assert_eq!(result.text, "Ada Lovelace");
    }
}
