use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::{ExtractError, OcrEngine};

const RENDER_DPI: u32 = 300;

/// OCR through the command-line tools: `pdftoppm` renders each page to PNG in
/// a scratch directory, then `tesseract <page> stdout` reads each page.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    tesseract: String,
    pdftoppm: String,
}

impl TesseractOcr {
    pub fn new(tesseract: String, pdftoppm: String) -> Self {
        Self { tesseract, pdftoppm }
    }

    async fn render_pages(&self, pdf: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
        let prefix = out_dir.join("page");
        let output = Command::new(&self.pdftoppm)
            .arg("-r")
            .arg(RENDER_DPI.to_string())
            .arg("-png")
            .arg(pdf)
            .arg(&prefix)
            .output()
            .await
            .map_err(|e| ExtractError::Ocr(format!("failed to run {}: {e}", self.pdftoppm)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Ocr(format!("pdftoppm failed: {}", stderr.trim())));
        }

        let mut pages = Vec::new();
        let mut entries = tokio::fs::read_dir(out_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("png") {
                pages.push(path);
            }
        }
        pages.sort_by_key(|p| page_number(p));
        Ok(pages)
    }

    async fn recognize_page(&self, image: &Path) -> Result<String, ExtractError> {
        let output = Command::new(&self.tesseract)
            .arg(image)
            .arg("stdout")
            .output()
            .await
            .map_err(|e| ExtractError::Ocr(format!("failed to run {}: {e}", self.tesseract)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Ocr(format!("tesseract failed: {}", stderr.trim())));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// `page-3.png` → 3. pdftoppm zero-pads by page count, so sort numerically.
fn page_number(path: &Path) -> u32 {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| s.rsplit('-').next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(u32::MAX)
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, path: &Path) -> Result<String, ExtractError> {
        let scratch = tempfile::tempdir()?;
        let pages = self.render_pages(path, scratch.path()).await?;
        info!("OCR over {} rendered page(s)", pages.len());

        let mut text = String::new();
        for page in &pages {
            let page_text = self.recognize_page(page).await?;
            debug!("OCR page {:?}: {} chars", page.file_name(), page_text.len());
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(page_text.trim_end());
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number_parsing() {
        assert_eq!(page_number(Path::new("/tmp/x/page-1.png")), 1);
        assert_eq!(page_number(Path::new("/tmp/x/page-010.png")), 10);
        assert_eq!(page_number(Path::new("/tmp/x/cover.png")), u32::MAX);
    }

    #[test]
    fn test_pages_sort_numerically() {
        let mut pages = vec![
            PathBuf::from("page-10.png"),
            PathBuf::from("page-2.png"),
            PathBuf::from("page-1.png"),
        ];
        pages.sort_by_key(|p| page_number(p));
        assert_eq!(pages[0], PathBuf::from("page-1.png"));
        assert_eq!(pages[2], PathBuf::from("page-10.png"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_ocr_error() {
        let ocr = TesseractOcr::new(
            "/nonexistent/tesseract".to_string(),
            "/nonexistent/pdftoppm".to_string(),
        );
        let err = ocr.recognize(Path::new("cv.pdf")).await.unwrap_err();
        assert!(matches!(err, ExtractError::Ocr(_)));
    }
}
