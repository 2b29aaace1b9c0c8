//! Input manager for handling different file types

use crate::error::{DetectorError, Result};
use crate::input::file_detector::{extension_of, FileType};
use crate::input::pdf_extractor::PdfExtractor;
use crate::input::text_extractor::{DocxExtractor, MarkdownExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::document::ExtractedDocument;
use log::info;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    pdf: PdfExtractor,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self::with_pdf_extractor(PdfExtractor::default())
    }

    pub fn with_pdf_extractor(pdf: PdfExtractor) -> Self {
        Self { pdf }
    }

    /// Resolve the file type from the path, rejecting anything outside the supported set.
    pub fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = extension_of(path).ok_or_else(|| {
            DetectorError::UnsupportedFormat(format!("File has no extension: {}", path.display()))
        })?;

        FileType::from_extension(extension).ok_or_else(|| {
            DetectorError::UnsupportedFormat(format!("Unsupported file type for: {}", path.display()))
        })
    }

    pub async fn extract(&self, path: &Path) -> Result<(FileType, ExtractedDocument)> {
        let file_type = self.detect_file_type(path)?;

        if !path.exists() {
            return Err(DetectorError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let bytes = fs::read(path).await?;
        info!("Extracting text from {} ({} bytes)", path.display(), bytes.len());

        let document = self.extract_bytes(file_type, &bytes).await?;
        Ok((file_type, document))
    }

    /// Route already-loaded bytes to the extractor for `file_type`.
    pub async fn extract_bytes(&self, file_type: FileType, bytes: &[u8]) -> Result<ExtractedDocument> {
        match file_type {
            FileType::Pdf => self.pdf.extract(bytes).await,
            FileType::Docx => DocxExtractor.extract(bytes).await,
            FileType::Markdown => MarkdownExtractor.extract(bytes).await,
            FileType::Text => PlainTextExtractor.extract(bytes).await,
        }
    }
}
