//! Error handling for the hidden prompt detector

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Text extraction error: {0}")]
    Extraction(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid detection pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, DetectorError>;

/// Alert shown when a file with an unsupported extension is offered
pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "请上传支持的文件格式: PDF, Word (.docx), Markdown (.md), 或 TXT\n\
Please upload a supported file format: PDF, Word (.docx), Markdown (.md), or TXT";

impl DetectorError {
    /// Bilingual message presented to the user for this error
    pub fn user_message(&self) -> String {
        match self {
            DetectorError::UnsupportedFormat(_) => UNSUPPORTED_FORMAT_MESSAGE.to_string(),
            other => {
                let detail = other.to_string();
                format!("处理文件时出错: {}\nError processing file: {}", detail, detail)
            }
        }
    }

    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, DetectorError::UnsupportedFormat(_))
    }
}

impl From<lopdf::Error> for DetectorError {
    fn from(err: lopdf::Error) -> Self {
        DetectorError::Extraction(format!("PDF decode failed: {}", err))
    }
}

impl From<zip::result::ZipError> for DetectorError {
    fn from(err: zip::result::ZipError) -> Self {
        DetectorError::Extraction(format!("Word package could not be opened: {}", err))
    }
}
