//! File type detection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Extensions accepted at intake, without the leading dot
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "md", "txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    Pdf,
    Docx,
    Markdown,
    Text,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Some(FileType::Pdf),
            "docx" => Some(FileType::Docx),
            "md" => Some(FileType::Markdown),
            "txt" => Some(FileType::Text),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        extension_of(path).and_then(Self::from_extension)
    }

    /// Lower-case extension including the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Pdf => ".pdf",
            FileType::Docx => ".docx",
            FileType::Markdown => ".md",
            FileType::Text => ".txt",
        }
    }
}

/// Text after the last '.' of the file name; dotfiles like `.txt` count.
pub fn extension_of(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rsplit_once('.').map(|(_, ext)| ext)
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_matching_is_case_insensitive() {
        assert_eq!(FileType::from_extension("PDF"), Some(FileType::Pdf));
        assert_eq!(FileType::from_extension(".Docx"), Some(FileType::Docx));
        assert_eq!(FileType::from_extension("md"), Some(FileType::Markdown));
        assert_eq!(FileType::from_extension("txt"), Some(FileType::Text));
    }

    #[test]
    fn test_unsupported_extensions() {
        assert_eq!(FileType::from_extension("png"), None);
        assert_eq!(FileType::from_extension("doc"), None);
        assert_eq!(FileType::from_extension("markdown"), None);
        assert_eq!(FileType::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_dotfile_names_keep_their_extension() {
        assert_eq!(FileType::from_path(Path::new(".txt")), Some(FileType::Text));
        assert_eq!(FileType::from_path(Path::new("dir/.md")), Some(FileType::Markdown));
        assert_eq!(extension_of(Path::new("archive.tar.PDF")), Some("PDF"));
        assert_eq!(extension_of(Path::new("trailing.")), Some(""));
        assert_eq!(extension_of(Path::new("README")), None);
    }

    #[test]
    fn test_canonical_extension() {
        assert_eq!(FileType::from_path(Path::new("Report.PDF")).unwrap().extension(), ".pdf");
        assert_eq!(FileType::Markdown.to_string(), ".md");
    }
}
