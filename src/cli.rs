//! CLI interface for the hidden prompt detector

use crate::error::{DetectorError, Result};
use crate::input::file_detector::{extension_of, FileType, SUPPORTED_EXTENSIONS};
use crate::processing::patterns::Language;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hidden-prompt-detector")]
#[command(about = "Detect and remove hidden prompts from documents")]
#[command(long_about = "Scan PDF, Word (.docx), Markdown and text files for prompts hidden with zero-size or white text \
and for instruction-like phrases, then write a cleaned copy and a bilingual detection report")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a document for hidden prompts
    Scan {
        /// Path to the document (PDF, DOCX, MD, TXT)
        file: PathBuf,

        /// Directory for the cleaned file and report
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Do not write the detection report
        #[arg(long)]
        no_report: bool,

        /// Do not write the cleaned file
        #[arg(long)]
        no_clean: bool,

        /// Show pattern names and text previews
        #[arg(short, long)]
        detailed: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List the detection patterns
    Patterns {
        /// Only show patterns for one language: en, zh
        #[arg(short, long, value_parser = parse_language)]
        language: Option<Language>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse a pattern language tag
pub fn parse_language(tag: &str) -> std::result::Result<Language, String> {
    Language::from_tag(tag).ok_or_else(|| format!("Invalid language: {}. Supported: en, zh", tag))
}

/// Validate file extension against the supported document types
pub fn validate_file_extension(path: &Path) -> Result<FileType> {
    FileType::from_path(path).ok_or_else(|| {
        let found = extension_of(path)
            .map(|ext| format!(".{}", ext))
            .unwrap_or_else(|| "no extension".to_string());
        DetectorError::UnsupportedFormat(format!(
            "{} ({}). Allowed: {}",
            path.display(),
            found,
            SUPPORTED_EXTENSIONS.join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_arguments() {
        let cli = Cli::parse_from([
            "hidden-prompt-detector",
            "-v",
            "scan",
            "paper.pdf",
            "--output-dir",
            "out",
            "--no-report",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Scan {
                file,
                output_dir,
                no_report,
                no_clean,
                ..
            } => {
                assert_eq!(file, PathBuf::from("paper.pdf"));
                assert_eq!(output_dir, Some(PathBuf::from("out")));
                assert!(no_report);
                assert!(!no_clean);
            }
            _ => panic!("expected scan command"),
        }
    }

    #[test]
    fn test_patterns_language_parsing() {
        let cli = Cli::parse_from(["hidden-prompt-detector", "patterns", "--language", "zh"]);
        assert!(matches!(
            cli.command,
            Commands::Patterns {
                language: Some(Language::Chinese)
            }
        ));
        assert!(Cli::try_parse_from(["hidden-prompt-detector", "patterns", "--language", "fr"]).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert_eq!(validate_file_extension(Path::new("a/B.DOCX")).unwrap(), FileType::Docx);
        assert_eq!(validate_file_extension(Path::new("notes.md")).unwrap(), FileType::Markdown);

        let err = validate_file_extension(Path::new("scan.png")).unwrap_err();
        assert!(err.is_unsupported_format());
        assert!(err.to_string().contains(".png"));

        assert!(validate_file_extension(Path::new("Makefile")).is_err());
        assert_eq!(validate_file_extension(Path::new("notes/.txt")).unwrap(), FileType::Text);
    }
}
