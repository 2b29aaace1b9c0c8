//! Configuration management for the hidden prompt detector

use crate::error::{DetectorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for cleaned files and reports; defaults to the input's directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    pub write_cleaned: bool,
    pub write_report: bool,
    pub color_output: bool,
    pub detailed: bool,
    /// Characters of original/cleaned text shown in detailed console output
    pub preview_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig {
                output_dir: None,
                write_cleaned: true,
                write_report: true,
                color_output: true,
                detailed: false,
                preview_chars: 300,
            },
        }
    }
}

impl Config {
    /// Load from an explicit path, writing defaults there if the file is missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| DetectorError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| DetectorError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("hidden-prompt-detector")
            .join("config.toml")
    }

    /// Where outputs for `input` should be written
    pub fn output_dir_for(&self, input: &Path) -> PathBuf {
        match &self.output.output_dir {
            Some(dir) => dir.clone(),
            None => input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}
