//! Hidden prompt detector library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{DetectorError, Result};
pub use input::file_detector::FileType;
pub use processing::document::{DetectedPrompt, DetectionResult, ExtractedDocument, StyleHint};
pub use processing::pipeline::DetectionPipeline;
