//! End-to-end scan of a single document: extract, detect, redact

use crate::error::Result;
use crate::input::file_detector::FileType;
use crate::input::manager::InputManager;
use crate::processing::detector::HeuristicDetector;
use crate::processing::document::{DetectionResult, ExtractedDocument, PromptKind};
use crate::processing::redactor::Redactor;
use log::info;
use std::path::Path;

pub struct DetectionPipeline {
    input: InputManager,
    detector: HeuristicDetector,
    redactor: Redactor,
}

impl DetectionPipeline {
    pub fn new() -> Result<Self> {
        Ok(Self::with_components(
            InputManager::new(),
            HeuristicDetector::new()?,
            Redactor::new(),
        ))
    }

    pub fn with_components(input: InputManager, detector: HeuristicDetector, redactor: Redactor) -> Self {
        Self {
            input,
            detector,
            redactor,
        }
    }

    pub async fn scan_file(&self, path: &Path) -> Result<DetectionResult> {
        let (file_type, document) = self.input.extract(path).await?;
        Ok(self.analyze(file_type, document))
    }

    pub async fn scan_bytes(&self, file_type: FileType, bytes: &[u8]) -> Result<DetectionResult> {
        let document = self.input.extract_bytes(file_type, bytes).await?;
        Ok(self.analyze(file_type, document))
    }

    /// Detection and redaction over an already extracted document; never fails.
    pub fn analyze(&self, file_type: FileType, document: ExtractedDocument) -> DetectionResult {
        let detected_prompts = self.detector.detect(&document);
        let cleaned_text = self.redactor.redact(&document.text, &detected_prompts);

        let result = DetectionResult {
            original_text: document.text,
            cleaned_text,
            detected_prompts,
            style_hints: document.style_hints,
            file_type,
        };

        info!(
            "Scan complete: {} prompts ({} hidden-style, {} pattern-match)",
            result.detected_prompts.len(),
            result.count_by_kind(PromptKind::HiddenStyle),
            result.count_by_kind(PromptKind::PatternMatch)
        );

        result
    }
}
