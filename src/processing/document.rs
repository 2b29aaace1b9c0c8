//! Document structures shared by extraction, detection and export

use crate::input::file_detector::FileType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Plain text of a document plus any rendering signals recovered during extraction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub text: String,
    pub style_hints: Vec<StyleHint>,
}

impl ExtractedDocument {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style_hints: Vec::new(),
        }
    }
}

/// A text run that was rendered in a way a reader cannot see
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleHint {
    pub text: String,
    /// 1-based page number
    pub page: u32,
    pub reason: HiddenReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HiddenReason {
    FontSizeZero,
    WhiteText,
}

impl HiddenReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            HiddenReason::FontSizeZero => "font-size-zero",
            HiddenReason::WhiteText => "white-text",
        }
    }
}

impl fmt::Display for HiddenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptKind {
    HiddenStyle,
    PatternMatch,
}

impl PromptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::HiddenStyle => "hidden-style",
            PromptKind::PatternMatch => "pattern-match",
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A suspected injected instruction found by the detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedPrompt {
    pub text: String,
    pub kind: PromptKind,
    pub reason: Option<HiddenReason>,
    pub page: Option<u32>,
    /// Up to 50 characters either side of a pattern match
    pub context: Option<String>,
    /// Regular expression source that produced a pattern match
    pub pattern: Option<String>,
    pub pattern_name: Option<String>,
}

impl DetectedPrompt {
    pub fn from_style_hint(hint: &StyleHint) -> Self {
        Self {
            text: hint.text.clone(),
            kind: PromptKind::HiddenStyle,
            reason: Some(hint.reason),
            page: Some(hint.page),
            context: None,
            pattern: None,
            pattern_name: None,
        }
    }

    pub fn pattern_match(
        text: impl Into<String>,
        context: impl Into<String>,
        pattern: impl Into<String>,
        pattern_name: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            kind: PromptKind::PatternMatch,
            reason: None,
            page: None,
            context: Some(context.into()),
            pattern: Some(pattern.into()),
            pattern_name: Some(pattern_name.into()),
        }
    }
}

/// Outcome of scanning one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub original_text: String,
    pub cleaned_text: String,
    pub detected_prompts: Vec<DetectedPrompt>,
    pub style_hints: Vec<StyleHint>,
    pub file_type: FileType,
}

impl DetectionResult {
    pub fn has_detections(&self) -> bool {
        !self.detected_prompts.is_empty()
    }

    pub fn count_by_kind(&self, kind: PromptKind) -> usize {
        self.detected_prompts.iter().filter(|p| p.kind == kind).count()
    }
}
