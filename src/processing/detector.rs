//! Heuristic detection of injected prompts

use crate::error::Result;
use crate::processing::document::{DetectedPrompt, ExtractedDocument, StyleHint};
use crate::processing::patterns::{PatternSpec, PATTERNS};
use log::debug;
use regex::{Regex, RegexBuilder};

/// Hidden runs this short or shorter are layout noise, not instructions
pub const MIN_HIDDEN_TEXT_CHARS: usize = 10;

/// Characters of surrounding text kept on each side of a pattern match
pub const CONTEXT_CHARS: usize = 50;

/// Combines PDF style hints with lexical pattern matching
pub struct HeuristicDetector {
    patterns: Vec<CompiledPattern>,
}

struct CompiledPattern {
    spec: PatternSpec,
    regex: Regex,
}

impl HeuristicDetector {
    /// Create a detector over the built-in pattern table
    pub fn new() -> Result<Self> {
        Self::with_patterns(PATTERNS)
    }

    pub fn with_patterns(specs: &[PatternSpec]) -> Result<Self> {
        let patterns = specs
            .iter()
            .map(|spec| -> Result<CompiledPattern> {
                let regex = RegexBuilder::new(spec.source).case_insensitive(true).build()?;
                Ok(CompiledPattern { spec: *spec, regex })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Style-based prompts first, then pattern matches in table order.
    pub fn detect(&self, document: &ExtractedDocument) -> Vec<DetectedPrompt> {
        let mut prompts = self.detect_hidden_style(&document.style_hints);
        prompts.extend(self.detect_patterns(&document.text));

        debug!("Detector produced {} prompts", prompts.len());
        prompts
    }

    pub fn detect_hidden_style(&self, hints: &[StyleHint]) -> Vec<DetectedPrompt> {
        hints
            .iter()
            .filter(|hint| hint.text.chars().count() > MIN_HIDDEN_TEXT_CHARS)
            .map(DetectedPrompt::from_style_hint)
            .collect()
    }

    pub fn detect_patterns(&self, text: &str) -> Vec<DetectedPrompt> {
        let mut prompts = Vec::new();

        for pattern in &self.patterns {
            for found in pattern.regex.find_iter(text) {
                let context = context_window(text, found.start(), found.end(), CONTEXT_CHARS);
                prompts.push(DetectedPrompt::pattern_match(
                    found.as_str(),
                    context,
                    pattern.spec.source,
                    pattern.spec.name,
                ));
            }
        }

        prompts
    }

    pub fn patterns(&self) -> impl Iterator<Item = &PatternSpec> {
        self.patterns.iter().map(|p| &p.spec)
    }
}

/// Slice of `text` spanning `radius` characters either side of `start..end`.
pub fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(start);

    let to = text[end..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    &text[from..to]
}
