//! Console presentation of detection results

use crate::processing::document::{DetectedPrompt, DetectionResult, PromptKind};
use colored::{Color, Colorize};

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    preview_chars: usize,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
            preview_chars: 300,
        }
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }

    fn kind_badge(&self, kind: PromptKind) -> String {
        let color = match kind {
            PromptKind::HiddenStyle => Color::Magenta,
            PromptKind::PatternMatch => Color::Yellow,
        };
        if self.use_colors {
            format!("[{}]", kind.as_str().color(color).bold())
        } else {
            format!("[{}]", kind)
        }
    }

    pub fn format_result(&self, result: &DetectionResult, file_name: &str) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 检测结果 / Detection Results"));
        output.push_str(&format!("File: {} ({})\n\n", file_name, result.file_type));

        let count = result.detected_prompts.len();
        if count == 0 {
            output.push_str(&self.colorize("✅ 未检测到隐藏提示词\n   No hidden prompts detected\n", Color::Green));
        } else {
            output.push_str(&self.colorize(
                &format!(
                    "⚠️  检测到 {} 个可疑提示词\n   Detected {} suspicious prompt(s)\n",
                    count, count
                ),
                Color::Red,
            ));
            output.push_str(&format!(
                "   hidden-style: {} | pattern-match: {}\n",
                result.count_by_kind(PromptKind::HiddenStyle),
                result.count_by_kind(PromptKind::PatternMatch)
            ));

            output.push_str(&self.format_header("🔍 检测到的提示词 / Detected Prompts"));
            for (index, prompt) in result.detected_prompts.iter().enumerate() {
                output.push_str(&self.format_prompt(index + 1, prompt));
            }
        }

        output.push_str(&self.format_header("Text"));
        output.push_str(&format!(
            "Original: {} 字符 / characters\nCleaned:  {} 字符 / characters\n",
            result.original_text.chars().count(),
            result.cleaned_text.chars().count()
        ));

        if self.detailed {
            output.push_str(&self.format_header("🔎 原始文本 / Original Text"));
            output.push_str(&truncate_text(&result.original_text, self.preview_chars));
            output.push('\n');
            output.push_str(&self.format_header("✨ 清理后的文本 / Cleaned Text"));
            output.push_str(&truncate_text(&result.cleaned_text, self.preview_chars));
            output.push('\n');
        }

        output
    }

    fn format_prompt(&self, number: usize, prompt: &DetectedPrompt) -> String {
        let mut block = format!("\n#{} {}", number, self.kind_badge(prompt.kind));
        if let Some(page) = prompt.page {
            block.push_str(&format!(" Page {}", page));
        }
        if self.detailed {
            if let Some(name) = &prompt.pattern_name {
                block.push_str(&format!(" ({})", self.colorize(name, Color::Cyan)));
            }
        }
        block.push('\n');

        block.push_str(&format!("  内容 / Content: {}\n", self.colorize(&prompt.text, Color::BrightWhite)));
        if let Some(context) = &prompt.context {
            block.push_str(&format!("  上下文 / Context: {}\n", context.replace('\n', " ")));
        }
        if let Some(reason) = prompt.reason {
            block.push_str(&format!("  检测原因 / Reason: {}\n", reason));
        }
        block
    }
}

/// Truncate text to a maximum number of characters with ellipsis
fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => {
            let truncated = &text[..cut];
            // Prefer ending on a word boundary
            let end = truncated.rfind(' ').filter(|&i| i > 0).unwrap_or(cut);
            format!("{}...", &text[..end])
        }
    }
}
