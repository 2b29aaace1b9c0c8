//! Bilingual plain-text detection report

use crate::processing::document::{DetectedPrompt, DetectionResult};
use chrono::{DateTime, Local};
use std::fmt::Write;

const TITLE: &str = "隐藏提示词检测报告 / Hidden Prompt Detection Report";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Report for one scanned file, rendered as the downloadable `.txt`
pub struct DetectionReport<'a> {
    result: &'a DetectionResult,
    original_file: String,
    generated_at: DateTime<Local>,
}

impl<'a> DetectionReport<'a> {
    pub fn new(result: &'a DetectionResult, original_file: impl Into<String>) -> Self {
        Self::with_timestamp(result, original_file, Local::now())
    }

    pub fn with_timestamp(
        result: &'a DetectionResult,
        original_file: impl Into<String>,
        generated_at: DateTime<Local>,
    ) -> Self {
        Self {
            result,
            original_file: original_file.into(),
            generated_at,
        }
    }

    pub fn render(&self) -> String {
        let mut report = String::new();

        report.push_str(TITLE);
        report.push('\n');
        report.push_str(&"=".repeat(60));
        report.push_str("\n\n");
        // Writing to a String cannot fail
        let _ = writeln!(report, "原始文件 / Original File: {}", self.original_file);
        let _ = writeln!(
            report,
            "检测时间 / Detection Time: {}\n",
            self.generated_at.format(TIMESTAMP_FORMAT)
        );

        let prompts = &self.result.detected_prompts;
        if prompts.is_empty() {
            report.push_str("✓ 未检测到隐藏提示词\n");
            report.push_str("✓ No hidden prompts detected\n");
            return report;
        }

        let _ = writeln!(report, "检测到 {} 个可疑提示词", prompts.len());
        let _ = writeln!(report, "Detected {} suspicious prompts\n", prompts.len());

        for (index, prompt) in prompts.iter().enumerate() {
            Self::render_prompt(&mut report, index + 1, prompt);
        }

        report
    }

    fn render_prompt(report: &mut String, number: usize, prompt: &DetectedPrompt) {
        let _ = writeln!(report, "\n[提示词 #{} / Prompt #{}]", number, number);
        report.push_str(&"-".repeat(40));
        report.push('\n');
        let _ = writeln!(report, "类型 / Type: {}", prompt.kind);
        if let Some(reason) = prompt.reason {
            let _ = writeln!(report, "原因 / Reason: {}", reason);
        }
        if let Some(page) = prompt.page {
            let _ = writeln!(report, "页码 / Page: {}", page);
        }
        let _ = writeln!(report, "内容 / Content:\n{}", prompt.text);
        if let Some(context) = &prompt.context {
            let _ = writeln!(report, "上下文 / Context:\n{}", context);
        }
    }
}
