//! Built-in table of prompt-injection phrasings, English and Chinese.
//!
//! Entries are matched case-insensitively and in table order. The order is
//! observable: it decides the order of reported prompts and therefore which
//! occurrence of a duplicated phrase the redactor removes.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Language {
    English,
    Chinese,
}

impl Language {
    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "zh" | "chinese" => Some(Language::Chinese),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatternSpec {
    pub name: &'static str,
    pub language: Language,
    pub source: &'static str,
}

const fn en(name: &'static str, source: &'static str) -> PatternSpec {
    PatternSpec {
        name,
        language: Language::English,
        source,
    }
}

const fn zh(name: &'static str, source: &'static str) -> PatternSpec {
    PatternSpec {
        name,
        language: Language::Chinese,
        source,
    }
}

pub const PATTERNS: &[PatternSpec] = &[
    en(
        "ai-self-reference",
        r"if you are (an? )?(ai|artificial intelligence|language model|llm|gpt|assistant)",
    ),
    en(
        "ai-directive",
        r"as an ai( assistant| model)?[,\s]+(?:please\s+)?(?:you\s+)?(?:should|must|need to|have to)\s+[^\n]{10,}",
    ),
    // Consumes the sentence terminator along with the instruction.
    en(
        "instruction-override",
        r"ignore (all )?previous (instructions|prompts|commands)[.!]?",
    ),
    en(
        "compliance-directive",
        r"you (must|should|need to|have to) (include|add|write|output|say|mention)",
    ),
    en(
        "response-injection",
        r"in your (response|answer|output|reply)[,\s]+(include|add|write|say|mention)",
    ),
    en("hidden-instruction", r"hidden (instruction|prompt|message|text)"),
    en("secret-instruction", r"secret (instruction|prompt|message|text)"),
    en(
        "reminder-directive",
        r"(?:please\s+)?(?:make sure to|be sure to|remember to)\s+(?:include|add|write|output|mention)\s+[^\n]{10,}",
    ),
    // Top-level alternation: any of the AI nouns alone is enough.
    zh("ai-self-reference-zh", r"如果你是(一个)?ai|人工智能|语言模型|助手|机器人"),
    zh(
        "ai-directive-zh",
        r"作为(一个)?ai(助手|模型)?[，,\s]*(?:请)?(?:你)?(?:应该|必须|需要)[^\n]{10,}",
    ),
    zh(
        "instruction-override-zh",
        r"忽略(所有)?(?:之前|前面|以前)的?(?:指令|提示|命令)[。.!！]?",
    ),
    zh(
        "compliance-directive-zh",
        r"你(?:应该|必须|需要)(?:包含|添加|写入|输出|提到|说)",
    ),
    zh(
        "response-injection-zh",
        r"在你的(?:回答|回复|输出)中[，,\s]*(?:包含|添加|写入|提到|说)",
    ),
    zh("hidden-instruction-zh", r"隐藏(?:指令|提示|消息|文字|文本)"),
    zh("secret-instruction-zh", r"秘密(?:指令|提示|消息|文字|文本)"),
    zh(
        "reminder-directive-zh",
        r"(?:请)?(?:确保|务必|记得)(?:包含|添加|写入|输出|提到)[^\n]{10,}",
    ),
];

pub fn patterns_for(language: Language) -> impl Iterator<Item = &'static PatternSpec> {
    PATTERNS.iter().filter(move |p| p.language == language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_is_bilingual_and_ordered() {
        assert_eq!(PATTERNS.len(), 16);
        assert_eq!(patterns_for(Language::English).count(), 8);
        assert_eq!(patterns_for(Language::Chinese).count(), 8);
        // English entries come first
        assert!(PATTERNS[..8].iter().all(|p| p.language == Language::English));
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = PATTERNS.iter().map(|p| p.name).collect();
        assert_eq!(names.len(), PATTERNS.len());
    }

    #[test]
    fn test_every_source_compiles() {
        for spec in PATTERNS {
            assert!(regex::Regex::new(spec.source).is_ok(), "{} failed to compile", spec.name);
        }
    }

    #[test]
    fn test_language_tags() {
        assert_eq!(Language::from_tag("ZH"), Some(Language::Chinese));
        assert_eq!(Language::from_tag("english"), Some(Language::English));
        assert_eq!(Language::from_tag("fr"), None);
        assert_eq!(Language::Chinese.to_string(), "zh");
    }
}
