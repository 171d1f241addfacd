use crate::keywords::{ADDITION_PATTERNS, COMPLEX_KEYWORDS, SIMPLE_KEYWORDS, STYLE_PATTERNS};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

/// Instructions longer than this (in characters) count as complex
const LONG_INSTRUCTION_CHARS: usize = 200;

/// More sentences than this count as complex
const MAX_SIMPLE_SENTENCES: usize = 3;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[。！？.!?；;]").unwrap());

static STYLE_CHANGE: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(STYLE_PATTERNS));

static CONTENT_ADDITION: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(ADDITION_PATTERNS));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", p)).unwrap())
        .collect()
}

/// Editing path for an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Local, deterministic diff
    Fast,
    /// Whole-document rewrite by the LLM collaborator
    Full,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Fast => "fast",
            Mode::Full => "full",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scores behind a classification decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationMetadata {
    pub simple_score: u32,
    pub complex_score: u32,
    /// Length in characters, not bytes
    pub instruction_length: usize,
    pub sentence_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub mode: Mode,
    pub metadata: ClassificationMetadata,
}

/// Classify an instruction as fast or full.
///
/// Decision, in order:
/// 1. `complex > simple + 1` → full
/// 2. `simple > 0 && simple >= complex` → fast
/// 3. otherwise full
pub fn classify(instruction: &str) -> Classification {
    let lower = instruction.to_lowercase();

    let mut simple_score = count_hits(&lower, SIMPLE_KEYWORDS);
    let mut complex_score = count_hits(&lower, COMPLEX_KEYWORDS);

    let instruction_length = instruction.chars().count();
    if instruction_length > LONG_INSTRUCTION_CHARS {
        complex_score += 2;
    }

    // Pieces between sentence-ending marks, trailing piece included
    let sentence_count = SENTENCE_END.find_iter(instruction).count() + 1;
    if sentence_count > MAX_SIMPLE_SENTENCES {
        complex_score += 1;
    }

    if is_pure_style_change(&lower) {
        simple_score += 3;
    }
    if is_content_addition(&lower) {
        complex_score += 3;
    }

    let mode = if complex_score > simple_score + 1 {
        Mode::Full
    } else if simple_score > 0 && simple_score >= complex_score {
        Mode::Fast
    } else {
        Mode::Full
    };

    debug!(
        mode = %mode,
        simple_score,
        complex_score,
        instruction_length,
        sentence_count,
        "Classified instruction"
    );

    Classification {
        mode,
        metadata: ClassificationMetadata {
            simple_score,
            complex_score,
            instruction_length,
            sentence_count,
        },
    }
}

fn count_hits(lower: &str, keywords: &[&str]) -> u32 {
    keywords
        .iter()
        .filter(|keyword| lower.contains(&keyword.to_lowercase()))
        .count() as u32
}

fn is_pure_style_change(lower: &str) -> bool {
    STYLE_CHANGE.iter().any(|re| re.is_match(lower))
}

fn is_content_addition(lower: &str) -> bool {
    CONTENT_ADDITION.iter().any(|re| re.is_match(lower))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_change_is_fast() {
        let result = classify("把标题颜色改成红色");
        assert_eq!(result.mode, Mode::Fast);
        assert!(result.metadata.simple_score >= 2);
        assert_eq!(result.metadata.complex_score, 0);
    }

    #[test]
    fn test_colour_mention_outweighs_two_structural_hits() {
        let result = classify("删除表格颜色");
        assert_eq!(result.metadata.simple_score, 2);
        assert_eq!(result.metadata.complex_score, 2);
        assert_eq!(result.mode, Mode::Fast);
    }

    #[test]
    fn test_long_navigation_request_is_full() {
        let instruction = "Please add a brand new navigation menu to the top of the page. \
            It should contain links to the dashboard, the reports area, the settings screen and the help center. \
            Each item needs a hover animation and an icon. \
            On small screens the menu must collapse into a dropdown. \
            Keep the rest of the layout responsive.";
        assert!(instruction.chars().count() > 200);

        let result = classify(instruction);
        assert_eq!(result.mode, Mode::Full);
        assert!(result.metadata.sentence_count > 3);
        assert!(result.metadata.complex_score > result.metadata.simple_score + 1);
    }

    #[test]
    fn test_no_signal_defaults_to_full() {
        let result = classify("hello there");
        assert_eq!(result.mode, Mode::Full);
        assert_eq!(result.metadata.simple_score, 0);
        assert_eq!(result.metadata.complex_score, 0);
    }

    #[test]
    fn test_pure_style_pattern_boosts_simple() {
        let result = classify("change the font to something else");
        // "font" keyword + style pattern
        assert_eq!(result.metadata.simple_score, 4);
        assert_eq!(result.mode, Mode::Fast);
    }

    #[test]
    fn test_content_addition_pattern_boosts_complex() {
        let result = classify("添加一个新的组件");
        // "添加" keyword + addition pattern
        assert_eq!(result.metadata.complex_score, 4);
        assert_eq!(result.mode, Mode::Full);
    }

    #[test]
    fn test_keywords_match_case_insensitively() {
        assert_eq!(classify("Make it BOLD").metadata.simple_score, 4);
    }

    #[test]
    fn test_sentence_count_includes_trailing_piece() {
        assert_eq!(classify("一。二。三").metadata.sentence_count, 3);
        assert_eq!(classify("one. two. three.").metadata.sentence_count, 4);
    }

    #[test]
    fn test_length_counts_characters() {
        let instruction = "字".repeat(201);
        let result = classify(&instruction);
        assert_eq!(result.metadata.instruction_length, 201);
        assert_eq!(result.metadata.complex_score, 2);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let instruction = "把主区域的表格加宽，并且调整背景颜色";
        assert_eq!(classify(instruction), classify(instruction));
    }

    #[test]
    fn test_metadata_serializes_with_snake_case_keys() {
        let json = serde_json::to_value(classify("make it red")).unwrap();
        assert_eq!(json["mode"], "fast");
        assert!(json["metadata"]["simple_score"].is_number());
        assert!(json["metadata"]["sentence_count"].is_number());
    }
}
