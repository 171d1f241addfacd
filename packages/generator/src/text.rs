use regex::Regex;
use std::sync::LazyLock;

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[。.!?！？；;\n]+").unwrap());

static NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Keyword → semantic role, checked in order
const ROLE_HINTS: &[(&str, &str)] = &[
    ("告警", "alerts"),
    ("alert", "alerts"),
    ("指标", "kpi"),
    ("kpi", "kpi"),
    ("趋势", "chart"),
    ("chart", "chart"),
    ("过滤", "filter"),
    ("filter", "filter"),
    ("日志", "log"),
    ("风险", "risk"),
    ("persona", "persona"),
    ("角色", "persona"),
];

/// Coarse split into trimmed, non-empty sentences or list entries
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercase ASCII slug; `item` when nothing survives
pub fn slug(text: &str) -> String {
    let lower = text.to_lowercase();
    let replaced = NON_SLUG.replace_all(&lower, "-");
    let trimmed = replaced.trim_matches('-');
    if trimmed.is_empty() {
        "item".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Semantic roles mentioned by a sentence, `["meta"]` when none are
pub fn infer_roles_from_sentence(sentence: &str) -> Vec<String> {
    let lower = sentence.to_lowercase();
    let mut roles: Vec<String> = Vec::new();
    for (keyword, role) in ROLE_HINTS {
        if lower.contains(keyword) && !roles.iter().any(|r| r == role) {
            roles.push(role.to_string());
        }
    }
    if roles.is_empty() {
        roles.push("meta".to_string());
    }
    roles
}
