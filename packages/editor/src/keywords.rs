//! Static vocabulary used to read instructions.
//!
//! Every table is matched by substring against the lowercased instruction.
//! Tables of `(target, hints)` pairs are checked in order and the first
//! target with a matching hint wins.

pub const ADD_KEYWORDS: &[&str] = &["添加", "增加", "新增", "加上", "add", "insert"];

pub const REMOVE_KEYWORDS: &[&str] = &["删除", "移除", "remove", "去掉", "不要"];

pub const MOVE_KEYWORDS: &[&str] = &["移动", "挪", "拖到", "移到", "置于", "move"];

pub const RESIZE_KEYWORDS: &[&str] = &[
    "缩小", "窄", "宽", "扩大", "放大", "加宽", "narrow", "widen", "bigger", "smaller",
];

/// Any of these broadcasts an update to every component sharing the role
pub const CONSISTENCY_KEYWORDS: &[&str] = &["所有", "保持一致", "跨页面", "一致", "同步", "同样"];

pub const COMPONENT_HINTS: &[(&str, &[&str])] = &[
    ("AlertTable", &["告警", "alert", "警报"]),
    ("GlobalFilterBar", &["过滤", "filter", "筛选"]),
    ("TrendChart", &["趋势", "trend", "折线", "chart", "图表"]),
    ("InsightSummary", &["洞察", "insight"]),
    ("KPIOverview", &["kpi", "指标", "概览", "summary"]),
    ("RunStatus", &["运行", "状态", "run", "列表"]),
    ("BacklogTable", &["需求", "backlog"]),
    ("RiskBoard", &["风险", "risk"]),
    ("ActionLog", &["日志", "log", "行动"]),
    ("PersonaFocus", &["persona", "角色"]),
];

pub const SECTION_HINTS: &[(&str, &[&str])] = &[
    ("header", &["顶部", "头部", "上方", "header"]),
    ("sidebar", &["右侧", "侧边", "左侧", "sidebar"]),
    ("footer", &["底部", "footer"]),
    ("main", &["中间", "主区域", "主区", "内容", "main", "列表"]),
];

/// Stage id → hints; the page id is `page_<stage>`
pub const PAGE_HINTS: &[(&str, &[&str])] = &[
    ("plan", &["配置", "plan", "准备"]),
    ("observe", &["监控", "monitor", "运行", "observe"]),
    ("analyze", &["分析", "复盘"]),
    ("overview", &["概览", "overview"]),
    ("alerts_ops", &["告警"]),
    ("capacity", &["容量"]),
    ("execution", &["执行"]),
    ("review", &["复盘"]),
];

/// Checked before [`WIDEN_KEYWORDS`]
pub const NARROW_KEYWORDS: &[&str] = &["缩小", "窄", "narrow", "小", "smaller"];

pub const WIDEN_KEYWORDS: &[&str] = &[
    "放大", "加宽", "宽", "大", "widen", "wider", "bigger", "larger",
];

pub const RESIZE_STEP: i32 = 2;

pub const CONTRAST_KEYWORDS: &[&str] = &["对比", "contrast"];

pub const DENSITY_KEYWORDS: &[&str] = &["密度", "density"];

pub const LOW_DENSITY_KEYWORDS: &[&str] = &["轻", "低", "low", "sparse"];

pub const FONT_KEYWORDS: &[&str] = &["字体", "字号", "font"];

pub const LARGER_KEYWORDS: &[&str] = &["大", "bigger", "larger"];

pub const SMALLER_KEYWORDS: &[&str] = &["小", "smaller"];

pub const COLOR_KEYWORDS: &[&str] = &["颜色", "color", "colour"];

pub const COLOR_HINTS: &[(&str, &[&str])] = &[
    ("red", &["红", "red"]),
    ("orange", &["橙", "orange"]),
    ("yellow", &["黄", "yellow"]),
    ("green", &["绿", "green"]),
    ("blue", &["蓝", "blue"]),
    ("purple", &["紫", "purple"]),
    ("gray", &["灰", "gray", "grey"]),
    ("black", &["黑", "black"]),
    ("white", &["白", "white"]),
];

pub const BOLD_KEYWORDS: &[&str] = &["粗体", "加粗", "bold"];

pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// First target in `table` with a hint contained in `text`
pub fn first_hit(text: &str, table: &[(&'static str, &[&str])]) -> Option<&'static str> {
    table
        .iter()
        .find(|(_, hints)| contains_any(text, hints))
        .map(|(target, _)| *target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_hit_respects_table_order() {
        // "运行" is both a RunStatus hint and an observe page hint
        assert_eq!(first_hit("运行状态", COMPONENT_HINTS), Some("RunStatus"));
        assert_eq!(first_hit("告警趋势", COMPONENT_HINTS), Some("AlertTable"));
        assert_eq!(first_hit("nothing", COMPONENT_HINTS), None);
    }

    #[test]
    fn test_chart_word_hints_trend_chart() {
        assert_eq!(first_hit("删除这个图表", COMPONENT_HINTS), Some("TrendChart"));
    }

    #[test]
    fn test_section_hints() {
        assert_eq!(first_hit("放到右侧", SECTION_HINTS), Some("sidebar"));
        assert_eq!(first_hit("move to main", SECTION_HINTS), Some("main"));
    }
}
