/// Style, text and attribute vocabulary. Hits push toward fast mode.
pub const SIMPLE_KEYWORDS: &[&str] = &[
    // Style; "颜色" is listed twice so a colour mention scores 2
    "颜色", "颜色", "背景", "字体", "大小", "粗体", "斜体", "下划线",
    "背景色", "文字颜色", "边框", "圆角", "阴影",
    "间距", "边距", "内边距", "外边距", "padding", "margin",
    "宽度", "高度", "透明度", "显示", "隐藏",
    "color", "background", "font", "size", "bold", "italic", "underline",
    "border", "radius", "shadow", "spacing", "width", "height", "opacity",
    // Text
    "文字", "文本", "内容", "标题", "段落", "替换",
    "text", "content", "title", "paragraph", "replace",
    // Attributes
    "链接", "href", "src", "属性", "attribute",
    "类名", "class", "id",
];

/// Structural, layout and interaction vocabulary. Hits push toward full mode.
pub const COMPLEX_KEYWORDS: &[&str] = &[
    // Structure
    "添加", "删除", "插入", "移动", "重新排列", "重组",
    "新增", "创建", "生成", "移除", "清空",
    "add", "delete", "insert", "remove", "create", "generate",
    "restructure", "reorganize", "move",
    // Layout
    "布局", "网格", "栅格", "列", "行", "响应式",
    "layout", "grid", "column", "row", "responsive",
    "flexbox", "flex",
    // New elements
    "按钮", "导航栏", "菜单", "表格", "列表", "表单",
    "图片", "视频", "输入框", "下拉框",
    "button", "navbar", "menu", "table", "list", "form",
    "image", "video", "input", "dropdown",
    // Interaction
    "点击", "悬停", "动画", "过渡", "交互", "事件",
    "click", "hover", "animation", "transition", "interactive",
    "script", "javascript",
];

/// Patterns that identify a pure style change (+3 simple)
pub(crate) const STYLE_PATTERNS: &[&str] = &[
    r"(改|变|修改|设置|调整).*(颜色|背景|字体|大小)",
    r"(change|modify|set|adjust).*(color|background|font|size)",
    r"将.*(颜色|背景|字体).*改",
    r"make.*\s+(bigger|smaller|larger|red|blue|green|bold)",
];

/// Patterns that identify new content being added (+3 complex)
pub(crate) const ADDITION_PATTERNS: &[&str] = &[
    r"(添加|新增|插入|加入).*(元素|组件|部分|section)",
    r"(add|insert|append|create).*(element|component|section|div)",
    r"在.*中.*添加",
];
