//! Per-language surface strings
//!
//! One static table per supported language; unknown languages fall back to
//! English. Backend sentinels (no news, no credential, error prefix) live
//! here too so the renderer and the generator agree on wording.

use crate::language::Language;

/// Localized strings for one language
#[derive(Debug, Clone, Copy)]
pub struct Locale {
    // Date and direction formatting
    pub date_format: &'static str,
    pub direction_up: &'static str,
    pub direction_down: &'static str,

    // Labels used in the news digest fed to the model
    pub time_label: &'static str,
    pub title_label: &'static str,
    pub summary_label: &'static str,

    // Narrative sentinels
    pub no_news: &'static str,
    pub no_api_key: &'static str,
    pub error_prefix: &'static str,

    // Surface text
    pub chart_title: &'static str,
    pub analysis_title: &'static str,
    pub news_details_title: &'static str,
    pub no_signals: &'static str,
    pub try_lower_threshold: &'static str,
    pub no_news_threshold: &'static str,
    pub sentiment: &'static str,
    pub relevance: &'static str,
    pub read_full_article: &'static str,
    pub no_url_available: &'static str,
    pub close_price: &'static str,
    pub price_change: &'static str,
    pub date: &'static str,
    pub signal: &'static str,

    // Templates with `{signals}`/`{seconds}` and `{date}`/`{change}` slots
    eta_template: &'static str,
    heading_template: &'static str,
}

impl Locale {
    /// Progress notice shown before the per-date narrative loop
    ///
    /// Assumes roughly three seconds of model latency per signal.
    pub fn eta_notice(&self, signal_count: usize) -> String {
        self.eta_template
            .replace("{signals}", &signal_count.to_string())
            .replace("{seconds}", &(signal_count * 3).to_string())
    }

    /// Heading for one signal date's analysis section
    pub fn analysis_heading(&self, date: &str, change: &str) -> String {
        self.heading_template
            .replace("{date}", date)
            .replace("{change}", change)
    }
}

static EN: Locale = Locale {
    date_format: "%B %d, %Y",
    direction_up: "gained",
    direction_down: "declined",
    time_label: "Time",
    title_label: "Title",
    summary_label: "Summary",
    no_news: "No relevant news data available for analysis on this date.",
    no_api_key: "OpenAI API key not configured. Unable to run the analysis. \
                 Please set OPENAI_API_KEY in the environment.",
    error_prefix: "LLM analysis failed",
    chart_title: "Price with Significant Moves",
    analysis_title: "AI Analysis Results",
    news_details_title: "Related News Details",
    no_signals: "No significant moves detected with the current threshold.",
    try_lower_threshold: "Try lowering the threshold or selecting a different time period.",
    no_news_threshold: "No news meets the relevance threshold for this date.",
    sentiment: "Sentiment",
    relevance: "Relevance",
    read_full_article: "Read full article",
    no_url_available: "No URL available",
    close_price: "Close",
    price_change: "Price Change",
    date: "Date",
    signal: "Signal",
    eta_template: "Detected {signals} significant moves. Running AI analysis, \
                   estimated time: {seconds} seconds...",
    heading_template: "{date} Analysis ({change} change)",
};

static ZH: Locale = Locale {
    date_format: "%Y年%m月%d日",
    direction_up: "上涨",
    direction_down: "下跌",
    time_label: "时间",
    title_label: "标题",
    summary_label: "摘要",
    no_news: "当天没有相关新闻数据可供分析。",
    no_api_key: "未配置 OpenAI API Key，无法进行 LLM 分析。请在环境变量中设置 OPENAI_API_KEY。",
    error_prefix: "LLM 分析失败",
    chart_title: "股价走势及异动信号",
    analysis_title: "AI 异动原因分析",
    news_details_title: "相关新闻详情",
    no_signals: "未检测到显著异动信号。",
    try_lower_threshold: "尝试降低阈值或选择不同的时间周期。",
    no_news_threshold: "当天没有符合相关度阈值的新闻。",
    sentiment: "情绪",
    relevance: "相关度",
    read_full_article: "阅读完整文章",
    no_url_available: "无链接",
    close_price: "收盘价",
    price_change: "涨跌幅",
    date: "日期",
    signal: "信号",
    eta_template: "检测到 {signals} 个异动信号，正在进行AI分析，预计需要 {seconds} 秒...",
    heading_template: "{date} 变动{change}分析",
};

/// Look up the locale for a language, falling back to English
pub fn locale_for(lang: &Language) -> &'static Locale {
    match lang {
        Language::Chinese => &ZH,
        Language::English | Language::Other(_) => &EN,
    }
}
