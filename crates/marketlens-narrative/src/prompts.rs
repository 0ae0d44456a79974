//! Prompt templates for move explanations

use crate::error::Result;
use crate::locale::Locale;
use crate::template::LocalizedTemplate;
use marketlens_core::NewsRecord;

/// System instruction for the analyst persona
pub fn system_instruction() -> Result<LocalizedTemplate> {
    LocalizedTemplate::bilingual(
        "narrative.system",
        "You are a professional financial analyst who excels at analyzing \
         stock price movements based on news events.",
        "你是一位专业的金融分析师，擅长根据新闻事件分析股价异动原因。",
    )
}

/// User prompt asking the model to explain one signal date's move
///
/// Variables: `symbol`, `date_str`, `direction`, `pct_change` (pre-formatted
/// absolute percentage), `news_text`.
pub fn move_explanation_prompt() -> Result<LocalizedTemplate> {
    LocalizedTemplate::bilingual(
        "narrative.move_explanation",
        r"Please analyze the following news information about stock {{ symbol }} on {{ date_str }}.

**Important Context**: Stock {{ symbol }} {{ direction }} {{ pct_change }}% on {{ date_str }}

News Information:
{{ news_text }}

Based on the above news information and the actual stock price movement, please analyze and summarize:
1. Key events or messages that may have affected the stock price
2. How these events explain the day's stock price movement
3. Assessment of the impact magnitude

Please provide a concise and clear response in English, focusing on explaining why the stock {{ direction }} {{ pct_change }}% on that day.",
        r"请分析以下关于股票 {{ symbol }} 在 {{ date_str }} 的新闻信息。

**重要背景信息**: 股票 {{ symbol }} 在 {{ date_str }} 当天{{ direction }}了 {{ pct_change }}%

新闻信息：
{{ news_text }}

请基于以上新闻信息和股价实际变动情况，分析并总结：
1. 可能影响股价的关键事件或消息
2. 这些事件如何解释当天的股价{{ direction }}
3. 影响程度的评估

请用简洁明了的中文回答，重点解释为什么股票在当天{{ direction }}了 {{ pct_change }}%。",
    )
}

/// Concatenate the news items into labeled blocks for the prompt
pub fn news_digest(news: &[NewsRecord], locale: &Locale) -> String {
    let blocks: Vec<String> = news
        .iter()
        .map(|item| {
            format!(
                "{}: {}\n{}: {}\n{}: {}\n",
                locale.time_label,
                item.published_at.format("%Y-%m-%d %H:%M:%S"),
                locale.title_label,
                item.title,
                locale.summary_label,
                item.summary,
            )
        })
        .collect();

    blocks.join("\n\n---\n\n")
}
