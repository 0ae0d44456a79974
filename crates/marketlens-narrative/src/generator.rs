//! Narrative generation for significant move dates
//!
//! Wraps the chat client with the bilingual prompts and maps every failure
//! mode to a [`Narrative`] sentinel so one bad date never aborts a run.

use crate::error::Result;
use crate::language::Language;
use crate::locale::{Locale, locale_for};
use crate::openai::{OpenAiClient, OpenAiConfig};
use crate::prompts::{move_explanation_prompt, news_digest, system_instruction};
use crate::template::LocalizedTemplate;
use chrono::NaiveDate;
use marketlens_core::{Narrative, NewsRecord};
use serde_json::json;
use tracing::{debug, warn};

/// Generates move explanations via an OpenAI-compatible model
pub struct NarrativeGenerator {
    client: Option<OpenAiClient>,
    language: Language,
    system: LocalizedTemplate,
    prompt: LocalizedTemplate,
}

impl NarrativeGenerator {
    /// Create a generator with an explicit client
    pub fn new(client: Option<OpenAiClient>, language: Language) -> Result<Self> {
        Ok(Self {
            client,
            language,
            system: system_instruction()?,
            prompt: move_explanation_prompt()?,
        })
    }

    /// Create a generator from the environment
    ///
    /// When `OPENAI_API_KEY` is not set the generator still works but yields
    /// [`Narrative::MissingCredential`] for every date.
    pub fn from_env(language: Language) -> Result<Self> {
        let client = match OpenAiConfig::from_env() {
            Some(config) => Some(OpenAiClient::new(config)?),
            None => None,
        };
        Self::new(client, language)
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    fn locale(&self) -> &'static Locale {
        locale_for(&self.language)
    }

    /// Explain one signal date's move from its associated news
    ///
    /// Never returns an error: empty news, missing credentials and API
    /// failures all map to sentinel variants.
    pub async fn explain(
        &self,
        news: &[NewsRecord],
        date: NaiveDate,
        pct_change: f64,
        symbol: &str,
    ) -> Narrative {
        if news.is_empty() {
            return Narrative::NoNews;
        }
        let Some(client) = &self.client else {
            return Narrative::MissingCredential;
        };

        let locale = self.locale();
        let direction = direction_label(locale, pct_change);
        let vars = json!({
            "symbol": symbol,
            "date_str": date.format(locale.date_format).to_string(),
            "direction": direction,
            "pct_change": format!("{:.2}", pct_change.abs()),
            "news_text": news_digest(news, locale),
        });

        let rendered = self
            .system
            .render_with_fallback(&self.language, &json!({}))
            .and_then(|system| {
                self.prompt
                    .render_with_fallback(&self.language, &vars)
                    .map(|user| (system, user))
            });
        let (system, user) = match rendered {
            Ok(pair) => pair,
            Err(e) => {
                warn!(%symbol, %date, error = %e, "prompt rendering failed");
                return Narrative::Failed(e.to_string());
            }
        };

        debug!(%symbol, %date, news_count = news.len(), "requesting move explanation");
        match client.complete(&system, &user).await {
            Ok(text) => Narrative::Generated(text),
            Err(e) => {
                warn!(%symbol, %date, error = %e, "chat completion failed");
                Narrative::Failed(e.to_string())
            }
        }
    }
}

/// Direction word for a signed percentage change
///
/// A flat 0.0% day reads as a decline, matching the strictly-positive cutoff
/// used for the up direction.
fn direction_label(locale: &Locale, pct_change: f64) -> &'static str {
    if pct_change > 0.0 {
        locale.direction_up
    } else {
        locale.direction_down
    }
}

impl std::fmt::Debug for NarrativeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrativeGenerator")
            .field("language", &self.language)
            .field("has_client", &self.client.is_some())
            .finish()
    }
}
