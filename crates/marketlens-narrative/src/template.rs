//! MiniJinja-backed bilingual templates

use crate::error::{NarrativeError, Result};
use crate::language::Language;
use minijinja::Environment;
use std::collections::HashMap;

/// A prompt template with per-language variants
///
/// Uses standard Jinja2 syntax (`{{ variable }}`, `{% if %}`, `{% for %}`).
/// All variants are validated at build time; rendering an unavailable
/// language falls back to English via [`LocalizedTemplate::render_with_fallback`].
pub struct LocalizedTemplate {
    name: String,
    templates: HashMap<Language, String>,
}

impl LocalizedTemplate {
    /// Create a new template builder
    pub fn builder(name: impl Into<String>) -> LocalizedTemplateBuilder {
        LocalizedTemplateBuilder::new(name)
    }

    /// Create with English and Chinese variants
    pub fn bilingual(
        name: impl Into<String>,
        english: impl Into<String>,
        chinese: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(name).english(english).chinese(chinese).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supports_language(&self, lang: &Language) -> bool {
        self.templates.contains_key(lang)
    }

    /// Render the variant for a specific language
    pub fn render(&self, lang: &Language, vars: &serde_json::Value) -> Result<String> {
        let template_str =
            self.templates
                .get(lang)
                .ok_or_else(|| NarrativeError::TemplateNotFound {
                    name: self.name.clone(),
                    language: lang.code().to_string(),
                })?;

        // Fresh environment per render to avoid lifetime issues
        let env = Environment::new();
        let value = minijinja::value::Value::from_serialize(vars);

        env.render_str(template_str, value)
            .map_err(|e| NarrativeError::RenderError {
                name: self.name.clone(),
                detail: e.to_string(),
            })
    }

    /// Render with fallback to English when the language is unavailable
    pub fn render_with_fallback(
        &self,
        lang: &Language,
        vars: &serde_json::Value,
    ) -> Result<String> {
        if self.supports_language(lang) {
            return self.render(lang, vars);
        }
        self.render(&Language::English, vars)
    }
}

impl std::fmt::Debug for LocalizedTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalizedTemplate")
            .field("name", &self.name)
            .field("languages", &self.templates.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`LocalizedTemplate`]
pub struct LocalizedTemplateBuilder {
    name: String,
    templates: HashMap<Language, String>,
}

impl LocalizedTemplateBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            templates: HashMap::new(),
        }
    }

    /// Add a variant for a specific language
    pub fn template(mut self, lang: Language, content: impl Into<String>) -> Self {
        self.templates.insert(lang, content.into());
        self
    }

    pub fn english(self, content: impl Into<String>) -> Self {
        self.template(Language::English, content)
    }

    pub fn chinese(self, content: impl Into<String>) -> Self {
        self.template(Language::Chinese, content)
    }

    /// Build the template, validating that every variant parses
    pub fn build(self) -> Result<LocalizedTemplate> {
        if self.templates.is_empty() {
            return Err(NarrativeError::NoTemplatesProvided(self.name));
        }

        let env = Environment::new();
        for (lang, content) in &self.templates {
            env.render_str(content, ())
                .map_err(|e| NarrativeError::TemplateParseFailed {
                    name: self.name.clone(),
                    language: lang.code().to_string(),
                    detail: e.to_string(),
                })?;
        }

        Ok(LocalizedTemplate {
            name: self.name,
            templates: self.templates,
        })
    }
}
