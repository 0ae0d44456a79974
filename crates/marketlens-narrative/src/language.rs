//! Language selection for prompts and surface text

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported languages
///
/// English and Chinese have full template and locale coverage; `Other` falls
/// back to English at render time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// English
    #[default]
    English,
    /// Chinese (Simplified)
    Chinese,
    /// Other languages (ISO 639-1 code)
    Other(String),
}

impl Language {
    /// Get ISO 639-1 language code
    pub fn code(&self) -> &str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
            Language::Other(code) => code,
        }
    }

    /// Get language name for display
    pub fn name(&self) -> &str {
        match self {
            Language::English => "English",
            Language::Chinese => "Chinese",
            Language::Other(code) => code,
        }
    }

    /// Parse from ISO 639-1 code or common name
    pub fn from_code(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "en" | "english" => Language::English,
            "zh" | "chinese" | "中文" | "zh-cn" | "zh-hans" => Language::Chinese,
            other => Language::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<&str> for Language {
    fn from(s: &str) -> Self {
        Language::from_code(s)
    }
}

impl From<String> for Language {
    fn from(s: String) -> Self {
        Language::from_code(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code() {
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::Chinese.code(), "zh");
        assert_eq!(Language::Other("ja".to_string()).code(), "ja");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("en"), Language::English);
        assert_eq!(Language::from_code("EN"), Language::English);
        assert_eq!(Language::from_code("zh"), Language::Chinese);
        assert_eq!(Language::from_code("中文"), Language::Chinese);
        assert_eq!(Language::from_code("ja"), Language::Other("ja".to_string()));
    }

    #[test]
    fn test_display_and_default() {
        assert_eq!(format!("{}", Language::Chinese), "Chinese");
        assert_eq!(Language::default(), Language::English);
    }

    #[test]
    fn test_from_string() {
        let lang: Language = "zh".into();
        assert_eq!(lang, Language::Chinese);
    }
}
