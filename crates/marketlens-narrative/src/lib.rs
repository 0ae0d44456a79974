//! Narrative generation for flagged price moves
//!
//! Builds a bilingual prompt from one signal date's associated news, sends it
//! to an OpenAI-compatible chat endpoint, and maps every failure mode to a
//! sentinel [`marketlens_core::Narrative`] value so the pipeline never aborts
//! because one date's explanation failed.

pub mod error;
pub mod generator;
pub mod language;
pub mod locale;
pub mod openai;
pub mod prompts;
pub mod template;

// Re-export main types for convenience
pub use error::{NarrativeError, Result};
pub use generator::NarrativeGenerator;
pub use language::Language;
pub use locale::{Locale, locale_for};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use template::LocalizedTemplate;
