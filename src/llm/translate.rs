//! Text translation through a chat model
//!
//! Sentence and paragraph modes differ only in the system prompt: paragraphs
//! keep their formatting.

use anyhow::{bail, Result};
use tracing::info;

use super::ChatClient;
use crate::config::AppConfig;
use crate::http::HttpRequest;
use crate::models::language;
use crate::utils::timer::Timer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationMode {
    Sentence,
    Paragraph,
}

impl TranslationMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sentence" => Some(TranslationMode::Sentence),
            "paragraph" => Some(TranslationMode::Paragraph),
            _ => None,
        }
    }

    pub fn system_prompt(&self, source_language: &str, target_language: &str) -> String {
        let source = prompt_language(source_language);
        let target = prompt_language(target_language);
        match self {
            TranslationMode::Sentence => format!(
                "You are a professional translator. Translate the following sentence from {source} to {target}. Only return the translation, no explanations."
            ),
            TranslationMode::Paragraph => format!(
                "You are a professional translator. Translate the following paragraph from {source} to {target}. Maintain the original formatting and structure. Only return the translation, no explanations."
            ),
        }
    }
}

fn prompt_language(code: &str) -> String {
    match language::normalize(code).as_str() {
        "auto" => "the detected source language".to_string(),
        other => language::display_name(other)
            .map(str::to_string)
            .unwrap_or_else(|| other.to_string()),
    }
}

pub struct LlmTranslator {
    chat: ChatClient,
}

impl LlmTranslator {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            chat: ChatClient::from_config(config),
        }
    }

    pub fn build_request(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        mode: TranslationMode,
    ) -> HttpRequest {
        self.chat
            .build_request(&mode.system_prompt(source_language, target_language), text)
    }

    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        mode: TranslationMode,
    ) -> Result<String> {
        if text.trim().is_empty() {
            bail!("empty source text");
        }
        if language::same_language(source_language, target_language) {
            bail!("Source and target language must differ (both are {target_language})");
        }

        let timer = Timer::start("llm translate");
        let translation = self
            .chat
            .complete(&mode.system_prompt(source_language, target_language), text)
            .await?;
        info!("LLM translation finished in {}ms", timer.stop());
        Ok(translation)
    }
}
