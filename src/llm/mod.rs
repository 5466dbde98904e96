//! OpenAI-compatible `chat/completions` client
//!
//! Shared by the LLM comparison and the LLM translation engine. Model,
//! endpoint and key come from the `comparison` config section.

pub mod translate;

pub use translate::{LlmTranslator, TranslationMode};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::AppConfig;
use crate::http::{HttpClient, HttpRequest, HttpResponse};

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

pub struct ChatClient {
    model: String,
    endpoint: String,
    api_key: String,
    timeout_secs: u64,
    proxy: Option<String>,
}

impl ChatClient {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            model: config.comparison.model.clone(),
            endpoint: config.comparison.endpoint.clone(),
            api_key: config.comparison.api_key.clone(),
            timeout_secs: config.timeout_secs.max(30),
            proxy: config.active_proxy(),
        }
    }

    /// System prompt plus one user message
    pub fn build_request(&self, system: &str, user: &str) -> HttpRequest {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user}
            ],
            "temperature": 0.3,
        });

        HttpRequest::post(format!(
            "{}/chat/completions",
            self.endpoint.trim_end_matches('/')
        ))
        .header("Authorization", format!("Bearer {}", self.api_key))
        .header("Content-Type", "application/json")
        .body(body.to_string())
    }

    /// Send the conversation and return the first choice's text
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        if self.api_key.trim().is_empty() {
            bail!("comparison.api_key is not set");
        }

        let client = HttpClient::build(self.timeout_secs, self.proxy.as_deref())?;
        debug!("Sending chat completion to {}", self.model);

        let response = client.send(self.build_request(system, user)).await?;
        parse_completion(&response)
    }
}

fn parse_completion(response: &HttpResponse) -> Result<String> {
    if !response.is_success() {
        bail!("chat API returned HTTP {}", response.status_code);
    }

    let chat: ChatResponse = response.json().context("Invalid chat completion response")?;
    let content = chat
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content.trim().to_string())
        .unwrap_or_default();

    if content.is_empty() {
        bail!("chat API returned no content");
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn response(status_code: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status_code,
            headers: BTreeMap::new(),
            body: body.to_string(),
            duration_ms: 1,
        }
    }

    #[test]
    fn test_build_request() {
        let mut config = AppConfig::default();
        config.comparison.endpoint = "https://llm.internal/v1/".to_string();
        config.comparison.api_key = "sk-test".to_string();
        let chat = ChatClient::from_config(&config);

        let request = chat.build_request("Be brief.", "Hi");
        assert_eq!(request.url, "https://llm.internal/v1/chat/completions");
        assert_eq!(request.headers["Authorization"], "Bearer sk-test");

        let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "Be brief.");
        assert_eq!(body["messages"][1]["content"], "Hi");
        assert_eq!(body["temperature"], 0.3);
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  Tencent is best. "}}]}"#;
        assert_eq!(parse_completion(&response(200, body)).unwrap(), "Tencent is best.");
        assert!(parse_completion(&response(401, "{}")).is_err());
        assert!(parse_completion(&response(200, r#"{"choices":[]}"#)).is_err());
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let chat = ChatClient::from_config(&AppConfig::default());
        let err = chat.complete("system", "user").await.unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }
}
