//! LLM-backed comparison through an OpenAI-compatible `chat/completions` API

use anyhow::Result;
use tracing::{debug, warn};

use super::HeuristicComparator;
use crate::config::AppConfig;
use crate::http::HttpRequest;
use crate::llm::ChatClient;
use crate::models::TestResult;

const REVIEW_PROMPT: &str = "You are a professional translation reviewer. Compare the candidate translations for accuracy, fluency and completeness, then recommend the best one.";

pub struct LlmComparator {
    chat: ChatClient,
}

impl LlmComparator {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            chat: ChatClient::from_config(config),
        }
    }

    /// Model verdict, or the heuristic summary with a note when the call fails
    pub async fn compare(&self, original: &str, successes: &[&TestResult]) -> String {
        match self.ask(original, successes).await {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!("LLM comparison failed: {:#}", e);
                let heuristic = HeuristicComparator::compare(original, successes)
                    .map(|r| r.render())
                    .unwrap_or_default();
                format!("LLM comparison unavailable ({e:#}); falling back to basic metrics.\n\n{heuristic}")
            }
        }
    }

    async fn ask(&self, original: &str, successes: &[&TestResult]) -> Result<String> {
        debug!("Asking for a comparison of {} translations", successes.len());
        self.chat
            .complete(REVIEW_PROMPT, &build_prompt(original, successes))
            .await
    }

    pub fn build_request(&self, original: &str, successes: &[&TestResult]) -> HttpRequest {
        self.chat
            .build_request(REVIEW_PROMPT, &build_prompt(original, successes))
    }
}

fn build_prompt(original: &str, successes: &[&TestResult]) -> String {
    let mut prompt = format!("Original text:\n{original}\n\nCandidate translations:\n");
    for result in successes {
        if let Some(translation) = &result.translation {
            prompt.push_str(&format!("- {}: {}\n", result.vendor.name(), translation));
        }
    }
    prompt.push_str("\nGive a short assessment of each candidate and name the recommended vendor.");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Vendor;

    #[test]
    fn test_build_request() {
        let mut config = AppConfig::default();
        config.comparison.endpoint = "https://llm.internal/v1/".to_string();
        config.comparison.api_key = "sk-test".to_string();
        let comparator = LlmComparator::from_config(&config);

        let baidu = TestResult::success(Vendor::Baidu, "你好", 10);
        let request = comparator.build_request("Hello", &[&baidu]);

        assert_eq!(request.url, "https://llm.internal/v1/chat/completions");
        assert_eq!(request.headers["Authorization"], "Bearer sk-test");

        let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert!(body["messages"][1]["content"]
            .as_str()
            .unwrap()
            .contains("Baidu Translate: 你好"));
    }

    #[tokio::test]
    async fn test_missing_key_falls_back_to_heuristic() {
        let config = AppConfig::default();
        let comparator = LlmComparator::from_config(&config);

        let baidu = TestResult::success(Vendor::Baidu, "你好", 10);
        let tencent = TestResult::success(Vendor::Tencent, "您好呀", 10);
        let text = comparator.compare("Hello", &[&baidu, &tencent]).await;

        assert!(text.starts_with("LLM comparison unavailable"));
        assert!(text.contains("Recommended: Tencent TMT"));
    }
}
