//! Single-vendor probe runner

use anyhow::{bail, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::http::HttpClient;
use crate::models::{language, TestResult, Vendor};
use crate::utils::timer::Timer;
use crate::vendors::{self, TranslateRequest};

/// Text used by the connection test
pub const CONNECTION_TEST_TEXT: &str = "Hello";

/// Runs translation probes against the configured vendors
#[derive(Clone)]
pub struct Prober {
    pub(super) config: Arc<AppConfig>,
    pub(super) timeout_secs: u64,
}

impl Prober {
    pub fn new(config: AppConfig) -> Self {
        let timeout_secs = config.timeout_secs;
        Self {
            config: Arc::new(config),
            timeout_secs,
        }
    }

    /// Override the per-request timeout from the configuration
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Translate `text` with one vendor. Failures are reported in the result.
    pub async fn test_vendor(
        &self,
        vendor: Vendor,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> TestResult {
        if let Err(e) = vendors::check_credentials(&self.config, vendor) {
            warn!("{}: {}", vendor, e);
            return TestResult::failure(vendor, e.to_string(), 0);
        }

        if text.trim().is_empty() {
            return TestResult::failure(vendor, "empty source text", 0);
        }

        let proxy = self.config.active_proxy();
        let client = match HttpClient::build(self.timeout_secs, proxy.as_deref()) {
            Ok(client) => client,
            Err(e) => return TestResult::failure(vendor, format!("{e:#}"), 0),
        };

        info!("Probing {} ({} -> {})", vendor, source_language, target_language);
        let timer = Timer::start(vendor.key());
        let request = TranslateRequest::new(text, source_language, target_language);
        let outcome = vendors::translate(&client, &self.config, vendor, &request).await;
        let duration_ms = timer.stop();

        match outcome {
            Ok(translation) => TestResult::success(vendor, translation, duration_ms),
            Err(e) => {
                warn!("{} failed: {}", vendor, e);
                TestResult::failure(vendor, e.to_string(), duration_ms)
            }
        }
    }

    /// Fixed English-to-Chinese call to check that a vendor answers
    pub async fn test_connection(&self, vendor: Vendor) -> TestResult {
        self.test_vendor(vendor, CONNECTION_TEST_TEXT, "en", "zh-cn")
            .await
    }

    /// Translate with `preferred` first, then every other enabled vendor.
    ///
    /// Returns the first success; the error lists each vendor's failure.
    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        preferred: Option<Vendor>,
    ) -> Result<TestResult> {
        if language::same_language(source_language, target_language) {
            bail!("Source and target language must differ (both are {target_language})");
        }

        let candidates = self.fallback_order(preferred);
        if candidates.is_empty() {
            bail!("No translation vendor is enabled; run `transprobe config init` and add credentials");
        }

        let mut failures = Vec::new();
        for vendor in candidates {
            let result = self
                .test_vendor(vendor, text, source_language, target_language)
                .await;
            if result.success {
                return Ok(result);
            }
            failures.push(format!(
                "{}: {}",
                vendor.name(),
                result.error.unwrap_or_default()
            ));
        }

        bail!("All translation vendors failed:\n  {}", failures.join("\n  "))
    }

    pub(super) fn fallback_order(&self, preferred: Option<Vendor>) -> Vec<Vendor> {
        let mut order: Vec<Vendor> = preferred.into_iter().collect();
        order.extend(
            self.config
                .enabled_vendors()
                .into_iter()
                .filter(|v| Some(*v) != preferred),
        );
        order
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_prober_creation() {
        let prober = Prober::new(AppConfig::default()).with_timeout(3);
        assert_eq!(prober.timeout_secs(), 3);
        assert_eq!(prober.config().timeout_secs, 10);
    }

    #[test]
    fn test_fallback_order() {
        let mut config = AppConfig::default();
        config.baidu.enabled = true;
        config.tencent.enabled = true;
        let prober = Prober::new(config);

        assert_eq!(
            prober.fallback_order(Some(Vendor::Tencent)),
            vec![Vendor::Tencent, Vendor::Baidu]
        );
        assert_eq!(
            prober.fallback_order(Some(Vendor::Volcano)),
            vec![Vendor::Volcano, Vendor::Baidu, Vendor::Tencent]
        );
        assert_eq!(
            prober.fallback_order(None),
            vec![Vendor::Baidu, Vendor::Tencent]
        );
    }

    #[tokio::test]
    async fn test_incomplete_config_fails_fast() {
        let mut config = AppConfig::default();
        config.baidu.enabled = true;
        let prober = Prober::new(config);

        let start = Instant::now();
        let result = prober.test_connection(Vendor::Baidu).await;

        assert!(!result.success);
        assert!(result
            .error
            .as_deref()
            .unwrap()
            .contains("configuration incomplete"));
        assert_eq!(result.duration_ms, 0);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let mut config = AppConfig::default();
        config.tencent.secret_id = "AKIDexample".to_string();
        config.tencent.secret_key = "examplekey".to_string();
        let prober = Prober::new(config);
        let result = tokio_test::block_on(prober.test_vendor(Vendor::Tencent, "  ", "en", "zh"));

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("empty source text"));
    }

    #[tokio::test]
    async fn test_missing_credentials_reported_before_empty_text() {
        let prober = Prober::new(AppConfig::default());

        for vendor in Vendor::all() {
            let result = prober.test_vendor(vendor, "", "en", "zh-cn").await;
            assert!(!result.success);
            assert!(
                result
                    .error
                    .as_deref()
                    .unwrap()
                    .contains("configuration incomplete"),
                "{vendor}: {:?}",
                result.error
            );
        }
    }

    #[tokio::test]
    async fn test_translate_without_vendors() {
        let prober = Prober::new(AppConfig::default());
        let err = prober.translate("Hello", "en", "zh", None).await.unwrap_err();
        assert!(err.to_string().contains("No translation vendor is enabled"));
    }

    #[tokio::test]
    async fn test_translate_rejects_identical_languages() {
        let mut config = AppConfig::default();
        config.baidu.enabled = true;
        let prober = Prober::new(config);

        let err = prober
            .translate("Hello", "zh", "zh-cn", None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[tokio::test]
    async fn test_translate_lists_every_failure() {
        let mut config = AppConfig::default();
        config.baidu.enabled = true;
        config.volcano.enabled = true;
        let prober = Prober::new(config);

        let err = prober
            .translate("Hello", "en", "zh", Some(Vendor::Volcano))
            .await
            .unwrap_err()
            .to_string();

        let volcano = err.find("Volcano Translate").unwrap();
        let baidu = err.find("Baidu Translate").unwrap();
        assert!(volcano < baidu);
    }
}
