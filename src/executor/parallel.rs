//! Concurrent probing of every enabled vendor

use futures::future::join_all;
use tracing::{info, warn};

use super::Prober;
use crate::compare;
use crate::models::{AggregateResult, TestResult};
use crate::utils::timer::Timer;

impl Prober {
    /// Probe all enabled vendors at once and compare the successes
    pub async fn test_all(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> AggregateResult {
        let mut aggregate = AggregateResult::new(text, source_language, target_language);
        let vendors = self.config.enabled_vendors();

        if vendors.is_empty() {
            warn!("No vendor is enabled; nothing to probe");
            return aggregate;
        }

        info!("Probing {} vendors in parallel", vendors.len());
        let timer = Timer::start("parallel probe");

        let handles = vendors.iter().map(|&vendor| {
            let prober = self.clone();
            let text = text.to_string();
            let source_language = source_language.to_string();
            let target_language = target_language.to_string();

            tokio::spawn(async move {
                prober
                    .test_vendor(vendor, &text, &source_language, &target_language)
                    .await
            })
        });

        for (vendor, joined) in vendors.iter().zip(join_all(handles).await) {
            let result = joined.unwrap_or_else(|e| {
                warn!("{} task aborted: {}", vendor, e);
                TestResult::failure(*vendor, format!("probe task failed: {e}"), 0)
            });
            aggregate.insert(result);
        }

        info!(
            "Parallel probe completed in {}ms - Success: {}/{}",
            timer.elapsed_ms(),
            aggregate.success_count(),
            aggregate.results.len()
        );

        let successes = aggregate.successful();
        if successes.len() >= 2 {
            let comparison = compare::summarize(&self.config, text, &successes).await;
            aggregate.comparison = comparison;
        }

        aggregate
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::Vendor;

    #[tokio::test]
    async fn test_no_enabled_vendors() {
        let prober = Prober::new(AppConfig::default());
        let aggregate = prober.test_all("Hello", "en", "zh-cn").await;

        assert!(aggregate.is_empty());
        assert!(aggregate.comparison.is_none());
        assert!(!aggregate.all_failed());
    }

    #[tokio::test]
    async fn test_every_enabled_vendor_is_reported() {
        let mut config = AppConfig::default();
        config.baidu.enabled = true;
        config.volcano.enabled = true;
        config.tencent.enabled = true;
        let prober = Prober::new(config);

        let aggregate = prober.test_all("Hello", "en", "zh-cn").await;

        assert_eq!(aggregate.results.len(), 3);
        assert!(aggregate.all_failed());
        assert!(aggregate.comparison.is_none());
        for vendor in Vendor::all() {
            let result = &aggregate.results[&vendor];
            assert!(result
                .error
                .as_deref()
                .unwrap()
                .contains("configuration incomplete"));
        }
    }
}
