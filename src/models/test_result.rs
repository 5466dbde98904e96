//! Probe result models
//!
//! Defines per-vendor results, the aggregate of one invocation and the
//! proxy test outcome.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::Vendor;

/// Result of a single vendor call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub vendor: Vendor,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

impl TestResult {
    /// Successful call. A blank translation is recorded as a failure.
    pub fn success(vendor: Vendor, translation: impl Into<String>, duration_ms: u64) -> Self {
        let translation = translation.into();
        if translation.trim().is_empty() {
            return Self::failure(vendor, "empty translation", duration_ms);
        }

        Self {
            vendor,
            success: true,
            translation: Some(translation),
            error: None,
            duration_ms,
        }
    }

    pub fn failure(vendor: Vendor, error: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            vendor,
            success: false,
            translation: None,
            error: Some(error.into()),
            duration_ms,
        }
    }

    pub fn symbol(&self) -> &'static str {
        if self.success {
            "✓"
        } else {
            "✗"
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms]",
            self.symbol(),
            self.vendor.name(),
            self.duration_ms
        )?;
        match (&self.translation, &self.error) {
            (Some(t), _) => write!(f, " - {t}"),
            (None, Some(e)) => write!(f, " - {e}"),
            _ => Ok(()),
        }
    }
}

/// Results of one `probe` invocation across all enabled vendors
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AggregateResult {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
    pub results: BTreeMap<Vendor, TestResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
}

impl AggregateResult {
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            results: BTreeMap::new(),
            comparison: None,
        }
    }

    pub fn insert(&mut self, result: TestResult) {
        self.results.insert(result.vendor, result);
    }

    /// Successful results in vendor order
    pub fn successful(&self) -> Vec<&TestResult> {
        self.results.values().filter(|r| r.success).collect()
    }

    pub fn success_count(&self) -> usize {
        self.results.values().filter(|r| r.success).count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.len() - self.success_count()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn all_failed(&self) -> bool {
        !self.is_empty() && self.success_count() == 0
    }
}

impl fmt::Display for AggregateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "\"{}\" ({} -> {})",
            self.text, self.source_language, self.target_language
        )?;
        for result in self.results.values() {
            writeln!(f, "  {result}")?;
        }
        write!(
            f,
            "Success: {} | Failed: {}",
            self.success_count(),
            self.failure_count()
        )
    }
}

/// Outcome of a proxy (or direct connection) test
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProxyTestResult {
    pub success: bool,
    /// `None` for a direct connection test
    pub proxy_url: Option<String>,
    pub response_time_ms: Option<u64>,
    pub error: Option<String>,
    /// Public IP reported by the echo endpoint
    pub origin_ip: Option<String>,
    pub accessible_urls: Vec<String>,
    pub total_urls: usize,
}

impl ProxyTestResult {
    pub fn new(proxy_url: Option<String>, total_urls: usize) -> Self {
        Self {
            success: false,
            proxy_url,
            response_time_ms: None,
            error: None,
            origin_ip: None,
            accessible_urls: Vec::new(),
            total_urls,
        }
    }

    pub fn failed(mut self, error: impl Into<String>) -> Self {
        self.success = false;
        self.error = Some(error.into());
        self
    }
}
