//! Vendor adapters
//!
//! One module per translation API. Each adapter builds a signed request,
//! sends it through [`HttpClient`] and turns the vendor's response shape into
//! either a translation or a [`VendorError`].
//!
//! - Baidu: MD5-signed GET
//! - Tencent TMT: TC3-HMAC-SHA256 signed POST
//! - Volcano: Volcengine HMAC-SHA256 signed POST

pub mod baidu;
pub mod signing;
pub mod tencent;
pub mod volcano;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::AppConfig;
use crate::http::{HttpClient, HttpError};
use crate::models::Vendor;

/// Errors from a single vendor call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VendorError {
    #[error("{vendor} configuration incomplete: missing {missing}")]
    IncompleteConfig { vendor: Vendor, missing: String },

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Network connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP error: {0}")]
    Http(u16),

    #[error("Failed to parse response JSON: {0}")]
    Decode(String),

    #[error("{code}: {message}")]
    Api { code: String, message: String },

    #[error("Unexpected response format")]
    UnexpectedResponse,

    #[error("empty translation")]
    EmptyTranslation,
}

impl VendorError {
    pub fn incomplete(vendor: Vendor, missing: &[&str]) -> Self {
        VendorError::IncompleteConfig {
            vendor,
            missing: missing.join(", "),
        }
    }

    /// Map transport errors raised by [`HttpClient`]
    pub fn from_transport(err: anyhow::Error) -> Self {
        match err.downcast_ref::<HttpError>() {
            Some(HttpError::Timeout(secs)) => VendorError::Timeout(*secs),
            Some(HttpError::ConnectionRefused(target)) => VendorError::Connection(target.clone()),
            Some(other) => VendorError::Request(other.to_string()),
            None => VendorError::Request(format!("{err:#}")),
        }
    }
}

/// Text and language pair for one call. Codes are the CLI's canonical codes.
#[derive(Clone, Debug)]
pub struct TranslateRequest<'a> {
    pub text: &'a str,
    pub source_language: &'a str,
    pub target_language: &'a str,
    /// Signing time
    pub now: DateTime<Utc>,
}

impl<'a> TranslateRequest<'a> {
    pub fn new(text: &'a str, source_language: &'a str, target_language: &'a str) -> Self {
        Self {
            text,
            source_language,
            target_language,
            now: Utc::now(),
        }
    }
}

/// Check that `vendor` has the credentials it needs without calling it
pub fn check_credentials(config: &AppConfig, vendor: Vendor) -> Result<(), VendorError> {
    match vendor {
        Vendor::Baidu => baidu::resolve_credentials(&config.baidu).map(|_| ()),
        Vendor::Volcano => volcano::resolve_credentials(&config.volcano).map(|_| ()),
        Vendor::Tencent => tencent::resolve_credentials(&config.tencent).map(|_| ()),
    }
}

/// Run one translation through `vendor`
pub async fn translate(
    client: &HttpClient,
    config: &AppConfig,
    vendor: Vendor,
    request: &TranslateRequest<'_>,
) -> Result<String, VendorError> {
    let translation = match vendor {
        Vendor::Baidu => baidu::translate(client, &config.baidu, request).await?,
        Vendor::Volcano => volcano::translate(client, &config.volcano, request).await?,
        Vendor::Tencent => tencent::translate(client, &config.tencent, request).await?,
    };

    if translation.trim().is_empty() {
        return Err(VendorError::EmptyTranslation);
    }
    Ok(translation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_config_message() {
        let err = VendorError::incomplete(Vendor::Baidu, &["app_id", "secret_key"]);
        let message = err.to_string();
        assert!(message.contains("configuration incomplete"));
        assert!(message.contains("app_id, secret_key"));
    }

    #[test]
    fn test_from_transport() {
        let err = VendorError::from_transport(anyhow::anyhow!(HttpError::Timeout(10)));
        assert_eq!(err, VendorError::Timeout(10));

        let err = VendorError::from_transport(anyhow::anyhow!("boom"));
        assert_eq!(err, VendorError::Request("boom".to_string()));
    }

    #[test]
    fn test_check_credentials_on_defaults() {
        let config = AppConfig::default();
        for vendor in Vendor::all() {
            let err = check_credentials(&config, vendor).unwrap_err();
            assert!(matches!(err, VendorError::IncompleteConfig { .. }));
        }
    }
}
