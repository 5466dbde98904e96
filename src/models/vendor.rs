//! Translation vendor models
//!
//! Defines the supported third-party translation APIs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported translation vendors
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Baidu,
    Volcano,
    Tencent,
}

impl Vendor {
    /// Configuration key / CLI name
    pub fn key(&self) -> &'static str {
        match self {
            Vendor::Baidu => "baidu",
            Vendor::Volcano => "volcano",
            Vendor::Tencent => "tencent",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Vendor::Baidu => "Baidu Translate",
            Vendor::Volcano => "Volcano Translate",
            Vendor::Tencent => "Tencent TMT",
        }
    }

    /// API host contacted by the adapter
    pub fn host(&self) -> &'static str {
        match self {
            Vendor::Baidu => "fanyi-api.baidu.com",
            Vendor::Volcano => "translate.volcengineapi.com",
            Vendor::Tencent => "tmt.tencentcloudapi.com",
        }
    }

    /// Credential fields required by the vendor
    pub fn credential_fields(&self) -> &'static [&'static str] {
        match self {
            Vendor::Baidu => &["app_id", "secret_key"],
            Vendor::Volcano => &["access_key", "secret_key"],
            Vendor::Tencent => &["secret_id", "secret_key"],
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "baidu" | "fanyi" => Some(Vendor::Baidu),
            "volcano" | "volcengine" | "volc" => Some(Vendor::Volcano),
            "tencent" | "tmt" => Some(Vendor::Tencent),
            _ => None,
        }
    }

    pub fn all() -> Vec<Vendor> {
        vec![Vendor::Baidu, Vendor::Volcano, Vendor::Tencent]
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_from_str() {
        assert_eq!(Vendor::from_str("baidu"), Some(Vendor::Baidu));
        assert_eq!(Vendor::from_str("Volcengine"), Some(Vendor::Volcano));
        assert_eq!(Vendor::from_str(" TMT "), Some(Vendor::Tencent));
        assert_eq!(Vendor::from_str("deepl"), None);
    }

    #[test]
    fn test_vendor_keys_round_trip() {
        for vendor in Vendor::all() {
            assert_eq!(Vendor::from_str(vendor.key()), Some(vendor));
        }
    }

    #[test]
    fn test_vendor_serde() {
        let json = serde_json::to_string(&Vendor::Volcano).unwrap();
        assert_eq!(json, "\"volcano\"");
    }
}
