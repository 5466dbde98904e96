//! Configuration file management
//!
//! Handles finding, loading, validating and editing the settings store.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{AppConfig, ComparisonMode};
use crate::models::language;

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./transprobe.yaml",
    "./transprobe.yml",
    "./.transprobe.yaml",
    "~/.config/transprobe/config.yaml",
    "~/.transprobe.yaml",
];

/// Where `config init` and `config set` write when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/transprobe/config.yaml";

/// Keys addressable through `config get` / `config set`
pub const CONFIG_KEYS: &[&str] = &[
    "source_language",
    "target_language",
    "timeout_secs",
    "proxy.enable",
    "proxy.url",
    "proxy.auth_enable",
    "proxy.username",
    "proxy.password",
    "proxy.test_timeout",
    "baidu.enabled",
    "baidu.app_id",
    "baidu.secret_key",
    "volcano.enabled",
    "volcano.access_key",
    "volcano.secret_key",
    "volcano.api_key",
    "tencent.enabled",
    "tencent.secret_id",
    "tencent.secret_key",
    "comparison.mode",
    "comparison.model",
    "comparison.endpoint",
    "comparison.api_key",
];

/// Keys whose values are masked by `config show`
const SECRET_KEYS: &[&str] = &[
    "proxy.password",
    "baidu.secret_key",
    "volcano.secret_key",
    "volcano.api_key",
    "tencent.secret_key",
    "comparison.api_key",
];

/// Proxy URL schemes the HTTP client can route through
pub const PROXY_SCHEMES: &[&str] = &["http", "https", "socks5", "socks5h"];

/// Full configuration file structure
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Version of config file format
    #[serde(default = "default_version")]
    pub version: String,

    /// Application settings
    #[serde(default)]
    pub app: AppConfig,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            version: default_version(),
            app: AppConfig::default(),
        }
    }
}

impl ConfigFile {
    /// Find configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        CONFIG_LOCATIONS
            .iter()
            .map(|location| expand_path(location))
            .find(|path| path.exists())
    }

    /// Path used when writing without an explicit location
    pub fn default_path() -> PathBuf {
        expand_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from default location, or defaults if none exists
    pub fn load_default() -> Result<Self> {
        match Self::find() {
            Some(path) => {
                debug!("Using config file {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Load from `path` if given, else from the default location
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load(expand_path(p)),
            None => Self::load_default(),
        }
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_file(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !["1.0"].contains(&self.version.as_str()) {
            anyhow::bail!("Unsupported config version: {}", self.version);
        }

        let app = &self.app;
        for (key, code) in [
            ("source_language", &app.source_language),
            ("target_language", &app.target_language),
        ] {
            if !language::is_supported(code) {
                anyhow::bail!("Unsupported language code '{code}' for {key}");
            }
        }

        if language::normalize(&app.target_language) == "auto" {
            anyhow::bail!("target_language cannot be 'auto'");
        }

        if app.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than 0");
        }

        let proxy_url = app.proxy.url.trim();
        if !proxy_url.is_empty() {
            let parsed = url::Url::parse(proxy_url)
                .with_context(|| format!("Invalid proxy URL: {proxy_url}"))?;
            if !PROXY_SCHEMES.contains(&parsed.scheme()) {
                anyhow::bail!(
                    "Unsupported proxy scheme '{}'. Use one of: {}",
                    parsed.scheme(),
                    PROXY_SCHEMES.join(", ")
                );
            }
        }

        Ok(())
    }

    /// Every key accepted by `get` and `set`
    pub fn keys() -> &'static [&'static str] {
        CONFIG_KEYS
    }

    /// Read a value by dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        let app = &self.app;
        let value = match key {
            "source_language" => app.source_language.clone(),
            "target_language" => app.target_language.clone(),
            "timeout_secs" => app.timeout_secs.to_string(),
            "proxy.enable" => app.proxy.enable.to_string(),
            "proxy.url" => app.proxy.url.clone(),
            "proxy.auth_enable" => app.proxy.auth_enable.to_string(),
            "proxy.username" => app.proxy.username.clone(),
            "proxy.password" => app.proxy.password.clone(),
            "proxy.test_timeout" => app.proxy.test_timeout.to_string(),
            "baidu.enabled" => app.baidu.enabled.to_string(),
            "baidu.app_id" => app.baidu.app_id.clone(),
            "baidu.secret_key" => app.baidu.secret_key.clone(),
            "volcano.enabled" => app.volcano.enabled.to_string(),
            "volcano.access_key" => app.volcano.access_key.clone(),
            "volcano.secret_key" => app.volcano.secret_key.clone(),
            "volcano.api_key" => app.volcano.api_key.clone(),
            "tencent.enabled" => app.tencent.enabled.to_string(),
            "tencent.secret_id" => app.tencent.secret_id.clone(),
            "tencent.secret_key" => app.tencent.secret_key.clone(),
            "comparison.mode" => app.comparison.mode.as_str().to_string(),
            "comparison.model" => app.comparison.model.clone(),
            "comparison.endpoint" => app.comparison.endpoint.clone(),
            "comparison.api_key" => app.comparison.api_key.clone(),
            _ => anyhow::bail!("Unknown configuration key: {key}"),
        };
        Ok(value)
    }

    /// Set a value by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let app = &mut self.app;
        let text = value.trim().to_string();
        match key {
            "source_language" => app.source_language = language::normalize(value),
            "target_language" => app.target_language = language::normalize(value),
            "timeout_secs" => app.timeout_secs = parse_value(key, value)?,
            "proxy.enable" => app.proxy.enable = parse_bool(key, value)?,
            "proxy.url" => app.proxy.url = text,
            "proxy.auth_enable" => app.proxy.auth_enable = parse_bool(key, value)?,
            "proxy.username" => app.proxy.username = text,
            "proxy.password" => app.proxy.password = text,
            "proxy.test_timeout" => app.proxy.test_timeout = parse_value(key, value)?,
            "baidu.enabled" => app.baidu.enabled = parse_bool(key, value)?,
            "baidu.app_id" => app.baidu.app_id = text,
            "baidu.secret_key" => app.baidu.secret_key = text,
            "volcano.enabled" => app.volcano.enabled = parse_bool(key, value)?,
            "volcano.access_key" => app.volcano.access_key = text,
            "volcano.secret_key" => app.volcano.secret_key = text,
            "volcano.api_key" => app.volcano.api_key = text,
            "tencent.enabled" => app.tencent.enabled = parse_bool(key, value)?,
            "tencent.secret_id" => app.tencent.secret_id = text,
            "tencent.secret_key" => app.tencent.secret_key = text,
            "comparison.mode" => {
                app.comparison.mode = ComparisonMode::from_str(value).ok_or_else(|| {
                    anyhow::anyhow!("Invalid comparison mode: {value} (heuristic, llm, off)")
                })?
            }
            "comparison.model" => app.comparison.model = text,
            "comparison.endpoint" => app.comparison.endpoint = text,
            "comparison.api_key" => app.comparison.api_key = text,
            _ => anyhow::bail!("Unknown configuration key: {key}"),
        }
        Ok(())
    }

    /// Copy with secrets replaced by a mask, for display
    pub fn masked(&self) -> Self {
        let mut copy = self.clone();
        for key in SECRET_KEYS {
            if let Ok(value) = self.get(key) {
                if !value.is_empty() {
                    // Every secret key is a plain string field, so set cannot fail.
                    let _ = copy.set(key, &mask(&value));
                }
            }
        }
        copy
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid value for {key}: {value}"))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enabled" => Ok(true),
        "0" | "false" | "no" | "off" | "disabled" => Ok(false),
        _ => anyhow::bail!("Invalid boolean for {key}: {value}"),
    }
}

/// Keep the first and last two characters of longer secrets
fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 6 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 4))
}

/// Expand ~ to home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Check if file is YAML based on extension
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_value(key: &str) -> &'static str {
        match key {
            "source_language" => "en",
            "target_language" => "ja",
            "timeout_secs" => "7",
            "proxy.test_timeout" => "5",
            "proxy.url" => "http://127.0.0.1:7890",
            "comparison.mode" => "llm",
            k if k.ends_with("enable") || k.ends_with("enabled") => "true",
            _ => "value-123",
        }
    }

    #[test]
    fn test_config_file_default() {
        let config = ConfigFile::default();
        assert_eq!(config.version, "1.0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_load_round_trip_all_keys() {
        for name in ["config.yaml", "config.json"] {
            let dir = tempdir().unwrap();
            let path = dir.path().join("nested").join(name);

            let mut config = ConfigFile::default();
            for key in CONFIG_KEYS {
                config.set(key, sample_value(key)).unwrap();
            }
            config.save(&path).unwrap();

            let loaded = ConfigFile::load(&path).unwrap();
            assert_eq!(loaded, config);
            for key in CONFIG_KEYS {
                assert_eq!(loaded.get(key).unwrap(), config.get(key).unwrap(), "{key}");
            }
        }
    }

    #[test]
    fn test_partial_file_is_filled_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.yaml");
        std::fs::write(&path, "app:\n  tencent:\n    enabled: true\n").unwrap();

        let config = ConfigFile::load(&path).unwrap();
        assert!(config.app.tencent.enabled);
        assert_eq!(config.version, "1.0");
        assert_eq!(config.app.target_language, "zh-cn");
    }

    #[test]
    fn test_unknown_key() {
        let mut config = ConfigFile::default();
        assert!(config.get("deepl.key").is_err());
        assert!(config.set("deepl.key", "x").is_err());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = ConfigFile::default();
        assert!(config.set("timeout_secs", "soon").is_err());
        assert!(config.set("baidu.enabled", "maybe").is_err());
        assert!(config.set("comparison.mode", "magic").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_language() {
        let mut config = ConfigFile::default();
        config.app.target_language = "auto".to_string();
        assert!(config.validate().is_err());

        config.app.target_language = "xx".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_proxy_scheme() {
        let mut config = ConfigFile::default();
        config.app.proxy.url = "ftp://127.0.0.1:21".to_string();
        assert!(config.validate().is_err());

        config.app.proxy.url = "socks5://127.0.0.1:1080".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_masked_hides_secrets() {
        let mut config = ConfigFile::default();
        config.set("baidu.app_id", "20240101000").unwrap();
        config.set("baidu.secret_key", "abcdefghijkl").unwrap();

        let masked = config.masked();
        assert_eq!(masked.app.baidu.app_id, "20240101000");
        assert_eq!(masked.app.baidu.secret_key, "ab********kl");
        assert_eq!(config.app.baidu.secret_key, "abcdefghijkl");
    }

    #[test]
    fn test_expand_path() {
        let path = expand_path("./test.yaml");
        assert_eq!(path, PathBuf::from("./test.yaml"));
    }
}
