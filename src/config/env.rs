//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

use super::AppConfig;

/// Environment variable prefix
const ENV_PREFIX: &str = "TRANSPROBE";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Config file from TRANSPROBE_CONFIG
    pub config_file: Option<String>,
    /// Timeout from TRANSPROBE_TIMEOUT
    pub timeout: Option<u64>,
    /// Source language from TRANSPROBE_SOURCE_LANG
    pub source_language: Option<String>,
    /// Target language from TRANSPROBE_TARGET_LANG
    pub target_language: Option<String>,
    /// Proxy URL from TRANSPROBE_PROXY (also enables the proxy)
    pub proxy_url: Option<String>,
    /// TRANSPROBE_BAIDU_APP_ID
    pub baidu_app_id: Option<String>,
    /// TRANSPROBE_BAIDU_SECRET_KEY
    pub baidu_secret_key: Option<String>,
    /// TRANSPROBE_VOLCANO_ACCESS_KEY
    pub volcano_access_key: Option<String>,
    /// TRANSPROBE_VOLCANO_SECRET_KEY
    pub volcano_secret_key: Option<String>,
    /// TRANSPROBE_TENCENT_SECRET_ID
    pub tencent_secret_id: Option<String>,
    /// TRANSPROBE_TENCENT_SECRET_KEY
    pub tencent_secret_key: Option<String>,
    /// TRANSPROBE_LLM_API_KEY
    pub llm_api_key: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            config_file: get_env("CONFIG"),
            timeout: get_env_parse("TIMEOUT"),
            source_language: get_env("SOURCE_LANG"),
            target_language: get_env("TARGET_LANG"),
            proxy_url: get_env("PROXY"),
            baidu_app_id: get_env("BAIDU_APP_ID"),
            baidu_secret_key: get_env("BAIDU_SECRET_KEY"),
            volcano_access_key: get_env("VOLCANO_ACCESS_KEY"),
            volcano_secret_key: get_env("VOLCANO_SECRET_KEY"),
            tencent_secret_id: get_env("TENCENT_SECRET_ID"),
            tencent_secret_key: get_env("TENCENT_SECRET_KEY"),
            llm_api_key: get_env("LLM_API_KEY"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.config_file.is_some()
            || self.timeout.is_some()
            || self.source_language.is_some()
            || self.target_language.is_some()
            || self.proxy_url.is_some()
            || self.baidu_app_id.is_some()
            || self.baidu_secret_key.is_some()
            || self.volcano_access_key.is_some()
            || self.volcano_secret_key.is_some()
            || self.tencent_secret_id.is_some()
            || self.tencent_secret_key.is_some()
            || self.llm_api_key.is_some()
    }

    /// Overlay environment values on top of file configuration.
    ///
    /// A vendor whose credentials arrive through the environment is enabled.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(timeout) = self.timeout.filter(|t| *t > 0) {
            config.timeout_secs = timeout;
        }
        if let Some(lang) = &self.source_language {
            config.source_language = lang.clone();
        }
        if let Some(lang) = &self.target_language {
            config.target_language = lang.clone();
        }
        if let Some(url) = &self.proxy_url {
            config.proxy.url = url.clone();
            config.proxy.enable = true;
        }

        if let Some(v) = &self.baidu_app_id {
            config.baidu.app_id = v.clone();
            config.baidu.enabled = true;
        }
        if let Some(v) = &self.baidu_secret_key {
            config.baidu.secret_key = v.clone();
        }
        if let Some(v) = &self.volcano_access_key {
            config.volcano.access_key = v.clone();
            config.volcano.enabled = true;
        }
        if let Some(v) = &self.volcano_secret_key {
            config.volcano.secret_key = v.clone();
        }
        if let Some(v) = &self.tencent_secret_id {
            config.tencent.secret_id = v.clone();
            config.tencent.enabled = true;
        }
        if let Some(v) = &self.tencent_secret_key {
            config.tencent.secret_key = v.clone();
        }
        if let Some(v) = &self.llm_api_key {
            config.comparison.api_key = v.clone();
        }
    }

    /// Print current environment configuration with secrets hidden
    pub fn print_summary(&self) {
        let shown = |v: &Option<String>| v.as_deref().map(|_| "<set>").unwrap_or("-");
        println!("Environment Configuration:");
        if !self.has_any() {
            println!("  (no {ENV_PREFIX}_* variables set)");
            return;
        }
        println!("  {ENV_PREFIX}_CONFIG:              {:?}", self.config_file);
        println!("  {ENV_PREFIX}_TIMEOUT:             {:?}", self.timeout);
        println!("  {ENV_PREFIX}_SOURCE_LANG:         {:?}", self.source_language);
        println!("  {ENV_PREFIX}_TARGET_LANG:         {:?}", self.target_language);
        println!("  {ENV_PREFIX}_PROXY:               {:?}", self.proxy_url);
        println!("  {ENV_PREFIX}_BAIDU_APP_ID:        {}", shown(&self.baidu_app_id));
        println!("  {ENV_PREFIX}_BAIDU_SECRET_KEY:    {}", shown(&self.baidu_secret_key));
        println!("  {ENV_PREFIX}_VOLCANO_ACCESS_KEY:  {}", shown(&self.volcano_access_key));
        println!("  {ENV_PREFIX}_VOLCANO_SECRET_KEY:  {}", shown(&self.volcano_secret_key));
        println!("  {ENV_PREFIX}_TENCENT_SECRET_ID:   {}", shown(&self.tencent_secret_id));
        println!("  {ENV_PREFIX}_TENCENT_SECRET_KEY:  {}", shown(&self.tencent_secret_key));
        println!("  {ENV_PREFIX}_LLM_API_KEY:         {}", shown(&self.llm_api_key));
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}"))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.trim().parse().ok())
}

/// Print all TRANSPROBE environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_CONFIG               Path to configuration file");
    println!("  {ENV_PREFIX}_TIMEOUT              Per-call timeout in seconds");
    println!("  {ENV_PREFIX}_SOURCE_LANG          Default source language");
    println!("  {ENV_PREFIX}_TARGET_LANG          Default target language");
    println!("  {ENV_PREFIX}_PROXY                Proxy URL (enables the proxy)");
    println!("  {ENV_PREFIX}_BAIDU_APP_ID         Baidu APP ID (enables Baidu)");
    println!("  {ENV_PREFIX}_BAIDU_SECRET_KEY     Baidu secret key");
    println!("  {ENV_PREFIX}_VOLCANO_ACCESS_KEY   Volcengine access key (enables Volcano)");
    println!("  {ENV_PREFIX}_VOLCANO_SECRET_KEY   Volcengine secret key");
    println!("  {ENV_PREFIX}_TENCENT_SECRET_ID    Tencent SecretId (enables Tencent)");
    println!("  {ENV_PREFIX}_TENCENT_SECRET_KEY   Tencent SecretKey");
    println!("  {ENV_PREFIX}_LLM_API_KEY          API key for LLM comparison");
    println!("  RUST_LOG                        Log filter (overrides --log-level)");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_BAIDU_APP_ID=2024...");
    println!("  export {ENV_PREFIX}_BAIDU_SECRET_KEY=...");
    println!("  transprobe probe \"Hello, world\" -t zh-cn");
}
