//! transprobe - Translation API probe
//!
//! A CLI tool for checking and comparing third-party machine translation
//! vendors (Baidu Translate, Volcano Engine, Tencent TMT) and for testing the
//! proxy their calls go through.
//!
//! ## Features
//!
//! - Parallel probe of every enabled vendor with timing per call
//! - Heuristic or LLM-backed comparison of the translations
//! - Fallback translation across vendors
//! - Proxy and direct connectivity test
//! - YAML/JSON configuration with environment overrides
//!
//! ## Usage
//!
//! ```bash
//! # Probe every enabled vendor
//! transprobe probe "Hello, world" -t zh-cn
//!
//! # Test one vendor's credentials
//! transprobe vendor tencent
//!
//! # Check the configured proxy
//! transprobe proxy
//!
//! # Edit configuration
//! transprobe config set baidu.app_id 2024...
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

mod cli;
mod compare;
mod config;
mod executor;
mod http;
mod llm;
mod models;
mod output;
mod proxy;
mod utils;
mod vendors;

use cli::Args;
use config::{AppConfig, ConfigFile, EnvConfig};
use executor::Prober;
use llm::{LlmTranslator, TranslationMode};
use models::{language, Vendor};
use output::{OutputFormat, ResultFormatter};
use proxy::ProxyTester;
use utils::logger::{init_logger, LogLevel};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(LogLevel::resolve(args.verbose, &args.log_level));

    let env_config = EnvConfig::load();
    let config_path = args.config.clone().or_else(|| env_config.config_file.clone());

    match args.command {
        cli::Command::Probe(probe_args) => {
            let config = load_config(config_path.as_deref(), &env_config)?;
            run_probe(probe_args, config).await?;
        }
        cli::Command::Vendor(vendor_args) => {
            let config = load_config(config_path.as_deref(), &env_config)?;
            run_vendor(vendor_args, config).await?;
        }
        cli::Command::Translate(translate_args) => {
            let config = load_config(config_path.as_deref(), &env_config)?;
            run_translate(translate_args, config).await?;
        }
        cli::Command::Proxy(proxy_args) => {
            let config = load_config(config_path.as_deref(), &env_config)?;
            run_proxy(proxy_args, config).await?;
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args, config_path.as_deref(), &env_config)?;
        }
        cli::Command::List(list_args) => {
            list(list_args);
        }
    }

    Ok(())
}

/// File (or defaults) with environment overrides applied
fn effective_file(path: Option<&str>, env_config: &EnvConfig) -> Result<ConfigFile> {
    let mut file = ConfigFile::load_or_default(path)?;
    env_config.apply(&mut file.app);
    Ok(file)
}

fn load_config(path: Option<&str>, env_config: &EnvConfig) -> Result<AppConfig> {
    let app = effective_file(path, env_config)?.app;
    debug!("Enabled vendors: {:?}", app.enabled_vendors());
    Ok(app)
}

fn parse_format(format: &str) -> Result<OutputFormat> {
    OutputFormat::from_str(format).with_context(|| {
        format!("Unknown output format: {format} (table, json, json-pretty, csv, summary)")
    })
}

fn parse_vendor(name: &str) -> Result<Vendor> {
    Vendor::from_str(name)
        .with_context(|| format!("Unknown vendor: {name} (baidu, volcano, tencent)"))
}

/// Explicit language code, or the configured default
fn resolve_language(explicit: Option<&str>, fallback: &str) -> Result<String> {
    let code = language::normalize(explicit.unwrap_or(fallback));
    if !language::is_supported(&code) {
        anyhow::bail!("Unsupported language code: {code} (see `transprobe list --languages`)");
    }
    Ok(code)
}

/// Source and target codes, refused when they name the same language
fn resolve_languages(
    source: Option<&str>,
    target: Option<&str>,
    config: &AppConfig,
) -> Result<(String, String)> {
    let source = resolve_language(source, &config.source_language)?;
    let target = resolve_language(target, &config.target_language)?;
    if language::same_language(&source, &target) {
        anyhow::bail!("Source and target language must differ (both are {target})");
    }
    Ok((source, target))
}

async fn run_probe(args: cli::ProbeArgs, mut config: AppConfig) -> Result<()> {
    let format = parse_format(&args.format)?;
    let vendors = args
        .vendors
        .iter()
        .map(|v| parse_vendor(v))
        .collect::<Result<Vec<_>>>()?;
    config.only(&vendors);

    let (source, target) =
        resolve_languages(args.source.as_deref(), args.target.as_deref(), &config)?;

    let mut prober = Prober::new(config);
    if let Some(timeout) = args.timeout {
        prober = prober.with_timeout(timeout);
    }

    info!(
        "Probing \"{}\" ({} -> {}, {}s timeout)",
        args.text,
        source,
        target,
        prober.timeout_secs()
    );
    let aggregate = prober.test_all(&args.text, &source, &target).await;

    let mut formatter = ResultFormatter::new(format);
    if args.no_color {
        formatter = formatter.no_color();
    }
    println!("{}", formatter.format_aggregate(&aggregate));

    if let Some(path) = &args.output {
        output::write_results_to_file(path, &aggregate, OutputFormat::JsonPretty)?;
        println!("Results saved to {path}");
    }

    if aggregate.all_failed() {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_vendor(args: cli::VendorArgs, config: AppConfig) -> Result<()> {
    let vendor = parse_vendor(&args.vendor)?;
    let format = parse_format(&args.format)?;

    let mut prober = Prober::new(config);
    if let Some(timeout) = args.timeout {
        prober = prober.with_timeout(timeout);
    }

    let result = match &args.text {
        Some(text) => {
            let (source, target) = resolve_languages(
                args.source.as_deref(),
                args.target.as_deref(),
                prober.config(),
            )?;
            prober.test_vendor(vendor, text, &source, &target).await
        }
        None => prober.test_connection(vendor).await,
    };

    println!("{}", ResultFormatter::new(format).format_result(&result));

    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_translate(args: cli::TranslateArgs, config: AppConfig) -> Result<()> {
    let (source, target) =
        resolve_languages(args.source.as_deref(), args.target.as_deref(), &config)?;

    match args.engine.as_str() {
        "vendor" => {
            let preferred = args.vendor.as_deref().map(parse_vendor).transpose()?;
            let prober = Prober::new(config);
            let result = prober
                .translate(&args.text, &source, &target, preferred)
                .await?;

            println!("{}", result.translation.unwrap_or_default());
            info!("Translated by {} in {}ms", result.vendor, result.duration_ms);
        }
        "llm" => {
            let mode = TranslationMode::from_str(&args.mode).with_context(|| {
                format!("Unknown translation mode: {} (sentence, paragraph)", args.mode)
            })?;
            let translation = LlmTranslator::from_config(&config)
                .translate(&args.text, &source, &target, mode)
                .await?;
            println!("{translation}");
        }
        other => anyhow::bail!("Unknown translation engine: {other} (vendor, llm)"),
    }
    Ok(())
}

async fn run_proxy(args: cli::ProxyArgs, config: AppConfig) -> Result<()> {
    let format = parse_format(&args.format)?;
    let timeout = args.timeout.unwrap_or(match config.proxy.test_timeout {
        0 => config.timeout_secs,
        secs => secs,
    });
    let tester = ProxyTester::new(timeout);

    let result = if args.direct {
        tester.test_direct().await
    } else {
        let url = match args.url {
            Some(url) => url,
            None => config.proxy.effective_url().context(
                "No proxy configured; pass --url, set proxy.url, or use --direct",
            )?,
        };
        tester.test_proxy(&url).await
    };

    println!("{}", ResultFormatter::new(format).format_proxy(&result));

    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}

/// Path `config set` and `config path` operate on
fn config_target(explicit: Option<&str>) -> PathBuf {
    explicit
        .map(config::expand_path)
        .or_else(ConfigFile::find)
        .unwrap_or_else(ConfigFile::default_path)
}

fn manage_config(
    args: cli::ConfigArgs,
    explicit: Option<&str>,
    env_config: &EnvConfig,
) -> Result<()> {
    match args.action {
        cli::ConfigAction::Init { output, force } => {
            let path = output
                .as_deref()
                .or(explicit)
                .map(config::expand_path)
                .unwrap_or_else(ConfigFile::default_path);

            if path.exists() && !force {
                anyhow::bail!(
                    "Configuration file already exists: {}. Use --force to overwrite.",
                    path.display()
                );
            }

            ConfigFile::default().save(&path)?;
            println!("✓ Configuration file created: {}", path.display());
            println!("\nAdd vendor credentials with `transprobe config set <key> <value>`.");
        }

        cli::ConfigAction::Show { format, reveal } => {
            let file = effective_file(explicit, env_config)?;
            let file = if reveal { file } else { file.masked() };

            let output = if format == "json" {
                serde_json::to_string_pretty(&file)?
            } else {
                serde_yaml::to_string(&file)?
            };
            println!("{output}");
        }

        cli::ConfigAction::Get { key } => {
            let file = effective_file(explicit, env_config)?;
            println!("{}", file.get(&key)?);
        }

        cli::ConfigAction::Set { key, value } => {
            let path = config_target(explicit);
            let mut file = if path.exists() {
                ConfigFile::load(&path)?
            } else {
                ConfigFile::default()
            };

            file.set(&key, &value)?;
            file.validate()?;
            file.save(&path)?;
            println!("✓ {key} updated in {}", path.display());
        }

        cli::ConfigAction::Path => {
            let path = config_target(explicit);
            let state = if path.exists() {
                ""
            } else {
                " (not created yet)"
            };
            println!("{}{state}", path.display());
        }

        cli::ConfigAction::Env { help_vars } => {
            if help_vars {
                config::env::print_env_help();
            } else {
                env_config.print_summary();
            }
        }
    }

    Ok(())
}

fn list(args: cli::ListArgs) {
    if args.languages {
        println!("Supported Languages:");
        println!("{:-<60}", "");
        println!("  {:8} {:24} {:6} {:8} {:6}", "Code", "Name", "Baidu", "Volcano", "Tencent");
        for (code, name) in language::SUPPORTED_LANGUAGES {
            println!(
                "  {:8} {:24} {:6} {:8} {:6}",
                code,
                name,
                language::vendor_code(Vendor::Baidu, code),
                language::vendor_code(Vendor::Volcano, code),
                language::vendor_code(Vendor::Tencent, code)
            );
        }
        return;
    }

    if args.keys {
        println!("Configuration Keys:");
        println!("{:-<60}", "");
        for key in ConfigFile::keys() {
            println!("  {key}");
        }
        return;
    }

    println!("Translation Vendors:");
    println!("{:-<60}", "");
    for vendor in Vendor::all() {
        println!(
            "  {:8} {:18} {:28} [{}]",
            vendor.key(),
            vendor.name(),
            vendor.host(),
            vendor.credential_fields().join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_languages_rejects_same_pair() {
        let config = AppConfig::default();
        let err = resolve_languages(Some("zh"), Some("zh_CN"), &config).unwrap_err();
        assert!(err.to_string().contains("must differ"));

        let (source, target) = resolve_languages(Some("EN"), None, &config).unwrap();
        assert_eq!(source, "en");
        assert_eq!(target, "zh-cn");
    }

    #[test]
    fn test_get_and_show_see_environment_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transprobe.yaml");
        let mut file = ConfigFile::default();
        file.app.baidu.app_id = "from-file".to_string();
        file.save(&path).unwrap();

        let env_config = EnvConfig {
            baidu_app_id: Some("from-env".to_string()),
            ..EnvConfig::default()
        };
        let effective = effective_file(path.to_str(), &env_config).unwrap();

        assert_eq!(effective.get("baidu.app_id").unwrap(), "from-env");
        assert_eq!(effective.get("baidu.enabled").unwrap(), "true");
    }
}
