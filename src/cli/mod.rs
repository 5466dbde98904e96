//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Translation API probe
#[derive(Parser, Debug)]
#[command(name = "transprobe")]
#[command(version)]
#[command(about = "Probe and compare Baidu, Volcano and Tencent translation APIs")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to the first one found in the search path)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose output (same as --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a text with every enabled vendor and compare the results
    Probe(ProbeArgs),

    /// Test a single vendor
    Vendor(VendorArgs),

    /// Translate a text, falling back across vendors
    Translate(TranslateArgs),

    /// Test a proxy or the direct connection
    Proxy(ProxyArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// List vendors or supported languages
    List(ListArgs),
}

/// Arguments for probe command
#[derive(Parser, Debug)]
pub struct ProbeArgs {
    /// Text to translate
    #[arg(default_value = "Hello")]
    pub text: String,

    /// Source language (default from config)
    #[arg(short, long)]
    pub source: Option<String>,

    /// Target language (default from config)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Probe only these vendors (repeatable)
    #[arg(long = "vendor", value_name = "VENDOR")]
    pub vendors: Vec<String>,

    /// Per-call timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Save results to file as JSON
    #[arg(short, long)]
    pub output: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for vendor command
#[derive(Parser, Debug)]
pub struct VendorArgs {
    /// Vendor to test (baidu, volcano, tencent)
    pub vendor: String,

    /// Text to translate (runs the connection test when omitted)
    pub text: Option<String>,

    /// Source language
    #[arg(short, long)]
    pub source: Option<String>,

    /// Target language
    #[arg(short, long)]
    pub target: Option<String>,

    /// Per-call timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// Arguments for translate command
#[derive(Parser, Debug)]
pub struct TranslateArgs {
    /// Text to translate
    pub text: String,

    /// Vendor to try first (vendor engine only)
    #[arg(long)]
    pub vendor: Option<String>,

    /// Translation engine (vendor, llm)
    #[arg(short, long, default_value = "vendor")]
    pub engine: String,

    /// Prompt style for the llm engine (sentence, paragraph)
    #[arg(short, long, default_value = "sentence")]
    pub mode: String,

    /// Source language
    #[arg(short, long)]
    pub source: Option<String>,

    /// Target language
    #[arg(short, long)]
    pub target: Option<String>,
}

/// Arguments for proxy command
#[derive(Parser, Debug)]
pub struct ProxyArgs {
    /// Proxy URL (defaults to the configured proxy)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Test the direct connection instead of a proxy
    #[arg(short, long, conflicts_with = "url")]
    pub direct: bool,

    /// Timeout in seconds (defaults to proxy.test_timeout)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a configuration file with default values
    Init {
        /// Output path
        #[arg(short, long)]
        output: Option<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the effective configuration
    Show {
        /// Output format (yaml, json)
        #[arg(short, long, default_value = "yaml")]
        format: String,

        /// Print secrets in clear text
        #[arg(long)]
        reveal: bool,
    },

    /// Print one value
    Get {
        /// Dotted key, e.g. baidu.app_id
        key: String,
    },

    /// Change one value and save the file
    Set {
        /// Dotted key, e.g. proxy.enable
        key: String,

        /// New value
        value: String,
    },

    /// Print the configuration file path
    Path,

    /// Show environment variable overrides
    Env {
        /// Print the list of supported variables
        #[arg(long)]
        help_vars: bool,
    },
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show supported language codes
    #[arg(short, long)]
    pub languages: bool,

    /// Show configuration keys
    #[arg(short, long)]
    pub keys: bool,
}
