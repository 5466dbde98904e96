//! Output formatters for probe results
//!
//! Provides table, JSON, CSV and one-line summary renderings.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::models::{AggregateResult, ProxyTestResult, TestResult};
use crate::proxy::format_proxy_result;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// One CSV row per vendor result
#[derive(Serialize)]
struct ResultRow<'a> {
    vendor: &'a str,
    success: bool,
    duration_ms: u64,
    translation: &'a str,
    error: &'a str,
}

impl<'a> From<&'a TestResult> for ResultRow<'a> {
    fn from(result: &'a TestResult) -> Self {
        Self {
            vendor: result.vendor.key(),
            success: result.success,
            duration_ms: result.duration_ms,
            translation: result.translation.as_deref().unwrap_or(""),
            error: result.error.as_deref().unwrap_or(""),
        }
    }
}

#[derive(Serialize)]
struct ProxyRow<'a> {
    proxy_url: &'a str,
    success: bool,
    response_time_ms: Option<u64>,
    origin_ip: &'a str,
    accessible_urls: usize,
    total_urls: usize,
    error: &'a str,
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.colorize {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn to_json<T: Serialize>(&self, value: &T) -> String {
        if self.format == OutputFormat::JsonPretty {
            serde_json::to_string_pretty(value).unwrap_or_default()
        } else {
            serde_json::to_string(value).unwrap_or_default()
        }
    }

    /// Format a single vendor result
    pub fn format_result(&self, result: &TestResult) -> String {
        match self.format {
            OutputFormat::Table => self.format_result_table(result),
            OutputFormat::Json | OutputFormat::JsonPretty => self.to_json(result),
            OutputFormat::Csv => to_csv([ResultRow::from(result)]).unwrap_or_default(),
            OutputFormat::Summary => result.to_string(),
        }
    }

    fn format_result_table(&self, result: &TestResult) -> String {
        let status = if result.success {
            self.paint("✓ OK  ", GREEN)
        } else {
            self.paint("✗ FAIL", RED)
        };

        let detail = match (&result.translation, &result.error) {
            (Some(t), _) => t.clone(),
            (None, Some(e)) => self.paint(e, YELLOW),
            _ => String::new(),
        };

        format!(
            "{:18} {} [{:>6}ms] {}",
            result.vendor.name(),
            status,
            result.duration_ms,
            detail
        )
    }

    /// Format the results of a probe across vendors
    pub fn format_aggregate(&self, aggregate: &AggregateResult) -> String {
        match self.format {
            OutputFormat::Table => self.format_aggregate_table(aggregate),
            OutputFormat::Json | OutputFormat::JsonPretty => self.to_json(aggregate),
            OutputFormat::Csv => {
                to_csv(aggregate.results.values().map(ResultRow::from)).unwrap_or_default()
            }
            OutputFormat::Summary => self.format_aggregate_brief(aggregate),
        }
    }

    fn format_aggregate_table(&self, aggregate: &AggregateResult) -> String {
        let mut output = String::new();

        output.push_str("\n═══════════════════════════════════════════════════════════════\n");
        output.push_str(&format!(
            " \"{}\" ({} -> {})\n",
            aggregate.text, aggregate.source_language, aggregate.target_language
        ));
        output.push_str("═══════════════════════════════════════════════════════════════\n");

        if aggregate.is_empty() {
            output.push_str(" No vendor is enabled. Run `transprobe config init` and add credentials.\n");
            return output;
        }

        for result in aggregate.results.values() {
            output.push_str(&format!(" {}\n", self.format_result_table(result)));
        }

        output.push_str(" ───────────────────────────────────────────────────────────\n");

        let success = aggregate.success_count().to_string();
        let failed = aggregate.failure_count();
        let failed_str = if failed > 0 {
            self.paint(&failed.to_string(), RED)
        } else {
            failed.to_string()
        };
        output.push_str(&format!(
            " Success: {} | Failed: {} | Total: {}\n",
            self.paint(&success, GREEN),
            failed_str,
            aggregate.results.len()
        ));

        if let Some(comparison) = &aggregate.comparison {
            output.push_str("\n Comparison\n");
            output.push_str(" ───────────────────────────────────────────────────────────\n");
            for line in comparison.lines() {
                output.push_str(&format!(" {line}\n"));
            }
        }

        output
    }

    fn format_aggregate_brief(&self, aggregate: &AggregateResult) -> String {
        let fastest = aggregate
            .successful()
            .into_iter()
            .min_by_key(|r| r.duration_ms)
            .map(|r| format!(", fastest {} ({}ms)", r.vendor.name(), r.duration_ms))
            .unwrap_or_default();

        format!(
            "{}/{} vendors translated \"{}\"{}",
            aggregate.success_count(),
            aggregate.results.len(),
            aggregate.text,
            fastest
        )
    }

    /// Format a proxy or direct connectivity test
    pub fn format_proxy(&self, result: &ProxyTestResult) -> String {
        match self.format {
            OutputFormat::Json | OutputFormat::JsonPretty => self.to_json(result),
            OutputFormat::Csv => to_csv([ProxyRow {
                proxy_url: result.proxy_url.as_deref().unwrap_or("direct"),
                success: result.success,
                response_time_ms: result.response_time_ms,
                origin_ip: result.origin_ip.as_deref().unwrap_or(""),
                accessible_urls: result.accessible_urls.len(),
                total_urls: result.total_urls,
                error: result.error.as_deref().unwrap_or(""),
            }])
            .unwrap_or_default(),
            OutputFormat::Summary => format_proxy_result(result),
            OutputFormat::Table => self.format_proxy_table(result),
        }
    }

    fn format_proxy_table(&self, result: &ProxyTestResult) -> String {
        let target = result.proxy_url.as_deref().unwrap_or("direct connection");
        let color = if result.success { GREEN } else { RED };

        let mut output = format!("\n Target: {target}\n");
        for line in format_proxy_result(result).lines() {
            output.push_str(&format!(" {}\n", self.paint(line, color)));
        }
        for url in &result.accessible_urls {
            output.push_str(&format!("   - {url}\n"));
        }
        output
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

fn to_csv<R: Serialize>(rows: impl IntoIterator<Item = R>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).context("Failed to write CSV row")?;
    }
    let bytes = writer.into_inner().context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

/// Write a probe's results to a file
pub fn write_results_to_file(
    path: &str,
    aggregate: &AggregateResult,
    format: OutputFormat,
) -> Result<()> {
    let formatter = ResultFormatter::new(format).no_color();
    let content = formatter.format_aggregate(aggregate);

    let mut file =
        std::fs::File::create(path).with_context(|| format!("Failed to create {path}"))?;
    file.write_all(content.as_bytes())?;

    Ok(())
}
