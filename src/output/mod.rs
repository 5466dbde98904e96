//! Output formatting module
//!
//! Provides table, JSON, CSV and summary output for probe results.

mod formatter;

pub use formatter::{write_results_to_file, OutputFormat, ResultFormatter};
