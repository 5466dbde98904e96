//! Data models for translation API probing
//!
//! This module contains all data structures used throughout the application.

pub mod language;
mod test_result;
mod vendor;

pub use test_result::{AggregateResult, ProxyTestResult, TestResult};
pub use vendor::Vendor;
