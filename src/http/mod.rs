//! HTTP client module
//!
//! Provides HTTP client functionality for vendor and proxy probes.

mod client;

pub use client::{HttpClient, HttpError, HttpRequest, HttpResponse};
