//! Probe execution engine
//!
//! Single-vendor calls live in `runner`, the concurrent all-vendor probe in
//! `parallel`.

mod parallel;
mod runner;

pub use runner::Prober;
