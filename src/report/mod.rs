//! Reporting: terminal summaries and per-table listings.

pub mod format;

pub use format::{format_run_summary, format_tables};
