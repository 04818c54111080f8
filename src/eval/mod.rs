//! Evaluation core.
//!
//! - date normalization (`dates`)
//! - per-record completeness / timeliness / note rules (`rules`)
//! - table grouping and bucket assignment (`classify`)
//!
//! Everything here is total: bad input degrades to `NOT MET` or fewer rows,
//! never to an error.

pub mod classify;
pub mod dates;
pub mod rules;

pub use classify::{bucket_for, classify, group_by_table};
pub use dates::parse_date;
pub use rules::{completeness, evaluate, evaluate_all, note, timeliness};
