//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - parsed input lines (`Record`)
//! - evaluation outputs (`Verdict`, `Note`, `EvaluatedRecord`)
//! - report sections (`Bucket`, `TableGroup`, `Report`)
//! - run configuration (`SlaPolicy`, `ReportConfig`)

pub mod types;

pub use types::*;
