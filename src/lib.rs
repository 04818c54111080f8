//! `sla-report` library crate.
//!
//! The binary (`sla`) is a thin wrapper around this library so that:
//!
//! - the parse/evaluate/classify core is testable without spawning processes
//! - the workbook renderer and exports can be driven from other front-ends

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod eval;
pub mod io;
pub mod logging;
pub mod report;
