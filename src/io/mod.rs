//! Input/output helpers.
//!
//! - pipe-delimited ingest (`ingest`)
//! - styled workbook output (`xlsx`)
//! - CSV/JSON exports (`export`)

pub mod export;
pub mod ingest;
pub mod xlsx;

pub use export::*;
pub use ingest::*;
pub use xlsx::*;
