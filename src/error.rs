//! Application error carried up to `main`.
//!
//! Exit codes:
//! - `2` bad input, configuration or filesystem problems
//! - `4` the workbook library failed to render or save

use std::fmt;
use std::path::Path;

pub const EXIT_INPUT: u8 = 2;
pub const EXIT_RENDER: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Filesystem failure on `path` while doing `action` ("create", "write", ...).
    pub fn io(action: &str, path: &Path, err: impl fmt::Display) -> Self {
        Self::new(
            EXIT_INPUT,
            format!("Failed to {action} '{}': {err}", path.display()),
        )
    }

    pub fn render(err: impl fmt::Display) -> Self {
        Self::new(EXIT_RENDER, format!("Failed to render workbook: {err}"))
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::render(err)
    }
}
