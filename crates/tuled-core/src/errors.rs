//! Cross-cutting error types for tuled.
//!
//! Stage-specific errors (`ParserError`, `FilterError`, ...) live in their own
//! crates. The binary converges all of them through `anyhow`.

use thiserror::Error;

/// Errors raised by the core entities themselves.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A language-table key could not be interpreted as a calibration target.
    #[error("Invalid language key '{key}': {reason}")]
    InvalidLanguageKey { key: String, reason: String },
}
