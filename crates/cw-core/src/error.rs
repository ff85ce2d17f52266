//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CwError` as one variant
//! via `#[from]`, so configuration problems bubble up unchanged.

use thiserror::Error;

/// The top-level error type for `cw-core` and a common base for sub-crates.
#[derive(Debug, Error, PartialEq)]
pub enum CwError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid {what}: {value}")]
    InvalidValue { what: &'static str, value: f32 },
}

/// Shorthand result type for all `cw-*` crates.
pub type CwResult<T> = Result<T, CwError>;
