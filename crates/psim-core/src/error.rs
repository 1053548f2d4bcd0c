//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised by `psim-core` parsing and configuration helpers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown tag {0:?}")]
    UnknownTag(String),

    #[error("unknown media group {0:?}")]
    UnknownMediaGroup(String),

    #[error("unknown life pattern {0:?}")]
    UnknownLifePattern(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `psim-core`.
pub type CoreResult<T> = Result<T, CoreError>;
