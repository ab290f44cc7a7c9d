//! Error types for the bizdays crates.
//!
//! Every fallible operation in the workspace reports through the single
//! `thiserror`-derived [`Error`] enum below, via the [`Result`] alias.

use thiserror::Error;

/// The top-level error type used throughout the bizdays crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An input date string or output-format template failed validation.
    #[error("format error: {0}")]
    Format(String),

    /// The holiday source is missing, nonexistent, or empty.
    #[error("resource error: {0}")]
    Resource(String),

    /// A business-day shift request that cannot be satisfied.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// A (year, month, day) triple does not form a real calendar date, or
    /// date arithmetic left the supported range.
    #[error("date error: {0}")]
    Date(String),
}

/// Shorthand `Result` type used throughout the bizdays crates.
pub type Result<T, E = Error> = std::result::Result<T, E>;
