//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Degenerate generation outcomes (too few shapes, unreachable degrees, empty input)
//! are not errors; only caller contract violations are reported here.
use thiserror::Error;

use crate::grid::GridSize;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("shape map was built for a {found} grid but {expected} was requested")]
    GridMismatch { expected: GridSize, found: GridSize },

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
