//! Error types for the modkit crate

use thiserror::Error;

/// Errors raised by the module toolkit
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing input parameters, rejected before the module
    /// handler runs
    #[error("invalid parameters: {0}")]
    Validation(String),
}

/// Result type for toolkit operations
pub type Result<T> = std::result::Result<T, Error>;
