//! Shared error types for the analysis engine

use thiserror::Error;

/// Main error type for complexmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// The module list cannot be analysed as given (empty or duplicate
    /// module paths). Raised before any walking begins.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
