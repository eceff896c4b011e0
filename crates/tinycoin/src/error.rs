//! Error types for the Tinycoin API.

use thiserror::Error;
use tinycoin_core::{ChainError, CoreError};

/// Errors that can occur during Tinycoin operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Key, signing, or mining error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Ownership chain error.
    #[error("chain error: {0}")]
    Chain(#[from] ChainError),

    /// Configuration rejected by [`Config::validate`](crate::Config::validate).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Check if this is a mining timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Core(e) if e.is_timeout())
    }
}

/// Result type for Tinycoin operations.
pub type Result<T> = std::result::Result<T, Error>;
