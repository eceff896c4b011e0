//! Error types for Tinycoin Core.

use thiserror::Error;

/// Core errors that can occur during key, signing and mining operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid private key")]
    InvalidPrivateKey,

    #[error("invalid signature encoding")]
    InvalidSignature,

    #[error("signing failed")]
    SigningFailed,

    #[error("difficulty {difficulty} exceeds the digest length of {max} bytes")]
    InvalidDifficulty { difficulty: usize, max: usize },

    #[error("mining timed out at difficulty {difficulty} after {attempts} attempts")]
    MiningTimeout { difficulty: usize, attempts: u64 },
}

impl CoreError {
    /// Check if this is a mining timeout (as opposed to a precondition violation).
    pub fn is_timeout(&self) -> bool {
        matches!(self, CoreError::MiningTimeout { .. })
    }
}

/// Validation errors for an ownership chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("chain is empty")]
    EmptyChain,

    #[error("first transaction is not a genesis transaction")]
    GenesisExpected,

    #[error("transaction {index} does not hash-link to its predecessor")]
    BrokenLink { index: usize },

    #[error("signature verification failed for transaction {index}")]
    SignatureFailed { index: usize },

    #[error("signer does not own the chain head")]
    NotOwner,

    #[error("key error: {0}")]
    Key(#[from] CoreError),
}
