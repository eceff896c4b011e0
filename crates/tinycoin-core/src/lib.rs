//! # Tinycoin Core
//!
//! Pure primitives for Tinycoin: keys, signed ownership transfers, and
//! proof-of-work.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over cryptographic data structures.
//!
//! ## Key Types
//!
//! - [`Keypair`] - A secp256k1 key pair with a validated private scalar
//! - [`Transaction`] - A signed transfer of ownership, linked to its predecessor by hash
//! - [`Chain`] - An ownership history rooted at a genesis transaction
//! - [`Miner`] - A bounded proof-of-work nonce search
//!
//! ## Hashing
//!
//! Everything that is hashed goes through deterministic CBOR and SHA-256.
//! See the [`canonical`] module.

pub mod canonical;
pub mod chain;
pub mod crypto;
pub mod error;
pub mod pow;
pub mod transaction;

pub use canonical::{hash, hash_value, Canonical, CanonicalHasher, ValueHasher};
pub use chain::{validate_chain, Chain};
pub use crypto::{
    generate_key_pair, sign, verify, Digest, DigestEncoding, Keypair, PrivateKey, PublicKey,
    Signature,
};
pub use error::{ChainError, CoreError};
pub use pow::{mine, MinedBlock, Miner, MinerConfig, DEFAULT_MAX_ATTEMPTS, MAX_DIFFICULTY};
pub use transaction::{create_transaction, verify_transaction, Transaction};
