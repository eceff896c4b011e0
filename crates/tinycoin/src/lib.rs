//! # Tinycoin
//!
//! The unified API for Tinycoin - the two primitives underneath a
//! cryptocurrency, without the network around it.
//!
//! ## Overview
//!
//! - **Transactions**: Ownership transfers signed with secp256k1 ECDSA, each
//!   committing to its predecessor by hash
//! - **Chains**: Ordered ownership histories rooted at an issuer's genesis
//! - **Proof of work**: A bounded nonce search for a digest with leading
//!   zero bytes
//!
//! ## Usage
//!
//! ```rust
//! use tinycoin::{Config, Context, Keypair};
//!
//! let ctx = Context::new(Config::default()).unwrap();
//! let alice = Keypair::generate();
//!
//! // The issuer hands the coin to Alice
//! let tx = ctx
//!     .create_transaction(&alice.public_key(), ctx.genesis(), ctx.issuer().private_key())
//!     .unwrap();
//! assert!(ctx.verify_transaction(&tx, &ctx.issuer().public_key()));
//!
//! // Mine a block over the transfer
//! let block = ctx.mine(Some(&tx.digest()), 1, &[tx]).unwrap();
//! assert_eq!(block.hash.as_bytes()[0], 0);
//! ```
//!
//! ## Re-exports
//!
//! - `tinycoin::core` - Core primitives (keys, transactions, miner)

pub mod config;
pub mod context;
pub mod error;

// Re-export component crates
pub use tinycoin_core as core;

// Re-export main types for convenience
pub use config::Config;
pub use context::Context;
pub use error::{Error, Result};

// Re-export commonly used core types
pub use tinycoin_core::{
    create_transaction, generate_key_pair, hash, mine, sign, verify, verify_transaction, Chain,
    ChainError, CoreError, Digest, DigestEncoding, Keypair, MinedBlock, Miner, MinerConfig,
    PrivateKey, PublicKey, Signature, Transaction,
};
