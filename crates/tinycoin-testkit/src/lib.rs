//! # Tinycoin Testkit
//!
//! Testing utilities for Tinycoin.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fixed inputs with their expected canonical encoding and digest
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A context with a known issuer plus Alice and Bob
//!
//! ## Golden Vectors
//!
//! ```rust
//! use tinycoin_testkit::vectors::verify_all_vectors;
//!
//! for report in verify_all_vectors() {
//!     assert!(report.matches, "{}: {}", report.name, report.digest);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use tinycoin_testkit::generators::{chain_from_params, ChainParams};
//!
//! proptest! {
//!     #[test]
//!     fn chains_validate(params: ChainParams) {
//!         prop_assert!(chain_from_params(&params).validate().is_ok());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use tinycoin_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::deterministic();
//! let tx = fixture.issuer_to_alice();
//! assert!(fixture.ctx.verify_transaction(&tx, &fixture.issuer_public_key()));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{fixed_keypair, multi_party_keypairs, TestFixture};
pub use generators::{chain_from_params, ChainParams};
pub use vectors::{all_vectors, mining_vectors, verify_all_vectors, GoldenVector, MiningVector};
