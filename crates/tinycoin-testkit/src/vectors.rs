//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the canonical encoding and digest of fixed values so any
//! change to the hashing pipeline shows up as a mismatch.

use serde::Serialize;
use tinycoin_core::canonical::{canonical_bytes, Canonical, Value};
use tinycoin_core::{hash_value, Digest, MinedBlock, Miner, MinerConfig, Transaction};

use crate::fixtures::{fixed_keypair, ALICE_SECRET, ISSUER_SECRET};

/// A golden hashing vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Builds the value under test.
    pub value: fn() -> Value,
    /// Expected canonical CBOR (hex).
    pub expected_encoding: &'static str,
    /// Expected SHA-256 digest (hex).
    pub expected_digest: &'static str,
}

/// A golden mining vector: no previous hash, no transactions.
#[derive(Debug, Clone, Copy)]
pub struct MiningVector {
    pub difficulty: usize,
    pub expected_nonce: u64,
    pub expected_hash: &'static str,
}

/// Outcome of checking one vector.
#[derive(Debug, Clone, Serialize)]
pub struct VectorReport {
    pub name: String,
    pub matches: bool,
    pub digest: String,
}

fn genesis() -> Transaction {
    Transaction::genesis(fixed_keypair(ISSUER_SECRET).public_key())
}

fn genesis_value() -> Value {
    genesis().to_value()
}

fn first_link_value() -> Value {
    (genesis(), fixed_keypair(ALICE_SECRET).public_key()).to_value()
}

fn empty_mining_input() -> Value {
    (None::<Digest>, 0u64).to_value()
}

fn empty_sequence() -> Value {
    Vec::<Transaction>::new().to_value()
}

/// Get all golden hashing vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "empty sequence",
            value: empty_sequence,
            expected_encoding: "80",
            expected_digest: "76be8b528d0075f7aae98d6fa57a6d3c83ae480a8469e668d7b0af968995ac71",
        },
        GoldenVector {
            name: "mining input, no previous hash, nonce 0",
            value: empty_mining_input,
            expected_encoding: "82f600",
            expected_digest: "87f95da20305e5dd0472583dd3d20556eabefcc64544daf80fe7f119ed171ce3",
        },
        GoldenVector {
            name: "genesis held by the fixture issuer",
            value: genesis_value,
            expected_encoding: concat!(
                "835821",
                "034f355bdcb7cc0af728ef3cceb9615d90684bb5b2ca5f859ab0f0b704075871aa",
                "f6f6"
            ),
            expected_digest: "c4793505d4c51e62f53e166b587c44f3b71284ec77bb8c0984d8d99864c9cb4f",
        },
        GoldenVector {
            name: "previous hash of the first transfer to alice",
            value: first_link_value,
            expected_encoding: concat!(
                "82",
                "835821",
                "034f355bdcb7cc0af728ef3cceb9615d90684bb5b2ca5f859ab0f0b704075871aa",
                "f6f6",
                "5821",
                "02466d7fcae563e5cb09a0d1870bb580344804617879a14949cf22285f1bae3f27"
            ),
            expected_digest: "bb6e51debd4a40e222a20cacd34773705aaeeb95b51358e0e4a90b00039c44bc",
        },
    ]
}

/// Get all golden mining vectors.
pub fn mining_vectors() -> Vec<MiningVector> {
    vec![
        MiningVector {
            difficulty: 0,
            expected_nonce: 0,
            expected_hash: "87f95da20305e5dd0472583dd3d20556eabefcc64544daf80fe7f119ed171ce3",
        },
        MiningVector {
            difficulty: 1,
            expected_nonce: 582,
            expected_hash: "0025ef7c9dfd113954b5ccbcd07e09d29e4edf1f334f4b6ea386441798898e95",
        },
        MiningVector {
            difficulty: 2,
            expected_nonce: 24094,
            expected_hash: "0000201276e97d609e64c78fc868bf3032ec278b92b0671b5079224cf6a0a855",
        },
    ]
}

/// Check every hashing vector and report what was computed.
pub fn verify_all_vectors() -> Vec<VectorReport> {
    all_vectors()
        .iter()
        .map(|v| {
            let value = (v.value)();
            let encoding = hex::encode(canonical_bytes(&value));
            let digest = hash_value(&value).to_hex();

            VectorReport {
                name: v.name.to_string(),
                matches: encoding == v.expected_encoding && digest == v.expected_digest,
                digest,
            }
        })
        .collect()
}

/// Render the vector reports as pretty JSON.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&verify_all_vectors())
}

/// Mine a vector with the default miner configuration.
pub fn mine_vector(vector: &MiningVector) -> tinycoin::Result<MinedBlock> {
    Ok(Miner::new(MinerConfig::default()).mine(None, vector.difficulty, &[])?)
}
