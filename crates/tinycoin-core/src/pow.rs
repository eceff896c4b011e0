//! Proof-of-work: a bounded search for a digest with leading zero bytes.
//!
//! A candidate is `hash([previous_hash, nonce, ...transactions])` with the
//! nonce counting up from zero. The first candidate whose leading
//! `difficulty` bytes are all zero wins.
//!
//! With more than one worker the nonce space is striped across scoped
//! threads (worker `w` tries `w, w + W, w + 2W, ...`). Workers publish hits
//! to a shared minimum and stop once their next nonce cannot beat it, so the
//! lowest satisfying nonce wins regardless of scheduling.

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use ciborium::value::Value;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::canonical::{Canonical, CanonicalHasher, ValueHasher};
use crate::crypto::{Digest, DIGEST_LEN};
use crate::error::CoreError;
use crate::transaction::Transaction;

/// Default bound on the number of nonces tried.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 100_000;

/// Largest satisfiable difficulty: every byte of the digest zero.
pub const MAX_DIFFICULTY: usize = DIGEST_LEN;

/// Position of the nonce inside the candidate array.
const NONCE_SLOT: usize = 1;

/// Mining configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerConfig {
    /// Nonces `0..max_attempts` are tried before giving up.
    pub max_attempts: u64,
    /// Requested search threads, capped by `max_attempts` and the available
    /// cores. `1` searches on the calling thread.
    pub workers: usize,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            workers: 1,
        }
    }
}

impl MinerConfig {
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

/// The outcome of a successful search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinedBlock {
    /// The winning digest.
    pub hash: Digest,
    /// The nonce that produced it.
    pub nonce: u64,
    /// Hashes computed across all workers.
    pub attempts: u64,
}

/// A proof-of-work miner over an injectable hash function.
#[derive(Debug, Clone)]
pub struct Miner<H = CanonicalHasher> {
    config: MinerConfig,
    hasher: H,
}

impl Miner<CanonicalHasher> {
    /// Create a miner using the canonical SHA-256 hasher.
    pub fn new(config: MinerConfig) -> Self {
        Self {
            config,
            hasher: CanonicalHasher,
        }
    }
}

impl<H: ValueHasher> Miner<H> {
    /// Create a miner with a custom hash function.
    pub fn with_hasher(config: MinerConfig, hasher: H) -> Self {
        Self { config, hasher }
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    /// Search for a nonce whose candidate digest has `difficulty` leading
    /// zero bytes.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidDifficulty`] if `difficulty` exceeds the digest
    ///   length
    /// - [`CoreError::MiningTimeout`] if no nonce below `max_attempts`
    ///   satisfies the target
    pub fn mine(
        &self,
        previous_hash: Option<&Digest>,
        difficulty: usize,
        transactions: &[Transaction],
    ) -> Result<MinedBlock, CoreError> {
        if difficulty > MAX_DIFFICULTY {
            return Err(CoreError::InvalidDifficulty {
                difficulty,
                max: MAX_DIFFICULTY,
            });
        }

        let template = candidate_template(previous_hash, transactions);
        let workers = self.thread_count();
        debug!(
            difficulty,
            workers,
            max_attempts = self.config.max_attempts,
            transactions = transactions.len(),
            "mining started"
        );

        let found = if workers == 1 {
            self.search_sequential(template, difficulty)
        } else {
            self.search_parallel(&template, difficulty, workers)
        };

        match found {
            Ok(block) => {
                info!(
                    difficulty,
                    nonce = block.nonce,
                    attempts = block.attempts,
                    hash = ?block.hash,
                    "block mined"
                );
                Ok(block)
            }
            Err(attempts) => {
                warn!(difficulty, attempts, "mining gave up");
                Err(CoreError::MiningTimeout {
                    difficulty,
                    attempts,
                })
            }
        }
    }

    /// Threads actually spawned: never more than the nonces to try or the
    /// cores available.
    fn thread_count(&self) -> usize {
        let nonces = usize::try_from(self.config.max_attempts).unwrap_or(usize::MAX);
        let cores = thread::available_parallelism().map_or(1, usize::from);
        self.config.workers.min(nonces).min(cores).max(1)
    }

    /// Returns the attempt count on failure.
    fn search_sequential(
        &self,
        mut candidate: Value,
        difficulty: usize,
    ) -> Result<MinedBlock, u64> {
        for nonce in 0..self.config.max_attempts {
            set_nonce(&mut candidate, nonce);
            let hash = self.hasher.hash_value(&candidate);
            if hash.meets_difficulty(difficulty) {
                return Ok(MinedBlock {
                    hash,
                    nonce,
                    attempts: nonce + 1,
                });
            }
        }
        Err(self.config.max_attempts)
    }

    fn search_parallel(
        &self,
        template: &Value,
        difficulty: usize,
        workers: usize,
    ) -> Result<MinedBlock, u64> {
        let max_attempts = self.config.max_attempts;
        let stride = workers as u64;
        let best = AtomicU64::new(u64::MAX);
        let attempts = AtomicU64::new(0);

        thread::scope(|scope| {
            for worker in 0..stride {
                let mut candidate = template.clone();
                let (best, attempts) = (&best, &attempts);

                scope.spawn(move || {
                    let mut nonce = worker;
                    let mut tried = 0u64;

                    while nonce < max_attempts && nonce < best.load(Ordering::Acquire) {
                        set_nonce(&mut candidate, nonce);
                        tried += 1;
                        if self.hasher.hash_value(&candidate).meets_difficulty(difficulty) {
                            best.fetch_min(nonce, Ordering::AcqRel);
                            break;
                        }
                        nonce = match nonce.checked_add(stride) {
                            Some(next) => next,
                            None => break,
                        };
                    }

                    attempts.fetch_add(tried, Ordering::Relaxed);
                });
            }
        });

        let attempts = attempts.into_inner();
        match best.into_inner() {
            u64::MAX => Err(attempts),
            nonce => {
                let mut candidate = template.clone();
                set_nonce(&mut candidate, nonce);
                Ok(MinedBlock {
                    hash: self.hasher.hash_value(&candidate),
                    nonce,
                    attempts,
                })
            }
        }
    }
}

/// Mine with the default configuration and canonical hasher.
pub fn mine(
    previous_hash: Option<&Digest>,
    difficulty: usize,
    transactions: &[Transaction],
) -> Result<Digest, CoreError> {
    Miner::new(MinerConfig::default())
        .mine(previous_hash, difficulty, transactions)
        .map(|block| block.hash)
}

/// `[previous_hash, 0, ...transactions]`
fn candidate_template(previous_hash: Option<&Digest>, transactions: &[Transaction]) -> Value {
    let mut items = Vec::with_capacity(transactions.len() + 2);
    items.push(previous_hash.to_value());
    items.push(0u64.to_value());
    items.extend(transactions.iter().map(Canonical::to_value));
    Value::Array(items)
}

fn set_nonce(candidate: &mut Value, nonce: u64) {
    if let Value::Array(items) = candidate {
        items[NONCE_SLOT] = nonce.to_value();
    }
}
