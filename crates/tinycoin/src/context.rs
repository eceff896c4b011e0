//! The Context: unified API for Tinycoin.
//!
//! A context owns the issuer key pair and the genesis transaction it anchors,
//! along with the miner configuration. Nothing here is global; create one
//! context per issuer.

use tracing::{debug, info};

use tinycoin_core::{
    create_transaction, verify_transaction, Chain, Digest, Keypair, MinedBlock, Miner,
    PrivateKey, PublicKey, Transaction,
};

use crate::config::Config;
use crate::error::Result;

/// The main Context struct.
///
/// Provides a unified API for:
/// - Creating and verifying ownership transfers
/// - Starting ownership chains from the issuer's genesis
/// - Mining proof-of-work digests
pub struct Context {
    /// The issuer, owner of the genesis transaction.
    issuer: Keypair,
    /// The chain root held by the issuer.
    genesis: Transaction,
    /// Miner built from `config.miner`.
    miner: Miner,
    /// Configuration.
    config: Config,
}

impl Context {
    /// Create a context with a freshly generated issuer.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_issuer(Keypair::generate(), config)
    }

    /// Create a context around an existing issuer.
    pub fn with_issuer(issuer: Keypair, config: Config) -> Result<Self> {
        config.validate()?;

        let genesis = Transaction::genesis(issuer.public_key());
        info!(
            issuer = %issuer.public_key(),
            genesis = %genesis.digest().encode(config.digest_encoding),
            "context created"
        );

        Ok(Self {
            issuer,
            genesis,
            miner: Miner::new(config.miner),
            config,
        })
    }

    /// Get the issuer key pair.
    pub fn issuer(&self) -> &Keypair {
        &self.issuer
    }

    /// Get the genesis transaction.
    pub fn genesis(&self) -> &Transaction {
        &self.genesis
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Start a new ownership chain at the genesis transaction.
    pub fn new_chain(&self) -> Result<Chain> {
        Ok(Chain::new(self.genesis)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transactions
    // ─────────────────────────────────────────────────────────────────────────

    /// Transfer `previous` to `new_owner`, signed with `owner_key`.
    pub fn create_transaction(
        &self,
        new_owner: &PublicKey,
        previous: &Transaction,
        owner_key: &PrivateKey,
    ) -> Result<Transaction> {
        Ok(create_transaction(new_owner, previous, owner_key)?)
    }

    /// Check that `previous_owner` signed `transaction`.
    pub fn verify_transaction(
        &self,
        transaction: &Transaction,
        previous_owner: &PublicKey,
    ) -> bool {
        verify_transaction(transaction, previous_owner)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mining
    // ─────────────────────────────────────────────────────────────────────────

    /// Mine at an explicit difficulty.
    pub fn mine(
        &self,
        previous_hash: Option<&Digest>,
        difficulty: usize,
        transactions: &[Transaction],
    ) -> Result<MinedBlock> {
        let block = self.miner.mine(previous_hash, difficulty, transactions)?;
        debug!(
            nonce = block.nonce,
            hash = %self.encode_digest(&block.hash),
            "mined"
        );
        Ok(block)
    }

    /// Mine at the configured default difficulty.
    pub fn mine_default(
        &self,
        previous_hash: Option<&Digest>,
        transactions: &[Transaction],
    ) -> Result<MinedBlock> {
        self.mine(previous_hash, self.config.difficulty, transactions)
    }

    /// Render a digest with the configured encoding.
    pub fn encode_digest(&self, digest: &Digest) -> String {
        digest.encode(self.config.digest_encoding)
    }
}
