//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a context with a known issuer and
//! the two recipients every transfer scenario needs.

use rand::thread_rng;
use tinycoin::{Chain, Config, Context, Keypair, PublicKey, Transaction};

/// Private scalar of the fixture issuer.
pub const ISSUER_SECRET: [u8; 32] = [0x11; 32];
/// Private scalar of Alice.
pub const ALICE_SECRET: [u8; 32] = [0x22; 32];
/// Private scalar of Bob.
pub const BOB_SECRET: [u8; 32] = [0x33; 32];

/// Build a keypair from a scalar known to be valid.
///
/// # Panics
///
/// If `secret` is zero or not below the curve order.
pub fn fixed_keypair(secret: [u8; 32]) -> Keypair {
    Keypair::from_private_bytes(&secret).expect("fixture scalar must be a valid secp256k1 key")
}

/// A context plus two recipients.
pub struct TestFixture {
    pub ctx: Context,
    pub alice: Keypair,
    pub bob: Keypair,
}

impl TestFixture {
    /// Create a fixture with random keys.
    pub fn new() -> Self {
        let mut rng = thread_rng();
        Self::from_keys(
            Keypair::generate_with(&mut rng),
            Keypair::generate_with(&mut rng),
            Keypair::generate_with(&mut rng),
            Config::default(),
        )
    }

    /// Create a fixture with the fixed issuer, Alice and Bob keys.
    pub fn deterministic() -> Self {
        Self::with_config(Config::default())
    }

    /// Fixed keys with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        Self::from_keys(
            fixed_keypair(ISSUER_SECRET),
            fixed_keypair(ALICE_SECRET),
            fixed_keypair(BOB_SECRET),
            config,
        )
    }

    fn from_keys(issuer: Keypair, alice: Keypair, bob: Keypair, config: Config) -> Self {
        Self {
            ctx: Context::with_issuer(issuer, config).expect("fixture config must be valid"),
            alice,
            bob,
        }
    }

    /// The issuer's public key.
    pub fn issuer_public_key(&self) -> PublicKey {
        self.ctx.issuer().public_key()
    }

    /// Issuer hands the genesis coin to Alice.
    pub fn issuer_to_alice(&self) -> Transaction {
        self.ctx
            .create_transaction(
                &self.alice.public_key(),
                self.ctx.genesis(),
                self.ctx.issuer().private_key(),
            )
            .expect("alice's key is valid")
    }

    /// Alice passes `previous` on to Bob.
    pub fn alice_to_bob(&self, previous: &Transaction) -> Transaction {
        self.ctx
            .create_transaction(&self.bob.public_key(), previous, self.alice.private_key())
            .expect("bob's key is valid")
    }

    /// `[genesis, issuer -> alice, alice -> bob]`
    pub fn transfers(&self) -> Vec<Transaction> {
        let first = self.issuer_to_alice();
        let second = self.alice_to_bob(&first);
        vec![*self.ctx.genesis(), first, second]
    }

    /// The same history as [`transfers`](Self::transfers), built through [`Chain`].
    pub fn chain(&self) -> Chain {
        let mut chain = self.ctx.new_chain().expect("genesis starts a chain");
        chain
            .transfer(self.ctx.issuer(), self.alice.public_key())
            .expect("issuer owns genesis");
        chain
            .transfer(&self.alice, self.bob.public_key())
            .expect("alice owns the head");
        chain
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic, distinct keypairs for multi-party tests.
pub fn multi_party_keypairs(count: usize) -> Vec<Keypair> {
    (0..count)
        .map(|i| {
            let mut secret = [0u8; 32];
            secret[24..].copy_from_slice(&(i as u64 + 1).to_be_bytes());
            fixed_keypair(secret)
        })
        .collect()
}
