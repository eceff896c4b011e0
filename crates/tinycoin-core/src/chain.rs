//! Ownership chains: a genesis transaction followed by signed transfers.

use tracing::{debug, warn};

use crate::canonical::hash;
use crate::crypto::{Keypair, PublicKey};
use crate::error::ChainError;
use crate::transaction::{create_transaction, verify_transaction, Transaction};

/// An ordered ownership history rooted at a genesis transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    transactions: Vec<Transaction>,
}

impl Chain {
    /// Start a chain from its genesis transaction.
    pub fn new(genesis: Transaction) -> Result<Self, ChainError> {
        if !genesis.is_genesis() {
            return Err(ChainError::GenesisExpected);
        }
        Ok(Self {
            transactions: vec![genesis],
        })
    }

    /// Load an existing history, validating every link.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Result<Self, ChainError> {
        validate_chain(&transactions)?;
        Ok(Self { transactions })
    }

    /// Transfer the head to `new_owner`, signed by the current owner.
    pub fn transfer(
        &mut self,
        owner: &Keypair,
        new_owner: PublicKey,
    ) -> Result<&Transaction, ChainError> {
        if owner.public_key() != self.current_owner() {
            return Err(ChainError::NotOwner);
        }

        let tx = create_transaction(&new_owner, self.head(), owner.private_key())?;
        debug!(
            index = self.transactions.len(),
            from = %owner.public_key(),
            to = %new_owner,
            "ownership transferred"
        );
        self.transactions.push(tx);
        Ok(self.head())
    }

    /// The most recent transaction.
    pub fn head(&self) -> &Transaction {
        // Never empty: constructors require a genesis.
        &self.transactions[self.transactions.len() - 1]
    }

    /// The genesis transaction.
    pub fn genesis(&self) -> &Transaction {
        &self.transactions[0]
    }

    /// The public key that currently owns the chain.
    pub fn current_owner(&self) -> PublicKey {
        self.head().new_owner
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Always false; a chain holds at least its genesis.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Re-check every link of the history.
    pub fn validate(&self) -> Result<(), ChainError> {
        validate_chain(&self.transactions)
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

/// Validate a full ownership history.
///
/// The first transaction must be a genesis. Each later transaction must
/// carry `hash([predecessor, new_owner])` and be signed by the predecessor's
/// new owner.
pub fn validate_chain(transactions: &[Transaction]) -> Result<(), ChainError> {
    let (genesis, rest) = transactions.split_first().ok_or(ChainError::EmptyChain)?;
    if !genesis.is_genesis() {
        warn!("chain does not start with a genesis transaction");
        return Err(ChainError::GenesisExpected);
    }

    let mut previous = genesis;
    for (offset, tx) in rest.iter().enumerate() {
        let index = offset + 1;

        let expected = hash(&(previous, &tx.new_owner));
        if tx.previous_hash != Some(expected) {
            warn!(index, "broken hash link");
            return Err(ChainError::BrokenLink { index });
        }

        if !verify_transaction(tx, &previous.new_owner) {
            warn!(index, "signature does not match previous owner");
            return Err(ChainError::SignatureFailed { index });
        }

        previous = tx;
    }

    Ok(())
}
