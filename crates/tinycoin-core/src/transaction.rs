//! Transactions: signed transfers of ownership.
//!
//! A transaction names a new owner and commits to its predecessor by hash.
//! The previous owner signs `hash([previous_hash, new_owner])`, so anyone
//! holding the previous owner's public key can check the transfer.

use ciborium::value::Value;
use tracing::{debug, trace};

use crate::canonical::{hash, Canonical};
use crate::crypto::{verify, Digest, PrivateKey, PublicKey, Signature};
use crate::error::CoreError;

/// An ownership transfer record.
///
/// The genesis transaction has neither a previous hash nor a signature.
/// Every other transaction carries both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transaction {
    /// The public key receiving ownership.
    pub new_owner: PublicKey,

    /// `hash([previous_transaction, new_owner])`, absent for genesis.
    pub previous_hash: Option<Digest>,

    /// Previous owner's signature over `hash([previous_hash, new_owner])`.
    pub signature: Option<Signature>,
}

impl Transaction {
    /// The root of an ownership chain, held by the issuer.
    pub fn genesis(issuer: PublicKey) -> Self {
        Self {
            new_owner: issuer,
            previous_hash: None,
            signature: None,
        }
    }

    /// Check if this is a genesis transaction.
    pub fn is_genesis(&self) -> bool {
        self.previous_hash.is_none() && self.signature.is_none()
    }

    /// Canonical hash of the whole transaction.
    pub fn digest(&self) -> Digest {
        hash(self)
    }

    /// The digest a previous owner signs.
    pub fn signing_digest(&self) -> Digest {
        signing_digest(self.previous_hash.as_ref(), &self.new_owner)
    }
}

impl Canonical for Transaction {
    fn to_value(&self) -> Value {
        Value::Array(vec![
            self.new_owner.to_value(),
            self.previous_hash.to_value(),
            self.signature.to_value(),
        ])
    }
}

fn signing_digest(previous_hash: Option<&Digest>, new_owner: &PublicKey) -> Digest {
    hash(&(previous_hash, new_owner))
}

/// Transfer ownership of `previous` to `new_owner`.
///
/// Does not check that `owner_key` actually owns `previous`; a transfer
/// signed by the wrong key simply fails verification later.
pub fn create_transaction(
    new_owner: &PublicKey,
    previous: &Transaction,
    owner_key: &PrivateKey,
) -> Result<Transaction, CoreError> {
    if !new_owner.is_valid() {
        return Err(CoreError::InvalidPublicKey);
    }

    let previous_hash = hash(&(previous, new_owner));
    let signature = owner_key.sign(&signing_digest(Some(&previous_hash), new_owner))?;

    debug!(
        new_owner = %new_owner,
        previous_hash = %previous_hash,
        "created transaction"
    );

    Ok(Transaction {
        new_owner: *new_owner,
        previous_hash: Some(previous_hash),
        signature: Some(signature),
    })
}

/// Check that `previous_owner` signed this transfer.
///
/// Genesis transactions and tampered or mis-signed ones return `false`.
pub fn verify_transaction(transaction: &Transaction, previous_owner: &PublicKey) -> bool {
    let Some(signature) = transaction.signature.as_ref() else {
        trace!("transaction has no signature");
        return false;
    };

    let valid = verify(signature, &transaction.signing_digest(), previous_owner);
    if !valid {
        trace!(previous_owner = %previous_owner, "transaction signature rejected");
    }
    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;

    const GENESIS_DIGEST: &str = "c4793505d4c51e62f53e166b587c44f3b71284ec77bb8c0984d8d99864c9cb4f";
    const FIRST_PREVIOUS_HASH: &str =
        "bb6e51debd4a40e222a20cacd34773705aaeeb95b51358e0e4a90b00039c44bc";

    fn issuer() -> Keypair {
        Keypair::from_private_bytes(&[0x11; 32]).unwrap()
    }

    fn alice() -> Keypair {
        Keypair::from_private_bytes(&[0x22; 32]).unwrap()
    }

    fn bob() -> Keypair {
        Keypair::from_private_bytes(&[0x33; 32]).unwrap()
    }

    #[test]
    fn test_genesis() {
        let genesis = Transaction::genesis(issuer().public_key());

        assert!(genesis.is_genesis());
        assert!(genesis.previous_hash.is_none());
        assert!(genesis.signature.is_none());
        assert!(genesis.new_owner.is_valid());
        assert_eq!(genesis.digest().to_hex(), GENESIS_DIGEST);
    }

    #[test]
    fn test_genesis_never_verifies() {
        let issuer = issuer();
        let genesis = Transaction::genesis(issuer.public_key());
        assert!(!verify_transaction(&genesis, &issuer.public_key()));
    }

    #[test]
    fn test_transfer_chain() {
        let issuer = issuer();
        let alice = alice();
        let bob = bob();

        let genesis = Transaction::genesis(issuer.public_key());
        let tx1 =
            create_transaction(&alice.public_key(), &genesis, issuer.private_key()).unwrap();
        let tx2 = create_transaction(&bob.public_key(), &tx1, alice.private_key()).unwrap();

        assert!(!tx1.is_genesis());
        assert_eq!(tx1.previous_hash.unwrap().to_hex(), FIRST_PREVIOUS_HASH);
        assert!(verify_transaction(&tx1, &issuer.public_key()));
        assert!(verify_transaction(&tx2, &alice.public_key()));

        // Wrong previous owner
        assert!(!verify_transaction(&tx2, &issuer.public_key()));
        assert!(!verify_transaction(&tx1, &alice.public_key()));
    }

    #[test]
    fn test_signature_covers_signing_digest() {
        let issuer = issuer();
        let alice = alice();
        let genesis = Transaction::genesis(issuer.public_key());
        let tx = create_transaction(&alice.public_key(), &genesis, issuer.private_key()).unwrap();

        let expected = issuer.sign(&tx.signing_digest()).unwrap();
        assert_eq!(tx.signature, Some(expected));
    }

    #[test]
    fn test_creation_is_deterministic() {
        let issuer = issuer();
        let genesis = Transaction::genesis(issuer.public_key());
        let a = create_transaction(&alice().public_key(), &genesis, issuer.private_key()).unwrap();
        let b = create_transaction(&alice().public_key(), &genesis, issuer.private_key()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_new_owner_rejected() {
        let issuer = issuer();
        let genesis = Transaction::genesis(issuer.public_key());
        let bogus = PublicKey::from_bytes([0x07; 33]);

        let err = create_transaction(&bogus, &genesis, issuer.private_key()).unwrap_err();
        assert_eq!(err, CoreError::InvalidPublicKey);
    }

    #[test]
    fn test_tampered_fields_rejected() {
        let issuer = issuer();
        let genesis = Transaction::genesis(issuer.public_key());
        let tx = create_transaction(&alice().public_key(), &genesis, issuer.private_key()).unwrap();

        let mut redirected = tx;
        redirected.new_owner = bob().public_key();
        assert!(!verify_transaction(&redirected, &issuer.public_key()));

        let mut relinked = tx;
        relinked.previous_hash = Some(Digest::hash(b"elsewhere"));
        assert!(!verify_transaction(&relinked, &issuer.public_key()));
    }

    #[test]
    fn test_random_signature_rejected() {
        let issuer = Keypair::generate();
        let forged = Transaction {
            new_owner: Keypair::generate().public_key(),
            previous_hash: Some(Digest::hash(b"random previous")),
            signature: Some(Signature::from_bytes([0x5a; 64])),
        };
        assert!(!verify_transaction(&forged, &issuer.public_key()));
    }

    #[test]
    fn test_previous_transaction_untouched() {
        let issuer = issuer();
        let genesis = Transaction::genesis(issuer.public_key());
        let before = genesis;
        let _ = create_transaction(&alice().public_key(), &genesis, issuer.private_key()).unwrap();
        assert_eq!(genesis, before);
    }
}
