//! Proptest generators for property-based testing.

use proptest::prelude::*;

use tinycoin_core::{Chain, Digest, Keypair, PublicKey, Signature, Transaction};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_filter_map("scalar outside the curve order", |secret| {
        Keypair::from_private_bytes(&secret).ok()
    })
}

/// Generate a random Digest.
pub fn digest() -> impl Strategy<Value = Digest> {
    any::<[u8; 32]>().prop_map(Digest::from_bytes)
}

/// Generate a valid PublicKey.
pub fn public_key() -> impl Strategy<Value = PublicKey> {
    keypair().prop_map(|kp| kp.public_key())
}

/// Generate arbitrary signature bytes (almost never a valid signature).
pub fn signature() -> impl Strategy<Value = Signature> {
    (any::<[u8; 32]>(), any::<[u8; 32]>()).prop_map(|(r, s)| {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&r);
        bytes[32..].copy_from_slice(&s);
        Signature::from_bytes(bytes)
    })
}

/// Generate a transaction whose fields are unrelated random values.
pub fn forged_transaction() -> impl Strategy<Value = Transaction> {
    (public_key(), digest(), signature()).prop_map(|(new_owner, previous_hash, signature)| {
        Transaction {
            new_owner,
            previous_hash: Some(previous_hash),
            signature: Some(signature),
        }
    })
}

/// Parameters for generating an ownership chain.
#[derive(Debug, Clone)]
pub struct ChainParams {
    pub issuer: Keypair,
    /// Successive owners after the issuer.
    pub owners: Vec<Keypair>,
}

impl Arbitrary for ChainParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (keypair(), prop::collection::vec(keypair(), 1..=6))
            .prop_map(|(issuer, owners)| ChainParams { issuer, owners })
            .boxed()
    }
}

/// Build the chain described by `params`.
///
/// # Panics
///
/// Never for parameters produced by the strategy: every owner signs the
/// transfer of the head they hold.
pub fn chain_from_params(params: &ChainParams) -> Chain {
    let mut chain = Chain::new(Transaction::genesis(params.issuer.public_key()))
        .expect("genesis starts a chain");

    let mut owner = &params.issuer;
    for next in &params.owners {
        chain
            .transfer(owner, next.public_key())
            .expect("current owner signs the transfer");
        owner = next;
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinycoin_core::{hash, validate_chain, verify_transaction};

    proptest! {
        #[test]
        fn test_generated_chains_validate(params: ChainParams) {
            let chain = chain_from_params(&params);

            prop_assert_eq!(chain.len(), params.owners.len() + 1);
            prop_assert!(chain.validate().is_ok());
        }

        #[test]
        fn test_chain_is_deterministic(params: ChainParams) {
            let c1 = chain_from_params(&params);
            let c2 = chain_from_params(&params);

            prop_assert_eq!(c1.transactions(), c2.transactions());
            prop_assert_eq!(hash(c1.transactions()), hash(c2.transactions()));
        }

        #[test]
        fn test_forged_transaction_rejected(tx in forged_transaction(), owner in public_key()) {
            prop_assert!(!verify_transaction(&tx, &owner));
        }

        #[test]
        fn test_any_link_tamper_detected(params in any::<ChainParams>(), index in any::<prop::sample::Index>(), junk in digest()) {
            let mut txs = chain_from_params(&params).transactions().to_vec();
            let target = 1 + index.index(txs.len() - 1);
            prop_assume!(txs[target].previous_hash != Some(junk));
            txs[target].previous_hash = Some(junk);

            prop_assert!(validate_chain(&txs).is_err());
        }
    }
}
