//! Ownership transfers through the public API.

use tinycoin::core::{canonical::hash, validate_chain};
use tinycoin::{
    create_transaction, generate_key_pair, sign, verify_transaction, ChainError, Config, Context,
    Digest, Keypair, Signature, Transaction,
};
use tinycoin_testkit::fixtures::TestFixture;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

// =============================================================================
// Genesis
// =============================================================================

#[test]
fn genesis_holds_a_valid_issuer_key() -> anyhow::Result<()> {
    init_tracing();
    let ctx = Context::new(Config::default())?;
    let genesis = ctx.genesis();

    assert_eq!(genesis.new_owner, ctx.issuer().public_key());
    assert!(genesis.new_owner.is_valid());
    assert!(genesis.previous_hash.is_none());
    assert!(genesis.signature.is_none());
    Ok(())
}

// =============================================================================
// create_transaction
// =============================================================================

#[test]
fn create_accepts_any_valid_key_pairs() -> anyhow::Result<()> {
    let ctx = Context::new(Config::default())?;

    // The signer need not own the genesis; verification catches that later
    let tx = ctx.create_transaction(
        &Keypair::generate().public_key(),
        ctx.genesis(),
        Keypair::generate().private_key(),
    )?;
    assert!(!ctx.verify_transaction(&tx, &ctx.issuer().public_key()));
    Ok(())
}

#[test]
fn free_functions_transfer_between_generated_key_pairs() -> anyhow::Result<()> {
    let issuer = generate_key_pair();
    let alice = generate_key_pair();
    assert!(issuer.public_key().is_valid());
    assert_ne!(issuer.public_key(), alice.public_key());

    let genesis = Transaction::genesis(issuer.public_key());
    let tx = create_transaction(&alice.public_key(), &genesis, issuer.private_key())?;

    assert!(verify_transaction(&tx, &issuer.public_key()));
    assert!(!verify_transaction(&tx, &alice.public_key()));
    Ok(())
}

#[test]
fn created_transaction_names_the_new_owner() -> anyhow::Result<()> {
    let ctx = Context::new(Config::default())?;
    let new_owner = Keypair::generate().public_key();

    let tx = ctx.create_transaction(&new_owner, ctx.genesis(), ctx.issuer().private_key())?;
    assert_eq!(tx.new_owner, new_owner);
    Ok(())
}

#[test]
fn created_transaction_links_to_its_predecessor() -> anyhow::Result<()> {
    let ctx = Context::new(Config::default())?;
    let new_owner = Keypair::generate().public_key();
    let previous = *ctx.genesis();

    let tx = ctx.create_transaction(&new_owner, &previous, ctx.issuer().private_key())?;
    assert_eq!(tx.previous_hash, Some(hash(&(previous, new_owner))));
    Ok(())
}

#[test]
fn created_transaction_carries_the_owner_signature() -> anyhow::Result<()> {
    let ctx = Context::new(Config::default())?;
    let new_owner = Keypair::generate().public_key();
    let previous_hash = hash(&(*ctx.genesis(), new_owner));

    let tx = ctx.create_transaction(&new_owner, ctx.genesis(), ctx.issuer().private_key())?;
    let expected = sign(&hash(&(previous_hash, new_owner)), ctx.issuer().private_key())?;
    assert_eq!(tx.signature, Some(expected));
    Ok(())
}

// =============================================================================
// verify_transaction
// =============================================================================

#[test]
fn random_transaction_is_rejected() -> anyhow::Result<()> {
    let ctx = Context::new(Config::default())?;
    let stranger = Keypair::generate();

    let forged = Transaction {
        new_owner: Keypair::generate().public_key(),
        previous_hash: Some(Digest::hash(b"random previous hash")),
        signature: Some(stranger.sign(&Digest::hash(b"random digest"))?),
    };
    assert!(!ctx.verify_transaction(&forged, &Keypair::generate().public_key()));
    assert!(!ctx.verify_transaction(&forged, &stranger.public_key()));

    let garbage = Transaction {
        signature: Some(Signature::from_bytes([0x42; 64])),
        ..forged
    };
    assert!(!ctx.verify_transaction(&garbage, &stranger.public_key()));
    Ok(())
}

#[test]
fn valid_transaction_is_accepted() -> anyhow::Result<()> {
    let ctx = Context::new(Config::default())?;
    let tx = ctx.create_transaction(
        &Keypair::generate().public_key(),
        ctx.genesis(),
        ctx.issuer().private_key(),
    )?;

    assert!(ctx.verify_transaction(&tx, &ctx.genesis().new_owner));
    Ok(())
}

// =============================================================================
// Chains
// =============================================================================

#[test]
fn issuer_to_alice_to_bob() -> anyhow::Result<()> {
    init_tracing();
    let fixture = TestFixture::new();
    let ctx = &fixture.ctx;

    let tx1 = ctx.create_transaction(
        &fixture.alice.public_key(),
        ctx.genesis(),
        ctx.issuer().private_key(),
    )?;
    assert!(ctx.verify_transaction(&tx1, &ctx.issuer().public_key()));

    let tx2 = ctx.create_transaction(&fixture.bob.public_key(), &tx1, fixture.alice.private_key())?;
    assert!(ctx.verify_transaction(&tx2, &fixture.alice.public_key()));

    // Mismatched owner keys
    assert!(!ctx.verify_transaction(&tx2, &ctx.issuer().public_key()));
    assert!(!ctx.verify_transaction(&tx1, &fixture.bob.public_key()));

    validate_chain(&[*ctx.genesis(), tx1, tx2])?;
    Ok(())
}

#[test]
fn chain_reports_the_first_bad_link() -> anyhow::Result<()> {
    let fixture = TestFixture::deterministic();
    let mut txs = fixture.chain().transactions().to_vec();

    // Re-sign the last hop with the issuer instead of Alice
    txs[2] = fixture.ctx.create_transaction(
        &fixture.bob.public_key(),
        &txs[1],
        fixture.ctx.issuer().private_key(),
    )?;

    assert_eq!(
        validate_chain(&txs).unwrap_err(),
        ChainError::SignatureFailed { index: 2 }
    );
    Ok(())
}

#[test]
fn chain_refuses_transfers_from_previous_owners() -> anyhow::Result<()> {
    let fixture = TestFixture::deterministic();
    let mut chain = fixture.chain();

    let err = chain
        .transfer(&fixture.alice, fixture.alice.public_key())
        .unwrap_err();
    assert_eq!(err, ChainError::NotOwner);

    let err = tinycoin::Error::from(err);
    assert!(matches!(err, tinycoin::Error::Chain(ChainError::NotOwner)));
    Ok(())
}
