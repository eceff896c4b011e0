//! Cryptographic primitives: secp256k1 ECDSA and SHA-256 hashing.
//!
//! Keys live on secp256k1. Public keys are carried as 33-byte compressed
//! SEC1 points and signatures as 64-byte compact `r || s` pairs. Signing is
//! RFC 6979 deterministic and low-S normalized, so the same key and digest
//! always produce the same signature.

use data_encoding::BASE64;
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature as EcdsaSignature, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::fmt;

use crate::error::CoreError;

/// Length of a digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Length of a compressed secp256k1 public key in bytes.
pub const PUBLIC_KEY_LEN: usize = 33;

/// Length of a secp256k1 private key in bytes.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Length of a compact ECDSA signature in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// Text encoding used when rendering a digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestEncoding {
    /// Lowercase hexadecimal.
    #[default]
    Hex,
    /// RFC 4648 base64 with padding.
    Base64,
}

/// A 32-byte SHA-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl Digest {
    /// Compute the SHA-256 digest of raw bytes.
    pub fn hash(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut arr = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(Self(arr))
    }

    /// Render the digest with the given text encoding.
    pub fn encode(&self, encoding: DigestEncoding) -> String {
        match encoding {
            DigestEncoding::Hex => self.to_hex(),
            DigestEncoding::Base64 => BASE64.encode(&self.0),
        }
    }

    /// Number of leading zero bytes.
    pub fn leading_zero_bytes(&self) -> usize {
        self.0.iter().take_while(|b| **b == 0).count()
    }

    /// Check whether the first `difficulty` bytes are all zero.
    ///
    /// A difficulty larger than the digest can never be met.
    pub fn meets_difficulty(&self, difficulty: usize) -> bool {
        difficulty <= DIGEST_LEN && self.0[..difficulty].iter().all(|b| *b == 0)
    }

    /// The zero digest.
    pub const ZERO: Self = Self([0u8; DIGEST_LEN]);
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

/// A 33-byte compressed secp256k1 public key.
///
/// This is a plain value: it may hold bytes that are not a point on the
/// curve. Use [`PublicKey::is_valid`] where validity matters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let mut arr = [0u8; PUBLIC_KEY_LEN];
        hex::decode_to_slice(s, &mut arr).map_err(|_| CoreError::InvalidPublicKey)?;
        Ok(Self(arr))
    }

    /// Check that the bytes encode a point on the curve.
    pub fn is_valid(&self) -> bool {
        self.verifying_key().is_ok()
    }

    fn verifying_key(&self) -> Result<VerifyingKey, CoreError> {
        VerifyingKey::from_sec1_bytes(&self.0).map_err(|_| CoreError::InvalidPublicKey)
    }

    /// Verify a signature over a digest.
    pub fn verify(&self, digest: &Digest, signature: &Signature) -> Result<(), CoreError> {
        let verifying_key = self.verifying_key()?;
        let sig =
            EcdsaSignature::from_slice(&signature.0).map_err(|_| CoreError::InvalidSignature)?;

        verifying_key
            .verify_prehash(digest.as_bytes(), &sig)
            .map_err(|_| CoreError::InvalidSignature)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBLIC_KEY_LEN]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }
}

/// A 64-byte compact ECDSA signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; SIGNATURE_LEN]);

impl Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; SIGNATURE_LEN]> for Signature {
    fn from(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }
}

/// A validated secp256k1 private key.
///
/// Construction guarantees the scalar lies in `[1, n - 1]`. The secret is
/// zeroized on drop by `k256`.
#[derive(Clone)]
pub struct PrivateKey {
    key: SigningKey,
}

impl PrivateKey {
    /// Create from raw bytes, rejecting scalars outside the curve order.
    pub fn from_bytes(bytes: &[u8; PRIVATE_KEY_LEN]) -> Result<Self, CoreError> {
        SigningKey::from_slice(bytes)
            .map(|key| Self { key })
            .map_err(|_| CoreError::InvalidPrivateKey)
    }

    /// Get the raw scalar bytes (secret key material).
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LEN] {
        self.key.to_bytes().into()
    }

    /// Derive the compressed public key.
    pub fn public_key(&self) -> PublicKey {
        let point = self.key.verifying_key().to_encoded_point(true);
        let mut arr = [0u8; PUBLIC_KEY_LEN];
        arr.copy_from_slice(point.as_bytes());
        PublicKey(arr)
    }

    /// Sign a digest.
    pub fn sign(&self, digest: &Digest) -> Result<Signature, CoreError> {
        let sig: EcdsaSignature = self
            .key
            .sign_prehash(digest.as_bytes())
            .map_err(|_| CoreError::SigningFailed)?;

        let mut arr = [0u8; SIGNATURE_LEN];
        arr.copy_from_slice(&sig.to_bytes());
        Ok(Signature(arr))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({:?})", self.public_key())
    }
}

/// A secp256k1 key pair.
#[derive(Clone)]
pub struct Keypair {
    public_key: PublicKey,
    private_key: PrivateKey,
}

impl Keypair {
    /// Generate a new random keypair from the operating system's entropy source.
    pub fn generate() -> Self {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a keypair from the given random source.
    ///
    /// Draws 32 bytes at a time until they form a valid scalar.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; PRIVATE_KEY_LEN];
        loop {
            rng.fill_bytes(&mut bytes);
            if let Ok(private_key) = PrivateKey::from_bytes(&bytes) {
                return Self::from_private_key(private_key);
            }
        }
    }

    /// Create from raw private key bytes.
    pub fn from_private_bytes(bytes: &[u8; PRIVATE_KEY_LEN]) -> Result<Self, CoreError> {
        PrivateKey::from_bytes(bytes).map(Self::from_private_key)
    }

    /// Create from an existing private key.
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        Self {
            public_key: private_key.public_key(),
            private_key,
        }
    }

    /// Get the public key.
    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// Get the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Sign a digest.
    pub fn sign(&self, digest: &Digest) -> Result<Signature, CoreError> {
        self.private_key.sign(digest)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.public_key)
    }
}

/// Generate a new random keypair.
pub fn generate_key_pair() -> Keypair {
    Keypair::generate()
}

/// Sign a digest with a private key.
pub fn sign(digest: &Digest, private_key: &PrivateKey) -> Result<Signature, CoreError> {
    private_key.sign(digest)
}

/// Check a signature over a digest.
///
/// Returns `false` for a malformed signature, an invalid public key, a wrong
/// key or an altered digest.
pub fn verify(signature: &Signature, digest: &Digest, public_key: &PublicKey) -> bool {
    public_key.verify(digest, signature).is_ok()
}
