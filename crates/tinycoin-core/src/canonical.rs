//! Canonical hashing of structured values.
//!
//! Values are lowered to a [`ciborium::value::Value`] tree and encoded with
//! RFC 8949 Core Deterministic Encoding before hashing with SHA-256:
//! - Integers use the smallest valid head
//! - Definite lengths only
//! - Map keys sorted by their encoded bytes
//! - Byte sequences (keys, digests, signatures) are CBOR byte strings
//! - Absent fields are CBOR `null`
//!
//! Floats and tags have no place in hashed data. Encountering one is a
//! programming error and panics.

use ciborium::value::Integer;
pub use ciborium::value::Value;

use crate::crypto::{Digest, PublicKey, Signature};

/// A type with a canonical structured representation.
pub trait Canonical {
    /// Lower `self` into the canonical data model.
    fn to_value(&self) -> Value;
}

impl Canonical for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Canonical for Digest {
    fn to_value(&self) -> Value {
        Value::Bytes(self.0.to_vec())
    }
}

impl Canonical for PublicKey {
    fn to_value(&self) -> Value {
        Value::Bytes(self.0.to_vec())
    }
}

impl Canonical for Signature {
    fn to_value(&self) -> Value {
        Value::Bytes(self.0.to_vec())
    }
}

impl Canonical for u64 {
    fn to_value(&self) -> Value {
        Value::Integer((*self).into())
    }
}

impl<T: Canonical> Canonical for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: Canonical + ?Sized> Canonical for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Canonical> Canonical for [T] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(Canonical::to_value).collect())
    }
}

impl<T: Canonical> Canonical for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<A: Canonical, B: Canonical> Canonical for (A, B) {
    fn to_value(&self) -> Value {
        Value::Array(vec![self.0.to_value(), self.1.to_value()])
    }
}

/// Hashes a canonical value to a digest.
///
/// Implemented by [`CanonicalHasher`] and by any `Fn(&Value) -> Digest`
/// closure, so callers can substitute the hash function (tests use this to
/// force mining timeouts).
pub trait ValueHasher: Sync {
    /// Digest a value.
    fn hash_value(&self, value: &Value) -> Digest;
}

/// SHA-256 over deterministic CBOR.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanonicalHasher;

impl ValueHasher for CanonicalHasher {
    fn hash_value(&self, value: &Value) -> Digest {
        hash_value(value)
    }
}

impl<F> ValueHasher for F
where
    F: Fn(&Value) -> Digest + Sync,
{
    fn hash_value(&self, value: &Value) -> Digest {
        self(value)
    }
}

/// Hash anything with a canonical representation.
pub fn hash<T: Canonical + ?Sized>(value: &T) -> Digest {
    hash_value(&value.to_value())
}

/// Hash a value tree.
pub fn hash_value(value: &Value) -> Digest {
    Digest::hash(&canonical_bytes(value))
}

/// Encode a value tree to deterministic CBOR.
pub fn canonical_bytes(value: &Value) -> Vec<u8> {
    let mut out = Vec::with_capacity(128);
    write_value(&mut out, value);
    out
}

const MAJOR_UNSIGNED: u8 = 0;
const MAJOR_NEGATIVE: u8 = 1;
const MAJOR_BYTES: u8 = 2;
const MAJOR_TEXT: u8 = 3;
const MAJOR_ARRAY: u8 = 4;
const MAJOR_MAP: u8 = 5;

const FALSE: u8 = 0xf4;
const TRUE: u8 = 0xf5;
const NULL: u8 = 0xf6;

fn write_value(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(i) => write_integer(out, *i),
        Value::Bytes(bytes) => {
            write_head(out, MAJOR_BYTES, bytes.len() as u64);
            out.extend_from_slice(bytes);
        }
        Value::Text(text) => {
            write_head(out, MAJOR_TEXT, text.len() as u64);
            out.extend_from_slice(text.as_bytes());
        }
        Value::Array(items) => {
            write_head(out, MAJOR_ARRAY, items.len() as u64);
            for item in items {
                write_value(out, item);
            }
        }
        Value::Map(entries) => write_map(out, entries),
        Value::Bool(b) => out.push(if *b { TRUE } else { FALSE }),
        Value::Null => out.push(NULL),
        Value::Float(_) => panic!("floats have no canonical encoding"),
        Value::Tag(..) => panic!("tags have no canonical encoding"),
        _ => panic!("unsupported CBOR value"),
    }
}

fn write_integer(out: &mut Vec<u8>, i: Integer) {
    let n = i128::from(i);
    if n >= 0 {
        write_head(out, MAJOR_UNSIGNED, n as u64);
    } else {
        // -1 encodes as 0, -2 as 1, ...
        write_head(out, MAJOR_NEGATIVE, (-1 - n) as u64);
    }
}

/// Write a major type and argument using the shortest head.
fn write_head(out: &mut Vec<u8>, major: u8, arg: u64) {
    let mt = major << 5;
    match arg {
        0..=23 => out.push(mt | arg as u8),
        24..=0xff => {
            out.push(mt | 24);
            out.push(arg as u8);
        }
        0x100..=0xffff => {
            out.push(mt | 25);
            out.extend_from_slice(&(arg as u16).to_be_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(mt | 26);
            out.extend_from_slice(&(arg as u32).to_be_bytes());
        }
        _ => {
            out.push(mt | 27);
            out.extend_from_slice(&arg.to_be_bytes());
        }
    }
}

fn write_map(out: &mut Vec<u8>, entries: &[(Value, Value)]) {
    let mut encoded: Vec<(Vec<u8>, &Value)> = entries
        .iter()
        .map(|(k, v)| (canonical_bytes(k), v))
        .collect();
    encoded.sort_by(|a, b| a.0.cmp(&b.0));

    write_head(out, MAJOR_MAP, encoded.len() as u64);
    for (key, value) in encoded {
        out.extend_from_slice(&key);
        write_value(out, value);
    }
}
