//! Short identifier derivation.
//!
//! A key is `base62(truncate(sha256(seed ++ epoch_nanos(timestamp)), length))`.
//! The function is pure: identical `(seed, timestamp)` pairs always yield the
//! same key, and a fresh timestamp acts as a salt, which is what makes a
//! retry after a store collision produce a different candidate.
//!
//! Leading zero bytes in the truncated digest shorten the encoded string, so
//! the output length varies between 1 and `ceil(length * 8 / log2(62))`
//! characters.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Symbol order used for base62 encoding.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// SHA-256 digest size; the upper bound for the truncation length.
pub const MAX_KEY_BYTES: usize = 32;

/// Derives short identifiers from a seed string and a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyGenerator {
    length: usize,
}

impl KeyGenerator {
    /// Creates a generator truncating digests to `length` bytes.
    ///
    /// `length` is clamped to `1..=MAX_KEY_BYTES`; callers validate the
    /// configured value beforehand (see [`crate::application::ServiceConfig`]).
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(1, MAX_KEY_BYTES),
        }
    }

    /// Digest truncation length in bytes.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Generates the key for `seed` salted with `timestamp`.
    ///
    /// Returns `None` when the timestamp cannot be expressed as i64
    /// nanoseconds since the Unix epoch (roughly outside 1677..2262).
    pub fn generate(&self, seed: &str, timestamp: DateTime<Utc>) -> Option<String> {
        let salt = timestamp.timestamp_nanos_opt()?;

        let mut hasher = Sha256::new();
        hasher.update(seed.as_bytes());
        hasher.update(salt.to_string().as_bytes());
        let digest = hasher.finalize();

        Some(encode_base62(&digest[..self.length]))
    }
}

/// Encodes big-endian unsigned bytes as a base62 string.
///
/// A zero value encodes as `"0"`.
pub fn encode_base62(bytes: &[u8]) -> String {
    let mut number: Vec<u8> = bytes.iter().copied().skip_while(|b| *b == 0).collect();
    if number.is_empty() {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(bytes.len() * 2);

    // Schoolbook long division of a base-256 number by 62.
    while !number.is_empty() {
        let mut remainder: u32 = 0;
        let mut quotient = Vec::with_capacity(number.len());

        for &byte in &number {
            let acc = (remainder << 8) | u32::from(byte);
            let q = acc / 62;
            remainder = acc % 62;
            if !quotient.is_empty() || q != 0 {
                quotient.push(q as u8);
            }
        }

        digits.push(BASE62_ALPHABET[remainder as usize]);
        number = quotient;
    }

    digits.iter().rev().map(|&d| char::from(d)).collect()
}
