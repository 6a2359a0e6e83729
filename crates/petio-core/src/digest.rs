//! # Keccak-256 Content Digests
//!
//! [`keccak_digest()`] is the single digest implementation in the
//! workspace. The hash function is Keccak-256 — the same function the
//! ledger applies to pointer records — so a digest recomputed locally over
//! gateway bytes can be compared bit-for-bit against the on-chain value.
//!
//! ## Integrity Invariant
//!
//! A pointer's `content_hash` is always computed over exactly the bytes
//! stored at its content id (the ciphertext, when the asset is encrypted).
//! Comparison uses constant-time equality.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use subtle::ConstantTimeEq;

use crate::error::ValidationError;

/// A 32-byte Keccak-256 content digest.
///
/// Serialized as a lowercase hex string (64 chars, no `0x` prefix) to match
/// the contract's string representation of `contentHash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Construct from raw digest bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from a 64-char hex string. A leading `0x` is accepted.
    pub fn from_hex(s: &str) -> Result<Self, ValidationError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if !s.is_ascii() {
            return Err(ValidationError::InvalidHex("non-ASCII input".into()));
        }
        if s.len() != 64 {
            return Err(ValidationError::InvalidHexLength {
                expected: 32,
                got: s.len() / 2,
            });
        }
        let mut out = [0u8; 32];
        for (i, byte) in out.iter_mut().enumerate() {
            let pair = &s[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| ValidationError::InvalidHex(format!("bad hex pair {pair:?}")))?;
        }
        Ok(Self(out))
    }

    /// Return the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        let mut s = String::with_capacity(64);
        for b in &self.0 {
            s.push_str(&format!("{b:02x}"));
        }
        s
    }

    /// Access the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Constant-time equality against another digest.
    pub fn ct_eq(&self, other: &ContentDigest) -> bool {
        bool::from(self.0.as_slice().ct_eq(other.0.as_slice()))
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentDigest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// Compute the Keccak-256 digest of a byte slice.
pub fn keccak_digest(bytes: &[u8]) -> ContentDigest {
    let mut hasher = Keccak256::new();
    hasher.update(bytes);
    let out = hasher.finalize();
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&out);
    ContentDigest::from_bytes(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Keccak-256 of the empty input — the standard known-answer vector.
    const EMPTY_KECCAK: &str = "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470";

    #[test]
    fn empty_input_known_vector() {
        assert_eq!(keccak_digest(b"").to_hex(), EMPTY_KECCAK);
    }

    #[test]
    fn digest_is_deterministic() {
        let a = keccak_digest(b"petition signature bytes");
        let b = keccak_digest(b"petition signature bytes");
        assert_eq!(a, b);
        assert!(a.ct_eq(&b));
    }

    #[test]
    fn different_input_different_digest() {
        assert_ne!(keccak_digest(b"a"), keccak_digest(b"b"));
    }

    #[test]
    fn hex_round_trip() {
        let d = keccak_digest(b"round trip");
        let parsed = ContentDigest::from_hex(&d.to_hex()).unwrap();
        assert_eq!(d, parsed);
    }

    #[test]
    fn from_hex_accepts_0x_prefix() {
        let d = keccak_digest(b"");
        let parsed = ContentDigest::from_hex(&format!("0x{}", d.to_hex())).unwrap();
        assert_eq!(d, parsed);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(ContentDigest::from_hex("abcd").is_err());
        assert!(ContentDigest::from_hex(&"a".repeat(66)).is_err());
    }

    #[test]
    fn from_hex_rejects_non_hex() {
        let bad = "g".repeat(64);
        assert!(ContentDigest::from_hex(&bad).is_err());
    }

    #[test]
    fn serde_round_trips_as_hex_string() {
        let d = keccak_digest(b"serde");
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, format!("\"{}\"", d.to_hex()));
        let back: ContentDigest = serde_json::from_str(&json).unwrap();
        assert_eq!(d, back);
    }
}
