//! # Integrity Verification
//!
//! Recomputes the Keccak-256 digest of gateway bytes and compares it
//! against the pointer's on-chain digest.
//!
//! ## Advisory Status
//!
//! A mismatch is reported as [`VerifyStatus::Mismatch`] beside the bytes,
//! never as an error. Gateway propagation lag can produce transient false
//! mismatches, so the policy — applied uniformly at every call site — is
//! warn-and-continue: the caller always receives the bytes plus the
//! status, and a `tracing` warning records the digests.

use petio_core::{keccak_digest, ContentDigest};
use serde::{Deserialize, Serialize};

/// Result of comparing fetched bytes against the pointer's digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerifyStatus {
    /// Recomputed digest equals the on-chain digest.
    Match,
    /// Digests differ. Advisory — the bytes are still returned.
    Mismatch,
}

impl VerifyStatus {
    /// Whether the digests agreed.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Compute the Keccak-256 digest of the given bytes.
///
/// Delegates to [`petio_core::keccak_digest()`] — the single digest
/// implementation in the workspace.
pub fn hash(bytes: &[u8]) -> ContentDigest {
    keccak_digest(bytes)
}

/// Compare the digest of `bytes` against the expected on-chain digest.
pub fn verify(bytes: &[u8], expected: &ContentDigest) -> VerifyStatus {
    let computed = hash(bytes);
    if computed.ct_eq(expected) {
        VerifyStatus::Match
    } else {
        tracing::warn!(
            expected = %expected,
            computed = %computed,
            "content digest mismatch"
        );
        VerifyStatus::Mismatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_bytes_report_match() {
        let bytes = b"stored bytes";
        let expected = keccak_digest(bytes);
        assert_eq!(verify(bytes, &expected), VerifyStatus::Match);
        assert!(verify(bytes, &expected).is_match());
    }

    #[test]
    fn altered_bytes_report_mismatch_not_error() {
        let expected = keccak_digest(b"original");
        let status = verify(b"altered", &expected);
        assert_eq!(status, VerifyStatus::Mismatch);
        assert!(!status.is_match());
    }

    #[test]
    fn hash_agrees_with_core() {
        let bytes = b"agreement";
        assert_eq!(hash(bytes), keccak_digest(bytes));
    }
}
