//! # Validation Error Types
//!
//! Structured errors for constructor-time validation across `petio-core`.
//! Uses `thiserror` for ergonomic error definitions with diagnostic context.

use thiserror::Error;

/// Errors from validating domain primitives at construction time.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Ledger address is not `0x` + 40 hex characters.
    #[error("invalid owner address {got:?}: {reason}")]
    InvalidAddress {
        /// The rejected input.
        got: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Hex string does not decode to the expected byte length.
    #[error("invalid hex: expected {expected} bytes, got {got}")]
    InvalidHexLength { expected: usize, got: usize },

    /// Hex string contains a non-hex character.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Nonce length does not match the pointer's encryption scheme.
    #[error("invalid nonce length for {scheme}: expected {expected} bytes, got {got}")]
    InvalidNonceLength {
        scheme: String,
        expected: usize,
        got: usize,
    },

    /// Referenced version does not exist in the owner's history.
    #[error("unknown signature version {0}")]
    UnknownVersion(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_address_display() {
        let err = ValidationError::InvalidAddress {
            got: "0xzz".into(),
            reason: "non-hex character".into(),
        };
        assert!(format!("{err}").contains("0xzz"));
        assert!(format!("{err}").contains("non-hex character"));
    }

    #[test]
    fn invalid_nonce_length_display() {
        let err = ValidationError::InvalidNonceLength {
            scheme: "AES-256-GCM".into(),
            expected: 12,
            got: 0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("12"));
        assert!(msg.contains("AES-256-GCM"));
    }

    #[test]
    fn unknown_version_display() {
        let err = ValidationError::UnknownVersion(7);
        assert!(format!("{err}").contains('7'));
    }
}
