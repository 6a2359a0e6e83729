//! # Cryptographic Error Types
//!
//! Structured errors for all cryptographic operations in `petio-crypto`.
//! Uses `thiserror` for ergonomic error definitions with diagnostic context.

use thiserror::Error;

/// Errors from cryptographic operations in the signature-asset core.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Content identifier is not valid unpadded base64url, or decodes to
    /// the wrong length. A caller bug — not retryable.
    #[error("identifier format error: {0}")]
    Format(String),

    /// AEAD tag verification failed — the ciphertext was tampered with or
    /// the key/nonce pair is wrong.
    #[error("AEAD authentication failed")]
    Authentication,

    /// Raw key material has the wrong length.
    #[error("invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    /// Raw nonce material has the wrong length.
    #[error("invalid nonce length: expected {expected} bytes, got {got}")]
    InvalidNonceLength { expected: usize, got: usize },

    /// I/O error (keystore filesystem operations).
    #[error("keystore I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Keystore (de)serialization error.
    #[error("keystore serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_display() {
        let err = CryptoError::Format("decoded to 31 bytes".into());
        assert!(format!("{err}").contains("31 bytes"));
    }

    #[test]
    fn authentication_display() {
        assert!(format!("{}", CryptoError::Authentication).contains("authentication"));
    }

    #[test]
    fn invalid_key_length_display() {
        let err = CryptoError::InvalidKeyLength {
            expected: 32,
            got: 16,
        };
        let msg = format!("{err}");
        assert!(msg.contains("32"));
        assert!(msg.contains("16"));
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = CryptoError::from(io_err);
        assert!(format!("{err}").contains("file missing"));
    }
}
