//! # AES-256-GCM Asset Encryption
//!
//! Symmetric encryption for signature assets before upload. The cipher
//! output is `ciphertext ‖ tag`; the 96-bit nonce travels on the pointer
//! record, the 256-bit key stays in the local key store.
//!
//! ## Per-Upload Key Material
//!
//! [`generate_key()`] and [`generate_nonce()`] are called once per upload.
//! Key/nonce pairs are never reused across versions — nonce reuse is the
//! fatal AES-GCM failure mode, and freshness per upload makes it
//! structurally impossible. Do not cache nonces.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// A 256-bit symmetric key scoped to one signature version.
///
/// Zeroized on drop. `Debug` never prints key bytes.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct VersionKey([u8; KEY_LEN]);

impl VersionKey {
    /// Construct from raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Construct from a slice, validating length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: KEY_LEN,
                    got: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for VersionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VersionKey(..)")
    }
}

/// A 96-bit AES-GCM nonce, recorded on the pointer beside the ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetNonce([u8; NONCE_LEN]);

impl AssetNonce {
    /// Construct from raw nonce bytes.
    pub fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    /// Construct from a slice, validating length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; NONCE_LEN] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidNonceLength {
                    expected: NONCE_LEN,
                    got: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    /// Access the raw nonce bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }
}

/// Generate a fresh random 256-bit key.
pub fn generate_key() -> VersionKey {
    let mut key = [0u8; KEY_LEN];
    getrandom::getrandom(&mut key).expect("getrandom failed");
    VersionKey(key)
}

/// Generate a fresh random 96-bit nonce.
pub fn generate_nonce() -> AssetNonce {
    let mut nonce = [0u8; NONCE_LEN];
    getrandom::getrandom(&mut nonce).expect("getrandom failed");
    AssetNonce(nonce)
}

/// Encrypt plaintext under the given key and nonce.
///
/// Returns `ciphertext ‖ tag` — the byte stream that gets uploaded and
/// hashed for the pointer record.
pub fn encrypt(
    key: &VersionKey,
    nonce: &AssetNonce,
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| {
        CryptoError::InvalidKeyLength {
            expected: KEY_LEN,
            got: key.as_bytes().len(),
        }
    })?;
    cipher
        .encrypt(Nonce::from_slice(nonce.as_bytes()), plaintext)
        .map_err(|_| CryptoError::Authentication)
}

/// Decrypt `ciphertext ‖ tag` under the given key and nonce.
///
/// Fails with [`CryptoError::Authentication`] when the tag does not verify
/// — tampered bytes, or the wrong key/nonce pair.
pub fn decrypt(
    key: &VersionKey,
    nonce: &AssetNonce,
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| {
        CryptoError::InvalidKeyLength {
            expected: KEY_LEN,
            got: key.as_bytes().len(),
        }
    })?;
    cipher
        .decrypt(Nonce::from_slice(nonce.as_bytes()), ciphertext)
        .map_err(|_| CryptoError::Authentication)
}
