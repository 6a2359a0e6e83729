//! # On-Chain Pointer Records
//!
//! An [`AssetPointer`] is the contract's record of one version of an
//! owner's signature asset: where the bytes live in the content-addressed
//! object store ([`ContentId`]), the Keccak-256 digest of exactly those
//! bytes, and the encryption metadata needed to recover the plaintext.
//!
//! Pointers are immutable — a new signature upload supersedes the old
//! pointer with a new version rather than mutating it. [`VersionHistory`]
//! holds the ordered sequence per owner and maintains the at-most-one-active
//! invariant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::digest::ContentDigest;
use crate::error::ValidationError;
use crate::identity::VersionId;

/// Nonce length required by AES-256-GCM.
pub const GCM_NONCE_LEN: usize = 12;

/// A 32-byte content identifier — the binary form of the object store's
/// external id, as recorded on-chain.
///
/// The external base64url string form is derived by `petio-crypto`'s
/// identifier codec; this type carries only the fixed-size bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(#[serde(with = "serde_bytes_32")] [u8; 32]);

impl ContentId {
    /// Construct from raw identifier bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Access the raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Serialize a `[u8; 32]` as a JSON array without pulling in a byte-string
/// representation the contract tooling would not understand.
mod serde_bytes_32 {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        bytes.as_slice().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let v = Vec::<u8>::deserialize(d)?;
        v.try_into()
            .map_err(|v: Vec<u8>| serde::de::Error::custom(format!("expected 32 bytes, got {}", v.len())))
    }
}

/// Symmetric encryption scheme applied to the stored bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncryptionScheme {
    /// The stored bytes are plaintext and must carry a recognizable
    /// format signature.
    None,
    /// AES-256-GCM with a 96-bit nonce recorded on the pointer.
    Aes256Gcm,
}

impl EncryptionScheme {
    /// The nonce length this scheme requires on the pointer.
    pub fn nonce_len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Aes256Gcm => GCM_NONCE_LEN,
        }
    }
}

impl std::fmt::Display for EncryptionScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Aes256Gcm => write!(f, "AES-256-GCM"),
        }
    }
}

/// One version of an owner's signature asset, as recorded on-chain.
///
/// `content_hash` is always the Keccak-256 digest of exactly the bytes
/// stored at `content_id` — the ciphertext when `scheme` is
/// [`EncryptionScheme::Aes256Gcm`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPointer {
    /// Binary content identifier of the stored bytes.
    pub content_id: ContentId,
    /// Keccak-256 digest of the stored bytes.
    pub content_hash: ContentDigest,
    /// Encryption scheme applied before upload.
    pub scheme: EncryptionScheme,
    /// AEAD nonce; empty for plaintext pointers, 12 bytes for AES-256-GCM.
    pub nonce: Vec<u8>,
    /// Version index within the owner's history.
    pub version: VersionId,
    /// When the pointer was recorded.
    pub created_at: DateTime<Utc>,
    /// Whether this is the owner's active version.
    pub is_active: bool,
}

impl AssetPointer {
    /// Construct a pointer, validating the nonce length against the scheme.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        content_id: ContentId,
        content_hash: ContentDigest,
        scheme: EncryptionScheme,
        nonce: Vec<u8>,
        version: VersionId,
        created_at: DateTime<Utc>,
        is_active: bool,
    ) -> Result<Self, ValidationError> {
        if nonce.len() != scheme.nonce_len() {
            return Err(ValidationError::InvalidNonceLength {
                scheme: scheme.to_string(),
                expected: scheme.nonce_len(),
                got: nonce.len(),
            });
        }
        Ok(Self {
            content_id,
            content_hash,
            scheme,
            nonce,
            version,
            created_at,
            is_active,
        })
    }
}

/// Ordered sequence of an owner's signature versions.
///
/// Invariant: at most one entry has `is_active = true`. Pushing an active
/// pointer supersedes the previous active entry; pointers themselves are
/// never mutated otherwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionHistory {
    entries: Vec<AssetPointer>,
}

impl VersionHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a version. If the new pointer is active, the previously
    /// active entry (if any) is deactivated.
    pub fn push(&mut self, pointer: AssetPointer) {
        if pointer.is_active {
            for e in &mut self.entries {
                e.is_active = false;
            }
        }
        self.entries.push(pointer);
    }

    /// Mark the given version active, deactivating all others.
    pub fn activate(&mut self, version: VersionId) -> Result<(), ValidationError> {
        if !self.entries.iter().any(|e| e.version == version) {
            return Err(ValidationError::UnknownVersion(version.value()));
        }
        for e in &mut self.entries {
            e.is_active = e.version == version;
        }
        Ok(())
    }

    /// The active version, if any.
    pub fn active(&self) -> Option<&AssetPointer> {
        self.entries.iter().find(|e| e.is_active)
    }

    /// Look up a version by id.
    pub fn get(&self, version: VersionId) -> Option<&AssetPointer> {
        self.entries.iter().find(|e| e.version == version)
    }

    /// All versions in insertion order.
    pub fn entries(&self) -> &[AssetPointer] {
        &self.entries
    }

    /// Number of versions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
