//! # Sealed Upload Path
//!
//! The write-side counterpart of retrieval. [`seal()`] prepares a
//! signature image for upload: a fresh key and nonce (never reused across
//! versions), AES-256-GCM ciphertext, and the Keccak-256 digest of
//! exactly those ciphertext bytes — the value the pointer will carry.
//!
//! Uploading the ciphertext to the object store is the gateway
//! collaborator's job; once the caller has the resulting content id,
//! [`publish()`] records the pointer on-chain and only then stores the
//! key material locally, so a failed write leaves no orphan key entry.

use petio_client::{ContractError, PointerWriter};
use petio_core::{ContentDigest, ContentId, EncryptionScheme, OwnerAddress, VersionId};
use petio_crypto::{encrypt, generate_key, generate_nonce, hash, CryptoError, KeyMaterial, KeyStore};

/// Output of [`seal()`]: everything the upload and pointer write need.
pub struct SealedAsset {
    /// Ciphertext ‖ tag — the bytes to upload and hash.
    pub ciphertext: Vec<u8>,
    /// Keccak-256 digest of the ciphertext.
    pub digest: ContentDigest,
    /// Key material for the eventual version's keystore entry.
    pub material: KeyMaterial,
}

/// Errors from the publish flow.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The pointer write failed; no key material was stored.
    #[error("pointer write failed: {0}")]
    Contract(#[from] ContractError),

    /// The pointer was written but the local key store rejected the
    /// material. The version exists on-chain; the caller should retry
    /// the keystore write with the returned material before dropping it.
    #[error("pointer recorded but key material could not be stored: {0}")]
    KeyStore(#[from] CryptoError),
}

/// Encrypt a signature image under fresh key material.
///
/// Pure aside from CSPRNG draws — no I/O, no state. Each call generates
/// a new key/nonce pair; sealing the same plaintext twice produces
/// unrelated ciphertexts.
pub fn seal(plaintext: &[u8]) -> Result<SealedAsset, CryptoError> {
    let key = generate_key();
    let nonce = generate_nonce();
    let ciphertext = encrypt(&key, &nonce, plaintext)?;
    let digest = hash(&ciphertext);
    Ok(SealedAsset {
        ciphertext,
        digest,
        material: KeyMaterial { key, nonce },
    })
}

/// Record the pointer for an uploaded sealed asset, then store its key
/// material under the new version id.
pub async fn publish(
    owner: &OwnerAddress,
    sealed: &SealedAsset,
    content_id: ContentId,
    writer: &dyn PointerWriter,
    keystore: &dyn KeyStore,
    activate: bool,
) -> Result<VersionId, PublishError> {
    let version = writer
        .save_pointer(
            owner,
            content_id,
            sealed.digest.clone(),
            EncryptionScheme::Aes256Gcm,
            sealed.material.nonce.as_bytes().to_vec(),
            activate,
        )
        .await?;
    keystore.put(owner, version, sealed.material.clone())?;
    tracing::debug!(%owner, %version, "pointer recorded and key material stored");
    Ok(version)
}
