//! # Asset Retrieval
//!
//! Resolves an [`AssetPointer`] to the signature bytes it references:
//! fetch raw bytes from the gateway, verify their digest against the
//! pointer (advisory — see [`petio_crypto::verify`]), classify, and
//! decrypt when the pointer's scheme requires it.
//!
//! Integrity status is returned beside the bytes, never raised: gateway
//! propagation lag can produce transient false mismatches, and callers
//! decide what a mismatch means for them.

use std::sync::Arc;
use std::time::Duration;

use petio_client::{ContractError, Gateway, GatewayError, ProfileContract};
use petio_core::{AssetPointer, OwnerAddress, VersionId};
use petio_crypto::{
    decrypt, encode_content_id, verify, AssetNonce, CryptoError, KeyStore, VerifyStatus,
};

use crate::classify::{classify, Classification};

/// Successfully retrieved signature bytes plus their integrity status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedAsset {
    /// The final plaintext bytes.
    pub bytes: Vec<u8>,
    /// Advisory digest comparison result.
    pub integrity: VerifyStatus,
    /// Whether a decryption step ran.
    pub decrypted: bool,
}

/// Errors from a single retrieval. Integrity mismatch is deliberately
/// absent — it is data, not an error.
#[derive(Debug, thiserror::Error)]
pub enum RetrieveError {
    /// Gateway fetch failed. Fatal for this call; the pointer is
    /// unaffected and the caller may retry.
    #[error("failed to fetch asset: {0}")]
    Fetch(#[from] GatewayError),

    /// The pointer requires decryption but this device holds no key
    /// material for the version. User-actionable: only the device that
    /// uploaded the version can supply it.
    #[error("version {version} is encrypted and no key material is present on this device")]
    MissingKey {
        /// The version whose key material is absent.
        version: VersionId,
    },

    /// AEAD tag verification failed — tampered ciphertext or wrong key.
    #[error("decryption failed: ciphertext was tampered with or the key material is wrong")]
    Authentication,

    /// The pointer claims plaintext but the bytes carry no recognizable
    /// format signature.
    #[error("version {version} claims plaintext but carries no recognizable format signature")]
    UnrecognizedPlaintext {
        /// The offending version.
        version: VersionId,
    },

    /// Key store or key material failure other than authentication.
    #[error("key material error: {0}")]
    Crypto(CryptoError),

    /// Reading the owner's pointer from the contract failed.
    #[error("pointer read failed: {0}")]
    Contract(#[from] ContractError),

    /// The caller's deadline elapsed before retrieval completed.
    #[error("retrieval deadline of {0:?} elapsed")]
    Timeout(Duration),
}

/// Retrieval orchestrator over a gateway collaborator.
///
/// Stateless apart from the shared gateway handle; concurrent calls for
/// different pointers are independent.
#[derive(Clone)]
pub struct AssetRetriever {
    gateway: Arc<dyn Gateway>,
}

impl AssetRetriever {
    /// Create a retriever over the given gateway.
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Retrieve and (when required) decrypt the bytes behind `pointer`.
    ///
    /// `deadline` bounds the whole operation; `None` leaves only the
    /// gateway's per-request timeout. Every step up to and including
    /// decryption is pure, so cancellation writes no partial state.
    pub async fn retrieve(
        &self,
        pointer: &AssetPointer,
        owner: &OwnerAddress,
        keystore: &dyn KeyStore,
        deadline: Option<Duration>,
    ) -> Result<RetrievedAsset, RetrieveError> {
        match deadline {
            None => self.retrieve_inner(pointer, owner, keystore).await,
            Some(limit) => {
                tokio::time::timeout(limit, self.retrieve_inner(pointer, owner, keystore))
                    .await
                    .map_err(|_| RetrieveError::Timeout(limit))?
            }
        }
    }

    /// Retrieve the owner's active signature, resolving the pointer via
    /// the profile contract first. `Ok(None)` when no version is active.
    pub async fn retrieve_active(
        &self,
        owner: &OwnerAddress,
        profile: &dyn ProfileContract,
        keystore: &dyn KeyStore,
        deadline: Option<Duration>,
    ) -> Result<Option<RetrievedAsset>, RetrieveError> {
        let Some(pointer) = profile.get_active_pointer(owner).await? else {
            return Ok(None);
        };
        self.retrieve(&pointer, owner, keystore, deadline)
            .await
            .map(Some)
    }

    async fn retrieve_inner(
        &self,
        pointer: &AssetPointer,
        owner: &OwnerAddress,
        keystore: &dyn KeyStore,
    ) -> Result<RetrievedAsset, RetrieveError> {
        let external_id = encode_content_id(&pointer.content_id);
        let raw = self.gateway.fetch(&external_id).await?;

        // Advisory: the digest covers the stored bytes (ciphertext when
        // encrypted), so verification happens before any decryption.
        let integrity = verify(&raw, &pointer.content_hash);

        match classify(pointer.scheme, &raw) {
            Classification::Plaintext => {
                tracing::debug!(version = %pointer.version, "plaintext asset, no decryption");
                Ok(RetrievedAsset {
                    bytes: raw,
                    integrity,
                    decrypted: false,
                })
            }
            Classification::Unrecognized => Err(RetrieveError::UnrecognizedPlaintext {
                version: pointer.version,
            }),
            Classification::Encrypted => {
                let material = keystore
                    .get(owner, pointer.version)
                    .map_err(RetrieveError::Crypto)?
                    .ok_or(RetrieveError::MissingKey {
                        version: pointer.version,
                    })?;
                // The on-chain nonce is authoritative; the stored copy is
                // only a convenience for devices that never saw the chain.
                let nonce =
                    AssetNonce::from_slice(&pointer.nonce).map_err(RetrieveError::Crypto)?;
                let bytes = match decrypt(&material.key, &nonce, &raw) {
                    Ok(plaintext) => plaintext,
                    Err(CryptoError::Authentication) => return Err(RetrieveError::Authentication),
                    Err(other) => return Err(RetrieveError::Crypto(other)),
                };
                tracing::debug!(version = %pointer.version, "asset decrypted");
                Ok(RetrievedAsset {
                    bytes,
                    integrity,
                    decrypted: true,
                })
            }
        }
    }
}
