//! # Consumed Contract Surfaces
//!
//! The petition and profile contracts live on the ledger; this crate only
//! consumes their read and write surfaces. The traits here are the seams
//! the orchestration layer composes over — wallet plumbing, transaction
//! assembly, and the contracts themselves are external collaborators, and
//! tests substitute in-crate fakes.

use async_trait::async_trait;
use petio_core::{
    AssetPointer, CampaignId, ContentDigest, ContentId, EncryptionScheme, OwnerAddress,
    SignatureRow, VersionId,
};

/// Errors from contract calls.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// The underlying call failed (revert, transport, serialization).
    #[error("contract call {call} failed: {reason}")]
    Call {
        /// Which contract method was invoked.
        call: String,
        /// Provider or contract failure detail.
        reason: String,
    },
}

/// Read surface of the profile contract: signature pointers per owner.
#[async_trait]
pub trait ProfileContract: Send + Sync {
    /// The owner's active signature pointer, if one is set.
    async fn get_active_pointer(
        &self,
        owner: &OwnerAddress,
    ) -> Result<Option<AssetPointer>, ContractError>;

    /// A page of the owner's version history, oldest first.
    async fn get_versions(
        &self,
        owner: &OwnerAddress,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<AssetPointer>, ContractError>;
}

/// Read surface of the petition contract: campaign signature listings.
#[async_trait]
pub trait CampaignContract: Send + Sync {
    /// A page of a campaign's signature rows, oldest first.
    async fn get_campaign_signatures(
        &self,
        campaign: CampaignId,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<SignatureRow>, ContractError>;
}

/// Write surface of the profile contract: recording a new pointer.
#[async_trait]
pub trait PointerWriter: Send + Sync {
    /// Record a new signature version for the owner and return its id.
    async fn save_pointer(
        &self,
        owner: &OwnerAddress,
        content_id: ContentId,
        content_hash: ContentDigest,
        scheme: EncryptionScheme,
        nonce: Vec<u8>,
        activate: bool,
    ) -> Result<VersionId, ContractError>;
}
