//! # Provenance Types
//!
//! A [`ProvenanceEvent`] is discovered — not created — by scanning the
//! ledger's append-only event log for the `SignatureAddedLight` event a
//! signing transaction emitted. Once discovered it is immutable and may be
//! cached by callers.
//!
//! [`SignatureRow`] is one row of a campaign's signature listing, the unit
//! the batch exporter works over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{CampaignId, OwnerAddress, TxHash};
use crate::pointer::AssetPointer;

/// A signature event discovered in the ledger's event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceEvent {
    /// The signer that produced the event.
    pub owner: OwnerAddress,
    /// The campaign that was signed.
    pub campaign: CampaignId,
    /// Hash of the transaction that emitted the event.
    pub tx_reference: TxHash,
    /// Block ordinal the transaction was included at.
    pub block_ordinal: u64,
    /// Free-form message the signer attached, if any.
    pub message: String,
}

/// One row of a campaign's signature listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureRow {
    /// The signer's address.
    pub signer: OwnerAddress,
    /// Free-form message the signer attached.
    pub message: String,
    /// When the signature was recorded.
    pub timestamp: DateTime<Utc>,
    /// The signer's signature pointer at listing time, when one exists.
    pub pointer: Option<AssetPointer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provenance_event_serde_round_trip() {
        let ev = ProvenanceEvent {
            owner: OwnerAddress::new("0x1f9090aae28b8a3dceadf281b0f12828e676c326").unwrap(),
            campaign: CampaignId::new(4),
            tx_reference: TxHash::new(&format!("0x{}", "cd".repeat(32))).unwrap(),
            block_ordinal: 1005,
            message: "count me in".into(),
        };
        let json = serde_json::to_string(&ev).unwrap();
        let back: ProvenanceEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, back);
    }
}
