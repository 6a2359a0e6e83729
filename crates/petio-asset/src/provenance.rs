//! # Provenance Lookups
//!
//! Answers "which transaction recorded this signature?" by scanning the
//! event log newest-first — receipts want the most recent signing, and
//! the scan stops at the first window that contains one.

use std::time::Duration;

use petio_client::{EventLocator, LocateError, LogFilter, LogQuery, ScanOutcome};
use petio_core::{CampaignId, OwnerAddress, ProvenanceEvent};

/// Find the most recent signature event for `(campaign, signer)` within
/// `[floor, latest]`.
///
/// An exhausted scan is a normal negative result (`Ok(None)`) — the
/// signer may simply never have signed within the scanned bound.
pub async fn find_signature_provenance<Q: LogQuery>(
    locator: &EventLocator<Q>,
    campaign: CampaignId,
    signer: OwnerAddress,
    floor: u64,
    latest: u64,
    deadline: Option<Duration>,
) -> Result<Option<ProvenanceEvent>, LocateError> {
    let filter = LogFilter::for_campaign(campaign).by_owner(signer);
    match locator.locate(&filter, floor, latest, deadline).await? {
        ScanOutcome::Found(event) => Ok(Some(event)),
        ScanOutcome::Exhausted => {
            tracing::debug!(%campaign, %signer, floor, latest, "no signature event in bound");
            Ok(None)
        }
    }
}
