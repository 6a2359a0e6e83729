//! # Campaign Signature Export
//!
//! Assembles every signer's asset for a campaign — the input to receipt
//! documents and audit bundles. Rows are processed with bounded
//! concurrency and strict row-level isolation: one row's failure becomes
//! an [`ExportOutcome::Unavailable`] marker, never an aborted batch. Only
//! a failure of the upstream listing call fails the export itself.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use petio_client::{CampaignContract, ContractError};
use petio_core::{CampaignId, OwnerAddress};
use petio_crypto::KeyStore;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::retriever::{AssetRetriever, RetrievedAsset};

/// Tuning for an export run.
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Maximum rows retrieved concurrently.
    pub concurrency: usize,
    /// Page size for the listing calls.
    pub page_size: u64,
    /// Per-row retrieval deadline; `None` leaves only adapter timeouts.
    pub row_deadline: Option<Duration>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            page_size: 50,
            row_deadline: None,
        }
    }
}

/// Per-row result of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The signer's asset was retrieved (integrity status inside).
    Available(RetrievedAsset),
    /// The asset could not be produced for this row; the reason records
    /// which failure class occurred.
    Unavailable {
        /// Human-readable failure description.
        reason: String,
    },
}

/// One exported row: listing fields plus the retrieval outcome.
#[derive(Debug, Clone)]
pub struct ExportRow {
    /// The signer's address.
    pub signer: OwnerAddress,
    /// Message the signer attached.
    pub message: String,
    /// When the signature was recorded.
    pub timestamp: DateTime<Utc>,
    /// Whether the signer's asset was retrieved.
    pub outcome: ExportOutcome,
}

/// Errors that fail the whole export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The upstream signature listing failed — there are no rows to
    /// isolate failures into.
    #[error("campaign signature listing failed: {0}")]
    Listing(#[from] ContractError),

    /// An export worker task failed to complete.
    #[error("export worker failed: {0}")]
    Worker(String),
}

/// Export every signer's asset for `campaign`.
///
/// Output row count always equals the listing's row count and preserves
/// listing order, regardless of per-row failures.
pub async fn export_campaign(
    campaign: CampaignId,
    contract: &dyn CampaignContract,
    retriever: AssetRetriever,
    keystore: Arc<dyn KeyStore>,
    options: ExportOptions,
) -> Result<Vec<ExportRow>, ExportError> {
    let page_size = options.page_size.max(1);

    // Page through the full listing first; a listing failure is the one
    // error that aborts the export.
    let mut listing = Vec::new();
    let mut offset = 0u64;
    loop {
        let page = contract
            .get_campaign_signatures(campaign, offset, page_size)
            .await?;
        let fetched = page.len() as u64;
        listing.extend(page);
        if fetched < page_size {
            break;
        }
        offset += fetched;
    }

    let total = listing.len();
    let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (index, row) in listing.into_iter().enumerate() {
        let semaphore = semaphore.clone();
        let retriever = retriever.clone();
        let keystore = keystore.clone();
        let deadline = options.row_deadline;
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            let outcome = match &row.pointer {
                None => ExportOutcome::Unavailable {
                    reason: "signer has no signature pointer".into(),
                },
                Some(pointer) => {
                    match retriever
                        .retrieve(pointer, &row.signer, keystore.as_ref(), deadline)
                        .await
                    {
                        Ok(asset) => ExportOutcome::Available(asset),
                        Err(e) => {
                            tracing::warn!(
                                signer = %row.signer,
                                version = %pointer.version,
                                "export row unavailable: {e}"
                            );
                            ExportOutcome::Unavailable {
                                reason: e.to_string(),
                            }
                        }
                    }
                }
            };
            (
                index,
                ExportRow {
                    signer: row.signer,
                    message: row.message,
                    timestamp: row.timestamp,
                    outcome,
                },
            )
        });
    }

    let mut slots: Vec<Option<ExportRow>> = (0..total).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, row)) => slots[index] = Some(row),
            Err(e) => return Err(ExportError::Worker(e.to_string())),
        }
    }

    Ok(slots.into_iter().flatten().collect())
}
