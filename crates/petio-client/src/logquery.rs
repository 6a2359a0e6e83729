//! # Event-Log Query Abstraction
//!
//! The ledger's event log is append-only and indexed; providers expose it
//! through a range query that may reject windows larger than their
//! configured cap. [`LogQueryError::RangeLimit`] models that rejection as
//! a recoverable failure class — the locator responds by shrinking the
//! window — while every other failure propagates to the caller unchanged.

use async_trait::async_trait;
use petio_core::{CampaignId, OwnerAddress, ProvenanceEvent};

/// Filter for signature events: campaign always, signer optionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilter {
    /// The campaign whose signature events are wanted.
    pub campaign: CampaignId,
    /// Restrict to one signer (receipt lookups); `None` scans every
    /// signer (campaign exports).
    pub owner: Option<OwnerAddress>,
}

impl LogFilter {
    /// Filter for all signature events of a campaign.
    pub fn for_campaign(campaign: CampaignId) -> Self {
        Self {
            campaign,
            owner: None,
        }
    }

    /// Restrict the filter to a single signer.
    pub fn by_owner(mut self, owner: OwnerAddress) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// An inclusive block-ordinal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRange {
    /// First block of the window.
    pub from: u64,
    /// Last block of the window.
    pub to: u64,
}

impl LogRange {
    /// Construct a range; `from` must not exceed `to`.
    pub fn new(from: u64, to: u64) -> Self {
        debug_assert!(from <= to, "inverted log range [{from}, {to}]");
        Self { from, to }
    }

    /// Number of blocks the window spans.
    pub fn span(&self) -> u64 {
        self.to - self.from + 1
    }
}

/// Errors from event-log queries.
#[derive(Debug, thiserror::Error)]
pub enum LogQueryError {
    /// The provider rejected the window as too large. Recoverable — the
    /// locator shrinks the window and retries the same sub-range. Never
    /// surfaces from a scan.
    #[error("provider rejected block range [{from}, {to}]: {message}")]
    RangeLimit {
        /// First block of the rejected window.
        from: u64,
        /// Last block of the rejected window.
        to: u64,
        /// Provider's rejection message.
        message: String,
    },

    /// The provider returned a JSON-RPC error other than a range limit.
    #[error("log provider RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// Provider's error message.
        message: String,
    },

    /// Transport-level failure.
    #[error("HTTP error calling log provider: {0}")]
    Http(#[from] reqwest::Error),

    /// A returned log entry could not be decoded.
    #[error("failed to decode log entry: {0}")]
    Decode(String),
}

impl LogQueryError {
    /// Whether this error is the recoverable range-limit class.
    pub fn is_range_limit(&self) -> bool {
        matches!(self, Self::RangeLimit { .. })
    }
}

/// Event-log query surface of the ledger provider.
///
/// Implementations return matching events in ascending block/log order.
/// Queries are read-only and idempotent: the same window and filter
/// always describe the same immutable slice of the log.
#[async_trait]
pub trait LogQuery: Send + Sync {
    /// Query signature events matching `filter` within `range`.
    async fn get_logs(
        &self,
        filter: &LogFilter,
        range: LogRange,
    ) -> Result<Vec<ProvenanceEvent>, LogQueryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_span_is_inclusive() {
        assert_eq!(LogRange::new(10, 10).span(), 1);
        assert_eq!(LogRange::new(1000, 2000).span(), 1001);
    }

    #[test]
    fn filter_builder_sets_owner() {
        let owner = OwnerAddress::from_bytes([9; 20]);
        let f = LogFilter::for_campaign(CampaignId::new(3)).by_owner(owner);
        assert_eq!(f.owner, Some(owner));
        assert_eq!(f.campaign, CampaignId::new(3));
    }

    #[test]
    fn range_limit_is_the_only_recoverable_class() {
        let rl = LogQueryError::RangeLimit {
            from: 0,
            to: 10,
            message: "too wide".into(),
        };
        assert!(rl.is_range_limit());
        let rpc = LogQueryError::Rpc {
            code: -32000,
            message: "boom".into(),
        };
        assert!(!rpc.is_range_limit());
    }
}
