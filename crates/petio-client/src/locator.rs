//! # Adaptive Windowed Event Locator
//!
//! Rediscovers the transaction that produced a signature pointer by
//! scanning the ledger's event log in bounded windows. Providers cap the
//! block range a single `get_logs` call may span, and the caps differ
//! across providers — so the scan starts at the strategy's window size
//! and halves the window whenever the provider rejects it, retrying the
//! same sub-range until it fits.
//!
//! ## Scan behavior
//!
//! - Windows are traversed newest-first (receipt lookups want the most
//!   recent match) or oldest-first (provenance wants the first ever
//!   match); both directions select the matching event the sequential
//!   scan would find first.
//! - The first window containing ≥1 match ends the scan — no scanning
//!   past a match.
//! - The full bound traversed with no match is [`ScanOutcome::Exhausted`],
//!   a normal negative result rather than an error.
//! - Consecutive range-limit rejections for the same sub-range are
//!   bounded by the strategy's attempt budget; exceeding it is
//!   [`LocateError::BudgetExhausted`] rather than an unbounded retry loop.
//! - A range-limit rejection never escapes the scan; every other provider
//!   failure propagates to the caller unchanged.

use std::time::Duration;

use petio_core::ProvenanceEvent;

use crate::logquery::{LogFilter, LogQuery, LogQueryError, LogRange};

/// Traversal order over the scan bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// Walk from `latest` down to `floor`; a window's newest match wins.
    NewestFirst,
    /// Walk from `floor` up to `latest`; a window's oldest match wins.
    OldestFirst,
}

/// Strategy value driving the windowed scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanStrategy {
    /// Initial window size in blocks.
    pub window_size: u64,
    /// Traversal direction.
    pub direction: ScanDirection,
    /// Divisor applied to the window on a range-limit rejection.
    pub shrink_factor: u64,
    /// Budget of consecutive range-limit retries for one sub-range.
    pub max_attempts: u32,
}

impl ScanStrategy {
    /// Newest-first scan with the default window, shrink, and budget.
    pub fn newest_first() -> Self {
        Self {
            window_size: 3000,
            direction: ScanDirection::NewestFirst,
            shrink_factor: 2,
            max_attempts: 16,
        }
    }

    /// Oldest-first scan with the default window, shrink, and budget.
    pub fn oldest_first() -> Self {
        Self {
            direction: ScanDirection::OldestFirst,
            ..Self::newest_first()
        }
    }

    /// Override the initial window size.
    pub fn with_window(mut self, window_size: u64) -> Self {
        self.window_size = window_size;
        self
    }

    /// Override the retry budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

impl Default for ScanStrategy {
    fn default() -> Self {
        Self::newest_first()
    }
}

/// Result of a completed scan.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// A matching event was found; the scan stopped at its window.
    Found(ProvenanceEvent),
    /// The full bound was traversed without a match.
    Exhausted,
}

/// Errors from a scan.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    /// A non-recoverable provider failure, propagated unchanged. Never
    /// carries a range-limit rejection — those are consumed by shrinking.
    #[error("log provider error during scan: {0}")]
    Provider(#[from] LogQueryError),

    /// The provider kept rejecting the window even at the minimum size.
    #[error("scan gave up after {attempts} consecutive range-limit rejections")]
    BudgetExhausted {
        /// How many rejections were tolerated before giving up.
        attempts: u32,
    },

    /// The caller's deadline elapsed before the scan completed.
    #[error("scan deadline of {0:?} elapsed")]
    Timeout(Duration),
}

/// Windowed event-log scanner over a [`LogQuery`] provider.
pub struct EventLocator<Q> {
    provider: Q,
    strategy: ScanStrategy,
}

impl<Q: LogQuery> EventLocator<Q> {
    /// Create a locator with the given provider and strategy.
    pub fn new(provider: Q, strategy: ScanStrategy) -> Self {
        Self { provider, strategy }
    }

    /// The strategy this locator scans with.
    pub fn strategy(&self) -> &ScanStrategy {
        &self.strategy
    }

    /// Scan `[floor, latest]` for the first event matching `filter` in
    /// the strategy's direction.
    ///
    /// `deadline` bounds the whole scan; `None` leaves only the
    /// provider's per-request timeout.
    pub async fn locate(
        &self,
        filter: &LogFilter,
        floor: u64,
        latest: u64,
        deadline: Option<Duration>,
    ) -> Result<ScanOutcome, LocateError> {
        match deadline {
            None => self.scan(filter, floor, latest).await,
            Some(limit) => tokio::time::timeout(limit, self.scan(filter, floor, latest))
                .await
                .map_err(|_| LocateError::Timeout(limit))?,
        }
    }

    async fn scan(
        &self,
        filter: &LogFilter,
        floor: u64,
        latest: u64,
    ) -> Result<ScanOutcome, LocateError> {
        if floor > latest {
            return Ok(ScanOutcome::Exhausted);
        }

        // The window survives across sub-ranges: once the provider's cap
        // is learned, there is no point re-probing the original size.
        let mut window = self.strategy.window_size.max(1);

        match self.strategy.direction {
            ScanDirection::NewestFirst => {
                let mut end = latest;
                loop {
                    let start = end.saturating_sub(window - 1).max(floor);
                    let events = self
                        .query_shrinking(filter, start, end, &mut window, floor, Anchor::End(end))
                        .await?;
                    if let Some(event) = events.into_iter().last() {
                        return Ok(ScanOutcome::Found(event));
                    }
                    let queried_start = end.saturating_sub(window - 1).max(floor);
                    if queried_start == floor {
                        return Ok(ScanOutcome::Exhausted);
                    }
                    end = queried_start - 1;
                }
            }
            ScanDirection::OldestFirst => {
                let mut start = floor;
                loop {
                    let end = start.saturating_add(window - 1).min(latest);
                    let events = self
                        .query_shrinking(filter, start, end, &mut window, floor, Anchor::Start(start))
                        .await?;
                    if let Some(event) = events.into_iter().next() {
                        return Ok(ScanOutcome::Found(event));
                    }
                    let queried_end = start.saturating_add(window - 1).min(latest);
                    if queried_end == latest {
                        return Ok(ScanOutcome::Exhausted);
                    }
                    start = queried_end + 1;
                }
            }
        }
    }

    /// Query one sub-range, shrinking the window on range-limit
    /// rejections until the provider accepts it or the budget runs out.
    ///
    /// `window` is updated in place so later sub-ranges reuse the
    /// accepted size. The anchor (window start or end, per direction)
    /// stays fixed while the opposite edge moves in.
    async fn query_shrinking(
        &self,
        filter: &LogFilter,
        mut start: u64,
        mut end: u64,
        window: &mut u64,
        floor: u64,
        anchor: Anchor,
    ) -> Result<Vec<ProvenanceEvent>, LocateError> {
        let mut rejections = 0u32;
        loop {
            match self
                .provider
                .get_logs(filter, LogRange::new(start, end))
                .await
            {
                Ok(events) => return Ok(events),
                Err(LogQueryError::RangeLimit { message, .. }) => {
                    rejections += 1;
                    if rejections >= self.strategy.max_attempts {
                        return Err(LocateError::BudgetExhausted {
                            attempts: rejections,
                        });
                    }
                    *window = (*window / self.strategy.shrink_factor.max(2)).max(1);
                    match anchor {
                        Anchor::End(e) => {
                            end = e;
                            start = e.saturating_sub(*window - 1).max(floor);
                        }
                        Anchor::Start(s) => {
                            start = s;
                            end = s.saturating_add(*window - 1).min(end);
                        }
                    }
                    tracing::warn!(
                        window = *window,
                        start,
                        end,
                        rejections,
                        "provider rejected window, retrying shrunk sub-range: {message}"
                    );
                }
                Err(other) => return Err(LocateError::Provider(other)),
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Anchor {
    Start(u64),
    End(u64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use petio_core::{CampaignId, OwnerAddress, TxHash};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn owner() -> OwnerAddress {
        OwnerAddress::from_bytes([0x11; 20])
    }

    fn event_at(block: u64) -> ProvenanceEvent {
        ProvenanceEvent {
            owner: owner(),
            campaign: CampaignId::new(1),
            tx_reference: TxHash::from_bytes([block as u8; 32]),
            block_ordinal: block,
            message: String::new(),
        }
    }

    /// Fake provider: a fixed event set plus a hard range cap, in the
    /// shape hosted RPC providers enforce.
    struct FakeProvider {
        events: Vec<ProvenanceEvent>,
        cap: u64,
        calls: Arc<AtomicU32>,
    }

    impl FakeProvider {
        fn new(events: Vec<ProvenanceEvent>, cap: u64) -> (Self, Arc<AtomicU32>) {
            let calls = Arc::new(AtomicU32::new(0));
            (
                Self {
                    events,
                    cap,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl LogQuery for FakeProvider {
        async fn get_logs(
            &self,
            _filter: &LogFilter,
            range: LogRange,
        ) -> Result<Vec<ProvenanceEvent>, LogQueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if range.span() > self.cap {
                return Err(LogQueryError::RangeLimit {
                    from: range.from,
                    to: range.to,
                    message: format!("block range exceeds {} blocks", self.cap),
                });
            }
            Ok(self
                .events
                .iter()
                .filter(|e| e.block_ordinal >= range.from && e.block_ordinal <= range.to)
                .cloned()
                .collect())
        }
    }

    fn filter() -> LogFilter {
        LogFilter::for_campaign(CampaignId::new(1))
    }

    #[tokio::test]
    async fn shrinks_past_provider_cap_and_still_finds_event() {
        // Provider caps windows at 10 blocks; the requested window is 3000.
        let (provider, _calls) = FakeProvider::new(vec![event_at(1005)], 10);
        let locator = EventLocator::new(
            provider,
            ScanStrategy::newest_first().with_window(3000),
        );
        let outcome = locator.locate(&filter(), 1000, 2000, None).await.unwrap();
        assert_eq!(outcome, ScanOutcome::Found(event_at(1005)));
    }

    #[tokio::test]
    async fn shrinks_in_oldest_first_direction_too() {
        let (provider, _calls) = FakeProvider::new(vec![event_at(1005)], 10);
        let locator = EventLocator::new(
            provider,
            ScanStrategy::oldest_first().with_window(3000),
        );
        let outcome = locator.locate(&filter(), 1000, 2000, None).await.unwrap();
        assert_eq!(outcome, ScanOutcome::Found(event_at(1005)));
    }

    #[tokio::test]
    async fn empty_bound_reports_exhausted() {
        let (provider, _calls) = FakeProvider::new(vec![], 1000);
        let locator = EventLocator::new(provider, ScanStrategy::newest_first());
        let outcome = locator.locate(&filter(), 1000, 2000, None).await.unwrap();
        assert_eq!(outcome, ScanOutcome::Exhausted);
    }

    #[tokio::test]
    async fn inverted_bound_reports_exhausted_without_querying() {
        let (provider, calls) = FakeProvider::new(vec![], 1000);
        let locator = EventLocator::new(provider, ScanStrategy::newest_first());
        let outcome = locator.locate(&filter(), 2000, 1000, None).await.unwrap();
        assert_eq!(outcome, ScanOutcome::Exhausted);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn newest_first_selects_most_recent_match() {
        let (provider, _calls) = FakeProvider::new(vec![event_at(1100), event_at(1900)], 5000);
        let locator = EventLocator::new(provider, ScanStrategy::newest_first());
        let outcome = locator.locate(&filter(), 1000, 2000, None).await.unwrap();
        assert_eq!(outcome, ScanOutcome::Found(event_at(1900)));
    }

    #[tokio::test]
    async fn oldest_first_selects_first_ever_match() {
        let (provider, _calls) = FakeProvider::new(vec![event_at(1100), event_at(1900)], 5000);
        let locator = EventLocator::new(provider, ScanStrategy::oldest_first());
        let outcome = locator.locate(&filter(), 1000, 2000, None).await.unwrap();
        assert_eq!(outcome, ScanOutcome::Found(event_at(1100)));
    }

    #[tokio::test]
    async fn scan_stops_at_first_matching_window() {
        // One window covers the whole bound, so a single call suffices.
        let (provider, calls) = FakeProvider::new(vec![event_at(1500)], 5000);
        let locator = EventLocator::new(provider, ScanStrategy::newest_first());
        locator.locate(&filter(), 1000, 2000, None).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn pathological_provider_exhausts_budget() {
        // cap 0 → every window, even a single block, is rejected.
        let (provider, _calls) = FakeProvider::new(vec![event_at(1500)], 0);
        let locator = EventLocator::new(
            provider,
            ScanStrategy::newest_first().with_max_attempts(4),
        );
        let err = locator
            .locate(&filter(), 1000, 2000, None)
            .await
            .unwrap_err();
        assert!(matches!(err, LocateError::BudgetExhausted { attempts: 4 }));
    }

    #[tokio::test]
    async fn non_range_errors_propagate_unchanged() {
        struct BrokenProvider;

        #[async_trait]
        impl LogQuery for BrokenProvider {
            async fn get_logs(
                &self,
                _filter: &LogFilter,
                _range: LogRange,
            ) -> Result<Vec<ProvenanceEvent>, LogQueryError> {
                Err(LogQueryError::Rpc {
                    code: -32000,
                    message: "header not found".into(),
                })
            }
        }

        let locator = EventLocator::new(BrokenProvider, ScanStrategy::newest_first());
        let err = locator
            .locate(&filter(), 0, 100, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LocateError::Provider(LogQueryError::Rpc { code: -32000, .. })
        ));
    }

    #[tokio::test]
    async fn deadline_bounds_the_whole_scan() {
        struct SlowProvider;

        #[async_trait]
        impl LogQuery for SlowProvider {
            async fn get_logs(
                &self,
                _filter: &LogFilter,
                _range: LogRange,
            ) -> Result<Vec<ProvenanceEvent>, LogQueryError> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(vec![])
            }
        }

        let locator = EventLocator::new(SlowProvider, ScanStrategy::newest_first());
        let err = locator
            .locate(&filter(), 0, 100, Some(Duration::from_millis(20)))
            .await
            .unwrap_err();
        assert!(matches!(err, LocateError::Timeout(_)));
    }
}
