use crate::api::client::ApiClient;
use crate::error::Result;
use crate::schema::AnalyticsSummary;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Background refresh cadence per view family.
pub const DASHBOARD_REFRESH: Duration = Duration::from_secs(30);
pub const QUALITY_REFRESH: Duration = Duration::from_secs(60);

/// Latest-wins snapshot slot with stale-response fencing.
///
/// Every fetch takes a sequence id from `begin`; a response may only commit
/// while its id is still the newest issued. Out-of-order replies after a
/// rapid filter change are dropped instead of overwriting fresher data.
pub struct FeedState<T> {
    generation: AtomicU64,
    latest: Mutex<Option<(u64, T)>>,
}

impl<T: Clone> FeedState<T> {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            latest: Mutex::new(None),
        }
    }

    /// Registers a new in-flight fetch and returns its sequence id.
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Stores `value` if `generation` is still the newest issued id.
    /// Returns whether the snapshot was accepted.
    pub fn commit(&self, generation: u64, value: T) -> bool {
        if generation != self.generation.load(Ordering::SeqCst) {
            return false;
        }

        let mut slot = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        match &*slot {
            Some((stored, _)) if *stored > generation => false,
            _ => {
                *slot = Some((generation, value));
                true
            }
        }
    }

    pub fn latest(&self) -> Option<T> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, value)| value.clone())
    }
}

impl<T: Clone> Default for FeedState<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One fenced summary fetch. Returns whether the response was still current
/// when it arrived. Also the handler behind a manual "Retry" action.
pub async fn refresh_summary(
    client: &ApiClient,
    feed: &FeedState<AnalyticsSummary>,
) -> Result<bool> {
    let generation = feed.begin();
    let summary = client.analytics_summary().await?;
    Ok(feed.commit(generation, summary))
}

/// Refetches the summary on a fixed interval, forever. Failures are logged
/// and retried on the next tick; the last good snapshot stays available.
pub async fn poll_summary(
    client: ApiClient,
    feed: Arc<FeedState<AnalyticsSummary>>,
    period: Duration,
) {
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        match refresh_summary(&client, &feed).await {
            Ok(true) => debug!("summary snapshot refreshed"),
            Ok(false) => debug!("stale summary response dropped"),
            Err(e) => debug!("summary refresh failed, retrying next tick: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_latest_generation() {
        let feed = FeedState::new();
        let generation = feed.begin();
        assert!(feed.commit(generation, 1));
        assert_eq!(feed.latest(), Some(1));
    }

    #[test]
    fn test_superseded_generation_is_dropped() {
        let feed = FeedState::new();
        let first = feed.begin();
        let second = feed.begin();

        // The newer request resolves first; the older reply must not clobber it.
        assert!(feed.commit(second, 2));
        assert!(!feed.commit(first, 1));
        assert_eq!(feed.latest(), Some(2));
    }

    #[test]
    fn test_no_commit_without_begin() {
        let feed: FeedState<u32> = FeedState::new();
        assert!(!feed.commit(1, 9));
        assert_eq!(feed.latest(), None);
    }

    #[test]
    fn test_slot_starts_empty() {
        let feed: FeedState<AnalyticsSummary> = FeedState::new();
        assert!(feed.latest().is_none());
    }
}
