//! Directory query cache
//!
//! Holds exactly one fetched page plus its total count and the parameters
//! that produced it. Overlapping refreshes are resolved last-issued-wins:
//! every refresh takes a monotonically increasing sequence number and a
//! response commits only if its sequence is still the latest issued.
//! Superseded responses are discarded, never committed, regardless of
//! arrival order.

use registry_gateway::{GatewayError, ListParams, ResidentGateway};
use registry_model::DirectoryPage;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Cache performance counters
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Refreshes issued
    pub fetches_issued: u64,
    /// Responses committed to the held page
    pub fetches_committed: u64,
    /// Stale responses discarded
    pub fetches_discarded: u64,
}

/// Ticket identifying one issued refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug)]
struct Held {
    page: DirectoryPage,
    params: ListParams,
}

/// The last-fetched directory page and total count
#[derive(Debug)]
pub struct DirectoryCache {
    held: Mutex<Option<Held>>,
    latest_seq: AtomicU64,
    committed: AtomicU64,
    discarded: AtomicU64,
}

impl DirectoryCache {
    /// Empty cache
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            held: Mutex::new(None),
            latest_seq: AtomicU64::new(0),
            committed: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
        }
    }

    /// Take a sequence number for a refresh about to be issued
    ///
    /// Issuing a newer ticket supersedes all earlier ones.
    #[must_use]
    pub fn begin_fetch(&self) -> FetchTicket {
        FetchTicket(self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether a ticket is still the latest issued
    #[inline]
    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.latest_seq.load(Ordering::SeqCst)
    }

    /// Commit a fetched page if its ticket is still current
    ///
    /// Returns true if the page replaced the held state; false if it was
    /// discarded as stale. The page and total replace atomically - readers
    /// never observe a partial update.
    pub async fn try_commit(
        &self,
        ticket: FetchTicket,
        params: ListParams,
        page: DirectoryPage,
    ) -> bool {
        // Lock before re-checking so a commit and a newer begin_fetch
        // cannot interleave between check and write.
        let mut held = self.held.lock().await;
        if !self.is_current(ticket) {
            self.discarded.fetch_add(1, Ordering::SeqCst);
            tracing::warn!(seq = ticket.0, "discarding stale directory response");
            return false;
        }
        tracing::debug!(seq = ticket.0, total = page.total, "committing directory page");
        *held = Some(Held { page, params });
        self.committed.fetch_add(1, Ordering::SeqCst);
        true
    }

    /// Issue one list request and commit the result if still current
    ///
    /// On success returns whether the response was committed (false means
    /// a newer refresh superseded this one). On failure the held page is
    /// left untouched and the error is returned for the caller to surface.
    pub async fn refresh(
        &self,
        gateway: &dyn ResidentGateway,
        params: ListParams,
    ) -> Result<bool, GatewayError> {
        let ticket = self.begin_fetch();
        self.fetch(gateway, ticket, params).await
    }

    /// Run one list request against a pre-taken ticket
    ///
    /// Callers that derive `params` under a lock take the ticket under the
    /// same lock, so ticket order always matches the order of the state the
    /// params were derived from.
    pub async fn fetch(
        &self,
        gateway: &dyn ResidentGateway,
        ticket: FetchTicket,
        params: ListParams,
    ) -> Result<bool, GatewayError> {
        tracing::debug!(seq = ticket.0, ?params, "refreshing directory");
        let page = gateway.list_residents(params.clone()).await?;
        Ok(self.try_commit(ticket, params, page).await)
    }

    /// Snapshot of the held page, if any
    #[must_use]
    pub async fn page(&self) -> Option<DirectoryPage> {
        self.held.lock().await.as_ref().map(|h| h.page.clone())
    }

    /// Total count from the held page; zero when nothing is held
    #[must_use]
    pub async fn total(&self) -> u64 {
        self.held.lock().await.as_ref().map_or(0, |h| h.page.total)
    }

    /// Parameters that produced the held page
    #[must_use]
    pub async fn params(&self) -> Option<ListParams> {
        self.held.lock().await.as_ref().map(|h| h.params.clone())
    }

    /// Drop the held page (e.g. on session teardown)
    pub async fn clear(&self) {
        *self.held.lock().await = None;
    }

    /// Performance counters
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            fetches_issued: self.latest_seq.load(Ordering::SeqCst),
            fetches_committed: self.committed.load(Ordering::SeqCst),
            fetches_discarded: self.discarded.load(Ordering::SeqCst),
        }
    }
}

impl Default for DirectoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registry_model::DirectoryPage;

    fn params(skip: u64) -> ListParams {
        ListParams {
            search: None,
            barangay: None,
            sector: None,
            skip,
            limit: 10,
        }
    }

    fn page_with_total(total: u64) -> DirectoryPage {
        DirectoryPage {
            items: Vec::new(),
            total,
        }
    }

    #[tokio::test]
    async fn commit_replaces_held_page() {
        let cache = DirectoryCache::new();
        let ticket = cache.begin_fetch();

        assert!(cache.try_commit(ticket, params(0), page_with_total(7)).await);
        assert_eq!(cache.total().await, 7);
        assert_eq!(cache.params().await, Some(params(0)));
    }

    #[tokio::test]
    async fn superseded_ticket_is_discarded() {
        let cache = DirectoryCache::new();
        let old = cache.begin_fetch();
        let new = cache.begin_fetch();

        // Newer response lands first
        assert!(cache.try_commit(new, params(10), page_with_total(2)).await);
        // Older response arrives late and must be discarded
        assert!(!cache.try_commit(old, params(0), page_with_total(99)).await);

        assert_eq!(cache.total().await, 2);
        let stats = cache.stats();
        assert_eq!(stats.fetches_committed, 1);
        assert_eq!(stats.fetches_discarded, 1);
    }

    #[tokio::test]
    async fn stale_response_discarded_even_before_newer_commits() {
        let cache = DirectoryCache::new();
        let old = cache.begin_fetch();
        let _new = cache.begin_fetch();

        // The older fetch resolves first but has already been superseded
        assert!(!cache.try_commit(old, params(0), page_with_total(5)).await);
        assert!(cache.page().await.is_none());
    }

    #[tokio::test]
    async fn preissued_tickets_resolve_by_issue_order_not_call_order() {
        use registry_test_utils::{sample_residents, InMemoryGateway};

        let gateway = InMemoryGateway::with_residents(sample_residents(3));
        let cache = DirectoryCache::new();

        // Both tickets are taken before either request runs, the way the
        // engine takes them under its query lock.
        let first = cache.begin_fetch();
        let second = cache.begin_fetch();

        // The earlier ticket's request runs first but is already superseded
        assert!(!cache.fetch(&gateway, first, params(0)).await.unwrap());
        assert!(cache.fetch(&gateway, second, params(0)).await.unwrap());
        assert_eq!(cache.total().await, 3);
    }

    #[tokio::test]
    async fn failed_refresh_leaves_held_page_untouched() {
        use registry_test_utils::{sample_residents, GatewayOp, InMemoryGateway};

        let gateway = InMemoryGateway::with_residents(sample_residents(3));
        let cache = DirectoryCache::new();

        cache.refresh(&gateway, params(0)).await.unwrap();
        assert_eq!(cache.total().await, 3);

        gateway.fail(GatewayOp::List);
        let err = cache.refresh(&gateway, params(0)).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(cache.total().await, 3);
    }

    #[tokio::test]
    async fn clear_drops_held_page() {
        let cache = DirectoryCache::new();
        let ticket = cache.begin_fetch();
        cache.try_commit(ticket, params(0), page_with_total(1)).await;

        cache.clear().await;
        assert!(cache.page().await.is_none());
        assert_eq!(cache.total().await, 0);
    }
}
