//! Directory engine
//!
//! Composes the query state, page cache, row expansion, archive view, and
//! the lifecycle orchestration behind one type. Constructed from an
//! explicit gateway, session, and config - no ambient globals.
//!
//! # Coordination rules
//! - Directory fetches resolve last-issued-wins through the cache.
//! - At most one lifecycle operation runs at a time; its trigger stays
//!   disabled (`busy`) until the operation completes either way.
//! - A refresh triggered by a lifecycle success is issued only after the
//!   success response arrives.
//! - Failures leave held state untouched (Restore's optimistic archive
//!   removal excepted) and surface a dismissable, retryable notification.

use crate::archive::ArchiveView;
use crate::cache::{CacheStats, DirectoryCache, FetchTicket};
use crate::error::{DirectoryError, Notification, Operation};
use crate::expansion::RowExpansion;
use crate::lifecycle::PendingAction;
use crate::query::{DirectoryQuery, PageSize};
use registry_gateway::{
    GatewayError, ListParams, RegistryConfig, ResidentGateway, Session,
};
use registry_model::{
    AssistanceId, AssistancePayload, AssistanceRecord, DirectoryPage, PromotionReason,
    PromotionRequest, PromotionTarget, Resident, ResidentId, Sector,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Releases the lifecycle in-flight guard when the operation completes
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// The resident directory query and lifecycle engine
pub struct DirectoryEngine {
    gateway: Arc<dyn ResidentGateway>,
    session: Session,
    query: Mutex<DirectoryQuery>,
    cache: DirectoryCache,
    expansion: Mutex<RowExpansion>,
    archive: Mutex<ArchiveView>,
    pending: Mutex<PendingAction>,
    busy: AtomicBool,
    notification: std::sync::Mutex<Option<Notification>>,
}

impl DirectoryEngine {
    /// Create an engine over a gateway and authenticated session
    #[must_use]
    pub fn new(
        gateway: Arc<dyn ResidentGateway>,
        session: Session,
        config: &RegistryConfig,
    ) -> Self {
        let page_size = PageSize::from_value(config.default_page_size);
        Self {
            gateway,
            session,
            query: Mutex::new(DirectoryQuery::new(page_size)),
            cache: DirectoryCache::new(),
            expansion: Mutex::new(RowExpansion::new()),
            archive: Mutex::new(ArchiveView::new(page_size)),
            pending: Mutex::new(PendingAction::Idle),
            busy: AtomicBool::new(false),
            notification: std::sync::Mutex::new(None),
        }
    }

    /// Session this engine acts under
    #[inline]
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether a lifecycle operation is in flight (triggers disabled)
    #[inline]
    #[must_use]
    pub fn busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Take the pending failure notification, if any
    #[must_use]
    pub fn take_notification(&self) -> Option<Notification> {
        self.notification.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    /// Cache performance counters
    #[inline]
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // ---- directory query -------------------------------------------------

    /// Refetch the directory for the current query state
    pub async fn refresh(&self) -> Result<(), DirectoryError> {
        // The ticket is taken under the query lock, so ticket order always
        // matches the order of the filter state the params came from.
        let (ticket, params) = {
            let query = self.query.lock().await;
            (self.cache.begin_fetch(), query.to_params(self.session.role()))
        };
        self.refresh_with(ticket, params).await
    }

    async fn refresh_with(
        &self,
        ticket: FetchTicket,
        params: ListParams,
    ) -> Result<(), DirectoryError> {
        let previous = self.cache.params().await;
        match self.cache.fetch(self.gateway.as_ref(), ticket, params).await {
            Ok(true) => {
                // The expanded id may not exist under the new parameters
                if previous != self.cache.params().await {
                    self.expansion.lock().await.collapse();
                }
                Ok(())
            }
            // Superseded by a newer refresh, which now owns the view
            Ok(false) => Ok(()),
            Err(source) => Err(self.report(Operation::FetchDirectory, source)),
        }
    }

    /// Set the free-text search; resets to page 1 and refetches
    pub async fn set_search(&self, search: impl Into<String>) -> Result<(), DirectoryError> {
        self.query.lock().await.set_search(search);
        self.refresh().await
    }

    /// Set or clear the barangay filter (admin only); resets to page 1
    pub async fn set_barangay(&self, barangay: Option<String>) -> Result<(), DirectoryError> {
        self.query.lock().await.set_barangay(barangay);
        self.refresh().await
    }

    /// Set or clear the sector filter; resets to page 1 and refetches
    pub async fn set_sector(&self, sector: Option<Sector>) -> Result<(), DirectoryError> {
        self.query.lock().await.set_sector(sector);
        self.refresh().await
    }

    /// Change the page size; resets to page 1 and refetches
    pub async fn set_page_size(&self, page_size: PageSize) -> Result<(), DirectoryError> {
        self.query.lock().await.set_page_size(page_size);
        self.archive.lock().await.set_page_size(page_size);
        self.refresh().await
    }

    /// Jump to a page and refetch
    pub async fn goto_page(&self, page: u64) -> Result<(), DirectoryError> {
        self.query.lock().await.set_page(page);
        self.refresh().await
    }

    /// Advance one page if not already on the last; refetches when moved
    pub async fn next_page(&self) -> Result<(), DirectoryError> {
        let total = self.cache.total().await;
        let moved = self.query.lock().await.next_page(total);
        if moved {
            self.refresh().await
        } else {
            Ok(())
        }
    }

    /// Go back one page if not on the first; refetches when moved
    pub async fn prev_page(&self) -> Result<(), DirectoryError> {
        let moved = self.query.lock().await.prev_page();
        if moved {
            self.refresh().await
        } else {
            Ok(())
        }
    }

    /// Snapshot of the held directory page
    #[must_use]
    pub async fn page(&self) -> Option<DirectoryPage> {
        self.cache.page().await
    }

    /// Total residents matching the current filters
    #[must_use]
    pub async fn total(&self) -> u64 {
        self.cache.total().await
    }

    /// Current page index (1-based)
    #[must_use]
    pub async fn page_index(&self) -> u64 {
        self.query.lock().await.page()
    }

    /// Number of directory pages for the held total
    #[must_use]
    pub async fn page_count(&self) -> u64 {
        let total = self.cache.total().await;
        self.query.lock().await.page_count(total)
    }

    // ---- row expansion ---------------------------------------------------

    /// Toggle a resident row; returns whether it is now expanded
    pub async fn toggle_row(&self, id: ResidentId) -> bool {
        self.expansion.lock().await.toggle(id)
    }

    /// Currently expanded resident, if any
    #[must_use]
    pub async fn expanded_row(&self) -> Option<ResidentId> {
        self.expansion.lock().await.expanded()
    }

    // ---- pending workflow ------------------------------------------------

    /// The open modal workflow, if any
    #[must_use]
    pub async fn pending(&self) -> PendingAction {
        self.pending.lock().await.clone()
    }

    /// Close the open workflow without acting
    pub async fn cancel_pending(&self) {
        *self.pending.lock().await = PendingAction::Idle;
    }

    /// Open the archive confirmation for a resident
    pub async fn request_archive(&self, id: ResidentId) {
        *self.pending.lock().await = PendingAction::ConfirmingArchive(id);
    }

    /// Open the restore confirmation for an archived resident
    pub async fn request_restore(&self, id: ResidentId) {
        *self.pending.lock().await = PendingAction::ConfirmingRestore(id);
    }

    /// Open the promotion dialog with a chosen target and reason
    pub async fn begin_promotion(
        &self,
        resident: ResidentId,
        target: PromotionTarget,
        reason: PromotionReason,
    ) {
        *self.pending.lock().await = PendingAction::Promoting {
            resident,
            target,
            reason,
        };
    }

    /// Open the assistance editor; `record` is None when creating
    pub async fn open_assistance_editor(
        &self,
        resident: ResidentId,
        record: Option<AssistanceRecord>,
    ) {
        *self.pending.lock().await = PendingAction::EditingAssistance { resident, record };
    }

    /// First step of the destructive delete: ask for confirmation
    pub async fn request_assistance_delete(&self, resident: ResidentId, record: AssistanceId) {
        *self.pending.lock().await =
            PendingAction::ConfirmingAssistanceDelete { resident, record };
    }

    // ---- lifecycle operations --------------------------------------------

    /// Archive the resident in the open confirmation (Active -> Archived)
    pub async fn confirm_archive(&self) -> Result<(), DirectoryError> {
        let _guard = self.begin_lifecycle()?;
        let id = match &*self.pending.lock().await {
            PendingAction::ConfirmingArchive(id) => *id,
            _ => return Err(DirectoryError::NoPendingAction { expected: "archive" }),
        };

        tracing::info!(resident = %id, "archiving resident");
        match self.gateway.archive_resident(id).await {
            Ok(()) => {
                *self.pending.lock().await = PendingAction::Idle;
                self.refresh().await
            }
            Err(source) => Err(self.report(Operation::Archive, source)),
        }
    }

    /// Restore the resident in the open confirmation (Archived -> Active)
    ///
    /// On success the resident is removed from the held archived list
    /// immediately; it becomes reachable from the active directory on the
    /// refresh this triggers.
    pub async fn confirm_restore(&self) -> Result<(), DirectoryError> {
        let _guard = self.begin_lifecycle()?;
        let id = match &*self.pending.lock().await {
            PendingAction::ConfirmingRestore(id) => *id,
            _ => return Err(DirectoryError::NoPendingAction { expected: "restore" }),
        };

        tracing::info!(resident = %id, "restoring resident");
        match self.gateway.restore_resident(id).await {
            Ok(()) => {
                *self.pending.lock().await = PendingAction::Idle;
                self.archive.lock().await.remove(id);
                self.refresh().await
            }
            Err(source) => Err(self.report(Operation::Restore, source)),
        }
    }

    /// Execute the open promotion, replacing the household head
    ///
    /// Head-swap semantics are the gateway's; the call is atomic from
    /// here. Failure leaves household composition untouched and keeps the
    /// dialog open for a manual retry.
    pub async fn confirm_promotion(&self) -> Result<(), DirectoryError> {
        let _guard = self.begin_lifecycle()?;
        let (resident, target, reason) = match &*self.pending.lock().await {
            PendingAction::Promoting {
                resident,
                target,
                reason,
            } => (*resident, *target, *reason),
            _ => return Err(DirectoryError::NoPendingAction { expected: "promote" }),
        };

        tracing::info!(resident = %resident, reason = %reason, "promoting new household head");
        let request = PromotionRequest::new(target, reason);
        match self.gateway.promote_head(resident, request).await {
            Ok(()) => {
                *self.pending.lock().await = PendingAction::Idle;
                self.refresh().await
            }
            Err(source) => Err(self.report(Operation::Promote, source)),
        }
    }

    /// Submit the open assistance editor
    ///
    /// Creates under the resident when no record id is known, otherwise
    /// updates the record-scoped endpoint. Ends with a directory refresh:
    /// the parent's embedded list is the only place records render.
    pub async fn submit_assistance(
        &self,
        payload: AssistancePayload,
    ) -> Result<AssistanceRecord, DirectoryError> {
        let _guard = self.begin_lifecycle()?;
        let (resident, existing) = match &*self.pending.lock().await {
            PendingAction::EditingAssistance { resident, record } => (*resident, record.clone()),
            _ => {
                return Err(DirectoryError::NoPendingAction {
                    expected: "assistance-edit",
                })
            }
        };

        let result = match &existing {
            Some(record) => {
                tracing::info!(record = %record.id, "updating assistance record");
                self.gateway
                    .update_assistance(record.id, payload)
                    .await
                    .map_err(|source| self.report(Operation::UpdateAssistance, source))
            }
            None => {
                tracing::info!(resident = %resident, "creating assistance record");
                self.gateway
                    .create_assistance(resident, payload)
                    .await
                    .map_err(|source| self.report(Operation::CreateAssistance, source))
            }
        };

        let saved = result?;
        *self.pending.lock().await = PendingAction::Idle;
        self.refresh().await?;
        Ok(saved)
    }

    /// Second step of the destructive delete: execute it
    pub async fn confirm_assistance_delete(&self) -> Result<(), DirectoryError> {
        let _guard = self.begin_lifecycle()?;
        let record = match &*self.pending.lock().await {
            PendingAction::ConfirmingAssistanceDelete { record, .. } => *record,
            _ => {
                return Err(DirectoryError::NoPendingAction {
                    expected: "assistance-delete",
                })
            }
        };

        tracing::info!(record = %record, "deleting assistance record");
        match self.gateway.delete_assistance(record).await {
            Ok(()) => {
                *self.pending.lock().await = PendingAction::Idle;
                self.refresh().await
            }
            Err(source) => Err(self.report(Operation::DeleteAssistance, source)),
        }
    }

    // ---- archive view ----------------------------------------------------

    /// Fetch the full archived listing
    pub async fn load_archive(&self) -> Result<(), DirectoryError> {
        match self.gateway.list_archived_residents().await {
            Ok(listing) => {
                self.archive.lock().await.replace(listing);
                Ok(())
            }
            Err(source) => Err(self.report(Operation::FetchArchive, source)),
        }
    }

    /// Archived residents on the current archive page
    #[must_use]
    pub async fn archived_page(&self) -> Vec<Resident> {
        self.archive.lock().await.page_items()
    }

    /// Current archive page index (1-based)
    #[must_use]
    pub async fn archive_page_index(&self) -> u64 {
        self.archive.lock().await.page()
    }

    /// Number of archive pages
    #[must_use]
    pub async fn archive_page_count(&self) -> u64 {
        self.archive.lock().await.page_count()
    }

    /// Set the local archive name filter; resets to archive page 1
    pub async fn set_archive_filter(&self, filter: impl Into<String>) {
        self.archive.lock().await.set_filter(filter);
    }

    /// Advance one archive page; returns whether it moved
    pub async fn archive_next_page(&self) -> bool {
        self.archive.lock().await.next_page()
    }

    /// Go back one archive page; returns whether it moved
    pub async fn archive_prev_page(&self) -> bool {
        self.archive.lock().await.prev_page()
    }

    /// Whether a resident is still in the held archived listing
    #[must_use]
    pub async fn archive_contains(&self, id: ResidentId) -> bool {
        self.archive.lock().await.contains(id)
    }

    // ---- internals -------------------------------------------------------

    fn begin_lifecycle(&self) -> Result<BusyGuard<'_>, DirectoryError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            Ok(BusyGuard(&self.busy))
        } else {
            Err(DirectoryError::Busy)
        }
    }

    /// Record a failure notification and build the engine error
    fn report(&self, operation: Operation, source: GatewayError) -> DirectoryError {
        tracing::warn!(%operation, error = %source, "operation failed");
        let error = DirectoryError::Operation { operation, source };
        let note = Notification::from_error(&error);
        *self.notification.lock().unwrap_or_else(|e| e.into_inner()) = Some(note);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registry_gateway::Role;
    use registry_test_utils::{sample_residents, InMemoryGateway};

    fn engine_over(gateway: InMemoryGateway) -> DirectoryEngine {
        DirectoryEngine::new(
            Arc::new(gateway),
            Session::new("tok", Role::Admin),
            &RegistryConfig::default(),
        )
    }

    #[tokio::test]
    async fn refresh_populates_page_and_total() {
        let engine = engine_over(InMemoryGateway::with_residents(sample_residents(25)));

        engine.refresh().await.unwrap();
        let page = engine.page().await.unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(engine.total().await, 25);
    }

    #[tokio::test]
    async fn filter_setters_reset_to_page_one() {
        let engine = engine_over(InMemoryGateway::with_residents(sample_residents(25)));
        engine.refresh().await.unwrap();
        engine.next_page().await.unwrap();
        assert_eq!(engine.page_index().await, 2);

        engine.set_search("Resident1").await.unwrap();
        assert_eq!(engine.page_index().await, 1);
    }

    #[tokio::test]
    async fn toggling_rows_keeps_at_most_one_expanded() {
        let engine = engine_over(InMemoryGateway::with_residents(sample_residents(3)));
        engine.refresh().await.unwrap();

        assert!(engine.toggle_row(ResidentId(1)).await);
        assert!(engine.toggle_row(ResidentId(2)).await);
        assert_eq!(engine.expanded_row().await, Some(ResidentId(2)));
    }

    #[tokio::test]
    async fn changing_filters_collapses_the_expanded_row() {
        let engine = engine_over(InMemoryGateway::with_residents(sample_residents(3)));
        engine.refresh().await.unwrap();
        engine.toggle_row(ResidentId(1)).await;

        engine.set_search("Santos").await.unwrap();
        assert_eq!(engine.expanded_row().await, None);
    }

    #[tokio::test]
    async fn refreshing_with_identical_params_keeps_expansion() {
        let engine = engine_over(InMemoryGateway::with_residents(sample_residents(3)));
        engine.refresh().await.unwrap();
        engine.toggle_row(ResidentId(1)).await;

        engine.refresh().await.unwrap();
        assert_eq!(engine.expanded_row().await, Some(ResidentId(1)));
    }

    #[tokio::test]
    async fn cancel_closes_any_workflow() {
        let engine = engine_over(InMemoryGateway::new());
        engine.request_archive(ResidentId(1)).await;
        assert!(!engine.pending().await.is_idle());

        engine.cancel_pending().await;
        assert!(engine.pending().await.is_idle());
    }

    #[tokio::test]
    async fn opening_a_workflow_replaces_the_previous_one() {
        let engine = engine_over(InMemoryGateway::new());
        engine.request_archive(ResidentId(1)).await;
        engine.request_restore(ResidentId(2)).await;

        assert_eq!(
            engine.pending().await,
            PendingAction::ConfirmingRestore(ResidentId(2))
        );
    }

    #[tokio::test]
    async fn confirm_without_matching_workflow_is_rejected() {
        let engine = engine_over(InMemoryGateway::new());
        let err = engine.confirm_archive().await.unwrap_err();
        assert!(matches!(err, DirectoryError::NoPendingAction { .. }));
        assert!(!engine.busy());
    }
}
