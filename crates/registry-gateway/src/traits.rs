//! The gateway contract consumed by the directory engine
//!
//! One method per backend endpoint. Implementations must not cache or
//! reorder; consistency coordination belongs to the engine.

use crate::error::GatewayError;
use crate::params::ListParams;
use async_trait::async_trait;
use registry_model::{
    AssistanceId, AssistancePayload, AssistanceRecord, DirectoryPage, PromotionRequest, Resident,
    ResidentId,
};

/// Remote resource gateway for resident records
///
/// Every call is a suspension point; callers disable the triggering control
/// while a call is in flight. Authorization failures surface as
/// `GatewayError::Unauthorized` and are treated by callers as generic
/// operation failures.
#[async_trait]
pub trait ResidentGateway: Send + Sync {
    /// Fetch one page of active residents matching the filters
    async fn list_residents(&self, params: ListParams) -> Result<DirectoryPage, GatewayError>;

    /// Archive an active resident (Active -> Archived)
    async fn archive_resident(&self, id: ResidentId) -> Result<(), GatewayError>;

    /// Restore an archived resident (Archived -> Active)
    async fn restore_resident(&self, id: ResidentId) -> Result<(), GatewayError>;

    /// Replace the household head; head-swap semantics are server-side
    async fn promote_head(
        &self,
        resident_id: ResidentId,
        request: PromotionRequest,
    ) -> Result<(), GatewayError>;

    /// Create an assistance record under a resident
    async fn create_assistance(
        &self,
        resident_id: ResidentId,
        payload: AssistancePayload,
    ) -> Result<AssistanceRecord, GatewayError>;

    /// Update an existing assistance record
    async fn update_assistance(
        &self,
        record_id: AssistanceId,
        payload: AssistancePayload,
    ) -> Result<AssistanceRecord, GatewayError>;

    /// Delete an assistance record (destructive, non-reversible)
    async fn delete_assistance(&self, record_id: AssistanceId) -> Result<(), GatewayError>;

    /// Full archived listing (not paginated server-side)
    async fn list_archived_residents(&self) -> Result<Vec<Resident>, GatewayError>;
}
