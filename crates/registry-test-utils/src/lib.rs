//! Testing utilities for the registry workspace
//!
//! Shared fixtures plus an in-memory gateway with scriptable failures and
//! gated (hold/release) list responses for response-ordering tests.

#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::NaiveDate;
use registry_gateway::{GatewayError, ListParams, ResidentGateway};
use registry_model::{
    AssistanceId, AssistancePayload, AssistanceRecord, DirectoryPage, FamilyMember, MemberId,
    PromotionRequest, Resident, ResidentId, Sex,
};
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

/// Build a resident fixture with sensible defaults
pub fn resident(id: i64, first: &str, last: &str, barangay: &str) -> Resident {
    Resident {
        id: ResidentId(id),
        first_name: first.to_string(),
        middle_name: None,
        last_name: last.to_string(),
        suffix: None,
        birthdate: NaiveDate::from_ymd_opt(1975, 1, 15).unwrap(),
        sex: Sex::Male,
        civil_status: registry_model::CivilStatus::Married,
        religion: None,
        house_number: Some(format!("{id}")),
        purok: Some("Purok 1".to_string()),
        barangay: barangay.to_string(),
        contact_number: None,
        occupation: None,
        sector_summary: String::new(),
        other_sector_details: None,
        archived: false,
        family_members: Vec::new(),
        assistance_records: Vec::new(),
    }
}

/// Build a family member fixture
pub fn family_member(id: i64, first: &str, last: &str, relationship: &str) -> FamilyMember {
    FamilyMember {
        id: MemberId(id),
        first_name: first.to_string(),
        middle_name: None,
        last_name: last.to_string(),
        relationship: relationship.to_string(),
        birthdate: None,
        sex: None,
        occupation: None,
    }
}

/// Generate `n` residents with distinct ids and rotating barangays
pub fn sample_residents(n: usize) -> Vec<Resident> {
    let barangays = ["San Rafael", "Poblacion", "San Isidro"];
    (0..n)
        .map(|i| {
            resident(
                i as i64 + 1,
                &format!("Resident{}", i + 1),
                "Santos",
                barangays[i % barangays.len()],
            )
        })
        .collect()
}

/// Which gateway operation a scripted failure applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOp {
    List,
    Archive,
    Restore,
    Promote,
    CreateAssistance,
    UpdateAssistance,
    DeleteAssistance,
    ListArchived,
}

/// Handle that releases one held list response when dropped or signalled
pub struct ReleaseHandle(oneshot::Sender<()>);

impl ReleaseHandle {
    /// Release the held response
    pub fn release(self) {
        let _ = self.0.send(());
    }
}

/// In-memory gateway over a mutable resident store
///
/// Supports everything the engine needs from a backend: conjunctive
/// filtering, skip/limit paging, lifecycle mutations, scripted failures,
/// and held list responses so tests can control response arrival order.
pub struct InMemoryGateway {
    residents: Mutex<Vec<Resident>>,
    failing: Mutex<HashSet<GatewayOp>>,
    held_lists: Mutex<VecDeque<oneshot::Receiver<()>>>,
    next_assistance_id: AtomicI64,
    list_calls: AtomicUsize,
    promotions: Mutex<Vec<(ResidentId, PromotionRequest)>>,
}

impl InMemoryGateway {
    /// Empty gateway
    #[must_use]
    pub fn new() -> Self {
        Self::with_residents(Vec::new())
    }

    /// Gateway seeded with residents
    #[must_use]
    pub fn with_residents(residents: Vec<Resident>) -> Self {
        Self {
            residents: Mutex::new(residents),
            failing: Mutex::new(HashSet::new()),
            held_lists: Mutex::new(VecDeque::new()),
            next_assistance_id: AtomicI64::new(1000),
            list_calls: AtomicUsize::new(0),
            promotions: Mutex::new(Vec::new()),
        }
    }

    /// Make every subsequent call of `op` fail until `succeed` is called
    pub fn fail(&self, op: GatewayOp) {
        self.failing.lock().unwrap().insert(op);
    }

    /// Clear a scripted failure
    pub fn succeed(&self, op: GatewayOp) {
        self.failing.lock().unwrap().remove(&op);
    }

    /// Hold the next list response until the returned handle is released
    ///
    /// Holds apply in call order: the first held call waits on the first
    /// handle, and so on. Releasing out of order makes responses arrive
    /// out of order.
    pub fn hold_next_list(&self) -> ReleaseHandle {
        let (tx, rx) = oneshot::channel();
        self.held_lists.lock().unwrap().push_back(rx);
        ReleaseHandle(tx)
    }

    /// Number of list requests served so far (including failures)
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Promotions recorded so far
    #[must_use]
    pub fn promotions(&self) -> Vec<(ResidentId, PromotionRequest)> {
        self.promotions.lock().unwrap().clone()
    }

    /// Snapshot a resident by id, archived or not
    #[must_use]
    pub fn resident_snapshot(&self, id: ResidentId) -> Option<Resident> {
        self.residents
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    fn check_failure(&self, op: GatewayOp) -> Result<(), GatewayError> {
        if self.failing.lock().unwrap().contains(&op) {
            return Err(GatewayError::Server {
                status: 503,
                message: "scripted failure".to_string(),
            });
        }
        Ok(())
    }

    fn matches(resident: &Resident, params: &ListParams) -> bool {
        if resident.archived {
            return false;
        }
        if let Some(search) = &params.search {
            let needle = search.to_lowercase();
            let haystack = format!(
                "{} {} {}",
                resident.first_name,
                resident.middle_name.as_deref().unwrap_or(""),
                resident.last_name
            )
            .to_lowercase();
            if !haystack.contains(&needle) {
                return false;
            }
        }
        if let Some(barangay) = &params.barangay {
            if &resident.barangay != barangay {
                return false;
            }
        }
        if let Some(sector) = &params.sector {
            if !resident.sector_summary.contains(sector.label()) {
                return false;
            }
        }
        true
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResidentGateway for InMemoryGateway {
    async fn list_residents(&self, params: ListParams) -> Result<DirectoryPage, GatewayError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        // Wait on a hold, if one was queued for this call
        let held = self.held_lists.lock().unwrap().pop_front();
        if let Some(rx) = held {
            let _ = rx.await;
        }

        self.check_failure(GatewayOp::List)?;

        let residents = self.residents.lock().unwrap();
        let matching: Vec<&Resident> = residents
            .iter()
            .filter(|r| Self::matches(r, &params))
            .collect();
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(params.skip as usize)
            .take(params.limit as usize)
            .cloned()
            .collect();

        Ok(DirectoryPage { items, total })
    }

    async fn archive_resident(&self, id: ResidentId) -> Result<(), GatewayError> {
        self.check_failure(GatewayOp::Archive)?;
        let mut residents = self.residents.lock().unwrap();
        let resident = residents.iter_mut().find(|r| r.id == id).ok_or_else(|| {
            GatewayError::Server {
                status: 404,
                message: "resident not found".to_string(),
            }
        })?;
        resident.archived = true;
        Ok(())
    }

    async fn restore_resident(&self, id: ResidentId) -> Result<(), GatewayError> {
        self.check_failure(GatewayOp::Restore)?;
        let mut residents = self.residents.lock().unwrap();
        let resident = residents.iter_mut().find(|r| r.id == id).ok_or_else(|| {
            GatewayError::Server {
                status: 404,
                message: "resident not found".to_string(),
            }
        })?;
        resident.archived = false;
        Ok(())
    }

    async fn promote_head(
        &self,
        resident_id: ResidentId,
        request: PromotionRequest,
    ) -> Result<(), GatewayError> {
        self.check_failure(GatewayOp::Promote)?;
        self.promotions.lock().unwrap().push((resident_id, request));
        Ok(())
    }

    async fn create_assistance(
        &self,
        resident_id: ResidentId,
        payload: AssistancePayload,
    ) -> Result<AssistanceRecord, GatewayError> {
        self.check_failure(GatewayOp::CreateAssistance)?;
        let record = AssistanceRecord {
            id: AssistanceId(self.next_assistance_id.fetch_add(1, Ordering::SeqCst)),
            assistance_type: payload.assistance_type,
            date_processed: payload.date_processed,
            date_claimed: payload.date_claimed,
            amount: payload.amount,
            implementing_office: payload.implementing_office,
        };
        let mut residents = self.residents.lock().unwrap();
        let resident = residents
            .iter_mut()
            .find(|r| r.id == resident_id)
            .ok_or_else(|| GatewayError::Server {
                status: 404,
                message: "resident not found".to_string(),
            })?;
        resident.assistance_records.push(record.clone());
        Ok(record)
    }

    async fn update_assistance(
        &self,
        record_id: AssistanceId,
        payload: AssistancePayload,
    ) -> Result<AssistanceRecord, GatewayError> {
        self.check_failure(GatewayOp::UpdateAssistance)?;
        let mut residents = self.residents.lock().unwrap();
        for resident in residents.iter_mut() {
            if let Some(record) = resident
                .assistance_records
                .iter_mut()
                .find(|r| r.id == record_id)
            {
                record.assistance_type = payload.assistance_type;
                record.date_processed = payload.date_processed;
                record.date_claimed = payload.date_claimed;
                record.amount = payload.amount;
                record.implementing_office = payload.implementing_office;
                return Ok(record.clone());
            }
        }
        Err(GatewayError::Server {
            status: 404,
            message: "assistance record not found".to_string(),
        })
    }

    async fn delete_assistance(&self, record_id: AssistanceId) -> Result<(), GatewayError> {
        self.check_failure(GatewayOp::DeleteAssistance)?;
        let mut residents = self.residents.lock().unwrap();
        for resident in residents.iter_mut() {
            let before = resident.assistance_records.len();
            resident.assistance_records.retain(|r| r.id != record_id);
            if resident.assistance_records.len() != before {
                return Ok(());
            }
        }
        Err(GatewayError::Server {
            status: 404,
            message: "assistance record not found".to_string(),
        })
    }

    async fn list_archived_residents(&self) -> Result<Vec<Resident>, GatewayError> {
        self.check_failure(GatewayOp::ListArchived)?;
        let residents = self.residents.lock().unwrap();
        Ok(residents.iter().filter(|r| r.archived).cloned().collect())
    }
}
