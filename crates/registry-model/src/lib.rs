//! Registry Model - domain types for the resident registry client
//!
//! Defines the records the client projects from the backend:
//! - Residents (household-head registration records)
//! - Family members and promotion targets
//! - Assistance disbursement records
//! - Sector classification and the derived sector summary
//! - Directory pages (transient, derived query results)
//!
//! All types here are read-mostly projections; the backend owns the data.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod assistance;
pub mod ids;
pub mod page;
pub mod promotion;
pub mod resident;
pub mod sector;

// Re-exports for convenience
pub use assistance::{AssistancePayload, AssistanceRecord, AssistanceType};
pub use ids::{AssistanceId, MemberId, ResidentId};
pub use page::DirectoryPage;
pub use promotion::{PromotionReason, PromotionRequest, PromotionTarget, SPOUSE_SENTINEL};
pub use resident::{CivilStatus, FamilyMember, Resident, Sex};
pub use sector::{Sector, SectorSelection};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with registry types
    pub use crate::{
        AssistancePayload, AssistanceRecord, AssistanceType, DirectoryPage, FamilyMember,
        PromotionReason, PromotionRequest, PromotionTarget, Resident, ResidentId, Sector,
        SectorSelection,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
