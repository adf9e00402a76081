//! Resident and family member records
//!
//! A `Resident` is a household-registration record headed by one person.
//! Family members belong to exactly one resident and may be promoted to
//! head through the lifecycle engine.

use crate::assistance::AssistanceRecord;
use crate::ids::{MemberId, ResidentId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Biological sex as recorded on the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// Civil status as recorded on the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CivilStatus {
    Single,
    Married,
    Widowed,
    Separated,
    Divorced,
}

/// A household-registration record
///
/// The backend owns this data; the client holds a read-mostly projection.
/// The embedded family member and assistance lists are the only place those
/// sub-entities are rendered, so every mutation ends with a directory
/// refresh to pick up the nested collections again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    /// Backend-assigned identifier
    pub id: ResidentId,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub suffix: Option<String>,
    pub birthdate: NaiveDate,
    pub sex: Sex,
    pub civil_status: CivilStatus,
    #[serde(default)]
    pub religion: Option<String>,
    /// Address
    #[serde(default)]
    pub house_number: Option<String>,
    #[serde(default)]
    pub purok: Option<String>,
    pub barangay: String,
    /// Contact and livelihood
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    /// Denormalized sector label, derived from the sector checkboxes only
    #[serde(default)]
    pub sector_summary: String,
    /// Meaningful only when the summary denotes Others
    #[serde(default)]
    pub other_sector_details: Option<String>,
    /// Archived records are excluded from the primary directory
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub family_members: Vec<FamilyMember>,
    #[serde(default)]
    pub assistance_records: Vec<AssistanceRecord>,
}

impl Resident {
    /// Full display name, "LAST, FIRST MIDDLE" as the directory renders it
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut name = format!("{}, {}", self.last_name, self.first_name);
        if let Some(middle) = &self.middle_name {
            name.push(' ');
            name.push_str(middle);
        }
        if let Some(suffix) = &self.suffix {
            name.push(' ');
            name.push_str(suffix);
        }
        name
    }

    /// Find an embedded family member by id
    #[must_use]
    pub fn family_member(&self, id: MemberId) -> Option<&FamilyMember> {
        self.family_members.iter().find(|m| m.id == id)
    }

    /// Find an embedded assistance record by id
    #[must_use]
    pub fn assistance_record(
        &self,
        id: crate::ids::AssistanceId,
    ) -> Option<&AssistanceRecord> {
        self.assistance_records.iter().find(|r| r.id == id)
    }
}

/// A household member subordinate to a resident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    /// Backend-assigned identifier
    pub id: MemberId,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    /// Relationship to the household head (free text, e.g. "Son")
    pub relationship: String,
    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
    #[serde(default)]
    pub sex: Option<Sex>,
    #[serde(default)]
    pub occupation: Option<String>,
}

impl FamilyMember {
    /// Full display name in directory order
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}
