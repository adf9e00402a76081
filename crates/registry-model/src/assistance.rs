//! Social-assistance disbursement records
//!
//! Assistance records belong to exactly one resident and are created,
//! edited, and deleted independently of the parent's other fields.

use crate::ids::AssistanceId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of assistance disbursed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssistanceType {
    Burial,
    Financial,
    Educational,
    Medical,
    #[serde(rename = "Gas Subsidy")]
    GasSubsidy,
    #[serde(rename = "Food Assistance")]
    FoodAssistance,
}

impl AssistanceType {
    /// Human-readable label, matching the wire encoding
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            AssistanceType::Burial => "Burial",
            AssistanceType::Financial => "Financial",
            AssistanceType::Educational => "Educational",
            AssistanceType::Medical => "Medical",
            AssistanceType::GasSubsidy => "Gas Subsidy",
            AssistanceType::FoodAssistance => "Food Assistance",
        }
    }
}

impl std::fmt::Display for AssistanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A recorded disbursement, as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistanceRecord {
    /// Backend-assigned identifier
    pub id: AssistanceId,
    pub assistance_type: AssistanceType,
    pub date_processed: NaiveDate,
    #[serde(default)]
    pub date_claimed: Option<NaiveDate>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub implementing_office: Option<String>,
}

/// Fixed-shape payload for creating or updating an assistance record
///
/// The same shape serves both endpoints; which endpoint receives it depends
/// on whether a record id is already known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistancePayload {
    pub assistance_type: AssistanceType,
    pub date_processed: NaiveDate,
    #[serde(default)]
    pub date_claimed: Option<NaiveDate>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub implementing_office: Option<String>,
}

impl AssistancePayload {
    /// New payload with only the required fields set
    #[must_use]
    pub fn new(assistance_type: AssistanceType, date_processed: NaiveDate) -> Self {
        Self {
            assistance_type,
            date_processed,
            date_claimed: None,
            amount: None,
            implementing_office: None,
        }
    }

    /// Set the claim date
    #[must_use]
    pub fn with_date_claimed(mut self, date: NaiveDate) -> Self {
        self.date_claimed = Some(date);
        self
    }

    /// Set the disbursed amount
    #[must_use]
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the implementing office
    #[must_use]
    pub fn with_office(mut self, office: impl Into<String>) -> Self {
        self.implementing_office = Some(office.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn multi_word_types_use_spaced_labels_on_the_wire() {
        let json = serde_json::to_string(&AssistanceType::GasSubsidy).unwrap();
        assert_eq!(json, "\"Gas Subsidy\"");

        let back: AssistanceType = serde_json::from_str("\"Food Assistance\"").unwrap();
        assert_eq!(back, AssistanceType::FoodAssistance);
    }

    #[test]
    fn payload_builder_sets_optional_fields() {
        let payload = AssistancePayload::new(
            AssistanceType::Medical,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        )
        .with_amount(1500.0)
        .with_office("MSWDO");

        assert_eq!(payload.amount, Some(1500.0));
        assert_eq!(payload.implementing_office.as_deref(), Some("MSWDO"));
        assert!(payload.date_claimed.is_none());
    }

    #[test]
    fn record_tolerates_missing_nullable_fields() {
        let json = r#"{
            "id": 3,
            "assistance_type": "Burial",
            "date_processed": "2024-01-10"
        }"#;
        let record: AssistanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.assistance_type, AssistanceType::Burial);
        assert!(record.amount.is_none());
    }
}
