//! Pending lifecycle action
//!
//! Every modal workflow is one variant of a single tagged value instead of
//! ad hoc booleans, so overlapping modals cannot exist and `match` keeps
//! the transitions exhaustive. Opening a workflow while another is pending
//! replaces it.

use registry_model::{
    AssistanceId, AssistanceRecord, PromotionReason, PromotionTarget, ResidentId,
};

/// The one modal workflow currently open, if any
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PendingAction {
    /// No workflow open
    #[default]
    Idle,
    /// Awaiting confirmation to archive a resident
    ConfirmingArchive(ResidentId),
    /// Awaiting confirmation to restore an archived resident
    ConfirmingRestore(ResidentId),
    /// Promotion dialog open with a chosen target and reason
    Promoting {
        resident: ResidentId,
        target: PromotionTarget,
        reason: PromotionReason,
    },
    /// Assistance editor open; `record` is None when creating
    EditingAssistance {
        resident: ResidentId,
        record: Option<AssistanceRecord>,
    },
    /// Two-step delete confirmation for an assistance record
    ConfirmingAssistanceDelete {
        resident: ResidentId,
        record: AssistanceId,
    },
}

impl PendingAction {
    /// Whether no workflow is open
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, PendingAction::Idle)
    }

    /// Short name for logging
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PendingAction::Idle => "idle",
            PendingAction::ConfirmingArchive(_) => "archive",
            PendingAction::ConfirmingRestore(_) => "restore",
            PendingAction::Promoting { .. } => "promote",
            PendingAction::EditingAssistance { .. } => "assistance-edit",
            PendingAction::ConfirmingAssistanceDelete { .. } => "assistance-delete",
        }
    }
}
