//! Head-of-household promotion
//!
//! Promotion replaces a household's recorded head with a family member or
//! the recorded spouse. The spouse path travels as a reserved non-numeric
//! sentinel, distinct from real member ids. Head-swap semantics live
//! entirely on the backend; the client treats the call as atomic.

use crate::ids::MemberId;
use serde::{Deserialize, Serialize};

/// Reserved wire identifier for the spouse promotion path
pub const SPOUSE_SENTINEL: &str = "spouse";

/// Who becomes the new household head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionTarget {
    /// An existing family member
    FamilyMember(MemberId),
    /// The recorded spouse (sentinel-encoded on the wire)
    Spouse,
}

impl PromotionTarget {
    /// Wire encoding: the member id as a string, or the spouse sentinel
    #[must_use]
    pub fn wire_id(&self) -> String {
        match self {
            PromotionTarget::FamilyMember(id) => id.to_string(),
            PromotionTarget::Spouse => SPOUSE_SENTINEL.to_string(),
        }
    }

    /// Decode a wire identifier back into a target
    #[must_use]
    pub fn from_wire_id(raw: &str) -> Option<Self> {
        if raw == SPOUSE_SENTINEL {
            return Some(PromotionTarget::Spouse);
        }
        raw.parse::<i64>()
            .ok()
            .map(|n| PromotionTarget::FamilyMember(MemberId(n)))
    }
}

impl Serialize for PromotionTarget {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.wire_id())
    }
}

impl<'de> Deserialize<'de> for PromotionTarget {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PromotionTarget::from_wire_id(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid promotion target: {raw}")))
    }
}

/// Why the current head is being replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromotionReason {
    Deceased,
    Transferred,
    Inactive,
}

impl PromotionReason {
    /// Human-readable label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PromotionReason::Deceased => "Deceased",
            PromotionReason::Transferred => "Transferred",
            PromotionReason::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for PromotionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Request body for the promote-head endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionRequest {
    pub new_head_member_id: PromotionTarget,
    pub reason: PromotionReason,
}

impl PromotionRequest {
    /// Build a request
    #[inline]
    #[must_use]
    pub fn new(target: PromotionTarget, reason: PromotionReason) -> Self {
        Self {
            new_head_member_id: target,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn member_target_encodes_as_numeric_string() {
        let target = PromotionTarget::FamilyMember(MemberId(17));
        assert_eq!(target.wire_id(), "17");
        assert_eq!(serde_json::to_string(&target).unwrap(), "\"17\"");
    }

    #[test]
    fn spouse_target_uses_the_sentinel() {
        assert_eq!(PromotionTarget::Spouse.wire_id(), SPOUSE_SENTINEL);

        let back: PromotionTarget = serde_json::from_str("\"spouse\"").unwrap();
        assert_eq!(back, PromotionTarget::Spouse);
    }

    #[test]
    fn sentinel_never_collides_with_member_ids() {
        assert!(SPOUSE_SENTINEL.parse::<i64>().is_err());
        assert!(PromotionTarget::from_wire_id("not-a-target").is_none());
    }

    #[test]
    fn request_serializes_target_and_reason() {
        let request = PromotionRequest::new(
            PromotionTarget::FamilyMember(MemberId(3)),
            PromotionReason::Deceased,
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["new_head_member_id"], "3");
        assert_eq!(json["reason"], "Deceased");
    }
}
