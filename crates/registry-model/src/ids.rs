//! Identifier newtypes
//!
//! All identifiers are assigned by the backend; the client never mints them.
//! Newtypes keep a resident id from being passed where a record id belongs.

use serde::{Deserialize, Serialize};

/// Unique resident (household head) identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResidentId(pub i64);

impl std::fmt::Display for ResidentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique family member identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(pub i64);

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique assistance record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssistanceId(pub i64);

impl std::fmt::Display for AssistanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_numbers() {
        let id = ResidentId(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let parsed: ResidentId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn ids_display_inner_value() {
        assert_eq!(MemberId(7).to_string(), "7");
        assert_eq!(AssistanceId(9).to_string(), "9");
    }
}
