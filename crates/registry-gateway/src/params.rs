//! List request parameters
//!
//! Filters compose conjunctively; absent filters are simply omitted from
//! the request. Pagination travels as skip/limit.

use registry_model::Sector;
use serde::{Deserialize, Serialize};

/// Parameters for `list_residents`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    /// Free-text search over name fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Barangay filter; only honored for admin-role callers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barangay: Option<String>,
    /// Sector filter, matched against the sector summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<Sector>,
    /// Records to skip
    pub skip: u64,
    /// Page size
    pub limit: u64,
}

impl ListParams {
    /// First page with a given limit and no filters
    #[inline]
    #[must_use]
    pub fn first_page(limit: u64) -> Self {
        Self {
            search: None,
            barangay: None,
            sector: None,
            skip: 0,
            limit,
        }
    }

    /// Query pairs for the HTTP request, omitting absent filters
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(5);
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(barangay) = &self.barangay {
            pairs.push(("barangay", barangay.clone()));
        }
        if let Some(sector) = &self.sector {
            pairs.push(("sector", sector.label().to_string()));
        }
        pairs.push(("skip", self.skip.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn query_pairs_omit_absent_filters() {
        let params = ListParams::first_page(10);
        let pairs = params.query_pairs();
        assert_eq!(
            pairs,
            vec![("skip", "0".to_string()), ("limit", "10".to_string())]
        );
    }

    #[test]
    fn filters_compose_conjunctively() {
        let params = ListParams {
            search: Some("DELA CRUZ".to_string()),
            barangay: Some("San Rafael".to_string()),
            sector: Some(Sector::SeniorCitizen),
            skip: 20,
            limit: 20,
        };
        let pairs = params.query_pairs();
        assert_eq!(pairs.len(), 5);
        assert!(pairs.contains(&("search", "DELA CRUZ".to_string())));
        assert!(pairs.contains(&("barangay", "San Rafael".to_string())));
        assert!(pairs.contains(&("sector", "Senior Citizen".to_string())));
    }
}
