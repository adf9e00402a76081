//! Filter and pagination state
//!
//! Holds the current directory query: free-text search, barangay
//! (admin-only), sector, 1-based page, and page size. Any setter that
//! changes a filter or the page size resets the page to 1. Filters are
//! mutually independent and compose conjunctively when derived into
//! request parameters.

use registry_gateway::{ListParams, Role};
use registry_model::Sector;
use serde::{Deserialize, Serialize};

/// Selectable directory page sizes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    Ten,
    Twenty,
    Fifty,
}

impl PageSize {
    /// Numeric value
    #[inline]
    #[must_use]
    pub fn value(&self) -> u64 {
        match self {
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
        }
    }

    /// Parse a configured numeric size; unknown sizes get the default
    #[inline]
    #[must_use]
    pub fn from_value(value: u64) -> Self {
        match value {
            20 => PageSize::Twenty,
            50 => PageSize::Fifty,
            _ => PageSize::Ten,
        }
    }
}

/// The current directory query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryQuery {
    search: String,
    barangay: Option<String>,
    sector: Option<Sector>,
    /// 1-based
    page: u64,
    page_size: PageSize,
}

impl DirectoryQuery {
    /// Fresh query on page 1 with no filters
    #[inline]
    #[must_use]
    pub fn new(page_size: PageSize) -> Self {
        Self {
            search: String::new(),
            barangay: None,
            sector: None,
            page: 1,
            page_size,
        }
    }

    /// Current free-text search
    #[inline]
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current barangay filter
    #[inline]
    #[must_use]
    pub fn barangay(&self) -> Option<&str> {
        self.barangay.as_deref()
    }

    /// Current sector filter
    #[inline]
    #[must_use]
    pub fn sector(&self) -> Option<Sector> {
        self.sector
    }

    /// Current page (1-based)
    #[inline]
    #[must_use]
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Current page size
    #[inline]
    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Set the search string; resets to page 1
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Set or clear the barangay filter; resets to page 1
    pub fn set_barangay(&mut self, barangay: Option<String>) {
        self.barangay = barangay;
        self.page = 1;
    }

    /// Set or clear the sector filter; resets to page 1
    pub fn set_sector(&mut self, sector: Option<Sector>) {
        self.sector = sector;
        self.page = 1;
    }

    /// Change the page size; resets to page 1
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// Jump to a page; values below 1 clamp to 1
    pub fn set_page(&mut self, page: u64) {
        self.page = page.max(1);
    }

    /// Number of pages for a given total; at least 1
    #[must_use]
    pub fn page_count(&self, total: u64) -> u64 {
        let size = self.page_size.value();
        (total.div_ceil(size)).max(1)
    }

    /// Advance one page, clamped to the last page. Returns true if moved.
    pub fn next_page(&mut self, total: u64) -> bool {
        if self.page < self.page_count(total) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page, clamped to page 1. Returns true if moved.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Derive the gateway request parameters
    ///
    /// Pure: does not mutate the query. Blank search is omitted; the
    /// barangay filter is included only for admin-role sessions.
    #[must_use]
    pub fn to_params(&self, role: Role) -> ListParams {
        let search = {
            let trimmed = self.search.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };
        let barangay = if role.can_filter_barangay() {
            self.barangay.clone()
        } else {
            None
        };
        let limit = self.page_size.value();
        ListParams {
            search,
            barangay,
            sector: self.sector,
            skip: (self.page - 1) * limit,
            limit,
        }
    }
}

impl Default for DirectoryQuery {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn filter_changes_reset_page() {
        let mut query = DirectoryQuery::default();
        query.set_page(3);

        query.set_search("DELA CRUZ");
        assert_eq!(query.page(), 1);

        query.set_page(3);
        query.set_barangay(Some("San Rafael".to_string()));
        assert_eq!(query.page(), 1);

        query.set_page(3);
        query.set_sector(Some(Sector::Pwd));
        assert_eq!(query.page(), 1);

        query.set_page(3);
        query.set_page_size(PageSize::Fifty);
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn clearing_search_preserves_other_filters() {
        let mut query = DirectoryQuery::default();
        query.set_barangay(Some("San Rafael".to_string()));
        query.set_search("DELA CRUZ");
        query.set_page(2);

        query.set_search("");
        assert_eq!(query.page(), 1);
        assert_eq!(query.barangay(), Some("San Rafael"));
    }

    #[test]
    fn page_count_rounds_up_and_is_at_least_one() {
        let mut query = DirectoryQuery::default();
        query.set_page_size(PageSize::Twenty);

        assert_eq!(query.page_count(45), 3);
        assert_eq!(query.page_count(40), 2);
        assert_eq!(query.page_count(0), 1);
    }

    #[test]
    fn forward_navigation_stops_at_last_page() {
        let mut query = DirectoryQuery::default();
        query.set_page_size(PageSize::Twenty);

        // total 45, size 20 -> 3 pages
        assert!(query.next_page(45));
        assert!(query.next_page(45));
        assert_eq!(query.page(), 3);
        assert!(!query.next_page(45));
        assert_eq!(query.page(), 3);
    }

    #[test]
    fn backward_navigation_stops_at_first_page() {
        let mut query = DirectoryQuery::default();
        assert!(!query.prev_page());
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn params_compose_all_filters_conjunctively() {
        let mut query = DirectoryQuery::default();
        query.set_search("DELA CRUZ");
        query.set_barangay(Some("San Rafael".to_string()));
        query.set_sector(Some(Sector::SeniorCitizen));
        query.set_page_size(PageSize::Twenty);
        query.set_page(2);

        let params = query.to_params(Role::Admin);
        assert_eq!(params.search.as_deref(), Some("DELA CRUZ"));
        assert_eq!(params.barangay.as_deref(), Some("San Rafael"));
        assert_eq!(params.sector, Some(Sector::SeniorCitizen));
        assert_eq!(params.skip, 20);
        assert_eq!(params.limit, 20);
    }

    #[test]
    fn staff_sessions_never_send_the_barangay_filter() {
        let mut query = DirectoryQuery::default();
        query.set_barangay(Some("San Rafael".to_string()));

        let params = query.to_params(Role::Staff);
        assert!(params.barangay.is_none());
    }

    #[test]
    fn blank_search_is_omitted_from_params() {
        let mut query = DirectoryQuery::default();
        query.set_search("   ");

        let params = query.to_params(Role::Staff);
        assert!(params.search.is_none());
    }
}
