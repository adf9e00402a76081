//! Directory page - a transient, derived query result

use crate::resident::Resident;
use serde::{Deserialize, Serialize};

/// One page of resident summaries plus the matching total count
///
/// Never persisted; recomputed on every query-state change. The page and
/// total always come from the same response, so they are consistent with
/// each other even when the backend has moved on since.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryPage {
    /// Residents on this page, in backend order
    pub items: Vec<Resident>,
    /// Total residents matching the filters, across all pages
    pub total: u64,
}

impl DirectoryPage {
    /// Empty page with a zero total
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Number of residents on this page
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no residents
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a resident on this page by id
    #[must_use]
    pub fn resident(&self, id: crate::ids::ResidentId) -> Option<&Resident> {
        self.items.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_has_zero_total() {
        let page = DirectoryPage::empty();
        assert!(page.is_empty());
        assert_eq!(page.total, 0);
    }
}
