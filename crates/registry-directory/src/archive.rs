//! Archive view state
//!
//! The archived listing arrives unpaginated from the backend; filtering
//! and paging happen locally. Restore removes the resident from this list
//! optimistically - the one accepted optimistic mutation - and decrements
//! the page index when the removal empties the current page.

use crate::query::PageSize;
use registry_model::{Resident, ResidentId};

/// Locally paged view over the archived residents
#[derive(Debug, Clone)]
pub struct ArchiveView {
    residents: Vec<Resident>,
    filter: String,
    /// 1-based
    page: u64,
    page_size: PageSize,
}

impl ArchiveView {
    /// Empty view on page 1
    #[inline]
    #[must_use]
    pub fn new(page_size: PageSize) -> Self {
        Self {
            residents: Vec::new(),
            filter: String::new(),
            page: 1,
            page_size,
        }
    }

    /// Replace the held listing, keeping the page index in range
    pub fn replace(&mut self, residents: Vec<Resident>) {
        self.residents = residents;
        self.clamp_page();
    }

    /// Set the local name filter; resets to page 1
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.page = 1;
    }

    /// Current page (1-based)
    #[inline]
    #[must_use]
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Change the page size; resets to page 1
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// Residents matching the local filter, across all pages
    fn filtered(&self) -> Vec<&Resident> {
        let needle = self.filter.trim().to_lowercase();
        self.residents
            .iter()
            .filter(|r| {
                needle.is_empty() || r.display_name().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Total archived residents matching the filter
    #[must_use]
    pub fn total(&self) -> u64 {
        self.filtered().len() as u64
    }

    /// Number of pages; at least 1
    #[must_use]
    pub fn page_count(&self) -> u64 {
        self.total().div_ceil(self.page_size.value()).max(1)
    }

    /// Residents on the current page
    #[must_use]
    pub fn page_items(&self) -> Vec<Resident> {
        let size = self.page_size.value() as usize;
        self.filtered()
            .into_iter()
            .skip((self.page as usize - 1) * size)
            .take(size)
            .cloned()
            .collect()
    }

    /// Advance one page, clamped. Returns true if moved.
    pub fn next_page(&mut self) -> bool {
        if self.page < self.page_count() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page, clamped. Returns true if moved.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Optimistically remove a restored resident
    ///
    /// If the removal empties the current page and the page index is no
    /// longer valid, the index decrements - never below 1.
    pub fn remove(&mut self, id: ResidentId) {
        self.residents.retain(|r| r.id != id);
        self.clamp_page();
    }

    /// Whether a resident is still in the held listing
    #[must_use]
    pub fn contains(&self, id: ResidentId) -> bool {
        self.residents.iter().any(|r| r.id == id)
    }

    fn clamp_page(&mut self) {
        let count = self.page_count();
        if self.page > count {
            self.page = count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registry_test_utils::resident;

    fn archived(n: usize) -> Vec<Resident> {
        (1..=n)
            .map(|i| {
                let mut r = resident(i as i64, &format!("Archived{i}"), "Reyes", "Poblacion");
                r.archived = true;
                r
            })
            .collect()
    }

    #[test]
    fn removal_that_empties_the_last_page_decrements_the_index() {
        let mut view = ArchiveView::new(PageSize::Ten);
        view.replace(archived(11));

        view.next_page();
        assert_eq!(view.page(), 2);
        assert_eq!(view.page_items().len(), 1);

        view.remove(ResidentId(11));
        assert_eq!(view.page(), 1);
        assert_eq!(view.total(), 10);
    }

    #[test]
    fn page_index_never_goes_below_one() {
        let mut view = ArchiveView::new(PageSize::Ten);
        view.replace(archived(1));

        view.remove(ResidentId(1));
        assert_eq!(view.page(), 1);
        assert_eq!(view.total(), 0);
    }

    #[test]
    fn local_filter_matches_display_names_case_insensitively() {
        let mut view = ArchiveView::new(PageSize::Ten);
        view.replace(archived(3));

        view.set_filter("archived2");
        assert_eq!(view.total(), 1);
        assert_eq!(view.page_items()[0].id, ResidentId(2));
    }

    #[test]
    fn filter_change_resets_page() {
        let mut view = ArchiveView::new(PageSize::Ten);
        view.replace(archived(25));
        view.next_page();
        assert_eq!(view.page(), 2);

        view.set_filter("Reyes");
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn replace_keeps_page_in_range() {
        let mut view = ArchiveView::new(PageSize::Ten);
        view.replace(archived(25));
        view.next_page();
        view.next_page();
        assert_eq!(view.page(), 3);

        view.replace(archived(5));
        assert_eq!(view.page(), 1);
    }
}
