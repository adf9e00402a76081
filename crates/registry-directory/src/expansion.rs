//! Row expansion controller
//!
//! At most one resident row is expanded at a time to show household and
//! assistance detail, sourced from the currently loaded page (no extra
//! fetch). The engine clears expansion when a refresh commits different
//! parameters, since the expanded id may no longer be on the page.

use registry_model::ResidentId;

/// Which row, if any, is expanded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowExpansion {
    expanded: Option<ResidentId>,
}

impl RowExpansion {
    /// Nothing expanded
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently expanded resident, if any
    #[inline]
    #[must_use]
    pub fn expanded(&self) -> Option<ResidentId> {
        self.expanded
    }

    /// Whether a given row is expanded
    #[inline]
    #[must_use]
    pub fn is_expanded(&self, id: ResidentId) -> bool {
        self.expanded == Some(id)
    }

    /// Toggle a row: expanding it collapses any other row, toggling the
    /// already-expanded row collapses it. Returns whether the row is now
    /// expanded.
    pub fn toggle(&mut self, id: ResidentId) -> bool {
        if self.expanded == Some(id) {
            self.expanded = None;
            false
        } else {
            self.expanded = Some(id);
            true
        }
    }

    /// Collapse whatever is expanded
    pub fn collapse(&mut self) {
        self.expanded = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_expands_then_collapses() {
        let mut expansion = RowExpansion::new();

        assert!(expansion.toggle(ResidentId(1)));
        assert!(expansion.is_expanded(ResidentId(1)));

        assert!(!expansion.toggle(ResidentId(1)));
        assert_eq!(expansion.expanded(), None);
    }

    #[test]
    fn expanding_another_row_replaces_the_first() {
        let mut expansion = RowExpansion::new();
        expansion.toggle(ResidentId(1));

        assert!(expansion.toggle(ResidentId(2)));
        assert!(!expansion.is_expanded(ResidentId(1)));
        assert!(expansion.is_expanded(ResidentId(2)));
    }
}
