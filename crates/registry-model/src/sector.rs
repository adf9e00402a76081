//! Sector classification
//!
//! Residents carry a denormalized `sector_summary` label. The summary is
//! derived from the sector checkboxes and never edited directly;
//! `other_sector_details` is meaningful only when Others is selected.

use serde::{Deserialize, Serialize};

/// Vulnerability/classification tags attached to a resident
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sector {
    /// Senior citizen (60+)
    SeniorCitizen,
    /// Person with disability
    Pwd,
    /// Solo parent
    SoloParent,
    /// Indigent household
    Indigent,
    /// Overseas Filipino worker
    Ofw,
    /// Other sector, described in `other_sector_details`
    Others,
}

impl Sector {
    /// Label as it appears in the denormalized summary string
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Sector::SeniorCitizen => "Senior Citizen",
            Sector::Pwd => "PWD",
            Sector::SoloParent => "Solo Parent",
            Sector::Indigent => "Indigent",
            Sector::Ofw => "OFW",
            Sector::Others => "Others",
        }
    }

    /// All sectors, in summary order
    #[inline]
    #[must_use]
    pub fn all() -> [Sector; 6] {
        [
            Sector::SeniorCitizen,
            Sector::Pwd,
            Sector::SoloParent,
            Sector::Indigent,
            Sector::Ofw,
            Sector::Others,
        ]
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The sector checkboxes from which `sector_summary` is derived
///
/// This is the only sanctioned path to the summary label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorSelection {
    pub senior_citizen: bool,
    pub pwd: bool,
    pub solo_parent: bool,
    pub indigent: bool,
    pub ofw: bool,
    pub others: bool,
}

impl SectorSelection {
    /// Empty selection (no sectors)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a sector is selected
    #[must_use]
    pub fn includes(&self, sector: Sector) -> bool {
        match sector {
            Sector::SeniorCitizen => self.senior_citizen,
            Sector::Pwd => self.pwd,
            Sector::SoloParent => self.solo_parent,
            Sector::Indigent => self.indigent,
            Sector::Ofw => self.ofw,
            Sector::Others => self.others,
        }
    }

    /// Toggle a sector on or off
    pub fn set(&mut self, sector: Sector, selected: bool) {
        match sector {
            Sector::SeniorCitizen => self.senior_citizen = selected,
            Sector::Pwd => self.pwd = selected,
            Sector::SoloParent => self.solo_parent = selected,
            Sector::Indigent => self.indigent = selected,
            Sector::Ofw => self.ofw = selected,
            Sector::Others => self.others = selected,
        }
    }

    /// Derive the summary label: comma-joined labels in summary order
    ///
    /// Empty selection produces an empty string.
    #[must_use]
    pub fn summary(&self) -> String {
        let labels: Vec<&str> = Sector::all()
            .into_iter()
            .filter(|s| self.includes(*s))
            .map(|s| s.label())
            .collect();
        labels.join(", ")
    }

    /// Whether `other_sector_details` carries meaning for this selection
    #[inline]
    #[must_use]
    pub fn details_apply(&self) -> bool {
        self.others
    }

    /// Reconstruct a selection from a stored summary label
    #[must_use]
    pub fn from_summary(summary: &str) -> Self {
        let mut selection = Self::default();
        for part in summary.split(',') {
            let part = part.trim();
            for sector in Sector::all() {
                if part == sector.label() {
                    selection.set(sector, true);
                }
            }
        }
        selection
    }
}
