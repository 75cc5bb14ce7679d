//! The fixed LODES workplace-sector enumeration (CNS01..CNS20) with its
//! 2-digit NAICS code, display label, and map color per sector.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the 20 LODES employment sectors. Declaration order is the canonical
/// ordering used for dominance tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "CNS01")]
    Cns01,
    #[serde(rename = "CNS02")]
    Cns02,
    #[serde(rename = "CNS03")]
    Cns03,
    #[serde(rename = "CNS04")]
    Cns04,
    #[serde(rename = "CNS05")]
    Cns05,
    #[serde(rename = "CNS06")]
    Cns06,
    #[serde(rename = "CNS07")]
    Cns07,
    #[serde(rename = "CNS08")]
    Cns08,
    #[serde(rename = "CNS09")]
    Cns09,
    #[serde(rename = "CNS10")]
    Cns10,
    #[serde(rename = "CNS11")]
    Cns11,
    #[serde(rename = "CNS12")]
    Cns12,
    #[serde(rename = "CNS13")]
    Cns13,
    #[serde(rename = "CNS14")]
    Cns14,
    #[serde(rename = "CNS15")]
    Cns15,
    #[serde(rename = "CNS16")]
    Cns16,
    #[serde(rename = "CNS17")]
    Cns17,
    #[serde(rename = "CNS18")]
    Cns18,
    #[serde(rename = "CNS19")]
    Cns19,
    #[serde(rename = "CNS20")]
    Cns20,
}

// (code, 2-digit NAICS, label, color), indexed by `Sector::index`.
const SECTOR_INFO: [(&str, &str, &str, &str); Sector::COUNT] = [
    ("CNS01", "11", "Agriculture", "#27ae60"),
    ("CNS02", "21", "Mining", "#95a5a6"),
    ("CNS03", "22", "Utilities", "#34495e"),
    ("CNS04", "23", "Construction", "#c0392b"),
    ("CNS05", "31-33", "Manufacturing", "#e67e22"),
    ("CNS06", "42", "Wholesale Trade", "#27ae60"),
    ("CNS07", "44-45", "Retail Trade", "#3498db"),
    ("CNS08", "48-49", "Transportation", "#16a085"),
    ("CNS09", "51", "Information", "#f15a22"),
    ("CNS10", "52", "Finance", "#2c3e50"),
    ("CNS11", "53", "Real Estate", "#8e44ad"),
    ("CNS12", "54", "Professional Services", "#9b59b6"),
    ("CNS13", "55", "Management", "#6c5ce7"),
    ("CNS14", "56", "Admin Support", "#f39c12"),
    ("CNS15", "61", "Education", "#1abc9c"),
    ("CNS16", "62", "Healthcare", "#2ecc71"),
    ("CNS17", "71", "Arts/Entertainment", "#e74c3c"),
    ("CNS18", "72", "Accommodation/Food", "#f1c40f"),
    ("CNS19", "81", "Other Services", "#bdc3c7"),
    ("CNS20", "92", "Public Admin", "#7f8c8d"),
];

impl Sector {
    pub const COUNT: usize = 20;

    /// All sectors in canonical order.
    pub const ALL: [Sector; Sector::COUNT] = [
        Sector::Cns01,
        Sector::Cns02,
        Sector::Cns03,
        Sector::Cns04,
        Sector::Cns05,
        Sector::Cns06,
        Sector::Cns07,
        Sector::Cns08,
        Sector::Cns09,
        Sector::Cns10,
        Sector::Cns11,
        Sector::Cns12,
        Sector::Cns13,
        Sector::Cns14,
        Sector::Cns15,
        Sector::Cns16,
        Sector::Cns17,
        Sector::Cns18,
        Sector::Cns19,
        Sector::Cns20,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The LODES column code, e.g. `"CNS07"`.
    pub fn code(self) -> &'static str {
        SECTOR_INFO[self.index()].0
    }

    pub fn naics(self) -> &'static str {
        SECTOR_INFO[self.index()].1
    }

    pub fn label(self) -> &'static str {
        SECTOR_INFO[self.index()].2
    }

    pub fn color(self) -> &'static str {
        SECTOR_INFO[self.index()].3
    }

    pub fn from_code(code: &str) -> Option<Sector> {
        Sector::ALL.iter().copied().find(|sector| sector.code() == code)
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Per-sector counts for one geographic unit, indexed by `Sector`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectorCounts([u64; Sector::COUNT]);

impl SectorCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, sector: Sector) -> u64 {
        self.0[sector.index()]
    }

    pub fn set(&mut self, sector: Sector, count: u64) {
        self.0[sector.index()] = count;
    }

    pub fn add(&mut self, sector: Sector, count: u64) {
        self.0[sector.index()] += count;
    }

    /// Adds every count from `other`. Exact integer arithmetic throughout.
    pub fn accumulate(&mut self, other: &SectorCounts) {
        for index in 0..Sector::COUNT {
            self.0[index] += other.0[index];
        }
    }

    /// Sum of all sector counts. May differ from a unit's reference total;
    /// see `GeoUnit::total_count`.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Sector, u64)> + '_ {
        Sector::ALL.iter().map(move |sector| (*sector, self.0[sector.index()]))
    }

    /// The sector with the maximum count. Ties resolve to the sector earlier
    /// in the canonical enumeration, so the result is reproducible.
    pub fn dominant(&self) -> (Sector, u64) {
        let mut best = Sector::Cns01;
        let mut best_count = self.0[0];
        for sector in Sector::ALL.iter().copied().skip(1) {
            let count = self.0[sector.index()];
            if count > best_count {
                best = sector;
                best_count = count;
            }
        }
        (best, best_count)
    }
}
