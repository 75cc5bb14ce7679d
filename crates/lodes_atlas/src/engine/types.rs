//! Core engine types: resolutions, geographic units, per-unit statistics.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sectors::{Sector, SectorCounts};

/// Reporting granularity, finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Block,
    Tract,
    Zip,
}

impl Resolution {
    /// Identifier width at this resolution (block geocode, tract GEOID, ZCTA).
    pub fn id_width(self) -> usize {
        match self {
            Resolution::Block => 15,
            Resolution::Tract => 11,
            Resolution::Zip => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::Block => "block",
            Resolution::Tract => "tract",
            Resolution::Zip => "zip",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One geographic unit at some resolution. Created by the aggregator,
/// enriched in place by the statistics calculator, read-only afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoUnit {
    pub id: String,
    /// Sum of the reference total column (`C000`). The source publishes this
    /// and the per-sector columns from different tabulations, so it may
    /// diverge from `sectors.total()`; the divergence is preserved as-is.
    pub total_count: u64,
    pub sectors: SectorCounts,
    pub stats: Option<SectorStats>,
}

impl GeoUnit {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            total_count: 0,
            sectors: SectorCounts::new(),
            stats: None,
        }
    }
}

/// Derived per-unit statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorStats {
    pub dominant: Sector,
    pub dominant_count: u64,
    /// `dominant_count / total_count`; `None` when the unit has a zero total.
    pub concentration: Option<f64>,
    /// One value per sector in canonical order; 0.0 where undefined.
    pub location_quotients: [f64; Sector::COUNT],
}

/// Whole-batch totals used as the location-quotient denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReferenceTotals {
    pub total_count: u64,
    pub sectors: SectorCounts,
}
