//! Dominant sector, concentration, and location quotients per unit, plus the
//! region-wide sector summary table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sectors::Sector;

use super::types::{GeoUnit, ReferenceTotals, SectorStats};

/// Whole-batch totals for a unit set. Always derived from the set being
/// enriched, never supplied externally, so location quotients are relative to
/// the batch currently in hand.
pub fn reference_totals(units: &BTreeMap<String, GeoUnit>) -> ReferenceTotals {
    let mut reference = ReferenceTotals::default();
    for unit in units.values() {
        reference.total_count += unit.total_count;
        reference.sectors.accumulate(&unit.sectors);
    }
    reference
}

/// Enriches every unit in place: dominant sector (canonical-order tie-break),
/// concentration, and a location quotient for all 20 sectors. Pure over its
/// input; running it twice yields bit-identical output.
pub fn compute_statistics(units: &mut BTreeMap<String, GeoUnit>) -> ReferenceTotals {
    let reference = reference_totals(units);
    for unit in units.values_mut() {
        let (dominant, dominant_count) = unit.sectors.dominant();
        let concentration = if unit.total_count > 0 {
            Some(dominant_count as f64 / unit.total_count as f64)
        } else {
            None
        };
        let mut location_quotients = [0.0; Sector::COUNT];
        if unit.total_count > 0 && reference.total_count > 0 {
            for sector in Sector::ALL {
                let reference_share =
                    reference.sectors.get(sector) as f64 / reference.total_count as f64;
                if reference_share > 0.0 {
                    let unit_share = unit.sectors.get(sector) as f64 / unit.total_count as f64;
                    location_quotients[sector.index()] = unit_share / reference_share;
                }
            }
        }
        unit.stats = Some(SectorStats {
            dominant,
            dominant_count,
            concentration,
            location_quotients,
        });
    }
    reference
}

/// One row of the region-wide sector summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSummaryRow {
    pub sector: Sector,
    pub total_count: u64,
    /// How many units have this sector as their dominant one.
    pub dominant_units: usize,
    /// Share of the region-wide sector-count sum, in percent, one decimal.
    pub share_percent: f64,
}

/// Region summary over an enriched unit set, ordered by total descending;
/// equal totals keep canonical sector order.
pub fn sector_summary(units: &BTreeMap<String, GeoUnit>) -> Vec<SectorSummaryRow> {
    let reference = reference_totals(units);
    let sector_sum = reference.sectors.total();
    let mut rows: Vec<SectorSummaryRow> = reference
        .sectors
        .iter()
        .map(|(sector, total_count)| {
            let dominant_units = units
                .values()
                .filter(|unit| {
                    unit.stats
                        .as_ref()
                        .map(|stats| stats.dominant == sector)
                        .unwrap_or(false)
                })
                .count();
            let share_percent = if sector_sum > 0 {
                round1(total_count as f64 / sector_sum as f64 * 100.0)
            } else {
                0.0
            };
            SectorSummaryRow {
                sector,
                total_count,
                dominant_units,
                share_percent,
            }
        })
        .collect();
    // Stable sort: ties stay in canonical order.
    rows.sort_by(|a, b| b.total_count.cmp(&a.total_count));
    rows
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
