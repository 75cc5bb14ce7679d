//! Grouping of raw block rows into geographic units.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geokey::{GeoKey, GeoKeyError};
use crate::sectors::{Sector, SectorCounts};

use super::types::GeoUnit;

/// One raw row as supplied by the data-acquisition collaborator. Sector codes
/// absent from the map count as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBlockRow {
    pub geo_id: String,
    #[serde(default)]
    pub reference_total: u64,
    #[serde(default)]
    pub sector_counts: BTreeMap<Sector, u64>,
}

/// A raw row with its geocode decoded, ready for grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRow {
    pub key: GeoKey,
    pub reference_total: u64,
    pub sectors: SectorCounts,
}

impl BlockRow {
    pub fn from_raw(raw: &RawBlockRow) -> Result<BlockRow, GeoKeyError> {
        let key = GeoKey::parse(&raw.geo_id)?;
        let mut sectors = SectorCounts::new();
        for (sector, count) in &raw.sector_counts {
            sectors.add(*sector, *count);
        }
        Ok(BlockRow {
            key,
            reference_total: raw.reference_total,
            sectors,
        })
    }
}

/// Groups rows by `group_key` and sums the reference total and every sector
/// column with exact integer arithmetic. Sums always run over raw rows, never
/// over already-aggregated units, so nothing is counted twice. Rows whose key
/// resolves to `None` are left out of this resolution only. Groups that sum
/// to zero are kept; dropping empty units is a presentation decision.
pub fn aggregate<F>(rows: &[BlockRow], group_key: F) -> BTreeMap<String, GeoUnit>
where
    F: Fn(&BlockRow) -> Option<String>,
{
    let mut units: BTreeMap<String, GeoUnit> = BTreeMap::new();
    for row in rows {
        let Some(key) = group_key(row) else {
            continue;
        };
        let unit = units
            .entry(key.clone())
            .or_insert_with(|| GeoUnit::new(key));
        unit.total_count += row.reference_total;
        unit.sectors.accumulate(&row.sectors);
    }
    units
}
