//! Merge of computed unit statistics onto boundary feature properties.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::boundary::BoundaryFeature;
use crate::geokey;
use crate::sectors::Sector;

use super::types::{GeoUnit, Resolution, SectorStats};

/// Dominant-sector label written for features with no matching unit.
pub const EMPTY_DOMINANT: &str = "None";

/// Fill color written for features with no matching unit.
pub const EMPTY_COLOR: &str = "#333";

/// Property keys written by the merge. Every output feature carries all of
/// them with a non-null value, matched or not.
pub fn metric_keys() -> Vec<String> {
    let mut keys = vec![
        "unit_id".to_string(),
        "total_jobs".to_string(),
        "dominant_cns".to_string(),
        "dominant_sector".to_string(),
        "sector_color".to_string(),
        "concentration".to_string(),
    ];
    for sector in Sector::ALL {
        keys.push(format!("{}_jobs", sector.label()));
        keys.push(format!("{}_lq", sector.label()));
    }
    keys
}

/// Copies computed statistics onto each feature's properties, matching on the
/// feature identifier truncated to the resolution's width (a 12-character
/// tract GEOID matches its 11-character unit id). Features with no matching
/// unit receive the complete empty-unit default, so the metric schema is
/// total on every feature. Mutates `features` in place and returns the number
/// matched; callers that need the pre-merge collection must copy it first.
pub fn merge_boundaries(
    features: &mut [BoundaryFeature],
    units: &BTreeMap<String, GeoUnit>,
    resolution: Resolution,
    id_keys: &[&str],
) -> usize {
    let mut matched = 0;
    for feature in features.iter_mut() {
        let id = feature
            .identifier(id_keys)
            .map(|raw| geokey::truncate_id(raw, resolution.id_width()).to_string())
            .unwrap_or_default();
        match units
            .get(&id)
            .and_then(|unit| unit.stats.as_ref().map(|stats| (unit, stats)))
        {
            Some((unit, stats)) => {
                apply_unit(&mut feature.properties, &id, unit, stats);
                matched += 1;
            }
            None => apply_default(&mut feature.properties, &id),
        }
    }
    matched
}

fn apply_unit(properties: &mut Map<String, Value>, id: &str, unit: &GeoUnit, stats: &SectorStats) {
    properties.insert("unit_id".to_string(), Value::from(id));
    properties.insert("total_jobs".to_string(), Value::from(unit.total_count));
    properties.insert("dominant_cns".to_string(), Value::from(stats.dominant.code()));
    properties.insert(
        "dominant_sector".to_string(),
        Value::from(stats.dominant.label()),
    );
    properties.insert(
        "sector_color".to_string(),
        Value::from(stats.dominant.color()),
    );
    let concentration = stats.concentration.unwrap_or(0.0);
    properties.insert(
        "concentration".to_string(),
        Value::from(round1(concentration * 100.0)),
    );
    for sector in Sector::ALL {
        properties.insert(
            format!("{}_jobs", sector.label()),
            Value::from(unit.sectors.get(sector)),
        );
        properties.insert(
            format!("{}_lq", sector.label()),
            Value::from(round2(stats.location_quotients[sector.index()])),
        );
    }
}

fn apply_default(properties: &mut Map<String, Value>, id: &str) {
    properties.insert("unit_id".to_string(), Value::from(id));
    properties.insert("total_jobs".to_string(), Value::from(0u64));
    properties.insert("dominant_cns".to_string(), Value::from(EMPTY_DOMINANT));
    properties.insert("dominant_sector".to_string(), Value::from(EMPTY_DOMINANT));
    properties.insert("sector_color".to_string(), Value::from(EMPTY_COLOR));
    properties.insert("concentration".to_string(), Value::from(0.0));
    for sector in Sector::ALL {
        properties.insert(format!("{}_jobs", sector.label()), Value::from(0u64));
        properties.insert(format!("{}_lq", sector.label()), Value::from(0.0));
    }
}

// Percent with one decimal, as the downstream map expects.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
