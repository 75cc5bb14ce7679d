//! Finer→coarser geographic correspondence: an authoritative crosswalk when
//! one is available, otherwise an approximate spatial join over boundary
//! bounding boxes and vertex-mean centers.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::boundary::BoundaryFeature;
use crate::geokey;
use crate::geometry::{squared_distance, BoundingBox, LonLat};

/// Where a correspondence came from. Approximate results are materially less
/// accurate near shared borders; callers get to see which one they received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Authoritative,
    Approximate,
}

impl Provenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::Authoritative => "authoritative",
            Provenance::Approximate => "approximate",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One externally supplied crosswalk row (finer id → coarser id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosswalkRow {
    pub finer_id: String,
    pub coarser_id: String,
}

/// A resolved finer→coarser mapping. All entries in one value share a single
/// provenance; authoritative and approximate results are never mixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correspondence {
    pub provenance: Provenance,
    entries: BTreeMap<String, String>,
}

impl Correspondence {
    pub fn get(&self, finer: &str) -> Option<&str> {
        self.entries.get(finer).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(finer, coarser)| (finer.as_str(), coarser.as_str()))
    }
}

/// Bounding box plus vertex-mean center for one coarser boundary feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub id: String,
    pub bbox: BoundingBox,
    pub center: LonLat,
}

/// Extracts spatial-join candidates from boundary features. Features without
/// a usable identifier or with degenerate geometry are skipped, logged, and
/// never abort the batch.
pub fn zones_from_features(
    features: &[BoundaryFeature],
    id_keys: &[&str],
    id_width: usize,
) -> Vec<Zone> {
    let mut zones = Vec::new();
    for feature in features {
        let Some(raw_id) = feature.identifier(id_keys) else {
            log::warn!("boundary feature without identifier (keys {id_keys:?}); skipped");
            continue;
        };
        let id = geokey::truncate_id(raw_id, id_width);
        let vertices = feature
            .geometry
            .as_ref()
            .map(|geometry| geometry.primary_vertices())
            .unwrap_or(&[]);
        let (Some(bbox), Some(center)) = (
            BoundingBox::from_vertices(vertices),
            crate::geometry::vertex_centroid(vertices),
        ) else {
            log::warn!("degenerate geometry for boundary {id}; excluded from spatial join");
            continue;
        };
        zones.push(Zone {
            id: id.to_string(),
            bbox,
            center,
        });
    }
    zones
}

/// Resolves each finer unit to a coarser one. The authoritative crosswalk
/// wins whenever it covers any of the finer units; an empty or unusable
/// crosswalk falls back to the approximate spatial join, and the fallback is
/// visible both in the log and in the returned provenance.
pub fn resolve(
    finer_ids: &BTreeSet<String>,
    finer_centroids: &BTreeMap<String, LonLat>,
    crosswalk: &[CrosswalkRow],
    zones: &[Zone],
) -> Correspondence {
    let authoritative: BTreeMap<String, String> = crosswalk
        .iter()
        .filter(|row| finer_ids.contains(&row.finer_id))
        .map(|row| (row.finer_id.clone(), row.coarser_id.clone()))
        .collect();
    if !authoritative.is_empty() {
        return Correspondence {
            provenance: Provenance::Authoritative,
            entries: authoritative,
        };
    }

    if crosswalk.is_empty() {
        log::warn!("no authoritative crosswalk available; falling back to approximate spatial join");
    } else {
        log::warn!(
            "crosswalk has {} rows but none match the finer unit set; falling back to approximate spatial join",
            crosswalk.len()
        );
    }
    let entries = approximate_join(finer_centroids, zones);
    Correspondence {
        provenance: Provenance::Approximate,
        entries,
    }
}

/// Best-effort centroid-to-zone assignment: containment in exactly one
/// bounding box wins; overlapping boxes resolve to the nearest zone center by
/// squared lon/lat distance; a centroid inside no box takes the nearest
/// center outright. Misassignment near shared borders is an accepted
/// trade-off of skipping true polygon intersection. Finer units absent from
/// `finer_centroids` (degenerate geometry upstream) produce no entry.
pub fn approximate_join(
    finer_centroids: &BTreeMap<String, LonLat>,
    zones: &[Zone],
) -> BTreeMap<String, String> {
    let mut entries = BTreeMap::new();
    if zones.is_empty() {
        return entries;
    }
    for (finer_id, centroid) in finer_centroids {
        let containing: Vec<&Zone> = zones
            .iter()
            .filter(|zone| zone.bbox.contains(*centroid))
            .collect();
        let candidates: Vec<&Zone> = if containing.is_empty() {
            zones.iter().collect()
        } else {
            containing
        };
        let mut best: Option<(&Zone, f64)> = None;
        for zone in candidates {
            let dist = squared_distance(*centroid, zone.center);
            if best.map_or(true, |(_, best_dist)| dist < best_dist) {
                best = Some((zone, dist));
            }
        }
        if let Some((zone, _)) = best {
            entries.insert(finer_id.clone(), zone.id.clone());
        }
    }
    entries
}
