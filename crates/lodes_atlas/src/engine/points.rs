//! Deterministic block point placement: tract centroid plus bounded jitter
//! seeded from the block identifier.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geokey;
use crate::geometry::LonLat;
use crate::sectors::Sector;

use super::types::GeoUnit;

/// One block-level rendering point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockPoint {
    pub id: String,
    pub lon: f64,
    pub lat: f64,
    pub total_count: u64,
    pub dominant: Sector,
    pub dominant_count: u64,
}

/// Jitter seed for a block: the first eight bytes of the blake3 hash of its
/// identifier, little-endian. A pure function of the id, so re-running
/// placement over the same dataset reproduces identical points. No shared
/// generator state exists between blocks.
pub fn jitter_seed(block_id: &str) -> u64 {
    let hash = blake3::hash(block_id.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

// Top 53 bits to a float in [0, 1).
fn unit_interval(bits: u64) -> f64 {
    (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Places a block at its owning tract's vertex-mean centroid plus a uniform
/// jitter in `[-jitter_degrees, +jitter_degrees]` per axis. Returns `None`
/// when no centroid is known for the tract; the block is then dropped from
/// point output only.
pub fn assign_point(
    block_id: &str,
    tract_id: &str,
    tract_centroids: &BTreeMap<String, LonLat>,
    jitter_degrees: f64,
) -> Option<LonLat> {
    let Some(center) = tract_centroids.get(tract_id) else {
        log::debug!("block {block_id}: no centroid for tract {tract_id}; point dropped");
        return None;
    };
    let seed = jitter_seed(block_id);
    let lon_draw = unit_interval(splitmix64(seed));
    let lat_draw = unit_interval(splitmix64(splitmix64(seed)));
    let jitter = jitter_degrees.abs();
    Some(LonLat::new(
        center.lon + (2.0 * lon_draw - 1.0) * jitter,
        center.lat + (2.0 * lat_draw - 1.0) * jitter,
    ))
}

/// Builds the block point list: zero-count blocks are excluded (they remain
/// in the unit table), placement is deterministic per block, and the list is
/// capped to the `max_points` largest blocks by total count.
pub fn block_points(
    blocks: &BTreeMap<String, GeoUnit>,
    tract_centroids: &BTreeMap<String, LonLat>,
    jitter_degrees: f64,
    max_points: usize,
) -> Vec<BlockPoint> {
    let mut points = Vec::new();
    for unit in blocks.values() {
        if unit.total_count == 0 {
            continue;
        }
        let tract_id = geokey::truncate_id(&unit.id, geokey::TRACT_WIDTH);
        let Some(pos) = assign_point(&unit.id, tract_id, tract_centroids, jitter_degrees) else {
            continue;
        };
        let (dominant, dominant_count) = unit.sectors.dominant();
        points.push(BlockPoint {
            id: unit.id.clone(),
            lon: pos.lon,
            lat: pos.lat,
            total_count: unit.total_count,
            dominant,
            dominant_count,
        });
    }
    points.sort_by(|a, b| {
        b.total_count
            .cmp(&a.total_count)
            .then_with(|| a.id.cmp(&b.id))
    });
    points.truncate(max_points);
    points
}
