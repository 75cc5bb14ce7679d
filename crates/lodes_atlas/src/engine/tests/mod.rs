//! Tests for the aggregation engine.

use super::*;
use crate::boundary::{BoundaryFeature, FeatureCollection, Geometry};
use crate::geokey::GeoKey;
use crate::geometry::LonLat;
use crate::sectors::{Sector, SectorCounts};
use serde_json::{Map, Value};

mod aggregate;
mod pipeline;

fn counts(pairs: &[(Sector, u64)]) -> SectorCounts {
    let mut counts = SectorCounts::new();
    for (sector, count) in pairs {
        counts.add(*sector, *count);
    }
    counts
}

fn row(geo_id: &str, reference_total: u64, pairs: &[(Sector, u64)]) -> BlockRow {
    BlockRow {
        key: GeoKey::parse(geo_id).expect("valid geocode"),
        reference_total,
        sectors: counts(pairs),
    }
}

fn raw_row(geo_id: &str, reference_total: u64, pairs: &[(Sector, u64)]) -> RawBlockRow {
    RawBlockRow {
        geo_id: geo_id.to_string(),
        reference_total,
        sector_counts: pairs.iter().copied().collect(),
    }
}

// Unclosed square ring centered on (lon, lat): its vertex mean is the center
// and its bounding box spans half_width on each side.
fn square_ring(lon: f64, lat: f64, half_width: f64) -> Vec<[f64; 2]> {
    vec![
        [lon - half_width, lat - half_width],
        [lon + half_width, lat - half_width],
        [lon + half_width, lat + half_width],
        [lon - half_width, lat + half_width],
    ]
}

fn polygon_feature(id_key: &str, id: &str, ring: Vec<[f64; 2]>) -> BoundaryFeature {
    let mut properties = Map::new();
    properties.insert(id_key.to_string(), Value::from(id));
    BoundaryFeature::new(Some(Geometry::Polygon(vec![ring])), properties)
}
