use serde::{Deserialize, Serialize};

/// A longitude/latitude pair in degrees (WGS84, lon first as in GeoJSON).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Axis-aligned bounding box over a vertex set, inclusive on all edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn from_vertices(vertices: &[[f64; 2]]) -> Option<Self> {
        let first = vertices.first()?;
        let mut bbox = BoundingBox {
            min_lon: first[0],
            min_lat: first[1],
            max_lon: first[0],
            max_lat: first[1],
        };
        for vertex in &vertices[1..] {
            bbox.min_lon = bbox.min_lon.min(vertex[0]);
            bbox.min_lat = bbox.min_lat.min(vertex[1]);
            bbox.max_lon = bbox.max_lon.max(vertex[0]);
            bbox.max_lat = bbox.max_lat.max(vertex[1]);
        }
        Some(bbox)
    }

    pub fn contains(&self, point: LonLat) -> bool {
        point.lon >= self.min_lon
            && point.lon <= self.max_lon
            && point.lat >= self.min_lat
            && point.lat <= self.max_lat
    }
}

/// Arithmetic mean of a vertex set. This is a vertex centroid, not an
/// area-weighted one: it biases toward stretches with denser vertex sampling.
/// Returns `None` for an empty vertex set.
pub fn vertex_centroid(vertices: &[[f64; 2]]) -> Option<LonLat> {
    if vertices.is_empty() {
        return None;
    }
    let mut lon_sum = 0.0;
    let mut lat_sum = 0.0;
    for vertex in vertices {
        lon_sum += vertex[0];
        lat_sum += vertex[1];
    }
    let n = vertices.len() as f64;
    Some(LonLat::new(lon_sum / n, lat_sum / n))
}

/// Squared planar distance in (lon, lat) space. Not geodesic; usable for
/// nearest-center comparisons at county scale only.
pub fn squared_distance(a: LonLat, b: LonLat) -> f64 {
    let d_lon = a.lon - b.lon;
    let d_lat = a.lat - b.lat;
    d_lon * d_lon + d_lat * d_lat
}
