//! GeoJSON-shaped boundary features. Geometry is opaque to the engine except
//! for vertex extraction; everything else rides in the properties map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geometry::{vertex_centroid, BoundingBox, LonLat};

/// Property keys tried, in order, when extracting a tract identifier.
pub const TRACT_ID_KEYS: &[&str] = &["GEOID"];

/// Property keys tried, in order, when extracting a ZCTA identifier.
pub const ZIP_ID_KEYS: &[&str] = &["ZCTA5", "GEOID"];

/// Polygon or multi-polygon vertex lists, with GeoJSON coordinate nesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Polygon(Vec<Vec<[f64; 2]>>),
    MultiPolygon(Vec<Vec<Vec<[f64; 2]>>>),
}

impl Geometry {
    /// The outer-ring vertices; for a multi-part geometry, the part whose
    /// outer ring carries the most vertices. Empty for degenerate geometry.
    pub fn primary_vertices(&self) -> &[[f64; 2]] {
        match self {
            Geometry::Polygon(rings) => rings.first().map(Vec::as_slice).unwrap_or(&[]),
            Geometry::MultiPolygon(parts) => parts
                .iter()
                .filter_map(|rings| rings.first())
                .max_by_key(|ring| ring.len())
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }

    pub fn centroid(&self) -> Option<LonLat> {
        vertex_centroid(self.primary_vertices())
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_vertices(self.primary_vertices())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryFeature {
    #[serde(rename = "type", default = "feature_kind")]
    pub kind: String,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

fn feature_kind() -> String {
    "Feature".to_string()
}

impl BoundaryFeature {
    pub fn new(geometry: Option<Geometry>, properties: Map<String, Value>) -> Self {
        Self {
            kind: feature_kind(),
            geometry,
            properties,
        }
    }

    /// The first string-valued property among `keys`, untruncated.
    pub fn identifier(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|key| self.properties.get(*key).and_then(Value::as_str))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "collection_kind")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<BoundaryFeature>,
}

fn collection_kind() -> String {
    "FeatureCollection".to_string()
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self {
            kind: collection_kind(),
            features: Vec::new(),
        }
    }
}

impl FeatureCollection {
    pub fn new(features: Vec<BoundaryFeature>) -> Self {
        Self {
            kind: collection_kind(),
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
