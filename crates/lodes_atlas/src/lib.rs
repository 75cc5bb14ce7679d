pub mod boundary;
pub mod config;
pub mod engine;
pub mod geokey;
pub mod geometry;
pub mod sectors;

pub use boundary::{
    BoundaryFeature, FeatureCollection, Geometry, TRACT_ID_KEYS, ZIP_ID_KEYS,
};
pub use config::{
    AtlasConfig, ConfigError, RegionFilter, DEFAULT_JITTER_DEGREES, DEFAULT_MAX_BLOCK_POINTS,
};
pub use engine::{
    aggregate, approximate_join, assign_point, block_points, compute_statistics, jitter_seed,
    merge_boundaries, metric_keys, reference_totals, resolve, run_pipeline, sector_summary,
    zones_from_features, AtlasInput, AtlasOutput, BlockPoint, BlockRow, Correspondence,
    CrosswalkRow, GeoUnit, PipelineError, PipelineReport, Provenance, RawBlockRow,
    ReferenceTotals, Resolution, SectorStats, SectorSummaryRow, Zone, EMPTY_COLOR,
    EMPTY_DOMINANT,
};
pub use geokey::{truncate_id, GeoKey, GeoKeyError, BLOCK_WIDTH, TRACT_WIDTH};
pub use geometry::{squared_distance, vertex_centroid, BoundingBox, LonLat};
pub use sectors::{Sector, SectorCounts};
