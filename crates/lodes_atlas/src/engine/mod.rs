//! Multi-resolution geographic aggregation engine.
//!
//! This module is organized into submodules:
//! - `types`: resolutions, geographic units, per-unit statistics
//! - `aggregate`: raw-row grouping with exact integer summation
//! - `stats`: dominant sector, concentration, location quotients, summary
//! - `correspond`: tract→ZCTA correspondence (crosswalk or spatial join)
//! - `points`: deterministic block point placement
//! - `merge`: statistics → boundary property merge
//! - `pipeline`: one-shot batch run across all three resolutions

mod aggregate;
mod correspond;
mod merge;
mod pipeline;
mod points;
mod stats;
mod types;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, BlockRow, RawBlockRow};
pub use correspond::{
    approximate_join, resolve, zones_from_features, Correspondence, CrosswalkRow, Provenance, Zone,
};
pub use merge::{merge_boundaries, metric_keys, EMPTY_COLOR, EMPTY_DOMINANT};
pub use pipeline::{run_pipeline, AtlasInput, AtlasOutput, PipelineError, PipelineReport};
pub use points::{assign_point, block_points, jitter_seed, BlockPoint};
pub use stats::{compute_statistics, reference_totals, sector_summary, SectorSummaryRow};
pub use types::{GeoUnit, ReferenceTotals, Resolution, SectorStats};
