//! One-shot batch pipeline: decode → aggregate → statistics per resolution,
//! correspondence for the ZIP level, boundary merge, and point placement.
//! Single-threaded and CPU-bound; all inputs are already materialized by
//! collaborators before the run starts.

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::boundary::{FeatureCollection, TRACT_ID_KEYS, ZIP_ID_KEYS};
use crate::config::AtlasConfig;
use crate::geokey::{self};
use crate::geometry::LonLat;

use super::aggregate::{aggregate, BlockRow, RawBlockRow};
use super::correspond::{resolve, zones_from_features, CrosswalkRow, Provenance};
use super::merge::merge_boundaries;
use super::points::{block_points, BlockPoint};
use super::stats::{compute_statistics, sector_summary, SectorSummaryRow};
use super::types::{GeoUnit, Resolution};

/// Everything the engine consumes. An empty crosswalk means "unavailable"
/// and triggers the approximate spatial join for the ZIP resolution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasInput {
    pub rows: Vec<RawBlockRow>,
    pub crosswalk: Vec<CrosswalkRow>,
    pub tract_boundaries: FeatureCollection,
    pub zip_boundaries: FeatureCollection,
}

/// Everything the engine produces for downstream rendering and reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasOutput {
    pub blocks: BTreeMap<String, GeoUnit>,
    pub tracts: BTreeMap<String, GeoUnit>,
    pub zips: BTreeMap<String, GeoUnit>,
    pub tract_boundaries: FeatureCollection,
    pub zip_boundaries: FeatureCollection,
    pub points: Vec<BlockPoint>,
    pub summary: Vec<SectorSummaryRow>,
    pub report: PipelineReport,
}

/// What actually happened during a run: unit counts, per-unit drops, and
/// which correspondence strategy produced the ZIP level (approximate joins
/// are materially less accurate).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PipelineReport {
    pub block_units: usize,
    pub tract_units: usize,
    pub zip_units: usize,
    pub malformed_keys: usize,
    pub out_of_region: usize,
    pub unusable_boundaries: usize,
    pub correspondence: Option<Provenance>,
    pub unresolved_tracts: usize,
    pub matched_tract_features: usize,
    pub matched_zip_features: usize,
    pub block_points: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// A whole resolution ended with zero units; its statistics would be
    /// meaningless, so the failure is escalated instead of producing an
    /// empty map.
    EmptyResolution { resolution: Resolution },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::EmptyResolution { resolution } => {
                write!(f, "no units aggregated at the {resolution} resolution")
            }
        }
    }
}

impl Error for PipelineError {}

/// Runs the whole pipeline once. Failures local to one row or feature are
/// logged, counted in the report, and skipped; only a resolution-level
/// failure aborts the run.
pub fn run_pipeline(input: AtlasInput, config: &AtlasConfig) -> Result<AtlasOutput, PipelineError> {
    let config = config.clone().sanitized();
    let mut report = PipelineReport::default();

    // Decode geocodes and filter to the region of interest.
    let mut rows: Vec<BlockRow> = Vec::with_capacity(input.rows.len());
    for raw in &input.rows {
        let row = match BlockRow::from_raw(raw) {
            Ok(row) => row,
            Err(err) => {
                log::warn!("malformed geocode {:?}: {err}; row skipped", raw.geo_id);
                report.malformed_keys += 1;
                continue;
            }
        };
        if !config.region.matches(&row.key) {
            report.out_of_region += 1;
            continue;
        }
        rows.push(row);
    }

    // Block resolution: one unit per geocode.
    let mut blocks = aggregate(&rows, |row| Some(row.key.block().to_string()));
    if blocks.is_empty() {
        return Err(PipelineError::EmptyResolution {
            resolution: Resolution::Block,
        });
    }
    compute_statistics(&mut blocks);
    report.block_units = blocks.len();

    // Tract resolution: group by the 11-character prefix.
    let mut tracts = aggregate(&rows, |row| Some(row.key.tract().to_string()));
    if tracts.is_empty() {
        return Err(PipelineError::EmptyResolution {
            resolution: Resolution::Tract,
        });
    }
    compute_statistics(&mut tracts);
    report.tract_units = tracts.len();

    // Tract centroids from boundary geometry (vertex mean), used for both
    // the spatial-join fallback and block point placement.
    let mut tract_centroids: BTreeMap<String, LonLat> = BTreeMap::new();
    for feature in &input.tract_boundaries.features {
        let Some(raw_id) = feature.identifier(TRACT_ID_KEYS) else {
            log::warn!("tract boundary without GEOID; skipped");
            report.unusable_boundaries += 1;
            continue;
        };
        let id = geokey::truncate_id(raw_id, geokey::TRACT_WIDTH).to_string();
        match feature.geometry.as_ref().and_then(|g| g.centroid()) {
            Some(center) => {
                tract_centroids.insert(id, center);
            }
            None => {
                log::warn!("degenerate geometry for tract {id}; centroid unavailable");
                report.unusable_boundaries += 1;
            }
        }
    }

    // Tract → ZIP correspondence, then ZIP aggregation over the raw rows.
    let finer_ids: BTreeSet<String> = tracts.keys().cloned().collect();
    let finer_centroids: BTreeMap<String, LonLat> = tract_centroids
        .iter()
        .filter(|(id, _)| finer_ids.contains(*id))
        .map(|(id, center)| (id.clone(), *center))
        .collect();
    let zones = zones_from_features(
        &input.zip_boundaries.features,
        ZIP_ID_KEYS,
        Resolution::Zip.id_width(),
    );
    report.unusable_boundaries += input
        .zip_boundaries
        .features
        .len()
        .saturating_sub(zones.len());
    let correspondence = resolve(&finer_ids, &finer_centroids, &input.crosswalk, &zones);
    report.correspondence = Some(correspondence.provenance);
    report.unresolved_tracts = finer_ids
        .iter()
        .filter(|id| correspondence.get(id).is_none())
        .count();

    let mut zips = aggregate(&rows, |row| {
        correspondence.get(row.key.tract()).map(str::to_string)
    });
    if zips.is_empty() {
        return Err(PipelineError::EmptyResolution {
            resolution: Resolution::Zip,
        });
    }
    compute_statistics(&mut zips);
    report.zip_units = zips.len();

    // Boundary merges mutate the collections that came in with the input.
    let mut tract_boundaries = input.tract_boundaries;
    report.matched_tract_features = merge_boundaries(
        &mut tract_boundaries.features,
        &tracts,
        Resolution::Tract,
        TRACT_ID_KEYS,
    );
    let mut zip_boundaries = input.zip_boundaries;
    report.matched_zip_features = merge_boundaries(
        &mut zip_boundaries.features,
        &zips,
        Resolution::Zip,
        ZIP_ID_KEYS,
    );

    let points = block_points(
        &blocks,
        &tract_centroids,
        config.jitter_degrees,
        config.max_block_points,
    );
    report.block_points = points.len();

    let summary = sector_summary(&tracts);

    Ok(AtlasOutput {
        blocks,
        tracts,
        zips,
        tract_boundaries,
        zip_boundaries,
        points,
        summary,
        report,
    })
}
