use super::*;
use crate::config::AtlasConfig;

fn la_rows() -> Vec<RawBlockRow> {
    vec![
        raw_row("060370001001000", 10, &[(Sector::Cns16, 10)]),
        raw_row("060370001001001", 5, &[(Sector::Cns07, 5)]),
        raw_row("060370002001000", 20, &[(Sector::Cns07, 20)]),
        // Undecodable geocode and an Orange County block; both are dropped.
        raw_row("not-a-geocode", 9, &[(Sector::Cns01, 9)]),
        raw_row("060590001001000", 7, &[(Sector::Cns01, 7)]),
    ]
}

fn tract_boundaries() -> FeatureCollection {
    FeatureCollection::new(vec![
        polygon_feature("GEOID", "06037000100", square_ring(-118.3, 34.0, 0.05)),
        polygon_feature("GEOID", "06037000200", square_ring(-118.1, 34.2, 0.05)),
    ])
}

fn zip_boundaries() -> FeatureCollection {
    FeatureCollection::new(vec![
        polygon_feature("ZCTA5", "90001", square_ring(-118.3, 34.0, 0.05)),
        polygon_feature("ZCTA5", "90002", square_ring(-118.1, 34.2, 0.05)),
    ])
}

fn crosswalk_rows() -> Vec<CrosswalkRow> {
    vec![
        CrosswalkRow {
            finer_id: "06037000100".to_string(),
            coarser_id: "90001".to_string(),
        },
        CrosswalkRow {
            finer_id: "06037000200".to_string(),
            coarser_id: "90002".to_string(),
        },
    ]
}

#[test]
fn full_run_with_crosswalk_is_authoritative() {
    let input = AtlasInput {
        rows: la_rows(),
        crosswalk: crosswalk_rows(),
        tract_boundaries: tract_boundaries(),
        zip_boundaries: zip_boundaries(),
    };
    let output = run_pipeline(input, &AtlasConfig::default()).expect("pipeline");

    let report = &output.report;
    assert_eq!(report.block_units, 3);
    assert_eq!(report.tract_units, 2);
    assert_eq!(report.zip_units, 2);
    assert_eq!(report.malformed_keys, 1);
    assert_eq!(report.out_of_region, 1);
    assert_eq!(report.unusable_boundaries, 0);
    assert_eq!(report.correspondence, Some(Provenance::Authoritative));
    assert_eq!(report.unresolved_tracts, 0);
    assert_eq!(report.matched_tract_features, 2);
    assert_eq!(report.matched_zip_features, 2);
    assert_eq!(report.block_points, 3);

    // ZIP totals come from the raw block rows routed through the tract map.
    assert_eq!(output.zips["90001"].total_count, 15);
    assert_eq!(output.zips["90001"].sectors.get(Sector::Cns16), 10);
    assert_eq!(output.zips["90002"].total_count, 20);

    assert_eq!(output.summary.len(), Sector::COUNT);
    assert_eq!(output.summary[0].sector, Sector::Cns07);
    assert_eq!(output.summary[0].total_count, 25);
}

#[test]
fn missing_crosswalk_falls_back_to_the_spatial_join() {
    let input = AtlasInput {
        rows: la_rows(),
        crosswalk: Vec::new(),
        tract_boundaries: tract_boundaries(),
        zip_boundaries: zip_boundaries(),
    };
    let output = run_pipeline(input, &AtlasConfig::default()).expect("pipeline");

    assert_eq!(output.report.correspondence, Some(Provenance::Approximate));
    // Each tract centroid sits inside exactly one ZIP box, so the fallback
    // reproduces the crosswalk assignment.
    assert_eq!(output.zips["90001"].total_count, 15);
    assert_eq!(output.zips["90002"].total_count, 20);
}

#[test]
fn merged_features_carry_the_full_metric_schema() {
    let mut zips = zip_boundaries();
    // A ZIP nothing maps to still leaves the merge with a complete record.
    zips.features.push(polygon_feature(
        "ZCTA5",
        "99999",
        square_ring(-110.0, 40.0, 0.05),
    ));
    let input = AtlasInput {
        rows: la_rows(),
        crosswalk: crosswalk_rows(),
        tract_boundaries: tract_boundaries(),
        zip_boundaries: zips,
    };
    let output = run_pipeline(input, &AtlasConfig::default()).expect("pipeline");

    assert_eq!(output.report.matched_zip_features, 2);
    let keys = metric_keys();
    for feature in output
        .tract_boundaries
        .features
        .iter()
        .chain(output.zip_boundaries.features.iter())
    {
        for key in &keys {
            assert!(
                matches!(feature.properties.get(key), Some(value) if !value.is_null()),
                "missing or null {key}"
            );
        }
    }
    let unmatched = &output.zip_boundaries.features[2].properties;
    assert_eq!(unmatched["total_jobs"], 0);
    assert_eq!(unmatched["dominant_sector"], EMPTY_DOMINANT);
}

#[test]
fn unusable_boundaries_are_counted_not_fatal() {
    let mut tracts = tract_boundaries();
    tracts
        .features
        .push(polygon_feature("GEOID", "06037000300", vec![]));
    tracts.features.push(BoundaryFeature::new(
        Some(Geometry::Polygon(vec![square_ring(-118.2, 34.1, 0.05)])),
        Map::new(),
    ));
    let input = AtlasInput {
        rows: la_rows(),
        crosswalk: crosswalk_rows(),
        tract_boundaries: tracts,
        zip_boundaries: zip_boundaries(),
    };
    let output = run_pipeline(input, &AtlasConfig::default()).expect("pipeline");
    assert_eq!(output.report.unusable_boundaries, 2);
    assert_eq!(output.report.matched_tract_features, 2);
}

#[test]
fn point_cap_keeps_the_largest_blocks() {
    let config = AtlasConfig {
        max_block_points: 2,
        ..AtlasConfig::default()
    };
    let input = AtlasInput {
        rows: la_rows(),
        crosswalk: crosswalk_rows(),
        tract_boundaries: tract_boundaries(),
        zip_boundaries: zip_boundaries(),
    };
    let output = run_pipeline(input, &config).expect("pipeline");
    assert_eq!(output.report.block_points, 2);
    assert_eq!(output.points[0].id, "060370002001000");
    assert_eq!(output.points[0].total_count, 20);
    assert_eq!(output.points[1].id, "060370001001000");
}

#[test]
fn empty_input_fails_at_the_block_resolution() {
    let result = run_pipeline(AtlasInput::default(), &AtlasConfig::default());
    assert_eq!(
        result,
        Err(PipelineError::EmptyResolution {
            resolution: Resolution::Block,
        })
    );
}

#[test]
fn no_crosswalk_and_no_zip_boundaries_fails_at_the_zip_resolution() {
    let input = AtlasInput {
        rows: la_rows(),
        crosswalk: Vec::new(),
        tract_boundaries: tract_boundaries(),
        zip_boundaries: FeatureCollection::default(),
    };
    let result = run_pipeline(input, &AtlasConfig::default());
    assert_eq!(
        result,
        Err(PipelineError::EmptyResolution {
            resolution: Resolution::Zip,
        })
    );
}

#[test]
fn output_is_deterministic_across_runs() {
    let build = || AtlasInput {
        rows: la_rows(),
        crosswalk: Vec::new(),
        tract_boundaries: tract_boundaries(),
        zip_boundaries: zip_boundaries(),
    };
    let first = run_pipeline(build(), &AtlasConfig::default()).expect("pipeline");
    let second = run_pipeline(build(), &AtlasConfig::default()).expect("pipeline");
    assert_eq!(first, second);
}
