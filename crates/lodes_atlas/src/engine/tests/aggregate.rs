use super::*;

#[test]
fn tract_grouping_conserves_every_sector_column() {
    let rows = vec![
        row("060370001001000", 10, &[(Sector::Cns16, 7), (Sector::Cns07, 3)]),
        row("060370001001001", 5, &[(Sector::Cns16, 5)]),
        row("060370002002000", 8, &[(Sector::Cns04, 8)]),
    ];
    let tracts = aggregate(&rows, |row| Some(row.key.tract().to_string()));
    assert_eq!(tracts.len(), 2);

    let a = &tracts["06037000100"];
    assert_eq!(a.total_count, 15);
    assert_eq!(a.sectors.get(Sector::Cns16), 12);
    assert_eq!(a.sectors.get(Sector::Cns07), 3);

    let b = &tracts["06037000200"];
    assert_eq!(b.total_count, 8);
    assert_eq!(b.sectors.get(Sector::Cns04), 8);

    // Parent sums equal the sums over raw child rows for every sector.
    for sector in Sector::ALL {
        let child_sum: u64 = rows
            .iter()
            .filter(|row| row.key.tract() == "06037000100")
            .map(|row| row.sectors.get(sector))
            .sum();
        assert_eq!(a.sectors.get(sector), child_sum, "sector {sector}");
    }
    let child_total: u64 = rows
        .iter()
        .filter(|row| row.key.tract() == "06037000100")
        .map(|row| row.reference_total)
        .sum();
    assert_eq!(a.total_count, child_total);
}

#[test]
fn zero_total_groups_are_kept() {
    let rows = vec![row("060370001001000", 0, &[])];
    let tracts = aggregate(&rows, |row| Some(row.key.tract().to_string()));
    assert_eq!(tracts.len(), 1);
    let unit = &tracts["06037000100"];
    assert_eq!(unit.total_count, 0);
    assert_eq!(unit.sectors.total(), 0);
    assert!(unit.stats.is_none());
}

#[test]
fn rows_without_a_group_key_are_left_out() {
    let rows = vec![
        row("060370001001000", 10, &[(Sector::Cns16, 10)]),
        row("060370002002000", 20, &[(Sector::Cns07, 20)]),
    ];
    let units = aggregate(&rows, |row| {
        (row.key.tract() == "06037000100").then(|| "kept".to_string())
    });
    assert_eq!(units.len(), 1);
    assert_eq!(units["kept"].total_count, 10);
}

#[test]
fn reference_total_may_diverge_from_sector_sum() {
    // The source's reference column and sector columns come from different
    // tabulations; the aggregator must not reconcile them.
    let rows = vec![row("060370001001000", 100, &[(Sector::Cns16, 40)])];
    let tracts = aggregate(&rows, |row| Some(row.key.tract().to_string()));
    let unit = &tracts["06037000100"];
    assert_eq!(unit.total_count, 100);
    assert_eq!(unit.sectors.total(), 40);
}

#[test]
fn raw_rows_decode_before_grouping() {
    let raw = raw_row("60370001001000", 10, &[(Sector::Cns16, 10)]);
    let decoded = BlockRow::from_raw(&raw).expect("decode");
    assert_eq!(decoded.key.block(), "060370001001000");
    assert_eq!(decoded.sectors.get(Sector::Cns16), 10);

    let malformed = raw_row("not-a-geocode", 10, &[]);
    assert!(BlockRow::from_raw(&malformed).is_err());
}
