use super::{analyze, column_gaps, match_reference, museum_counts, LimitationKind, MuseumCounts};
use crate::error::PlannerError;
use crate::schema::{EntityTable, Row, SeedTables, TableKind, REFERENCES};
use std::path::PathBuf;

fn table(headers: &[&str], rows: &[&[&str]]) -> EntityTable {
    let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let rows = rows
        .iter()
        .map(|values| {
            headers
                .iter()
                .cloned()
                .zip(values.iter().map(|v| v.to_string()))
                .collect::<Row>()
        })
        .collect();
    EntityTable::new(headers, rows)
}

fn seed() -> SeedTables {
    SeedTables::new(PathBuf::from("seed"))
        .with_table(
            TableKind::Museums,
            table(
                &["museum_id", "museum_name", "country"],
                &[
                    &["moma-new-york-us", "MoMA", "United States"],
                    &["ngv-melbourne-au", "NGV", "Australia"],
                ],
            ),
        )
        .with_table(
            TableKind::Artworks,
            table(
                &["artwork_id", "title", "artist_id", "museum_id"],
                &[
                    &["a-1", "Starry Night", "vg", "moma-new-york-us"],
                    &["a-2", "", "unknown-artist", "moma-new-york-us"],
                    &["a-3", "Untitled", "", "ngv-melbourne-au"],
                    &["a-4", "Sunflowers", "vg", "elsewhere"],
                ],
            ),
        )
        .with_table(TableKind::Artists, table(&["artist_id", "name"], &[&["vg", "Van Gogh"]]))
        .with_table(
            TableKind::Exhibitions,
            table(&["exhibition_id", "title"], &[&["e-1", "Retrospective"]]),
        )
}

#[test]
fn absent_column_counts_every_row_as_missing() {
    let rows: Vec<Vec<&str>> = (0..590).map(|_| vec!["x"]).collect();
    let row_refs: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
    let artworks = table(&["artwork_id"], &row_refs);

    let (gaps, limitations) = column_gaps(TableKind::Artworks, &artworks);
    let medium = gaps.iter().find(|g| g.column == "medium").expect("medium gap");
    assert!(!medium.present);
    assert_eq!(medium.total_rows, 590);
    assert_eq!(medium.missing_count, 590);
    assert_eq!(medium.missing_ratio, Some(1.0));
    assert!(limitations
        .iter()
        .any(|l| l.column == "medium" && l.kind == LimitationKind::MissingColumn));
}

#[test]
fn empty_table_reports_undefined_ratio() {
    let exhibitions = table(&["exhibition_id"], &[]);
    let (gaps, limitations) = column_gaps(TableKind::Exhibitions, &exhibitions);

    let present = gaps.iter().find(|g| g.column == "exhibition_id").expect("id gap");
    assert_eq!(present.total_rows, 0);
    assert_eq!(present.missing_ratio, None);
    // Absent columns stay distinguishable from evaluated ones on empty tables.
    let absent = gaps.iter().find(|g| g.column == "title").expect("title gap");
    assert!(!absent.present);
    assert_eq!(absent.missing_ratio, None);
    assert_eq!(limitations.len(), TableKind::Exhibitions.declared_columns().len() - 1);
}

#[test]
fn extra_columns_are_reported_but_not_declared() {
    let artists = table(&["artist_id", "wikidata_qid"], &[&["vg", ""]]);
    let (gaps, _) = column_gaps(TableKind::Artists, &artists);
    let extra = gaps.iter().find(|g| g.column == "wikidata_qid").expect("extra");
    assert!(!extra.declared);
    assert_eq!(extra.missing_count, 1);
}

#[test]
fn artist_matches_require_non_empty_resolving_values() {
    let tables = seed();
    let (stat, limitation) = match_reference(&tables, &REFERENCES[0]).expect("match");
    assert!(limitation.is_none());
    assert_eq!(stat.reference, "artworks.artist_id -> artists.artist_id");
    assert_eq!(stat.total_rows, 4);
    assert_eq!(stat.matched_count, 2);
    assert_eq!(stat.match_rate, Some(0.5));
}

#[test]
fn unevaluable_reference_is_a_limitation() {
    let tables = seed();
    // exhibitions has no museum_id column
    let (stat, limitation) = match_reference(&tables, &REFERENCES[2]).expect("match");
    assert_eq!(stat.match_rate, None);
    let limitation = limitation.expect("limitation");
    assert_eq!(limitation.kind, LimitationKind::MissingReference);
    assert_eq!(limitation.table, TableKind::Exhibitions);
}

#[test]
fn match_rates_stay_within_unit_interval() {
    let report = analyze(&seed()).expect("analyze");
    assert_eq!(report.tables.len(), 4);
    for stat in &report.matches {
        if let Some(rate) = stat.match_rate {
            assert!((0.0..=1.0).contains(&rate), "{} out of range", stat.reference);
        }
        assert!(stat.matched_count <= stat.total_rows);
    }
}

#[test]
fn fully_resolving_reference_has_rate_one() {
    let tables = seed().with_table(
        TableKind::Artworks,
        table(&["artist_id"], &[&["vg"], &["vg"]]),
    );
    let report = analyze(&tables).expect("analyze");
    let stat = report.match_for(&REFERENCES[0]).expect("artist match");
    assert_eq!(stat.match_rate, Some(1.0));
}

#[test]
fn analyze_fails_on_missing_table() {
    let tables = SeedTables::new(PathBuf::from("seed"))
        .with_table(TableKind::Museums, table(&["museum_id"], &[]));
    let err = analyze(&tables).unwrap_err();
    assert!(matches!(err, PlannerError::InputMissing { .. }));
}

#[test]
fn counts_are_per_museum_and_unavailable_without_key() {
    let (counts, limitations) = museum_counts(&seed()).expect("counts");
    assert_eq!(
        counts["moma-new-york-us"],
        MuseumCounts {
            artworks: Some(2),
            exhibitions: None
        }
    );
    assert_eq!(counts["ngv-melbourne-au"].artworks, Some(1));
    assert!(!counts.contains_key("elsewhere"));
    assert_eq!(limitations.len(), 1);
    assert_eq!(limitations[0].kind, LimitationKind::MissingKey);
}

#[test]
fn high_missing_columns_sorted_by_missingness() {
    let report = analyze(&seed()).expect("analyze");
    let tasks = report.high_missing_columns(20.0);
    assert!(!tasks.is_empty());
    assert!(tasks.iter().all(|t| t.missingness_pct >= 20.0));
    for pair in tasks.windows(2) {
        assert!(pair[0].missingness_pct >= pair[1].missingness_pct);
    }
    // artworks.title is 25% missing
    assert!(tasks
        .iter()
        .any(|t| t.table == TableKind::Artworks && t.column == "title"));
}
