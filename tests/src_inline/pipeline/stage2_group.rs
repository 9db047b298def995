use super::*;
use crate::fixtures::{empty, num, table_from};
use crate::input::GroupKey;

#[test]
fn test_stable_group_order() {
    let table = table_from(&[
        ("S2", "KREC", empty(), empty()),
        ("S1", "KREC", empty(), empty()),
        ("S2", "RNP", empty(), empty()),
        ("S3", "RNP", empty(), empty()),
        ("S1", "RNP", empty(), empty()),
    ]);
    let out = run_stage2(&table).unwrap();
    let names: Vec<&str> = out.groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["S2", "S1", "S3"]);
    assert_eq!(out.groups[0].rows, vec![0, 2]);
    assert_eq!(out.groups[1].rows, vec![1, 4]);
    assert_eq!(out.groups[2].rows, vec![3]);
}

#[test]
fn test_marker_index_first_occurrence_wins() {
    let table = table_from(&[
        ("S1", "RNP", num(25.0), num(100.0)),
        ("S1", "KREC", num(30.0), num(10.0)),
        ("S1", "RNP", num(26.0), num(200.0)),
        ("S1", "SMN1", num(27.0), num(1.0)),
    ]);
    let out = run_stage2(&table).unwrap();
    let markers = &out.groups[0].markers;
    assert_eq!(markers.get(Marker::Rnp), Some(0));
    assert_eq!(markers.get(Marker::Krec), Some(1));
    assert_eq!(markers.get(Marker::Trec), None);
    assert_eq!(markers.duplicates(), &[(Marker::Rnp, 2)]);
}

#[test]
fn test_empty_sample_names_are_ungrouped() {
    let table = table_from(&[
        ("S1", "RNP", empty(), empty()),
        ("", "RNP", empty(), empty()),
        ("S1", "KREC", empty(), empty()),
    ]);
    let out = run_stage2(&table).unwrap();
    assert_eq!(out.groups.len(), 1);
    assert_eq!(out.groups[0].rows, vec![0, 2]);
    assert_eq!(out.ungrouped_rows, vec![1]);
}

#[test]
fn test_missing_sample_column_is_fatal() {
    let mut table = table_from(&[("S1", "RNP", empty(), empty())]);
    table.drop_column(SAMPLE_NAME);
    let err = run_stage2(&table).unwrap_err();
    assert!(matches!(err, InputError::MissingColumn(ref c) if c == SAMPLE_NAME));
}

#[test]
fn test_missing_target_column_yields_empty_index() {
    let mut table = table_from(&[("S1", "RNP", empty(), empty())]);
    table.drop_column(TARGET_NAME);
    let out = run_stage2(&table).unwrap();
    assert_eq!(out.groups[0].markers, MarkerIndex::default());
}

#[test]
fn test_numeric_sample_names_group_together() {
    let mut table = table_from(&[
        ("x", "RNP", empty(), empty()),
        ("x", "KREC", empty(), empty()),
    ]);
    table.rows[0][0] = num(1042.0);
    table.rows[1][0] = num(1042.0);
    let out = run_stage2(&table).unwrap();
    assert_eq!(out.groups.len(), 1);
    assert_eq!(out.groups[0].name, "1042");
    assert_eq!(
        sample_key(&table, 0, Some(0)),
        Some(GroupKey::Number("1042".to_string()))
    );
    assert_eq!(sample_key(&table, 0, None), None);
}

#[test]
fn test_numeric_and_text_sample_names_stay_apart() {
    let mut table = table_from(&[
        ("1042", "RNP", empty(), empty()),
        ("1042", "KREC", empty(), empty()),
        ("1042", "TREC", empty(), empty()),
    ]);
    table.rows[1][0] = num(1042.0);
    let out = run_stage2(&table).unwrap();
    assert_eq!(out.groups.len(), 2);
    assert_eq!(out.groups[0].name, "1042");
    assert_eq!(out.groups[0].rows, vec![0, 2]);
    assert_eq!(out.groups[1].name, "1042");
    assert_eq!(out.groups[1].rows, vec![1]);
    assert_eq!(out.groups[1].markers.get(Marker::Rnp), None);
}
