use super::*;
use crate::fixtures::{empty, export_rows, make_temp_dir, num, sample_s1, text, write_xlsx};
use crate::model::table::{COPIES_PER_MLN, DELTA, RNP_HALF};

#[test]
fn test_locate_header_topmost_match() {
    let rows = vec![
        vec![text("Experiment"), text("Well Position")],
        vec![empty(), text("Well Position"), text("CT")],
        vec![text("Well Position")],
    ];
    assert_eq!(locate_header(&rows), Some(0));

    let rows = vec![
        vec![text("Block Type"), text("96-Well")],
        vec![],
        vec![num(1.0), text("Well Position")],
        vec![text("Well Position")],
    ];
    assert_eq!(locate_header(&rows), Some(2));
}

#[test]
fn test_locate_header_exact_match_only() {
    let rows = vec![
        vec![text("well position")],
        vec![text("Well Position ")],
        vec![text("Well Positions")],
    ];
    assert_eq!(locate_header(&rows), None);
    assert_eq!(locate_header(&[]), None);
}

#[test]
fn test_build_table_excludes_rows_above_header() {
    let rows = vec![
        vec![text("Experiment Name"), text("run 7")],
        vec![text("Well"), text("Well Position"), text("Sample Name")],
        vec![num(1.0), text("A1"), text("S1")],
        vec![empty(), empty(), empty()],
        vec![num(2.0), text("A2"), text("S1")],
    ];
    let table = build_table(&rows, 1);
    assert_eq!(table.columns, vec!["Well", "Well Position", "Sample Name"]);
    assert_eq!(table.n_rows(), 2);
    assert_eq!(table.rows[0][1], text("A1"));
    assert_eq!(table.rows[1][1], text("A2"));
}

#[test]
fn test_column_names_unnamed_and_duplicates() {
    let rows = vec![
        vec![text("Well Position"), empty(), text("CT"), text("CT"), num(3.0)],
        vec![text("A1"), text("x"), num(20.0), num(21.0), num(1.0)],
    ];
    let table = build_table(&rows, 0);
    assert_eq!(
        table.columns,
        vec!["Well Position", "Unnamed: 1", "CT", "CT.1", "3"]
    );
}

#[test]
fn test_shape_columns_drops_and_appends() {
    let rows = vec![
        vec![
            text("Well Position"),
            text("Target Color"),
            text("Sample Name"),
            text("NOAMP"),
        ],
        vec![text("A1"), text("red"), text("S1"), text("N")],
    ];
    let mut table = build_table(&rows, 0);
    let dropped = shape_columns(&mut table);

    assert_eq!(dropped, vec!["Target Color", "NOAMP"]);
    assert_eq!(
        table.columns,
        vec!["Well Position", "Sample Name", RNP_HALF, COPIES_PER_MLN, DELTA]
    );
    assert_eq!(
        table.rows[0],
        vec![text("A1"), text("S1"), empty(), empty(), empty()]
    );
}

#[test]
fn test_shape_columns_replaces_existing_derived() {
    let rows = vec![
        vec![text("Well Position"), text("Delta"), text("Sample Name")],
        vec![text("A1"), num(4.0), text("S1")],
    ];
    let mut table = build_table(&rows, 0);
    shape_columns(&mut table);
    assert_eq!(
        table.columns,
        vec!["Well Position", "Sample Name", RNP_HALF, COPIES_PER_MLN, DELTA]
    );
    assert_eq!(table.rows[0][4], empty());
}

#[test]
fn test_run_stage1_on_export() {
    let dir = make_temp_dir("stage1");
    let path = dir.join("run.xlsx");
    write_xlsx(&path, &[("Results", export_rows(&sample_s1()))]);

    let out = run_stage1(&path).unwrap();
    assert_eq!(out.header_sheet_row, 5);
    assert_eq!(out.table.n_rows(), 4);
    assert_eq!(out.dropped, vec!["Target Color", "CQCONF", "EXPFAIL", "NOAMP"]);
    for name in ["Target Color", "CQCONF", "EXPFAIL", "NOAMP"] {
        assert!(out.table.column(name).is_none());
    }
    let n = out.table.n_cols();
    assert_eq!(&out.table.columns[n - 3..], &[RNP_HALF, COPIES_PER_MLN, DELTA]);
}

#[test]
fn test_run_stage1_header_not_found() {
    let dir = make_temp_dir("stage1");
    let path = dir.join("no_header.xlsx");
    write_xlsx(
        &path,
        &[(
            "Sheet1",
            vec![
                vec![text("Sample Name"), text("Target Name")],
                vec![text("S1"), text("RNP")],
            ],
        )],
    );

    let err = run_stage1(&path).unwrap_err();
    assert!(matches!(err, InputError::HeaderNotFound));
    assert_eq!(
        err.to_string(),
        "Could not find 'Well Position' header in the file"
    );
}

#[test]
fn test_run_stage1_blank_first_column() {
    let dir = make_temp_dir("stage1");
    let path = dir.join("shifted.xlsx");
    let rows: Vec<Vec<CellValue>> = export_rows(&sample_s1())
        .into_iter()
        .map(|row| {
            if row.is_empty() {
                row
            } else {
                std::iter::once(empty()).chain(row).collect()
            }
        })
        .collect();
    write_xlsx(&path, &[("Results", rows)]);

    let out = run_stage1(&path).unwrap();
    assert_eq!(out.header_sheet_row, 5);
    assert_eq!(out.table.columns[..3], ["Unnamed: 0", "Well", "Well Position"]);
    assert_eq!(out.table.n_rows(), 4);
    assert_eq!(out.table.rows[0][0], empty());
    assert_eq!(out.table.rows[0][2], text("A1"));
}
