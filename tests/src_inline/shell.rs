use super::*;
use crate::fixtures::{export_rows, make_temp_dir, sample_s1, write_xlsx};

#[test]
fn test_strip_drop_braces() {
    assert_eq!(strip_drop_braces("{C:/runs/plate 1.xlsx}"), "C:/runs/plate 1.xlsx");
    assert_eq!(strip_drop_braces("/runs/plate.xlsx"), "/runs/plate.xlsx");
    assert_eq!(strip_drop_braces("{half.xlsx"), "{half.xlsx");
}

#[test]
fn test_accept_path() {
    assert_eq!(
        accept_path("{/runs/Plate 1.XLSX}").unwrap(),
        PathBuf::from("/runs/Plate 1.XLSX")
    );
    assert_eq!(accept_path("old.xls").unwrap(), PathBuf::from("old.xls"));
    assert_eq!(
        accept_path("results.csv"),
        Err(ShellError::NotSpreadsheet("results.csv".to_string()))
    );
    assert!(!is_spreadsheet_path("xlsx"));
}

#[test]
fn test_processing_slot_single_flight() {
    let slot = ProcessingSlot::new();
    let guard = slot.try_acquire().unwrap();
    assert!(slot.is_busy());
    assert!(slot.try_acquire().is_none());
    drop(guard);
    assert!(!slot.is_busy());
    assert!(slot.try_acquire().is_some());
}

#[test]
fn test_spawn_process_reports_result() {
    let dir = make_temp_dir("shell");
    let input = dir.join("plate.xlsx");
    write_xlsx(&input, &[("Results", export_rows(&sample_s1()))]);

    let slot = ProcessingSlot::new();
    let job = ProcessJob {
        input: input.clone(),
        output: None,
        thresholds: Thresholds::default_v1(),
    };
    let handle = spawn_process(&slot, job.clone()).unwrap();
    let report = handle.join().unwrap().unwrap();
    assert_eq!(PathBuf::from(report.output), dir.join("plate_processed.xlsx"));
    assert!(!slot.is_busy());

    let _held = slot.try_acquire().unwrap();
    assert_eq!(spawn_process(&slot, job).unwrap_err(), ShellError::Busy);
}

#[test]
fn test_spawn_process_error_message() {
    let dir = make_temp_dir("shell");
    let input = dir.join("raw.xlsx");
    write_xlsx(&input, &[("Sheet1", vec![])]);

    let slot = ProcessingSlot::new();
    let job = ProcessJob {
        input,
        output: None,
        thresholds: Thresholds::default_v1(),
    };
    let err = spawn_process(&slot, job).unwrap().join().unwrap().unwrap_err();
    assert_eq!(err, "Could not find 'Well Position' header in the file");
}
