use crate::report::RunReport;

pub fn render_report_text(report: &RunReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("Output: {}\n", report.output));
    out.push_str(&format!(
        "Header row: {} (sheet '{}')\n",
        report.header_row, report.sheet
    ));
    out.push_str(&format!(
        "Rows: {}  Samples: {}\n",
        report.n_rows, report.n_samples
    ));
    if !report.samples_without_rnp.is_empty() {
        out.push_str(&format!(
            "Samples without RNP: {}\n",
            report.samples_without_rnp.join(", ")
        ));
    }
    if !report.duplicate_markers.is_empty() {
        out.push_str(&format!(
            "Duplicate marker rows ignored: {}\n",
            report.duplicate_markers.len()
        ));
    }

    if report.highlighting_skipped {
        out.push_str("Highlighting: skipped (annotation columns missing)\n");
    } else {
        let parts = report
            .highlighted
            .iter()
            .map(|(name, count)| format!("{name}={count}"))
            .collect::<Vec<_>>();
        out.push_str(&format!("Highlighted: {}\n", parts.join(", ")));
    }

    out
}
