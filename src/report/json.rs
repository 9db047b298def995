use std::fs;
use std::path::Path;

use crate::report::RunReport;

pub fn render_run_json(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

pub fn write_run_json(report: &RunReport, path: &Path) -> std::io::Result<()> {
    let json = render_run_json(report).map_err(std::io::Error::other)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json + "\n")
}
