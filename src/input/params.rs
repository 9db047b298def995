use std::path::Path;

use crate::input::{CellValue, InputError, read_first_sheet};
use crate::model::thresholds::Thresholds;

pub const DEFAULT_PARAMS_FILE: &str = "parameters.xlsx";

const PARAMETER_COLUMN: &str = "Parameter";
const VALUE_COLUMN: &str = "Value";

#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    #[error("{0}")]
    Read(#[from] InputError),
    #[error("parameters sheet is empty")]
    Empty,
    #[error("parameters sheet has no '{0}' column")]
    MissingColumn(&'static str),
}

/// Resolves thresholds from an optional parameters workbook.
///
/// Never fails. A missing default file yields the defaults quietly; a missing
/// explicitly named file or an unreadable one logs a warning first. Keys absent
/// from the sheet keep their default value.
pub fn resolve_thresholds(path: &Path) -> Thresholds {
    if !path.exists() {
        if is_default_location(path) {
            tracing::debug!("no parameters file at {}; using defaults", path.display());
        } else {
            tracing::warn!(
                "Parameters file {} not found. Using defaults.",
                path.display()
            );
        }
        return Thresholds::default_v1();
    }
    match load_thresholds(path) {
        Ok(thresholds) => {
            tracing::info!(
                min_krec_copies = thresholds.min_krec_copies,
                min_trec_copies = thresholds.min_trec_copies,
                max_krec_delta = thresholds.max_krec_delta,
                max_trec_delta = thresholds.max_trec_delta,
                "loaded parameters from {}",
                path.display()
            );
            thresholds
        }
        Err(err) => {
            tracing::warn!(
                "Could not read {}: {}. Using defaults.",
                path.display(),
                err
            );
            Thresholds::default_v1()
        }
    }
}

/// `true` for the implicit `parameters.xlsx` lookup, whose absence is normal.
pub(crate) fn is_default_location(path: &Path) -> bool {
    path == Path::new(DEFAULT_PARAMS_FILE)
}

pub fn load_thresholds(path: &Path) -> Result<Thresholds, ParamsError> {
    let sheet = read_first_sheet(path)?;
    let mut rows = sheet.rows.iter();
    let header = rows.next().ok_or(ParamsError::Empty)?;

    let key_col = find_column(header, PARAMETER_COLUMN)?;
    let value_col = find_column(header, VALUE_COLUMN)?;

    let mut thresholds = Thresholds::default_v1();
    for row in rows {
        let Some(key) = row.get(key_col).and_then(CellValue::as_text) else {
            continue;
        };
        let key = key.trim();
        let Some(value) = row.get(value_col).and_then(CellValue::as_number) else {
            tracing::warn!("parameter {} has no numeric value; keeping default", key);
            continue;
        };
        if !thresholds.set(key, value) {
            tracing::debug!("ignoring unknown parameter {}", key);
        }
    }
    Ok(thresholds)
}

fn find_column(header: &[CellValue], name: &'static str) -> Result<usize, ParamsError> {
    header
        .iter()
        .position(|c| c.as_text().map(str::trim) == Some(name))
        .ok_or(ParamsError::MissingColumn(name))
}
