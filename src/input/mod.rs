use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

pub mod params;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(v) => v.is_nan(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric view of the cell. Text is accepted when it parses as a float.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) if !v.is_nan() => Some(*v),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Key used for grouping and boundary detection. Empty cells have no key.
    pub fn group_key(&self) -> Option<GroupKey> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(v) if v.is_nan() => None,
            CellValue::Number(v) => Some(GroupKey::Number(format_number(*v))),
            CellValue::Text(s) => Some(GroupKey::Text(s.clone())),
            CellValue::Bool(b) => Some(GroupKey::Bool(*b)),
        }
    }
}

/// Sample identity tagged by cell type: `1042` typed as a number and `"1042"`
/// typed as text are different samples.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Number(String),
    Text(String),
    Bool(bool),
}

impl GroupKey {
    pub fn label(&self) -> String {
        match self {
            GroupKey::Number(s) | GroupKey::Text(s) => s.clone(),
            GroupKey::Bool(b) => bool_label(*b).to_string(),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => CellValue::Empty,
            Data::Int(v) => CellValue::Number(*v as f64),
            Data::Float(v) => CellValue::Number(*v),
            Data::String(s) => {
                if s.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(s.clone())
                }
            }
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(_) => CellValue::Empty,
        }
    }
}

pub fn bool_label(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not read spreadsheet {path}: {source}")]
    Spreadsheet {
        path: String,
        #[source]
        source: calamine::Error,
    },
    #[error("spreadsheet {0} contains no sheets")]
    NoSheets(String),
    #[error("Could not find 'Well Position' header in the file")]
    HeaderNotFound,
    #[error("missing required column: {0}")]
    MissingColumn(String),
}

/// First worksheet of a workbook as a headerless grid. Columns always start
/// at `A`; leading blank columns are kept as empty cells.
#[derive(Debug, Clone)]
pub struct RawSheet {
    pub name: String,
    /// Zero-based sheet row of `rows[0]`.
    pub first_row: u32,
    pub rows: Vec<Vec<CellValue>>,
}

pub fn read_first_sheet(path: &Path) -> Result<RawSheet, InputError> {
    let spreadsheet_err = |source| InputError::Spreadsheet {
        path: path.display().to_string(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_err)?;
    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| InputError::NoSheets(path.display().to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| InputError::NoSheets(path.display().to_string()))?
        .map_err(spreadsheet_err)?;

    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    let rows = range
        .rows()
        .map(|row| {
            std::iter::repeat_n(CellValue::Empty, first_col as usize)
                .chain(row.iter().map(CellValue::from))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        sheet = %name,
        rows = rows.len(),
        "read first worksheet of {}",
        path.display()
    );

    Ok(RawSheet {
        name,
        first_row,
        rows,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
