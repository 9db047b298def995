use std::collections::HashSet;
use std::path::Path;

use crate::input::{CellValue, InputError, bool_label, format_number, read_first_sheet};
use crate::model::table::{HEADER_MARKER, ResultTable, derived_columns, dropped_columns};

#[derive(Debug, Clone)]
pub struct Stage1Output {
    pub table: ResultTable,
    pub sheet_name: String,
    /// One-based worksheet row of the located header.
    pub header_sheet_row: u32,
    pub dropped: Vec<String>,
}

pub fn run_stage1(path: &Path) -> Result<Stage1Output, InputError> {
    let sheet = read_first_sheet(path)?;
    let header_idx = locate_header(&sheet.rows).ok_or(InputError::HeaderNotFound)?;
    let header_sheet_row = sheet.first_row + header_idx as u32 + 1;
    tracing::info!(
        sheet = %sheet.name,
        "found '{}' header at row {}",
        HEADER_MARKER,
        header_sheet_row
    );

    let mut table = build_table(&sheet.rows, header_idx);
    let dropped = shape_columns(&mut table);
    tracing::info!(
        rows = table.n_rows(),
        columns = table.n_cols(),
        "loaded result table"
    );

    Ok(Stage1Output {
        table,
        sheet_name: sheet.name,
        header_sheet_row,
        dropped,
    })
}

/// Index of the topmost row holding a `Well Position` cell.
pub fn locate_header(rows: &[Vec<CellValue>]) -> Option<usize> {
    rows.iter().position(|row| {
        row.iter()
            .filter(|cell| !cell.is_empty())
            .any(|cell| cell.as_text() == Some(HEADER_MARKER))
    })
}

/// Uses `rows[header_idx]` as column names and everything below as data.
/// Fully blank data rows are skipped.
pub fn build_table(rows: &[Vec<CellValue>], header_idx: usize) -> ResultTable {
    let Some(header) = rows.get(header_idx) else {
        return ResultTable::default();
    };
    let width = rows[header_idx..]
        .iter()
        .map(|r| r.len())
        .max()
        .unwrap_or(0);
    let columns = column_names(header, width);

    let mut data = Vec::new();
    for row in &rows[header_idx + 1..] {
        if row.iter().all(CellValue::is_empty) {
            continue;
        }
        let mut cells = row.clone();
        cells.resize(width, CellValue::Empty);
        data.push(cells);
    }

    ResultTable {
        columns,
        rows: data,
    }
}

/// Drops instrument columns and appends the derived ones. Returns the names
/// that were actually dropped.
pub fn shape_columns(table: &mut ResultTable) -> Vec<String> {
    let mut dropped = Vec::new();
    for &name in dropped_columns() {
        if table.drop_column(name) {
            dropped.push(name.to_string());
        }
    }
    for &name in derived_columns() {
        if table.drop_column(name) {
            tracing::warn!("input already has a '{}' column; replacing it", name);
        }
        table.push_empty_column(name);
    }
    dropped
}

fn column_names(header: &[CellValue], width: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(width);
    for idx in 0..width {
        let base = match header.get(idx) {
            Some(CellValue::Text(s)) => s.clone(),
            Some(CellValue::Number(v)) if !v.is_nan() => format_number(*v),
            Some(CellValue::Bool(b)) => bool_label(*b).to_string(),
            _ => format!("Unnamed: {idx}"),
        };
        let mut name = base.clone();
        let mut suffix = 1usize;
        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        out.push(name);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_locate.rs"]
mod tests;
