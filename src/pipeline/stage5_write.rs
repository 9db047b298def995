use std::path::Path;

use rust_xlsxwriter::{
    Color, ColNum, Format, FormatAlign, FormatBorder, FormatPattern, RowNum, Workbook, Worksheet,
    XlsxError,
};

use crate::input::CellValue;
use crate::model::table::ResultTable;
use crate::pipeline::stage4_annotate::AnnotationPlan;

pub const RESULTS_SHEET: &str = "Results";

/// Excel's column limit.
const MAX_COLUMNS: usize = 16_384;

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("could not write {path}: {source}")]
    Xlsx {
        path: String,
        #[source]
        source: XlsxError,
    },
    #[error("table has {0} columns; a worksheet holds at most {MAX_COLUMNS}")]
    TooManyColumns(usize),
    #[error("row {0} has no position in the output layout")]
    Unplaced(usize),
}

struct CellFormats {
    header: Format,
    boundary: Format,
    highlight: Format,
    boundary_highlight: Format,
}

impl CellFormats {
    fn new() -> Self {
        let boundary = Format::new()
            .set_border_bottom(FormatBorder::Medium)
            .set_border_bottom_color(Color::Black);
        let highlight = Format::new()
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::Yellow);
        let boundary_highlight = boundary
            .clone()
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::Yellow);
        Self {
            header: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_border(FormatBorder::Thin),
            boundary,
            highlight,
            boundary_highlight,
        }
    }

    fn pick(&self, boundary: bool, highlighted: bool) -> Option<&Format> {
        match (boundary, highlighted) {
            (false, false) => None,
            (true, false) => Some(&self.boundary),
            (false, true) => Some(&self.highlight),
            (true, true) => Some(&self.boundary_highlight),
        }
    }
}

/// Writes the table to a single `Results` sheet with sample borders and
/// threshold fills applied in one pass.
pub fn write_results(
    table: &ResultTable,
    plan: &AnnotationPlan,
    path: &Path,
) -> Result<(), WriteError> {
    if table.n_cols() > MAX_COLUMNS {
        return Err(WriteError::TooManyColumns(table.n_cols()));
    }
    let xlsx_err = |source| WriteError::Xlsx {
        path: path.display().to_string(),
        source,
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(RESULTS_SHEET).map_err(xlsx_err)?;
    fill_sheet(worksheet, table, plan).map_err(|e| match e {
        FillError::Xlsx(source) => xlsx_err(source),
        FillError::Unplaced(row) => WriteError::Unplaced(row),
    })?;
    workbook.save(path).map_err(xlsx_err)?;

    tracing::info!(
        rows = table.n_rows(),
        sheet = RESULTS_SHEET,
        "wrote {}",
        path.display()
    );
    Ok(())
}

enum FillError {
    Xlsx(XlsxError),
    Unplaced(usize),
}

impl From<XlsxError> for FillError {
    fn from(value: XlsxError) -> Self {
        FillError::Xlsx(value)
    }
}

fn fill_sheet(
    worksheet: &mut Worksheet,
    table: &ResultTable,
    plan: &AnnotationPlan,
) -> Result<(), FillError> {
    let formats = CellFormats::new();

    let header_row = plan.layout.header_row();
    for (col, name) in table.columns.iter().enumerate() {
        let col = col as ColNum;
        worksheet.write_string_with_format(header_row, col, name.as_str(), &formats.header)?;
        worksheet.set_column_width(col, plan.column_width)?;
    }

    for row in 0..table.n_rows() {
        let sheet_row = plan.layout.sheet_row(row).ok_or(FillError::Unplaced(row))?;
        let boundary = plan.boundaries.get(row).copied().unwrap_or(false);
        for col in 0..table.n_cols() {
            let format = formats.pick(boundary, plan.is_highlighted(row, col));
            write_cell(worksheet, sheet_row, col as ColNum, table.cell(row, col), format)?;
        }
    }
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    value: &CellValue,
    format: Option<&Format>,
) -> Result<(), XlsxError> {
    match (value, format) {
        (CellValue::Number(v), None) if v.is_finite() => {
            worksheet.write_number(row, col, *v)?;
        }
        (CellValue::Number(v), Some(f)) if v.is_finite() => {
            worksheet.write_number_with_format(row, col, *v, f)?;
        }
        // Infinite quotients are written as text, NaN as an empty cell.
        (CellValue::Number(v), format) if v.is_infinite() => {
            let text = if *v > 0.0 { "inf" } else { "-inf" };
            match format {
                Some(f) => worksheet.write_string_with_format(row, col, text, f)?,
                None => worksheet.write_string(row, col, text)?,
            };
        }
        (CellValue::Text(s), None) => {
            worksheet.write_string(row, col, s.as_str())?;
        }
        (CellValue::Text(s), Some(f)) => {
            worksheet.write_string_with_format(row, col, s.as_str(), f)?;
        }
        (CellValue::Bool(b), None) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        (CellValue::Bool(b), Some(f)) => {
            worksheet.write_boolean_with_format(row, col, *b, f)?;
        }
        (_, Some(f)) => {
            worksheet.write_blank(row, col, f)?;
        }
        (_, None) => {}
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_write.rs"]
mod tests;
