use crate::input::CellValue;

pub const HEADER_MARKER: &str = "Well Position";

pub const SAMPLE_NAME: &str = "Sample Name";
pub const TARGET_NAME: &str = "Target Name";
pub const CT: &str = "CT";
pub const QUANTITY: &str = "Quantity";

pub const RNP_HALF: &str = "RNP/2";
pub const COPIES_PER_MLN: &str = "Copies/mln";
pub const DELTA: &str = "Delta";

pub const UNDETERMINED: &str = "Undetermined";

pub fn dropped_columns() -> &'static [&'static str] {
    &["Target Color", "CQCONF", "EXPFAIL", "NOAMP"]
}

pub fn derived_columns() -> &'static [&'static str] {
    &[RNP_HALF, COPIES_PER_MLN, DELTA]
}

/// Located result table: named columns over rectangular rows.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl ResultTable {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    pub fn set_number(&mut self, row: usize, col: usize, value: f64) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = CellValue::Number(value);
        }
    }

    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.column(name) else {
            return false;
        };
        self.columns.remove(idx);
        for row in &mut self.rows {
            if idx < row.len() {
                row.remove(idx);
            }
        }
        true
    }

    pub fn push_empty_column(&mut self, name: &str) {
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(CellValue::Empty);
        }
    }
}
