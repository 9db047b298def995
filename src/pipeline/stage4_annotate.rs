use std::collections::HashSet;

use crate::input::GroupKey;
use crate::model::flags::Flag;
use crate::model::markers::{Marker, excision_circles};
use crate::model::table::{COPIES_PER_MLN, DELTA, ResultTable, SAMPLE_NAME, TARGET_NAME};
use crate::model::thresholds::Thresholds;
use crate::pipeline::stage2_group::sample_key;

pub const COLUMN_WIDTH: f64 = 15.0;

/// Logical table row to physical worksheet row, fixed once the row order is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    header_row: u32,
    sheet_rows: Vec<u32>,
}

impl OutputLayout {
    pub fn new(n_rows: usize) -> Self {
        let header_row = 0u32;
        let sheet_rows = (0..n_rows).map(|i| header_row + 1 + i as u32).collect();
        Self {
            header_row,
            sheet_rows,
        }
    }

    pub fn header_row(&self) -> u32 {
        self.header_row
    }

    pub fn sheet_row(&self, row: usize) -> Option<u32> {
        self.sheet_rows.get(row).copied()
    }

    pub fn len(&self) -> usize {
        self.sheet_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheet_rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub row: usize,
    pub col: usize,
    pub flag: Flag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightOutcome {
    Applied(Vec<Highlight>),
    MissingColumns(Vec<&'static str>),
}

#[derive(Debug, Clone)]
pub struct AnnotationPlan {
    pub layout: OutputLayout,
    pub column_width: f64,
    /// `true` for the last row of each sample block.
    pub boundaries: Vec<bool>,
    pub highlights: Vec<Highlight>,
    pub highlighting_skipped: bool,
    highlighted_cells: HashSet<(usize, usize)>,
}

impl AnnotationPlan {
    pub fn is_highlighted(&self, row: usize, col: usize) -> bool {
        self.highlighted_cells.contains(&(row, col))
    }
}

pub fn run_stage4(table: &ResultTable, thresholds: &Thresholds) -> AnnotationPlan {
    let layout = OutputLayout::new(table.n_rows());
    let boundaries = sample_boundaries(table);

    let (highlights, highlighting_skipped) = match plan_highlights(table, thresholds) {
        HighlightOutcome::Applied(h) => {
            tracing::info!(cells = h.len(), "highlighted out-of-range cells");
            (h, false)
        }
        HighlightOutcome::MissingColumns(missing) => {
            tracing::warn!(
                "Could not find required columns: {}; skipping highlighting",
                missing.join(", ")
            );
            (Vec::new(), true)
        }
    };

    let highlighted_cells = highlights.iter().map(|h| (h.row, h.col)).collect();
    AnnotationPlan {
        layout,
        column_width: COLUMN_WIDTH,
        boundaries,
        highlights,
        highlighting_skipped,
        highlighted_cells,
    }
}

/// Marks every row whose sample name differs from the next row's, plus the
/// final row. An empty sample name never matches its neighbour.
pub fn sample_boundaries(table: &ResultTable) -> Vec<bool> {
    let n = table.n_rows();
    let sample_col = table.column(SAMPLE_NAME);
    let keys: Vec<Option<GroupKey>> = (0..n).map(|r| sample_key(table, r, sample_col)).collect();

    (0..n)
        .map(|row| match (keys.get(row), keys.get(row + 1)) {
            (Some(Some(cur)), Some(Some(next))) => cur != next,
            _ => true,
        })
        .collect()
}

pub fn plan_highlights(table: &ResultTable, thresholds: &Thresholds) -> HighlightOutcome {
    let copies_col = table.column(COPIES_PER_MLN);
    let delta_col = table.column(DELTA);
    let target_col = table.column(TARGET_NAME);

    let (Some(copies_col), Some(delta_col), Some(target_col)) = (copies_col, delta_col, target_col)
    else {
        let mut missing = Vec::new();
        if copies_col.is_none() {
            missing.push(COPIES_PER_MLN);
        }
        if delta_col.is_none() {
            missing.push(DELTA);
        }
        if target_col.is_none() {
            missing.push(TARGET_NAME);
        }
        return HighlightOutcome::MissingColumns(missing);
    };

    let mut highlights = Vec::new();
    for row in 0..table.n_rows() {
        let Some(marker) = table
            .cell(row, target_col)
            .as_text()
            .and_then(Marker::from_target_name)
            .filter(|m| excision_circles().contains(m))
        else {
            continue;
        };
        let (min_copies, max_delta) = limits(thresholds, marker);

        if let Some(copies) = table.cell(row, copies_col).as_number() {
            if copies < min_copies {
                if let Some(flag) = Flag::low_copies(marker) {
                    highlights.push(Highlight {
                        row,
                        col: copies_col,
                        flag,
                    });
                }
            }
        }
        if let Some(delta) = table.cell(row, delta_col).as_number() {
            if delta > max_delta {
                if let Some(flag) = Flag::high_delta(marker) {
                    highlights.push(Highlight {
                        row,
                        col: delta_col,
                        flag,
                    });
                }
            }
        }
    }
    HighlightOutcome::Applied(highlights)
}

fn limits(thresholds: &Thresholds, marker: Marker) -> (f64, f64) {
    match marker {
        Marker::Krec => (thresholds.min_krec_copies, thresholds.max_krec_delta),
        Marker::Trec => (thresholds.min_trec_copies, thresholds.max_trec_delta),
        Marker::Rnp => (f64::NEG_INFINITY, f64::INFINITY),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_annotate.rs"]
mod tests;
