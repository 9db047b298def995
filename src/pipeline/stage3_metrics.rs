use crate::input::CellValue;
use crate::model::markers::{Marker, excision_circles};
use crate::model::table::{
    COPIES_PER_MLN, CT, DELTA, QUANTITY, RNP_HALF, ResultTable, UNDETERMINED,
};
use crate::pipeline::stage2_group::SampleGroup;

const COPIES_SCALE: f64 = 1_000_000.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stage3Output {
    pub groups_computed: usize,
    pub groups_without_rnp: Vec<String>,
    pub rnp_half_cells: usize,
    pub copies_cells: usize,
    pub delta_cells: usize,
}

#[derive(Debug, Clone, Copy)]
struct MetricColumns {
    quantity: Option<usize>,
    ct: Option<usize>,
    rnp_half: usize,
    copies: usize,
    delta: usize,
}

impl MetricColumns {
    fn resolve(table: &ResultTable) -> Option<Self> {
        Some(Self {
            quantity: table.column(QUANTITY),
            ct: table.column(CT),
            rnp_half: table.column(RNP_HALF)?,
            copies: table.column(COPIES_PER_MLN)?,
            delta: table.column(DELTA)?,
        })
    }

    fn quantity<'a>(&self, table: &'a ResultTable, row: usize) -> &'a CellValue {
        read(table, row, self.quantity)
    }

    fn ct<'a>(&self, table: &'a ResultTable, row: usize) -> &'a CellValue {
        read(table, row, self.ct)
    }
}

fn read(table: &ResultTable, row: usize, col: Option<usize>) -> &CellValue {
    static EMPTY: CellValue = CellValue::Empty;
    match col {
        Some(col) => table.cell(row, col),
        None => &EMPTY,
    }
}

pub fn run_stage3(table: &mut ResultTable, groups: &[SampleGroup]) -> Stage3Output {
    let mut out = Stage3Output::default();
    let Some(cols) = MetricColumns::resolve(table) else {
        tracing::warn!("derived columns are missing; skipping metric computation");
        return out;
    };

    for group in groups {
        let Some(rnp_row) = group.markers.get(Marker::Rnp) else {
            tracing::debug!(sample = %group.name, "no RNP row; leaving derived values empty");
            out.groups_without_rnp.push(group.name.clone());
            continue;
        };
        compute_group(table, group, rnp_row, cols, &mut out);
        out.groups_computed += 1;
    }

    tracing::info!(
        samples = out.groups_computed,
        without_rnp = out.groups_without_rnp.len(),
        rnp_half = out.rnp_half_cells,
        copies = out.copies_cells,
        delta = out.delta_cells,
        "computed sample metrics"
    );
    out
}

fn compute_group(
    table: &mut ResultTable,
    group: &SampleGroup,
    rnp_row: usize,
    cols: MetricColumns,
    out: &mut Stage3Output,
) {
    let rnp_quantity = cols.quantity(table, rnp_row).as_number();
    let rnp_ct = cols.ct(table, rnp_row).clone();

    if let Some(rnp_quantity) = rnp_quantity {
        let rnp_half = rnp_quantity / 2.0;
        table.set_number(rnp_row, cols.rnp_half, rnp_half);
        out.rnp_half_cells += 1;

        for &marker in excision_circles() {
            let Some(row) = group.markers.get(marker) else {
                continue;
            };
            if let Some(quantity) = cols.quantity(table, row).as_number() {
                table.set_number(row, cols.copies, copies_per_million(quantity, rnp_half));
                out.copies_cells += 1;
            }
        }
    }

    if rnp_ct.is_empty() {
        return;
    }
    for &marker in excision_circles() {
        let Some(row) = group.markers.get(marker) else {
            continue;
        };
        match ct_delta(cols.ct(table, row), &rnp_ct) {
            Some(delta) => {
                table.set_number(row, cols.delta, delta);
                out.delta_cells += 1;
            }
            None => tracing::debug!(
                sample = %group.name,
                "{} CT not usable; Delta left empty",
                marker.target_name()
            ),
        }
    }
}

/// Target copies per million cells. A zero RNP half follows IEEE-754 division.
pub fn copies_per_million(quantity: f64, rnp_half: f64) -> f64 {
    quantity / rnp_half * COPIES_SCALE
}

/// `row_ct - rnp_ct`, or `None` when the row CT is absent, undetermined, or
/// either side is not numeric.
pub fn ct_delta(row_ct: &CellValue, rnp_ct: &CellValue) -> Option<f64> {
    if row_ct.is_empty() || row_ct.as_text() == Some(UNDETERMINED) {
        return None;
    }
    Some(row_ct.as_number()? - rnp_ct.as_number()?)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_metrics.rs"]
mod tests;
