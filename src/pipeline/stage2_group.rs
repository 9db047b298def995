use std::collections::{BTreeMap, HashMap};

use crate::input::{GroupKey, InputError};
use crate::model::markers::Marker;
use crate::model::table::{ResultTable, SAMPLE_NAME, TARGET_NAME};

/// Marker rows of one sample group. The first occurrence of a marker wins;
/// later rows with the same target are kept only for reporting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerIndex {
    first: BTreeMap<Marker, usize>,
    duplicates: Vec<(Marker, usize)>,
}

impl MarkerIndex {
    pub fn build(table: &ResultTable, rows: &[usize], target_col: Option<usize>) -> Self {
        let mut index = MarkerIndex::default();
        let Some(target_col) = target_col else {
            return index;
        };
        for &row in rows {
            let Some(marker) = table
                .cell(row, target_col)
                .as_text()
                .and_then(Marker::from_target_name)
            else {
                continue;
            };
            if index.first.contains_key(&marker) {
                index.duplicates.push((marker, row));
            } else {
                index.first.insert(marker, row);
            }
        }
        index
    }

    pub fn get(&self, marker: Marker) -> Option<usize> {
        self.first.get(&marker).copied()
    }

    pub fn duplicates(&self) -> &[(Marker, usize)] {
        &self.duplicates
    }
}

#[derive(Debug, Clone)]
pub struct SampleGroup {
    pub name: String,
    pub rows: Vec<usize>,
    pub markers: MarkerIndex,
}

#[derive(Debug, Clone)]
pub struct Stage2Output {
    pub groups: Vec<SampleGroup>,
    /// Rows with an empty sample name; they take part in no group.
    pub ungrouped_rows: Vec<usize>,
}

pub fn run_stage2(table: &ResultTable) -> Result<Stage2Output, InputError> {
    let sample_col = table
        .column(SAMPLE_NAME)
        .ok_or_else(|| InputError::MissingColumn(SAMPLE_NAME.to_string()))?;
    let target_col = table.column(TARGET_NAME);
    if target_col.is_none() {
        tracing::warn!(
            "no '{}' column; derived values cannot be computed",
            TARGET_NAME
        );
    }

    let (keyed, ungrouped_rows) = group_rows(table, sample_col);
    let mut groups = Vec::with_capacity(keyed.len());
    for (name, rows) in keyed {
        let markers = MarkerIndex::build(table, &rows, target_col);
        for (marker, row) in markers.duplicates() {
            tracing::warn!(
                sample = %name,
                "duplicate {} row (data row {}); keeping the first one",
                marker.target_name(),
                row + 1
            );
        }
        groups.push(SampleGroup {
            name,
            rows,
            markers,
        });
    }

    tracing::info!(
        samples = groups.len(),
        ungrouped = ungrouped_rows.len(),
        "grouped rows by sample"
    );
    Ok(Stage2Output {
        groups,
        ungrouped_rows,
    })
}

/// Stable group-by: groups in order of first appearance, rows in table order.
pub fn group_rows(
    table: &ResultTable,
    sample_col: usize,
) -> (Vec<(String, Vec<usize>)>, Vec<usize>) {
    let mut slot_by_key: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    let mut ungrouped = Vec::new();

    for row in 0..table.n_rows() {
        let Some(key) = table.cell(row, sample_col).group_key() else {
            ungrouped.push(row);
            continue;
        };
        match slot_by_key.get(&key) {
            Some(&slot) => groups[slot].1.push(row),
            None => {
                groups.push((key.label(), vec![row]));
                slot_by_key.insert(key, groups.len() - 1);
            }
        }
    }

    (groups, ungrouped)
}

pub fn sample_key(
    table: &ResultTable,
    row: usize,
    sample_col: Option<usize>,
) -> Option<GroupKey> {
    sample_col.and_then(|col| table.cell(row, col).group_key())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_group.rs"]
mod tests;
