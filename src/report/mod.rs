use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::model::flags::{Flag, flag_order};
use crate::model::markers::Marker;
use crate::model::thresholds::Thresholds;
use crate::pipeline::stage1_locate::Stage1Output;
use crate::pipeline::stage2_group::Stage2Output;
use crate::pipeline::stage3_metrics::Stage3Output;
use crate::pipeline::stage4_annotate::AnnotationPlan;

pub mod json;
pub mod text;

#[derive(Debug, Clone, Serialize)]
pub struct DuplicateMarker {
    pub sample: String,
    pub target: Marker,
    /// One-based data row, counted below the header.
    pub data_row: usize,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DerivedCounts {
    pub rnp_half: usize,
    pub copies_per_mln: usize,
    pub delta: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub tool_name: String,
    pub tool_version: String,
    pub input: String,
    pub output: String,
    pub sheet: String,
    pub header_row: u32,
    pub n_rows: usize,
    pub n_columns: usize,
    pub dropped_columns: Vec<String>,
    pub n_samples: usize,
    pub ungrouped_rows: usize,
    pub samples_without_rnp: Vec<String>,
    pub duplicate_markers: Vec<DuplicateMarker>,
    pub derived: DerivedCounts,
    pub highlighted: BTreeMap<&'static str, usize>,
    pub highlighting_skipped: bool,
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub stage1: &'a Stage1Output,
    pub stage2: &'a Stage2Output,
    pub stage3: &'a Stage3Output,
    pub plan: &'a AnnotationPlan,
    pub thresholds: &'a Thresholds,
}

pub fn build_report(input: &ReportInput<'_>) -> RunReport {
    let duplicate_markers = input
        .stage2
        .groups
        .iter()
        .flat_map(|g| {
            g.markers
                .duplicates()
                .iter()
                .map(move |&(target, row)| DuplicateMarker {
                    sample: g.name.clone(),
                    target,
                    data_row: row + 1,
                })
        })
        .collect();

    RunReport {
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        input: input.input.display().to_string(),
        output: input.output.display().to_string(),
        sheet: input.stage1.sheet_name.clone(),
        header_row: input.stage1.header_sheet_row,
        n_rows: input.stage1.table.n_rows(),
        n_columns: input.stage1.table.n_cols(),
        dropped_columns: input.stage1.dropped.clone(),
        n_samples: input.stage2.groups.len(),
        ungrouped_rows: input.stage2.ungrouped_rows.len(),
        samples_without_rnp: input.stage3.groups_without_rnp.clone(),
        duplicate_markers,
        derived: DerivedCounts {
            rnp_half: input.stage3.rnp_half_cells,
            copies_per_mln: input.stage3.copies_cells,
            delta: input.stage3.delta_cells,
        },
        highlighted: count_flags(input.plan),
        highlighting_skipped: input.plan.highlighting_skipped,
        thresholds: *input.thresholds,
    }
}

pub fn count_flags(plan: &AnnotationPlan) -> BTreeMap<&'static str, usize> {
    let mut out = BTreeMap::new();
    for &flag in flag_order() {
        out.insert(flag.name(), flag_count(plan, flag));
    }
    out
}

fn flag_count(plan: &AnnotationPlan, flag: Flag) -> usize {
    plan.highlights.iter().filter(|h| h.flag == flag).count()
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
