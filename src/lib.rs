//! KREC/TREC qPCR export processing.
//!
//! [`process`] reads the first sheet of an instrument export, finds the
//! `Well Position` header, normalizes KREC and TREC quantities against RNP per
//! sample and writes an annotated `Results` workbook next to the input.

pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod shell;

use std::path::{Path, PathBuf};

use crate::input::InputError;
use crate::model::thresholds::Thresholds;
use crate::pipeline::stage1_locate::run_stage1;
use crate::pipeline::stage2_group::run_stage2;
use crate::pipeline::stage3_metrics::run_stage3;
use crate::pipeline::stage4_annotate::run_stage4;
use crate::pipeline::stage5_write::{WriteError, write_results};
use crate::report::{ReportInput, RunReport, build_report};

pub use crate::input::params::{DEFAULT_PARAMS_FILE, resolve_thresholds};

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Transforms `input` and returns the path of the written workbook.
pub fn process(
    input: &Path,
    output: Option<&Path>,
    thresholds: &Thresholds,
) -> Result<PathBuf, ProcessError> {
    let report = process_with_report(input, output, thresholds)?;
    Ok(PathBuf::from(report.output))
}

pub fn process_with_report(
    input: &Path,
    output: Option<&Path>,
    thresholds: &Thresholds,
) -> Result<RunReport, ProcessError> {
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input),
    };

    let mut stage1 = run_stage1(input)?;
    let stage2 = run_stage2(&stage1.table)?;
    let stage3 = run_stage3(&mut stage1.table, &stage2.groups);
    let plan = run_stage4(&stage1.table, thresholds);
    write_results(&stage1.table, &plan, &output)?;

    Ok(build_report(&ReportInput {
        input,
        output: &output,
        stage1: &stage1,
        stage2: &stage2,
        stage3: &stage3,
        plan: &plan,
        thresholds,
    }))
}

/// `<dir>/<stem>_processed.<ext>` beside the input. Legacy `.xls` inputs get
/// an `.xlsx` output since only the OOXML format is written.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = match input.extension().map(|e| e.to_string_lossy().into_owned()) {
        Some(ext) if ext.eq_ignore_ascii_case("xls") => "xlsx".to_string(),
        Some(ext) => ext,
        None => "xlsx".to_string(),
    };
    input.with_file_name(format!("{stem}_processed.{ext}"))
}

#[cfg(test)]
#[path = "../tests/src_inline/fixtures.rs"]
pub(crate) mod fixtures;

#[cfg(test)]
#[path = "../tests/src_inline/lib_inline.rs"]
mod tests;
