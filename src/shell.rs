//! Boundary helpers for a presenting shell (CLI or GUI): path intake, a
//! single-flight worker and opening the output folder.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crate::model::thresholds::Thresholds;
use crate::process_with_report;
use crate::report::RunReport;

const SPREADSHEET_EXTENSIONS: [&str; 2] = [".xlsx", ".xls"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("Please provide an Excel file (.xlsx or .xls): {0}")]
    NotSpreadsheet(String),
    #[error("Already processing a file. Please wait.")]
    Busy,
    #[error("could not start worker thread: {0}")]
    Spawn(String),
}

/// Drag-and-drop payloads wrap paths containing spaces in braces.
pub fn strip_drop_braces(raw: &str) -> &str {
    raw.strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .unwrap_or(raw)
}

pub fn is_spreadsheet_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    SPREADSHEET_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Normalizes a raw picked/dropped path and rejects non-spreadsheets before
/// the core is ever invoked.
pub fn accept_path(raw: &str) -> Result<PathBuf, ShellError> {
    let path = strip_drop_braces(raw.trim());
    if !is_spreadsheet_path(path) {
        return Err(ShellError::NotSpreadsheet(path.to_string()));
    }
    Ok(PathBuf::from(path))
}

#[derive(Debug, Clone, Default)]
pub struct ProcessingSlot {
    busy: Arc<AtomicBool>,
}

#[derive(Debug)]
pub struct SlotGuard {
    busy: Arc<AtomicBool>,
}

impl ProcessingSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Option<SlotGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SlotGuard {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone)]
pub struct ProcessJob {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub thresholds: Thresholds,
}

/// Runs the transform on a worker thread. The slot stays taken until the
/// worker finishes; fatal errors come back as a single message.
pub fn spawn_process(
    slot: &ProcessingSlot,
    job: ProcessJob,
) -> Result<JoinHandle<Result<RunReport, String>>, ShellError> {
    let guard = slot.try_acquire().ok_or(ShellError::Busy)?;
    std::thread::Builder::new()
        .name("krectrec-worker".to_string())
        .spawn(move || {
            let _guard = guard;
            tracing::info!("processing {}", job.input.display());
            process_with_report(&job.input, job.output.as_deref(), &job.thresholds)
                .map_err(|e| e.to_string())
        })
        .map_err(|e| ShellError::Spawn(e.to_string()))
}

/// Opens the folder containing `output` with the platform file browser.
pub fn open_containing_folder(output: &Path) -> std::io::Result<()> {
    let folder = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let opener = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    Command::new(opener).arg(&folder).spawn().map(|_| ())
}

#[cfg(test)]
#[path = "../tests/src_inline/shell.rs"]
mod tests;
