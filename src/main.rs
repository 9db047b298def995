use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use kira_krectrec::logging::init_logging;
use kira_krectrec::report::json::write_run_json;
use kira_krectrec::report::text::render_report_text;
use kira_krectrec::shell::{
    ProcessJob, ProcessingSlot, accept_path, open_containing_folder, spawn_process,
};
use kira_krectrec::{DEFAULT_PARAMS_FILE, resolve_thresholds};

#[derive(Parser, Debug)]
#[command(name = "kira-krectrec", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process a qPCR results export
    Run(RunArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct RunArgs {
    /// Input workbook (.xlsx or .xls); drag-and-drop braces are stripped
    #[arg(long)]
    input: String,

    /// Output workbook (default: <input>_processed.<ext> beside the input)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Parameters workbook with `Parameter` / `Value` columns
    #[arg(long, default_value = DEFAULT_PARAMS_FILE)]
    params: PathBuf,

    /// Write a JSON run summary to this path
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Open the output folder when done
    #[arg(long)]
    open_folder: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("Failed to process file: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Run(args) => run_process(&args),
    }
}

fn run_process(args: &RunArgs) -> Result<(), String> {
    let input = accept_path(&args.input).map_err(|e| e.to_string())?;
    let thresholds = resolve_thresholds(&args.params);

    let slot = ProcessingSlot::new();
    let job = ProcessJob {
        input,
        output: args.out.clone(),
        thresholds,
    };
    let handle = spawn_process(&slot, job).map_err(|e| e.to_string())?;
    let report = handle
        .join()
        .map_err(|_| "worker thread panicked".to_string())??;

    print!("{}", render_report_text(&report));
    if let Some(path) = &args.summary_json {
        write_run_json(&report, path).map_err(|e| e.to_string())?;
    }
    if args.open_folder {
        if let Err(err) = open_containing_folder(Path::new(&report.output)) {
            tracing::warn!("could not open output folder: {}", err);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
