// routefix - main.rs
//
// CLI entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Dispatch to the selected rewrite pass
// 4. Optional JSON report output and exit-code discipline

use clap::{Parser, Subcommand};
use routefix::app::fix;
use routefix::core::report;
use routefix::util;
use routefix::util::constants;
use routefix::util::error::{ReportError, RouteFixError};
use std::path::PathBuf;

/// routefix - migrate Next.js API route handlers to awaited route params.
///
/// Each subcommand is one pass of the migration; run them manually, in
/// order, inspecting the output between runs. A pass rewrites matching
/// route files in place and prints a checkmark line per modified file.
#[derive(Parser, Debug)]
#[command(name = "routefix", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Project root containing the Next.js application.
    #[arg(
        short = 'r',
        long = "root",
        global = true,
        default_value = constants::DEFAULT_PROJECT_ROOT
    )]
    root: PathBuf,

    /// Write a JSON report of the pass to this path.
    #[arg(long = "report", global = true)]
    report: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Wrap route param types in Promise<…> and inject awaited destructures.
    Signatures,
    /// Remove awaited destructures duplicated directly above a try block.
    Duplicates,
    /// Await plain `const { … } = params;` lines in the known route files.
    Targeted,
}

fn main() {
    let cli = Cli::parse();

    util::logging::init(cli.debug);

    tracing::info!(
        version = constants::APP_VERSION,
        root = %cli.root.display(),
        command = ?cli.command,
        "routefix starting"
    );

    let result = match cli.command {
        Command::Signatures => fix::run_signatures(&cli.root),
        Command::Duplicates => fix::run_duplicates(&cli.root),
        Command::Targeted => fix::run_targeted(&cli.root),
    };

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => fail(e),
    };

    for warning in &summary.warnings {
        tracing::warn!(warning = %warning, "Pass warning");
    }

    if let Some(report_path) = &cli.report {
        if let Err(e) = write_report(&summary, report_path) {
            fail(e.into());
        }
        tracing::info!(report = %report_path.display(), "JSON report written");
    }
}

fn write_report(
    summary: &routefix::core::model::FixSummary,
    path: &PathBuf,
) -> Result<(), ReportError> {
    let file = std::fs::File::create(path).map_err(|e| ReportError::Io {
        path: path.clone(),
        source: e,
    })?;
    report::write_json(summary, file, path)
}

fn fail(e: RouteFixError) -> ! {
    tracing::error!(error = %e, "routefix failed");
    eprintln!("Error: {e}");
    std::process::exit(1);
}
