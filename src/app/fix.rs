// routefix - app/fix.rs
//
// Pass orchestration: builds the file set for a pass, then runs the
// sequential read -> transform -> conditional-write loop over it.
//
// This layer owns all route file *content* I/O; the core transforms are
// pure and discovery reads only metadata. Files are processed one at a
// time with no shared mutable state.
//
// Error policy: warnings collected during discovery are non-fatal and
// carried into the summary; a read or write failure on a selected file is
// fatal and propagates to main, which exits non-zero.

use crate::core::awaited;
use crate::core::discovery::{self, DiscoveryConfig};
use crate::core::duplicates;
use crate::core::model::{FileReport, FixSummary, Pass, Rewrite, RouteFile};
use crate::core::signature;
use crate::util::constants;
use crate::util::error::{Result, RewriteError};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

// =============================================================================
// Constants
// =============================================================================

/// Retry limits for transient I/O errors.
const MAX_RETRIES: u32 = 3;
const RETRY_DELAYS_MS: [u64; 3] = [50, 100, 200];

// =============================================================================
// Pass entry points
// =============================================================================

/// Run the signature pass: Promise-wrap param annotations and inject awaited
/// destructures across every route file under `<root>/src/app/api`.
pub fn run_signatures(project_root: &Path) -> Result<FixSummary> {
    let (files, warnings) = discover_api_routes(project_root)?;
    apply_pass(
        Pass::Signatures,
        project_root,
        files,
        warnings,
        signature::rewrite_route,
    )
}

/// Run the duplicate-removal pass over the same route file set.
pub fn run_duplicates(project_root: &Path) -> Result<FixSummary> {
    let (files, warnings) = discover_api_routes(project_root)?;
    apply_pass(
        Pass::Duplicates,
        project_root,
        files,
        warnings,
        duplicates::strip_duplicate_awaits,
    )
}

/// Run the targeted pass over the fixed file list. Entries that do not
/// exist (or are not regular files) are skipped, matching the one-off
/// migration this pass was written for.
pub fn run_targeted(project_root: &Path) -> Result<FixSummary> {
    let mut files = Vec::new();

    for rel in constants::TARGETED_ROUTE_FILES {
        let path = project_root.join(rel);
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => files.push(RouteFile {
                path,
                size: meta.len(),
            }),
            _ => {
                tracing::debug!(file = rel, "Targeted file missing, skipped");
            }
        }
    }

    apply_pass(
        Pass::Targeted,
        project_root,
        files,
        Vec::new(),
        awaited::await_params,
    )
}

fn discover_api_routes(project_root: &Path) -> Result<(Vec<RouteFile>, Vec<String>)> {
    let api_dir = project_root.join(constants::API_ROUTES_SUBDIR);
    let config = DiscoveryConfig::default();
    Ok(discovery::discover_route_files(&api_dir, &config)?)
}

// =============================================================================
// Shared per-file loop
// =============================================================================

/// Read -> transform -> conditionally write each file, printing the per-file
/// checkmark report and the final summary line on stdout.
fn apply_pass(
    pass: Pass,
    project_root: &Path,
    files: Vec<RouteFile>,
    mut warnings: Vec<String>,
    transform: fn(&str) -> Rewrite,
) -> Result<FixSummary> {
    let files_seen = files.len();
    let mut reports = Vec::with_capacity(files_seen);
    let mut files_changed = 0;

    for file in &files {
        if file.size > constants::MAX_ROUTE_FILE_SIZE {
            let msg = format!(
                "Skipping '{}': {} bytes exceeds the {} byte route file limit",
                file.path.display(),
                file.size,
                constants::MAX_ROUTE_FILE_SIZE
            );
            tracing::warn!(warning = %msg, "Oversized route file");
            warnings.push(msg);
            continue;
        }

        let original =
            read_route_file(&file.path).map_err(|e| RewriteError::Read {
                file: file.path.clone(),
                source: e,
            })?;

        let rewrite = transform(&original);
        let changed = rewrite.content != original;
        let display_path = relative_to_root(&file.path, project_root);

        if changed {
            std::fs::write(&file.path, &rewrite.content).map_err(|e| RewriteError::Write {
                file: file.path.clone(),
                source: e,
            })?;
            files_changed += 1;
            println!("✓ Fixed: {}", display_path.display());
        }

        tracing::debug!(
            file = %file.path.display(),
            changed,
            substitutions = rewrite.substitutions,
            "Route file processed"
        );

        reports.push(FileReport {
            path: display_path,
            changed,
            substitutions: rewrite.substitutions,
        });
    }

    println!("\n✅ Fixed {files_changed} {}", pass.summary_noun());

    tracing::info!(
        pass = ?pass,
        files_seen,
        files_changed,
        warnings = warnings.len(),
        "Pass complete"
    );

    Ok(FixSummary {
        pass,
        files_seen,
        files_changed,
        reports,
        warnings,
    })
}

/// Report paths relative to the project root where possible so console and
/// JSON output stay stable across checkouts.
fn relative_to_root(path: &Path, project_root: &Path) -> PathBuf {
    path.strip_prefix(project_root)
        .unwrap_or(path)
        .to_path_buf()
}

/// Read a route file with transient-error retries.
///
/// Transient I/O errors (WouldBlock, Interrupted, TimedOut) are retried with
/// capped backoff. Permanent errors are returned immediately.
fn read_route_file(path: &Path) -> io::Result<String> {
    let mut last_err: Option<io::Error> = None;

    for attempt in 0..MAX_RETRIES {
        match std::fs::read_to_string(path) {
            Ok(content) => return Ok(content),
            Err(e) if is_transient_error(&e) => {
                tracing::debug!(
                    file = %path.display(),
                    attempt = attempt + 1,
                    error = %e,
                    "Transient I/O error, retrying"
                );
                std::thread::sleep(Duration::from_millis(RETRY_DELAYS_MS[attempt as usize]));
                last_err = Some(e);
            }
            Err(e) => return Err(e), // Permanent error; do not retry.
        }
    }

    Err(last_err.unwrap_or_else(|| io::Error::other("Unknown read error")))
}

/// Returns true for transient I/O errors that are worth retrying.
fn is_transient_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted | io::ErrorKind::TimedOut
    )
}
