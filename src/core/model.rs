// routefix - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
// These types are the shared vocabulary across all layers.

use serde::Serialize;
use std::path::PathBuf;

// =============================================================================
// Route file (discovery output)
// =============================================================================

/// A route handler file selected for rewriting, with the metadata discovery
/// collected about it.
#[derive(Debug, Clone)]
pub struct RouteFile {
    /// Absolute path to the handler file.
    pub path: PathBuf,

    /// File size in bytes at discovery time.
    pub size: u64,
}

// =============================================================================
// Rewrite (pure transform output)
// =============================================================================

/// Output of a pure text transform.
///
/// `substitutions` counts the individual edits applied (wrapped types,
/// injected statements, dropped lines). A transform that matched nothing
/// returns the input text unchanged with `substitutions == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The rewritten text.
    pub content: String,

    /// Number of individual edits applied.
    pub substitutions: usize,
}

// =============================================================================
// Pass reporting
// =============================================================================

/// Identifies which rewrite pass produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pass {
    /// Promise-wraps param types and injects awaited destructures.
    Signatures,
    /// Removes awaited destructures duplicated ahead of a try block.
    Duplicates,
    /// Awaits plain `params` destructures in the fixed file list.
    Targeted,
}

impl Pass {
    /// Noun used in the console summary line. The signature pass reports
    /// "API route files"; the narrower passes report plain "files".
    pub fn summary_noun(self) -> &'static str {
        match self {
            Self::Signatures => "API route files",
            Self::Duplicates | Self::Targeted => "files",
        }
    }
}

/// Outcome of applying a pass to a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path relative to the project root where possible, absolute otherwise.
    pub path: PathBuf,

    /// True when the file was rewritten on disk.
    pub changed: bool,

    /// Number of individual edits the transform applied.
    pub substitutions: usize,
}

/// Aggregate result of one pass over the tree (or the targeted list).
#[derive(Debug, Clone, Serialize)]
pub struct FixSummary {
    /// Which pass ran.
    pub pass: Pass,

    /// Number of files examined.
    pub files_seen: usize,

    /// Number of files rewritten on disk.
    pub files_changed: usize,

    /// Per-file outcomes, in processing order.
    pub reports: Vec<FileReport>,

    /// Non-fatal warnings collected during the pass.
    pub warnings: Vec<String>,
}
