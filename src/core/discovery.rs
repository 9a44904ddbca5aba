// routefix - core/discovery.rs
//
// Recursive traversal of the API route directory.
//
// This module reads only file *metadata* (name, size), never file contents.
// That boundary is owned by the app layer (app::fix), which reads each
// selected file before handing its text to a pure transform.
//
// Per-file I/O errors are non-fatal and collected as warnings; exclude
// patterns short-circuit directory descent via filter_entry so excluded
// subtrees (e.g. node_modules/) are never traversed at all.

use crate::core::model::RouteFile;
use crate::util::error::DiscoveryError;
use std::path::Path;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for a discovery operation.
///
/// All limits reference named constants from `util::constants` so they are
/// auditable in a single place.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Maximum directory recursion depth.
    pub max_depth: usize,

    /// Maximum number of matching files before discovery fails.
    pub max_files: usize,

    /// Exact filename a file must have to be selected.
    pub route_file_name: String,

    /// Glob patterns matched against filenames AND directory component names.
    /// Matching files are skipped; matching directories are not descended into.
    pub exclude_patterns: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        use crate::util::constants;
        Self {
            max_depth: constants::DEFAULT_MAX_DEPTH,
            max_files: constants::DEFAULT_MAX_FILES,
            route_file_name: constants::ROUTE_FILE_NAME.to_string(),
            exclude_patterns: constants::DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

// =============================================================================
// Discovery
// =============================================================================

/// Discover route handler files under `root`.
///
/// # Non-fatal errors
/// Files/directories that cannot be accessed due to permission or I/O errors
/// are recorded as human-readable strings in the returned warnings vector and
/// do NOT cause the function to return `Err`.
///
/// # Fatal errors
/// Returns `Err` if the root path is invalid (`RootNotFound`,
/// `NotADirectory`, `PermissionDenied`) or more than `max_files` route files
/// match (`MaxFilesExceeded`): a rewrite pass must see the whole file set
/// or none of it.
pub fn discover_route_files(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<(Vec<RouteFile>, Vec<String>), DiscoveryError> {
    use crate::util::constants;

    // Pre-flight validation. `fs::metadata` rather than `Path::is_dir()`
    // because the helpers map ALL errors (including PermissionDenied) to
    // `false`, hiding the difference between a missing root and one the
    // operator cannot read.
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(DiscoveryError::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(DiscoveryError::PermissionDenied {
                path: root.to_path_buf(),
                source: e,
            });
        }
        Err(_) => {
            return Err(DiscoveryError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
    }

    // Clamp config limits to absolute bounds.
    let max_files = config.max_files.min(constants::ABSOLUTE_MAX_FILES);
    let max_depth = config.max_depth.min(constants::ABSOLUTE_MAX_DEPTH);

    tracing::debug!(
        root = %root.display(),
        max_depth,
        max_files,
        route_file = %config.route_file_name,
        exclude = ?config.exclude_patterns,
        "Discovery starting"
    );

    // Compile glob patterns once; log and skip any that fail compilation.
    let exclude_pats = compile_patterns(&config.exclude_patterns);

    let mut files: Vec<RouteFile> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    // `filter_entry` short-circuits directory descent for excluded directory
    // names, so we never recurse into node_modules/.next/etc.
    let walker = walkdir::WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            if e.file_type().is_dir() {
                // Always allow the root itself
                if e.depth() == 0 {
                    return true;
                }
                let name = e.file_name().to_str().unwrap_or("");
                return !is_excluded_component(name, &exclude_pats);
            }
            true // Visit files; we filter them individually below
        });

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                // Inaccessible entry: non-fatal, record warning.
                let path_str = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                let msg = format!("Cannot access '{path_str}': {e}");
                tracing::debug!(warning = %msg, "Discovery warning");
                warnings.push(msg);
                continue;
            }
        };

        // Directories are handled above by filter_entry.
        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();

        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => {
                warnings.push(format!("Skipping '{}': non-UTF-8 filename", path.display()));
                continue;
            }
        };

        // Apply exclude patterns to the filename itself.
        if is_excluded_filename(file_name, &exclude_pats) {
            tracing::trace!(file = file_name, "Excluded by pattern");
            continue;
        }

        // Only exact route handler filenames are selected.
        if file_name != config.route_file_name {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                let msg = format!("Cannot read metadata for '{}': {e}", path.display());
                tracing::debug!(warning = %msg, "Discovery warning");
                warnings.push(msg);
                continue;
            }
        };

        if files.len() >= max_files {
            return Err(DiscoveryError::MaxFilesExceeded { max: max_files });
        }

        tracing::trace!(file = %path.display(), "Route file discovered");
        files.push(RouteFile {
            path: path.to_path_buf(),
            size: metadata.len(),
        });
    }

    // Deterministic processing and report order regardless of walk order.
    files.sort_unstable_by(|a, b| a.path.cmp(&b.path));

    tracing::debug!(
        found = files.len(),
        warnings = warnings.len(),
        "Discovery complete"
    );

    Ok((files, warnings))
}

// =============================================================================
// Glob helpers
// =============================================================================

/// Compile a list of glob pattern strings into `glob::Pattern` objects.
/// Patterns that fail to compile are logged as warnings and skipped.
fn compile_patterns(patterns: &[String]) -> Vec<glob::Pattern> {
    patterns
        .iter()
        .filter_map(|p| match glob::Pattern::new(p) {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                tracing::warn!(pattern = p, error = %e, "Invalid glob pattern, skipping");
                None
            }
        })
        .collect()
}

/// Returns true if `dir_name` matches any exclude pattern that contains no
/// wildcard characters. These are treated as directory component exclusions
/// (e.g. "node_modules", ".next") rather than filename glob patterns.
fn is_excluded_component(dir_name: &str, exclude_pats: &[glob::Pattern]) -> bool {
    exclude_pats.iter().any(|p| {
        let s = p.as_str();
        // Only literal patterns (no wildcards) are used as component matchers.
        !s.contains('*') && !s.contains('?') && !s.contains('[') && p.matches(dir_name)
    })
}

/// Returns true if `file_name` matches any exclude pattern (wildcard or literal).
fn is_excluded_filename(file_name: &str, exclude_pats: &[glob::Pattern]) -> bool {
    exclude_pats.iter().any(|p| p.matches(file_name))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn make_route_tree() -> TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();

        // Dynamic-segment routes at different depths
        let blog = root.join("blog").join("[slug]");
        fs::create_dir_all(&blog).expect("mkdir blog/[slug]");
        fs::write(blog.join("route.ts"), "export async function GET() {}\n")
            .expect("write blog route");

        let projects = root.join("projects").join("[id]");
        fs::create_dir_all(&projects).expect("mkdir projects/[id]");
        fs::write(projects.join("route.ts"), "export async function PUT() {}\n")
            .expect("write projects route");

        // A static route directly under the root
        fs::write(root.join("route.ts"), "export async function POST() {}\n")
            .expect("write root route");

        // Non-route files that must be ignored
        fs::write(blog.join("helpers.ts"), "export const x = 1;\n").expect("write helpers");
        fs::write(root.join("route.test.ts"), "test\n").expect("write route.test.ts");

        // Excluded directory with a decoy route file
        let node = root.join("node_modules").join("pkg");
        fs::create_dir_all(&node).expect("mkdir node_modules/pkg");
        fs::write(node.join("route.ts"), "should be excluded\n").expect("write decoy");

        dir
    }

    fn names(files: &[RouteFile], root: &Path) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.path
                    .strip_prefix(root)
                    .unwrap()
                    .to_str()
                    .unwrap()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_discovers_route_files_only() {
        let dir = make_route_tree();
        let config = DiscoveryConfig::default();
        let (files, warnings) = discover_route_files(dir.path(), &config).unwrap();

        let found = names(&files, dir.path());
        assert_eq!(files.len(), 3, "expected 3 route files, got {found:?}");
        assert!(found.contains(&"blog/[slug]/route.ts".to_string()));
        assert!(found.contains(&"projects/[id]/route.ts".to_string()));
        assert!(found.contains(&"route.ts".to_string()));
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn test_excluded_directory_not_descended() {
        let dir = make_route_tree();
        let (files, _) = discover_route_files(dir.path(), &DiscoveryConfig::default()).unwrap();
        assert!(
            files
                .iter()
                .all(|f| !f.path.components().any(|c| c.as_os_str() == "node_modules")),
            "node_modules must never be descended into"
        );
    }

    #[test]
    fn test_results_sorted_by_path() {
        let dir = make_route_tree();
        let (files, _) = discover_route_files(dir.path(), &DiscoveryConfig::default()).unwrap();
        let mut sorted = files.clone();
        sorted.sort_unstable_by(|a, b| a.path.cmp(&b.path));
        assert_eq!(
            files.iter().map(|f| &f.path).collect::<Vec<_>>(),
            sorted.iter().map(|f| &f.path).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_max_depth_limits_descent() {
        let dir = make_route_tree();
        let config = DiscoveryConfig {
            max_depth: 1, // root files only, no subdirectory descent
            ..Default::default()
        };
        let (files, _) = discover_route_files(dir.path(), &config).unwrap();
        let found = names(&files, dir.path());
        assert_eq!(found, vec!["route.ts".to_string()], "got {found:?}");
    }

    #[test]
    fn test_max_files_exceeded_is_fatal() {
        let dir = make_route_tree();
        let config = DiscoveryConfig {
            max_files: 2,
            ..Default::default()
        };
        let result = discover_route_files(dir.path(), &config);
        assert!(
            matches!(result, Err(DiscoveryError::MaxFilesExceeded { max: 2 })),
            "expected MaxFilesExceeded, got {result:?}"
        );
    }

    #[test]
    fn test_root_not_found() {
        let result = discover_route_files(
            Path::new("/nonexistent/path/routefix"),
            &DiscoveryConfig::default(),
        );
        assert!(matches!(result, Err(DiscoveryError::RootNotFound { .. })));
    }

    #[test]
    fn test_root_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("route.ts");
        fs::write(&file, "content").unwrap();
        let result = discover_route_files(&file, &DiscoveryConfig::default());
        assert!(matches!(result, Err(DiscoveryError::NotADirectory { .. })));
    }

    #[test]
    fn test_file_size_collected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("route.ts"), "hello world").unwrap();
        let (files, _) =
            discover_route_files(dir.path(), &DiscoveryConfig::default()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size, 11, "size should match 'hello world'");
    }
}
