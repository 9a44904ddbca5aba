// routefix - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "routefix";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Target project layout
// =============================================================================

/// Project root the migration was written against. Overridable with --root.
pub const DEFAULT_PROJECT_ROOT: &str = "/home/ubuntu/buildo-nextjs";

/// API route directory, relative to the project root.
pub const API_ROUTES_SUBDIR: &str = "src/app/api";

/// Filename of a Next.js route handler module.
pub const ROUTE_FILE_NAME: &str = "route.ts";

/// HTTP method handlers rewritten by the signature pass.
pub const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "PATCH"];

/// Number of characters inspected after a handler's opening brace when
/// checking whether an `await params` statement is already present. The
/// guard is what keeps the signature pass idempotent: re-runs see the
/// injected statement inside this window and leave the file alone.
pub const AWAIT_GUARD_WINDOW: usize = 200;

/// Route files rewritten by the targeted pass. These are the dynamic-segment
/// handlers that still destructured `params` synchronously after the
/// signature pass ran; the list is fixed, not discovered.
pub const TARGETED_ROUTE_FILES: &[&str] = &[
    "src/app/api/services/[slug]/route.ts",
    "src/app/api/projects/[id]/route.ts",
    "src/app/api/blog/[slug]/route.ts",
    "src/app/api/team/department/[department]/route.ts",
    "src/app/api/admin/content-backups/type/[contentType]/route.ts",
    "src/app/api/company-initiatives/[id]/route.ts",
    "src/app/api/comments/[articleId]/route.ts",
    "src/app/api/legal-pages/[slug]/route.ts",
    "src/app/api/site-setting/[key]/route.ts",
];

// =============================================================================
// Discovery limits
// =============================================================================

/// Maximum directory recursion depth during discovery.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Maximum number of route files to accept in a single pass.
pub const DEFAULT_MAX_FILES: usize = 2_000;

/// Hard upper bound on max files (prevents configuration mistakes).
pub const ABSOLUTE_MAX_FILES: usize = 10_000;

/// Hard upper bound on max depth (prevents infinite traversal).
pub const ABSOLUTE_MAX_DEPTH: usize = 50;

/// Route files above this size are skipped with a warning instead of being
/// read into memory. Handler modules are hand-written TypeScript and never
/// legitimately approach this bound.
pub const MAX_ROUTE_FILE_SIZE: u64 = 1024 * 1024; // 1 MiB

/// Directory components never descended into during discovery.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["node_modules", ".git", ".next", "dist"];

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
