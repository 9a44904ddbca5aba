// routefix - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every variant carries the path it
// failed on so the operator knows which route file to inspect.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all routefix operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum RouteFixError {
    /// Route file discovery failed.
    Discovery(DiscoveryError),

    /// Reading or writing a route file failed.
    Rewrite(RewriteError),

    /// Writing the JSON report failed.
    Report(ReportError),
}

impl fmt::Display for RouteFixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovery(e) => write!(f, "Discovery error: {e}"),
            Self::Rewrite(e) => write!(f, "Rewrite error: {e}"),
            Self::Report(e) => write!(f, "Report error: {e}"),
        }
    }
}

impl std::error::Error for RouteFixError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Discovery(e) => Some(e),
            Self::Rewrite(e) => Some(e),
            Self::Report(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery errors
// ---------------------------------------------------------------------------

/// Errors related to route file discovery.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The API route directory does not exist.
    RootNotFound { path: PathBuf },

    /// The root path is not a directory.
    NotADirectory { path: PathBuf },

    /// Permission denied accessing the root path.
    PermissionDenied { path: PathBuf, source: io::Error },

    /// More route files matched than the configured limit. A rewrite pass
    /// must not run on a silently truncated file set.
    MaxFilesExceeded { max: usize },

    /// Walkdir traversal error (wraps individual file/dir access failures).
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Route directory '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Route path '{}' is not a directory", path.display())
            }
            Self::PermissionDenied { path, source } => {
                write!(
                    f,
                    "Permission denied accessing '{}': {source}",
                    path.display()
                )
            }
            Self::MaxFilesExceeded { max } => {
                write!(
                    f,
                    "Discovery stopped: more than {max} route files matched. \
                     Narrow the scan root or raise the limit."
                )
            }
            Self::Traversal { path, source } => {
                write!(f, "Error traversing '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PermissionDenied { source, .. } => Some(source),
            Self::Traversal { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DiscoveryError> for RouteFixError {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

// ---------------------------------------------------------------------------
// Rewrite errors
// ---------------------------------------------------------------------------

/// Errors related to reading and writing route files.
#[derive(Debug)]
pub enum RewriteError {
    /// A selected route file could not be read.
    Read { file: PathBuf, source: io::Error },

    /// A rewritten route file could not be written back.
    Write { file: PathBuf, source: io::Error },
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { file, source } => {
                write!(f, "Cannot read '{}': {source}", file.display())
            }
            Self::Write { file, source } => {
                write!(f, "Cannot write '{}': {source}", file.display())
            }
        }
    }
}

impl std::error::Error for RewriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Write { source, .. } => Some(source),
        }
    }
}

impl From<RewriteError> for RouteFixError {
    fn from(e: RewriteError) -> Self {
        Self::Rewrite(e)
    }
}

// ---------------------------------------------------------------------------
// Report errors
// ---------------------------------------------------------------------------

/// Errors related to JSON report output.
#[derive(Debug)]
pub enum ReportError {
    /// I/O error writing the report file.
    Io { path: PathBuf, source: io::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Report I/O error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "Report JSON error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ReportError> for RouteFixError {
    fn from(e: ReportError) -> Self {
        Self::Report(e)
    }
}

/// Convenience type alias for routefix results.
pub type Result<T> = std::result::Result<T, RouteFixError>;
