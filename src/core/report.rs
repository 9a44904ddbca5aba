// routefix - core/report.rs
//
// JSON report of a completed pass.
// Core layer: writes to any Write trait object; the caller opens the file.

use crate::core::model::FixSummary;
use crate::util::error::ReportError;
use std::io::Write;
use std::path::Path;

/// Serialise the pass summary as pretty-printed JSON.
///
/// `report_path` is only used for error context; the output goes to `writer`.
pub fn write_json<W: Write>(
    summary: &FixSummary,
    writer: W,
    report_path: &Path,
) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(writer, summary).map_err(|e| ReportError::Json {
        path: report_path.to_path_buf(),
        source: e,
    })
}
