//! JSON output helpers.
//!
//! Provides the report and error-object formatters used by all `--json` code
//! paths.

use anyhow::{Context, Result};
use freetier_common::CheckReport;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails (should not happen in
/// practice: `serde_json` only fails on maps with non-string keys, which do
/// not appear here).
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format a check report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_report(report: &CheckReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("JSON serialization failed")
}
