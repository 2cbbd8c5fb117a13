//! JSON output helpers.
//!
//! Provides the error-object formatter used by all `--json` code paths when
//! a command fails, and the pretty-printer used for successful results.

use anyhow::{Context, Result};
use serde::Serialize;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "exit_code": 1
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, exit_code: i32) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "exit_code": exit_code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders successful command results as pretty-printed JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Print `value` as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn print<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!(
            "{}",
            serde_json::to_string_pretty(value).context("JSON serialization failed")?
        );
        Ok(())
    }
}
