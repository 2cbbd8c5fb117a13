//! Application service — validate-then-reload contract.

use anyhow::{Context, Result};

use crate::application::ports::WebServer;
use crate::domain::error::WebServerError;

/// Validate the global configuration and, only if it passes, signal reload.
///
/// # Errors
///
/// Returns `WebServerError::ConfigInvalid` when the configuration test exits
/// nonzero (no reload is attempted), `WebServerError::ReloadFailed` when the
/// reload signal exits nonzero, or an error if either process cannot run.
pub async fn reload_config(web: &impl WebServer) -> Result<()> {
    let test = web
        .test_config()
        .await
        .context("running configuration test")?;
    if !test.status.success() {
        tracing::warn!(code = ?test.status.code(), "configuration test failed");
        return Err(WebServerError::ConfigInvalid {
            stderr: String::from_utf8_lossy(&test.stderr).trim().to_string(),
            code: test.status.code(),
        }
        .into());
    }

    let reload = web
        .signal_reload()
        .await
        .context("signalling web server reload")?;
    if !reload.status.success() {
        return Err(WebServerError::ReloadFailed {
            stderr: String::from_utf8_lossy(&reload.stderr).trim().to_string(),
            code: reload.status.code(),
        }
        .into());
    }
    tracing::info!("web server reloaded");
    Ok(())
}
