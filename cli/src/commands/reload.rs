//! `vhostctl reload` — test the nginx configuration and reload.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::reload::reload_config;

/// Run the reload command.
///
/// # Errors
///
/// Returns an error if the caller is not root or the test/reload fails.
pub async fn run(app: &AppContext) -> Result<()> {
    app.require_root("reload")?;
    reload_config(&app.web_server()).await?;
    app.output.success("nginx configuration OK, reloaded");
    Ok(())
}
