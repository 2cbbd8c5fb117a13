//! `vhostctl sites` — list, enable, and disable virtual hosts.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::site_links::{self, LinkChange};

/// Sites subcommands.
#[derive(Subcommand)]
pub enum SitesCommand {
    /// List available sites and whether each is enabled
    List,
    /// Link a site into sites-enabled and reload nginx
    Enable {
        /// Site name (file name in sites-available)
        site: String,
    },
    /// Unlink a site from sites-enabled and reload nginx
    Disable {
        /// Site name (file name in sites-enabled)
        site: String,
    },
}

/// Run the sites command.
///
/// # Errors
///
/// Returns an error if the site is unknown, the caller is not root, or the
/// reload fails.
pub async fn run(app: &AppContext, cmd: SitesCommand) -> Result<()> {
    match cmd {
        SitesCommand::List => {
            let sites = site_links::list_sites(&app.site_store())?;
            app.renderer().render_sites(&sites)
        }
        SitesCommand::Enable { site } => {
            app.require_root("sites enable")?;
            let change = site_links::enable_site(
                &app.layout(),
                &app.site_store(),
                &app.web_server(),
                &site,
            )
            .await?;
            match change {
                LinkChange::Changed => app.output.success(&format!("Enabled {site}")),
                LinkChange::Unchanged => app.output.info(&format!("{site} was already enabled")),
            }
            app.output.success("nginx reloaded");
            Ok(())
        }
        SitesCommand::Disable { site } => {
            app.require_root("sites disable")?;
            let change = site_links::disable_site(
                &app.layout(),
                &app.site_store(),
                &app.web_server(),
                &site,
            )
            .await?;
            match change {
                LinkChange::Changed => app.output.success(&format!("Disabled {site}")),
                LinkChange::Unchanged => app.output.info(&format!("{site} was not enabled")),
            }
            app.output.success("nginx reloaded");
            Ok(())
        }
    }
}
