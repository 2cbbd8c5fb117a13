//! `vhostctl config` — show and set configuration values.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;
use crate::domain::config::{validate_config_key, validate_config_value};

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key, e.g. paths.webroot
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error for unknown keys, invalid values, or a file that cannot
/// be written (file permissions, not a root check, guard the system config).
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let config = config_service::load_config(&app.config_store)?;
            app.renderer()
                .render_config(&config, app.config_store.path())
        }
        ConfigCommand::Set { key, value } => {
            validate_config_key(&key)?;
            validate_config_value(&key, &value)?;
            config_service::set_value(&app.config_store, &key, &value)?;
            app.output.success(&format!("Set {key} = {value}"));
            Ok(())
        }
    }
}
