//! Application service — configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::VhostConfig;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<VhostConfig> {
    store.load()
}

/// Validate and persist a single key.
///
/// Returns the updated configuration.
///
/// # Errors
///
/// Returns a `ConfigError` for unknown keys or invalid values (nothing is
/// written), or an error if the file cannot be saved.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<VhostConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}
