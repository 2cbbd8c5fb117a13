//! Infrastructure implementation of the `ConfigStore` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::VhostConfig;
use crate::infra::fs::write_atomic;

/// System-wide configuration file used when neither `--config` nor
/// `VHOSTCTL_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/vhostctl/config.yaml";

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
pub struct YamlConfigStore {
    path: PathBuf,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for YamlConfigStore {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<VhostConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file; using defaults");
            return Ok(VhostConfig::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read {}", self.path.display()))?;
        let config: VhostConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", self.path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", self.path.display()))?;
        Ok(config)
    }

    fn save(&self, config: &VhostConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        write_atomic(&self.path, content.as_bytes(), 0o600)
            .with_context(|| format!("cannot write {}", self.path.display()))
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
