//! Domain types and validators for vhostctl configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::site::SiteLayout;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "paths.sites_available",
    "paths.sites_enabled",
    "paths.webroot",
    "paths.cert_root",
    "paths.htpasswd",
    "templates.static_http",
    "templates.static_https",
    "templates.redirect",
    "nginx.binary",
    "certbot.binary",
    "certbot.email",
    "certbot.timeout_secs",
    "dns.retry_interval_secs",
];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `/etc/vhostctl/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct VhostConfig {
    pub paths: PathsConfig,
    pub templates: TemplatesConfig,
    pub nginx: NginxConfig,
    pub certbot: CertbotConfig,
    pub dns: DnsConfig,
}

/// Filesystem roots. Every site path is derived from these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub sites_available: PathBuf,
    pub sites_enabled: PathBuf,
    pub webroot: PathBuf,
    pub cert_root: PathBuf,
    pub htpasswd: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sites_available: PathBuf::from("/etc/nginx/sites-available"),
            sites_enabled: PathBuf::from("/etc/nginx/sites-enabled"),
            webroot: PathBuf::from("/var/www"),
            cert_root: PathBuf::from("/etc/letsencrypt/live"),
            htpasswd: PathBuf::from("/etc/nginx/htpasswd"),
        }
    }
}

/// nginx `include` targets referenced from generated fragments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TemplatesConfig {
    pub static_http: String,
    pub static_https: String,
    pub redirect: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            static_http: "snippets/static-http.conf".to_string(),
            static_https: "snippets/static-https.conf".to_string(),
            redirect: "snippets/redirect-https.conf".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NginxConfig {
    pub binary: String,
}

impl Default for NginxConfig {
    fn default() -> Self {
        Self {
            binary: "nginx".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CertbotConfig {
    pub binary: String,
    /// Account email; certbot registers without one when unset.
    pub email: Option<String>,
    pub timeout_secs: u64,
}

impl Default for CertbotConfig {
    fn default() -> Self {
        Self {
            binary: "certbot".to_string(),
            email: None,
            timeout_secs: 600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DnsConfig {
    /// Fixed backoff between resolution attempts while waiting for DNS.
    pub retry_interval_secs: u64,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            retry_interval_secs: 10,
        }
    }
}

impl VhostConfig {
    /// Site layout derived from the configured roots and templates.
    #[must_use]
    pub fn layout(&self) -> SiteLayout {
        SiteLayout {
            sites_available: self.paths.sites_available.clone(),
            sites_enabled: self.paths.sites_enabled.clone(),
            webroot: self.paths.webroot.clone(),
            cert_root: self.paths.cert_root.clone(),
            templates: self.templates.clone(),
        }
    }

    #[must_use]
    pub fn dns_retry_interval(&self) -> Duration {
        Duration::from_secs(self.dns.retry_interval_secs)
    }

    #[must_use]
    pub fn certbot_timeout(&self) -> Duration {
        Duration::from_secs(self.certbot.timeout_secs)
    }

    /// Check every key against the rules `config set` enforces, so a
    /// hand-edited file cannot carry a relative path or a zero interval.
    ///
    /// # Errors
    ///
    /// Returns the first invalid key's `ConfigError::InvalidValue`.
    pub fn validate(&self) -> Result<()> {
        for key in VALID_CONFIG_KEYS {
            if let Some(value) = self.get(key) {
                validate_config_value(key, &value)?;
            }
        }
        Ok(())
    }

    /// Look up a dotted key as a display string.
    ///
    /// Returns `None` for unknown keys. Unset optional values render as an
    /// empty string.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "paths.sites_available" => self.paths.sites_available.display().to_string(),
            "paths.sites_enabled" => self.paths.sites_enabled.display().to_string(),
            "paths.webroot" => self.paths.webroot.display().to_string(),
            "paths.cert_root" => self.paths.cert_root.display().to_string(),
            "paths.htpasswd" => self.paths.htpasswd.display().to_string(),
            "templates.static_http" => self.templates.static_http.clone(),
            "templates.static_https" => self.templates.static_https.clone(),
            "templates.redirect" => self.templates.redirect.clone(),
            "nginx.binary" => self.nginx.binary.clone(),
            "certbot.binary" => self.certbot.binary.clone(),
            "certbot.email" => self.certbot.email.clone().unwrap_or_default(),
            "certbot.timeout_secs" => self.certbot.timeout_secs.to_string(),
            "dns.retry_interval_secs" => self.dns.retry_interval_secs.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Assign a dotted key. Callers validate with [`validate_config_key`] and
    /// [`validate_config_value`] first.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "paths.sites_available" => self.paths.sites_available = value.into(),
            "paths.sites_enabled" => self.paths.sites_enabled = value.into(),
            "paths.webroot" => self.paths.webroot = value.into(),
            "paths.cert_root" => self.paths.cert_root = value.into(),
            "paths.htpasswd" => self.paths.htpasswd = value.into(),
            "templates.static_http" => self.templates.static_http = value.to_string(),
            "templates.static_https" => self.templates.static_https = value.to_string(),
            "templates.redirect" => self.templates.redirect = value.to_string(),
            "nginx.binary" => self.nginx.binary = value.to_string(),
            "certbot.binary" => self.certbot.binary = value.to_string(),
            "certbot.email" => {
                self.certbot.email = (!value.is_empty()).then(|| value.to_string());
            }
            "certbot.timeout_secs" => self.certbot.timeout_secs = parse_positive(key, value)?,
            "dns.retry_interval_secs" => {
                self.dns.retry_interval_secs = parse_positive(key, value)?;
            }
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |reason: &str| -> anyhow::Error {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
        .into()
    };

    if key.starts_with("paths.") {
        if !Path::new(value).is_absolute() {
            return Err(invalid("Paths must be absolute."));
        }
    } else if key.ends_with("_secs") {
        parse_positive(key, value)?;
    } else if key == "certbot.email" {
        if !value.is_empty() && !value.contains('@') {
            return Err(invalid("Expected an email address, or an empty string to unset."));
        }
    } else if value.trim().is_empty() {
        return Err(invalid("Value must not be empty."));
    }
    Ok(())
}

fn parse_positive(key: &str, value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "Expected a positive number of seconds.".to_string(),
        }
        .into()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
