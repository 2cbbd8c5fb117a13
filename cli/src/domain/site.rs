//! Site identity and filesystem layout.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::config::TemplatesConfig;
use crate::domain::error::SiteError;

/// Configured roots from which every per-site path is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    pub sites_available: PathBuf,
    pub sites_enabled: PathBuf,
    pub webroot: PathBuf,
    pub cert_root: PathBuf,
    pub templates: TemplatesConfig,
}

/// A virtual host and all paths that belong to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub domain: String,
    /// Webroot served over HTTP; target of the HTTP-01 challenge.
    pub document_root: PathBuf,
    pub available: PathBuf,
    /// Symlink pointing at `available` while the site is enabled.
    pub enabled: PathBuf,
    pub fullchain: PathBuf,
    pub privkey: PathBuf,
}

impl SiteLayout {
    #[must_use]
    pub fn site(&self, domain: &str) -> Site {
        let cert_dir = self.cert_root.join(domain);
        Site {
            domain: domain.to_string(),
            document_root: self.webroot.join(domain),
            available: self.sites_available.join(domain),
            enabled: self.sites_enabled.join(domain),
            fullchain: cert_dir.join("fullchain.pem"),
            privkey: cert_dir.join("privkey.pem"),
        }
    }
}

/// One row of `vhostctl sites list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteEntry {
    pub name: String,
    pub enabled: bool,
}

/// Merge the available and enabled directory listings into sorted entries.
///
/// Enabled names with no available fragment (dangling links) are not listed.
#[must_use]
pub fn merge_listing(available: &[String], enabled: &[String]) -> Vec<SiteEntry> {
    let mut entries: Vec<SiteEntry> = available
        .iter()
        .map(|name| SiteEntry {
            name: name.clone(),
            enabled: enabled.contains(name),
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// Validates a site name used to address an existing fragment.
///
/// Creation deliberately skips this check; `enable` and `disable` run it
/// before touching the filesystem.
///
/// # Errors
///
/// Returns `SiteError::InvalidName` for empty names, `.`/`..`, or names
/// containing a path separator or NUL byte.
pub fn validate_site_name(name: &str) -> Result<(), SiteError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\0');
    if bad {
        return Err(SiteError::InvalidName(name.to_string()));
    }
    Ok(())
}
