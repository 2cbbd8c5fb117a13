//! Filesystem infrastructure — implements `SiteStore` and atomic file writes.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::SiteStore;
use crate::domain::site::{Site, SiteLayout};

/// Site fragments and webroots on the local filesystem.
pub struct LocalSiteStore {
    sites_available: PathBuf,
    sites_enabled: PathBuf,
}

impl LocalSiteStore {
    #[must_use]
    pub fn new(layout: &SiteLayout) -> Self {
        Self {
            sites_available: layout.sites_available.clone(),
            sites_enabled: layout.sites_enabled.clone(),
        }
    }
}

impl SiteStore for LocalSiteStore {
    fn available_sites(&self) -> Result<Vec<String>> {
        list_names(&self.sites_available)
    }

    fn enabled_sites(&self) -> Result<Vec<String>> {
        list_names(&self.sites_enabled)
    }

    fn is_available(&self, site: &Site) -> bool {
        site.available.is_file()
    }

    fn is_enabled(&self, site: &Site) -> bool {
        // symlink_metadata so dangling links still count as present
        site.enabled.symlink_metadata().is_ok()
    }

    fn ensure_dir(&self, path: &Path) -> Result<bool> {
        if path.is_dir() {
            return Ok(false);
        }
        std::fs::create_dir_all(path)
            .with_context(|| format!("creating directory {}", path.display()))?;
        Ok(true)
    }

    fn write_fragment(&self, site: &Site, content: &str) -> Result<()> {
        write_atomic(&site.available, content.as_bytes(), 0o644)
    }

    fn link(&self, site: &Site) -> Result<bool> {
        if self.is_enabled(site) {
            return Ok(false);
        }
        if !self.is_available(site) {
            return Err(crate::domain::error::SiteError::NotAvailable(site.domain.clone()).into());
        }
        std::os::unix::fs::symlink(&site.available, &site.enabled).with_context(|| {
            format!(
                "linking {} -> {}",
                site.enabled.display(),
                site.available.display()
            )
        })?;
        Ok(true)
    }

    fn unlink(&self, site: &Site) -> Result<bool> {
        if !self.is_enabled(site) {
            return Ok(false);
        }
        std::fs::remove_file(&site.enabled)
            .with_context(|| format!("removing {}", site.enabled.display()))?;
        Ok(true)
    }
}

/// Sorted names of the non-directory entries in `dir`.
fn list_names(dir: &Path) -> Result<Vec<String>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading directory {}", dir.display()))?;
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

/// Replace `path` with `content` via a temp file in the same directory and a
/// rename, so readers never observe a partial file.
///
/// # Errors
///
/// Returns an error if the temp file cannot be created, written, or renamed.
pub fn write_atomic(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    tmp.write_all(content)
        .with_context(|| format!("writing temp file for {}", path.display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("syncing temp file for {}", path.display()))?;

    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(tmp.path(), std::fs::Permissions::from_mode(mode))
            .with_context(|| format!("setting permissions on {}", tmp.path().display()))?;
    }

    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("finalizing {}", path.display()))?;
    Ok(())
}
