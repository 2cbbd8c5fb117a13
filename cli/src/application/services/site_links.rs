//! Application service — list, enable, and disable sites.
//!
//! Link changes happen before the reload and are not rolled back if the
//! reload fails.

use anyhow::Result;

use crate::application::ports::{SiteStore, WebServer};
use crate::application::services::reload::reload_config;
use crate::domain::error::SiteError;
use crate::domain::site::{SiteEntry, SiteLayout, merge_listing, validate_site_name};

/// Outcome of an enable/disable request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkChange {
    /// The link was created or removed.
    Changed,
    /// The site was already in the requested state.
    Unchanged,
}

impl From<bool> for LinkChange {
    fn from(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::Unchanged }
    }
}

/// All available sites with their enabled flag, sorted by name.
///
/// # Errors
///
/// Returns an error if either directory cannot be read.
pub fn list_sites(store: &impl SiteStore) -> Result<Vec<SiteEntry>> {
    let available = store.available_sites()?;
    let enabled = store.enabled_sites()?;
    Ok(merge_listing(&available, &enabled))
}

/// Link a known site into sites-enabled, then reload.
///
/// # Errors
///
/// Returns `SiteError` for invalid or unknown names (before any mutation),
/// or a `WebServerError` if the reload fails (after the link was made).
pub async fn enable_site(
    layout: &SiteLayout,
    store: &impl SiteStore,
    web: &impl WebServer,
    name: &str,
) -> Result<LinkChange> {
    validate_site_name(name)?;
    let site = layout.site(name);
    if !store.is_available(&site) {
        return Err(SiteError::NotFound(name.to_string()).into());
    }
    let change = LinkChange::from(store.link(&site)?);
    tracing::info!(site = name, ?change, "enable");
    reload_config(web).await?;
    Ok(change)
}

/// Remove a known site's sites-enabled link if present, then reload.
///
/// # Errors
///
/// Returns `SiteError` for invalid names or names in neither set, or a
/// `WebServerError` if the reload fails.
pub async fn disable_site(
    layout: &SiteLayout,
    store: &impl SiteStore,
    web: &impl WebServer,
    name: &str,
) -> Result<LinkChange> {
    validate_site_name(name)?;
    let site = layout.site(name);
    if !store.is_available(&site) && !store.is_enabled(&site) {
        return Err(SiteError::NotFound(name.to_string()).into());
    }
    let change = LinkChange::from(store.unlink(&site)?);
    tracing::info!(site = name, ?change, "disable");
    reload_config(web).await?;
    Ok(change)
}
