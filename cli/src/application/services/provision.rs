//! Application service — site creation from bare domain to HTTPS.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! Each step is idempotent on its own, so re-running after a failure picks
//! up where the filesystem says the site is. Two runs for the same domain
//! must not overlap; callers provide that exclusion.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::ports::{
    CertIssuer, Clock, DnsResolver, LocalAddresses, OperatorGate, ProgressReporter, SiteStore,
    WebServer,
};
use crate::application::services::dns_wait::{DnsReadiness, DnsWatch};
use crate::application::services::reload::reload_config;
use crate::domain::error::CertError;
use crate::domain::fragment::{http_fragment, https_fragment};
use crate::domain::site::{Site, SiteLayout};

/// Outcome of the `provision` use-case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionOutcome {
    pub domain: String,
    pub dns: DnsReadiness,
    /// `false` when the document root already existed.
    pub webroot_created: bool,
}

/// Drive `domain` through DNS check, HTTP config, issuance, and HTTPS config.
///
/// # Errors
///
/// Returns an error if any step fails. A failed configuration test or a
/// failed issuance aborts immediately; nothing written so far is undone.
pub async fn provision<R, L, C, G>(
    domain: &str,
    layout: &SiteLayout,
    store: &impl SiteStore,
    web: &impl WebServer,
    issuer: &impl CertIssuer,
    dns: &DnsWatch<'_, R, L, C, G>,
    reporter: &impl ProgressReporter,
) -> Result<ProvisionOutcome>
where
    R: DnsResolver,
    L: LocalAddresses,
    C: Clock,
    G: OperatorGate,
{
    let site = layout.site(domain);

    // Step 1: DNS must point here before the HTTP-01 challenge can succeed.
    reporter.step(&format!("checking DNS for {domain}..."));
    let readiness = dns.wait_until_local(domain, reporter).await?;
    reporter.success(&format!("{domain} resolves to this server"));

    // Step 2: Document root.
    let webroot_created = store
        .ensure_dir(&site.document_root)
        .with_context(|| format!("creating {}", site.document_root.display()))?;
    if webroot_created {
        reporter.success(&format!("created {}", site.document_root.display()));
    }

    // Step 3 + 4: HTTP-only fragment, enabled and live.
    reporter.step("writing HTTP configuration...");
    store.write_fragment(&site, &http_fragment(&site, &layout.templates))?;
    enable_and_reload(store, web, &site).await?;
    reporter.success("HTTP configuration active");

    // Step 5: Certificate.
    reporter.step(&format!("requesting certificate for {domain}..."));
    issue_certificate(issuer, &site).await?;
    reporter.success("certificate issued");

    // Step 6 + 7: HTTPS fragment, enabled and live.
    reporter.step("writing HTTPS configuration...");
    store.write_fragment(&site, &https_fragment(&site, &layout.templates))?;
    enable_and_reload(store, web, &site).await?;
    reporter.success(&format!("https://{domain} is live"));

    Ok(ProvisionOutcome {
        domain: domain.to_string(),
        dns: readiness,
        webroot_created,
    })
}

async fn enable_and_reload(store: &impl SiteStore, web: &impl WebServer, site: &Site) -> Result<()> {
    let linked = store.link(site)?;
    tracing::debug!(site = %site.domain, linked, "enable");
    reload_config(web).await
}

async fn issue_certificate(issuer: &impl CertIssuer, site: &Site) -> Result<()> {
    let output = issuer
        .issue(&site.document_root, &site.domain)
        .await
        .context("running certificate issuer")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(CertError::IssuanceFailed {
            domain: site.domain.clone(),
            stderr,
            code: output.status.code(),
        }
        .into());
    }
    tracing::info!(domain = %site.domain, "certificate issued");
    Ok(())
}
