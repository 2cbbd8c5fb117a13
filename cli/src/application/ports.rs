//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::collections::BTreeSet;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::config::VhostConfig;
use crate::domain::site::Site;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
    /// Run a program with stdin piped from `stdin`.
    async fn run_with_stdin(&self, program: &str, args: &[&str], stdin: &[u8]) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit an instruction the operator must act on. Shown even when quiet,
    /// since a prompt may follow that depends on it.
    fn instruct(&self, message: &str);
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts loading and saving the YAML configuration file.
pub trait ConfigStore {
    /// Load the configuration, returning defaults when no file exists.
    fn load(&self) -> Result<VhostConfig>;
    /// Persist the configuration.
    fn save(&self, config: &VhostConfig) -> Result<()>;
    /// Path of the configuration file.
    fn path(&self) -> &Path;
}

// ── Site Store Port ───────────────────────────────────────────────────────────

/// The sites-available / sites-enabled directories plus site webroots.
///
/// Every mutation is idempotent and reports whether it changed anything.
pub trait SiteStore {
    /// Names of all fragments in sites-available.
    fn available_sites(&self) -> Result<Vec<String>>;
    /// Names of all entries in sites-enabled.
    fn enabled_sites(&self) -> Result<Vec<String>>;
    /// Whether the site has a fragment in sites-available.
    fn is_available(&self, site: &Site) -> bool;
    /// Whether the site has an entry (usually a symlink) in sites-enabled.
    fn is_enabled(&self, site: &Site) -> bool;
    /// Create a directory (and parents) if absent. Returns `true` if created.
    fn ensure_dir(&self, path: &Path) -> Result<bool>;
    /// Replace the site's fragment in sites-available with `content`.
    fn write_fragment(&self, site: &Site, content: &str) -> Result<()>;
    /// Link the available fragment into sites-enabled. Returns `true` if a
    /// link was created, `false` if one already existed.
    fn link(&self, site: &Site) -> Result<bool>;
    /// Remove the site's sites-enabled entry. Returns `true` if one was removed.
    fn unlink(&self, site: &Site) -> Result<bool>;
}

// ── Web Server Port ───────────────────────────────────────────────────────────

/// The running web server: configuration test and reload signal.
#[allow(async_fn_in_trait)]
pub trait WebServer {
    /// Validate the global configuration (`nginx -t`).
    async fn test_config(&self) -> Result<Output>;
    /// Signal the running process to reload (`nginx -s reload`).
    async fn signal_reload(&self) -> Result<Output>;
}

// ── Certificate Issuer Port ───────────────────────────────────────────────────

/// Domain-validated certificate issuance via the HTTP-01 webroot challenge.
#[allow(async_fn_in_trait)]
pub trait CertIssuer {
    /// Request a certificate for `domain`, placing challenge files in `webroot`.
    async fn issue(&self, webroot: &Path, domain: &str) -> Result<Output>;
}

// ── DNS and Network Ports ─────────────────────────────────────────────────────

/// Resolves a hostname to its current addresses.
#[allow(async_fn_in_trait)]
pub trait DnsResolver {
    /// Resolve `host`. NXDOMAIN and other lookup failures are errors.
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>>;
}

/// Enumerates the machine's own addresses across all interfaces.
pub trait LocalAddresses {
    fn local_addresses(&self) -> Result<BTreeSet<IpAddr>>;
}

/// Injectable time source for retry loops.
#[allow(async_fn_in_trait)]
pub trait Clock {
    async fn sleep(&self, duration: Duration);
}

/// External-event wait: blocks until the operator says DNS records exist.
#[allow(async_fn_in_trait)]
pub trait OperatorGate {
    /// Wait for the operator to confirm that `domain` now points at one of
    /// `targets`.
    ///
    /// # Errors
    ///
    /// Returns `OperatorError::Declined` if the operator refuses, or an
    /// error if the prompt cannot be shown.
    async fn confirm_dns_records(&self, domain: &str, targets: &BTreeSet<IpAddr>) -> Result<()>;
}

// ── Basic-auth Ports ──────────────────────────────────────────────────────────

/// Reads and atomically rewrites the htpasswd file.
pub trait UserStore {
    /// Raw file content; empty when the file does not exist.
    fn read(&self) -> Result<String>;
    fn write(&self, content: &str) -> Result<()>;
    fn path(&self) -> PathBuf;
}

/// Produces an htpasswd-compatible hash for a password.
#[allow(async_fn_in_trait)]
pub trait PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String>;
}

// ── Privilege Port ────────────────────────────────────────────────────────────

/// Reports whether the current process has elevated rights.
pub trait PrivilegeCheck {
    fn is_privileged(&self) -> bool;
}
