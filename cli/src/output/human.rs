//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;

use crate::application::services::dns_wait::DnsReadiness;
use crate::application::services::provision::ProvisionOutcome;
use crate::domain::config::{VALID_CONFIG_KEYS, VhostConfig};
use crate::domain::site::SiteEntry;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version.
    pub fn render_version(&self, version: &str) {
        if !self.ctx.quiet {
            println!("vhostctl {version}");
        }
    }

    /// Render the site table.
    pub fn render_sites(&self, sites: &[SiteEntry]) {
        if sites.is_empty() {
            if !self.ctx.quiet {
                println!("No sites in sites-available. Create one: vhostctl create <domain>");
            }
            return;
        }
        for site in sites {
            if site.enabled {
                println!(
                    "  {} {}",
                    "●".style(self.ctx.styles.success),
                    site.name
                );
            } else {
                println!(
                    "  {} {}",
                    "○".style(self.ctx.styles.dim),
                    site.name.style(self.ctx.styles.dim)
                );
            }
        }
    }

    /// Render basic-auth user names.
    pub fn render_users(&self, users: &[String]) {
        if users.is_empty() {
            if !self.ctx.quiet {
                println!("No users. Add one: vhostctl users add <name>");
            }
            return;
        }
        for user in users {
            println!("  {user}");
        }
    }

    /// Render the effective configuration.
    pub fn render_config(&self, config: &VhostConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        for key in VALID_CONFIG_KEYS {
            let value = config.get(key).unwrap_or_default();
            let shown = if value.is_empty() { "(not set)".to_string() } else { value };
            println!("  {:<26} {shown}", format!("{key}:"));
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        println!(
            "    {:<18} {}",
            "VHOSTCTL_CONFIG:",
            std::env::var("VHOSTCTL_CONFIG").unwrap_or_else(|_| "(not set)".to_string())
        );
        println!(
            "    {:<18} {}",
            "VHOSTCTL_LOG:",
            std::env::var("VHOSTCTL_LOG").unwrap_or_else(|_| "(not set)".to_string())
        );
        println!();
    }

    /// Render the summary after a successful `create`.
    pub fn render_provision(&self, outcome: &ProvisionOutcome) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx.header(&outcome.domain);
        let dns = match outcome.dns {
            DnsReadiness::AlreadyLocal => "already pointed here".to_string(),
            DnsReadiness::Propagated { attempts } => {
                format!("propagated after {attempts} lookup(s)")
            }
        };
        self.ctx.kv("DNS:", &dns);
        self.ctx.kv(
            "Webroot:",
            if outcome.webroot_created { "created" } else { "existing" },
        );
        self.ctx.kv("TLS:", "certificate issued, HTTPS enabled");
    }
}
