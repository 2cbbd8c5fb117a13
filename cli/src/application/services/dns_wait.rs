//! Application service — wait until a domain resolves to this machine.
//!
//! Resolution failures and foreign addresses are both transient: the loop
//! sleeps a fixed interval and tries again, with no attempt limit. Only the
//! operator (declining the prompt or interrupting the process) ends it early.

use std::collections::BTreeSet;
use std::net::IpAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::ports::{Clock, DnsResolver, LocalAddresses, OperatorGate, ProgressReporter};
use crate::domain::address::{describe_targets, resolves_locally};

/// How the domain came to resolve locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DnsReadiness {
    /// The first lookup already returned a local address; no prompt shown.
    AlreadyLocal,
    /// The operator created records and the loop saw them after `attempts`
    /// lookups.
    Propagated { attempts: u64 },
}

/// Collaborators of the DNS readiness check.
pub struct DnsWatch<'a, R, L, C, G> {
    pub resolver: &'a R,
    pub local: &'a L,
    pub clock: &'a C,
    pub gate: &'a G,
    /// Fixed backoff between lookups.
    pub interval: Duration,
}

impl<R, L, C, G> DnsWatch<'_, R, L, C, G>
where
    R: DnsResolver,
    L: LocalAddresses,
    C: Clock,
    G: OperatorGate,
{
    /// Block until `domain` resolves to one of this machine's addresses.
    ///
    /// # Errors
    ///
    /// Returns an error only if local addresses cannot be enumerated or the
    /// operator gate fails. Lookup errors are retried, never returned.
    pub async fn wait_until_local(
        &self,
        domain: &str,
        reporter: &impl ProgressReporter,
    ) -> Result<DnsReadiness> {
        let local = self
            .local
            .local_addresses()
            .context("enumerating local addresses")?;
        tracing::debug!(?local, "local addresses");

        if self.lookup_is_local(domain, &local).await {
            return Ok(DnsReadiness::AlreadyLocal);
        }

        reporter.instruct(&format!(
            "{domain} does not resolve to this server yet. Create A/AAAA records pointing to: {}",
            describe_targets(&local)
        ));
        self.gate.confirm_dns_records(domain, &local).await?;

        reporter.step(&format!("waiting for {domain} to resolve locally..."));
        let mut attempts: u64 = 0;
        loop {
            attempts += 1;
            if self.lookup_is_local(domain, &local).await {
                return Ok(DnsReadiness::Propagated { attempts });
            }
            tracing::debug!(domain, attempts, "not local yet; retrying");
            self.clock.sleep(self.interval).await;
        }
    }

    async fn lookup_is_local(&self, domain: &str, local: &BTreeSet<IpAddr>) -> bool {
        match self.resolver.resolve(domain).await {
            Ok(addrs) => {
                tracing::debug!(domain, ?addrs, "resolved");
                resolves_locally(&addrs, local)
            }
            Err(e) => {
                tracing::debug!(domain, error = %e, "resolution failed");
                false
            }
        }
    }
}
