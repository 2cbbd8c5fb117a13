//! Terminal implementation of the `OperatorGate` port.

use std::collections::BTreeSet;
use std::net::IpAddr;

use anyhow::{Context, Result};

use crate::application::ports::OperatorGate;
use crate::domain::address::describe_targets;
use crate::domain::error::OperatorError;

/// Asks on the terminal; `--yes` / `CI` skip the question entirely.
pub struct TerminalGate {
    non_interactive: bool,
}

impl TerminalGate {
    #[must_use]
    pub fn new(non_interactive: bool) -> Self {
        Self { non_interactive }
    }
}

impl OperatorGate for TerminalGate {
    async fn confirm_dns_records(&self, domain: &str, targets: &BTreeSet<IpAddr>) -> Result<()> {
        if self.non_interactive {
            tracing::info!(domain, ?targets, "non-interactive; skipping DNS confirmation");
            return Ok(());
        }
        let prompt = confirm_prompt(domain, targets);
        let confirmed = tokio::task::spawn_blocking(move || {
            dialoguer::Confirm::new()
                .with_prompt(prompt)
                .default(true)
                .interact()
        })
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))?
        .context("reading confirmation from terminal")?;

        if confirmed {
            Ok(())
        } else {
            Err(OperatorError::Declined(domain.to_string()).into())
        }
    }
}

/// The prompt repeats the record targets so it stands alone in quiet mode.
fn confirm_prompt(domain: &str, targets: &BTreeSet<IpAddr>) -> String {
    format!(
        "DNS records for {domain} pointing to {} created?",
        describe_targets(targets)
    )
}
