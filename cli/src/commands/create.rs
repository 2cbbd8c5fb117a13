//! `vhostctl create` — provision a new HTTPS site end to end.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::dns_wait::DnsWatch;
use crate::application::services::provision::provision;
use crate::infra::clock::TokioClock;
use crate::infra::network::{InterfaceAddresses, SystemResolver};
use crate::output::TerminalReporter;

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Domain to serve (also the site name)
    pub domain: String,
}

/// Run the create command.
///
/// # Errors
///
/// Returns an error if the caller is not root or any provisioning step fails.
pub async fn run(app: &AppContext, args: CreateArgs) -> Result<()> {
    app.require_root("create")?;

    let gate = app.operator_gate();
    let dns = DnsWatch {
        resolver: &SystemResolver,
        local: &InterfaceAddresses,
        clock: &TokioClock,
        gate: &gate,
        interval: app.config.dns_retry_interval(),
    };
    let reporter = TerminalReporter::new(&app.output);

    let outcome = provision(
        &args.domain,
        &app.layout(),
        &app.site_store(),
        &app.web_server(),
        &app.cert_issuer(),
        &dns,
        &reporter,
    )
    .await?;
    drop(reporter);

    app.renderer().render_provision(&outcome)
}
