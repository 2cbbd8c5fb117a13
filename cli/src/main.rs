//! vhostctl - nginx virtual hosts and TLS certificates

#![cfg_attr(test, allow(clippy::expect_used))]

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vhostctl::cli::Cli;
use vhostctl::domain::error::exit_code_for;
use vhostctl::output::json::format_error;

/// Conventional exit status for SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json = cli.json;

    let result = tokio::select! {
        result = cli.run() => result,
        _ = tokio::signal::ctrl_c() => {
            eprintln!();
            eprintln!("Interrupted");
            std::process::exit(EXIT_INTERRUPTED);
        }
    };

    if let Err(e) = result {
        let code = exit_code_for(&e);
        tracing::debug!(error = ?e, code, "command failed");
        if json {
            match format_error(&format!("{e:#}"), code) {
                Ok(body) => println!("{body}"),
                Err(_) => eprintln!("Error: {e:#}"),
            }
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(code);
    }
}

/// Logs go to stderr so stdout stays clean for `--json`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "vhostctl=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_env("VHOSTCTL_LOG").unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}
