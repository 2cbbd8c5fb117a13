//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Manage nginx virtual hosts and TLS certificates
#[derive(Parser)]
#[command(
    name = "vhostctl",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Verbose logging to stderr (overridden by `VHOSTCTL_LOG`)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Assume yes for prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Configuration file
    #[arg(long, global = true, env = "VHOSTCTL_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List, enable, or disable sites
    #[command(subcommand)]
    Sites(commands::sites::SitesCommand),

    /// Test the nginx configuration and reload
    Reload,

    /// Provision a new HTTPS site (DNS, webroot, certificate)
    Create(commands::create::CreateArgs),

    /// Manage basic-auth users
    #[command(subcommand)]
    Users(commands::users::UsersCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            yes,
            config,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes, config },
        })?;

        match command {
            Command::Sites(cmd) => commands::sites::run(&app, cmd).await,
            Command::Reload => commands::reload::run(&app).await,
            Command::Create(args) => commands::create::run(&app, args).await,
            Command::Users(cmd) => commands::users::run(&app, cmd).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
