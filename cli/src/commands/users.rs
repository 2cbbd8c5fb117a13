//! `vhostctl users` — manage basic-auth users in the htpasswd file.

use anyhow::{Context, Result};
use clap::Subcommand;
use tokio::io::AsyncBufReadExt;

use crate::app::AppContext;
use crate::application::services::users;
use crate::domain::users::validate_user_name;

/// Users subcommands.
#[derive(Subcommand)]
pub enum UsersCommand {
    /// List basic-auth users
    List,
    /// Add a basic-auth user
    Add {
        /// User name (letters only)
        name: String,
        /// Read the password from the first line of stdin instead of prompting
        #[arg(long)]
        password_stdin: bool,
    },
    /// Remove a basic-auth user
    Remove {
        /// User name
        name: String,
    },
}

/// Run the users command.
///
/// # Errors
///
/// Returns an error for invalid or duplicate names, unknown users, a caller
/// that is not root, or hashing/write failures.
pub async fn run(app: &AppContext, cmd: UsersCommand) -> Result<()> {
    match cmd {
        UsersCommand::List => {
            let names = users::list_users(&app.user_store())?;
            app.renderer().render_users(&names)
        }
        UsersCommand::Add {
            name,
            password_stdin,
        } => {
            app.require_root("users add")?;
            // Reject bad names before asking for a password.
            validate_user_name(&name)?;
            let password = if password_stdin {
                read_password_stdin().await?
            } else {
                prompt_password(&name).await?
            };
            users::add_user(&app.user_store(), &app.password_hasher(), &name, &password).await?;
            app.output.success(&format!("Added user {name}"));
            Ok(())
        }
        UsersCommand::Remove { name } => {
            app.require_root("users remove")?;
            users::remove_user(&app.user_store(), &name)?;
            app.output.success(&format!("Removed user {name}"));
            Ok(())
        }
    }
}

async fn read_password_stdin() -> Result<String> {
    let mut line = String::new();
    tokio::io::BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("reading password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    anyhow::ensure!(!password.is_empty(), "empty password on stdin");
    Ok(password)
}

async fn prompt_password(name: &str) -> Result<String> {
    let prompt = format!("Password for {name}");
    tokio::task::spawn_blocking(move || {
        dialoguer::Password::new()
            .with_prompt(prompt)
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()
    })
    .await
    .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))?
    .context("reading password from terminal")
}
