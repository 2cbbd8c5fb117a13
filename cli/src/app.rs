//! Application context — unified state passed to every command handler.
//!
//! `AppContext` is built once from the global flags. It owns the loaded
//! configuration and constructs the production port implementations that
//! command handlers hand to application services.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::application::services::privilege::require_privileged;
use crate::domain::config::VhostConfig;
use crate::domain::site::SiteLayout;
use crate::infra::certbot::CertbotIssuer;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::LocalSiteStore;
use crate::infra::htpasswd::{FileUserStore, OpensslHasher};
use crate::infra::nginx::NginxControl;
use crate::infra::operator::TerminalGate;
use crate::infra::privilege::EffectiveUid;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `VHOSTCTL_YES` env vars).
    pub yes: bool,
    /// Explicit configuration file (`--config` / `VHOSTCTL_CONFIG`).
    pub config: Option<PathBuf>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Where configuration is loaded from and saved to.
    pub config_store: YamlConfigStore,
    /// Configuration loaded at startup.
    pub config: VhostConfig,
    /// When `true`, skip interactive prompts.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `VHOSTCTL_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("VHOSTCTL_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let config_store = flags
            .behaviour
            .config
            .clone()
            .map_or_else(YamlConfigStore::default, YamlConfigStore::new);
        let config = config_store.load()?;

        Ok(Self {
            // Progress lines would corrupt JSON on stdout.
            output: OutputContext::new(
                flags.output.no_color,
                flags.output.quiet || flags.output.json,
            ),
            mode,
            config_store,
            config,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Fail unless running as root. Call before any side effect.
    ///
    /// # Errors
    ///
    /// Returns `PrivilegeError::NotRoot`.
    pub fn require_root(&self, command: &str) -> Result<()> {
        require_privileged(&EffectiveUid, command)?;
        Ok(())
    }

    #[must_use]
    pub fn layout(&self) -> SiteLayout {
        self.config.layout()
    }

    #[must_use]
    pub fn site_store(&self) -> LocalSiteStore {
        LocalSiteStore::new(&self.layout())
    }

    #[must_use]
    pub fn web_server(&self) -> NginxControl<TokioCommandRunner> {
        NginxControl::new(TokioCommandRunner::default(), &self.config.nginx.binary)
    }

    #[must_use]
    pub fn cert_issuer(&self) -> CertbotIssuer<TokioCommandRunner> {
        CertbotIssuer::new(
            TokioCommandRunner::default(),
            &self.config.certbot.binary,
            self.config.certbot.email.clone(),
            self.config.certbot_timeout(),
        )
    }

    #[must_use]
    pub fn operator_gate(&self) -> TerminalGate {
        TerminalGate::new(self.non_interactive)
    }

    #[must_use]
    pub fn user_store(&self) -> FileUserStore {
        FileUserStore::new(self.config.paths.htpasswd.clone())
    }

    #[must_use]
    pub fn password_hasher(&self) -> OpensslHasher<TokioCommandRunner> {
        OpensslHasher::new(TokioCommandRunner::default())
    }
}
