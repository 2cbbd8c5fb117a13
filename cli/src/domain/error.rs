//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator. Errors backed by a failed subprocess carry its exit
//! code so `main` can propagate it.

use thiserror::Error;

// ── Privilege errors ──────────────────────────────────────────────────────────

/// The caller lacks the rights a mutating command needs.
#[derive(Debug, Error)]
pub enum PrivilegeError {
    #[error("'{command}' must be run as root (try: sudo vhostctl {command})")]
    NotRoot { command: String },
}

// ── Site errors ───────────────────────────────────────────────────────────────

/// Errors related to site identity and the available/enabled sets.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Unknown site '{0}'. Run 'vhostctl sites list' to see available sites.")]
    NotFound(String),

    #[error("Site '{0}' has no fragment in sites-available; it cannot be enabled.")]
    NotAvailable(String),

    #[error("Invalid site name '{0}': must be non-empty and contain no '/'")]
    InvalidName(String),
}

// ── Web server errors ─────────────────────────────────────────────────────────

/// Errors from the nginx validate/reload contract.
#[derive(Debug, Error)]
pub enum WebServerError {
    #[error("nginx configuration test failed:\n{stderr}")]
    ConfigInvalid { stderr: String, code: Option<i32> },

    #[error("nginx reload failed:\n{stderr}")]
    ReloadFailed { stderr: String, code: Option<i32> },
}

// ── Certificate errors ────────────────────────────────────────────────────────

/// Errors from the certificate issuer.
#[derive(Debug, Error)]
pub enum CertError {
    #[error("certificate issuance for '{domain}' failed:\n{stderr}")]
    IssuanceFailed {
        domain: String,
        stderr: String,
        code: Option<i32>,
    },
}

// ── Operator errors ───────────────────────────────────────────────────────────

/// The operator declined to continue at an interactive checkpoint.
#[derive(Debug, Error)]
pub enum OperatorError {
    #[error("DNS setup for '{0}' was not confirmed; aborting.")]
    Declined(String),
}

// ── User errors ───────────────────────────────────────────────────────────────

/// Errors related to basic-auth users.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User '{0}' already exists. Remove it first: vhostctl users remove {0}")]
    AlreadyExists(String),

    #[error("User '{0}' not found.")]
    NotFound(String),

    #[error("Invalid user name '{0}': must contain letters only")]
    InvalidName(String),

    #[error("Password hashing failed:\n{0}")]
    HashFailed(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

// ── Exit codes ────────────────────────────────────────────────────────────────

/// Map an error chain to the process exit code.
///
/// Subprocess-backed errors propagate the subprocess's own code; everything
/// else (including privilege failures) exits with 1.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        let code = if let Some(e) = cause.downcast_ref::<WebServerError>() {
            match e {
                WebServerError::ConfigInvalid { code, .. }
                | WebServerError::ReloadFailed { code, .. } => *code,
            }
        } else if let Some(CertError::IssuanceFailed { code, .. }) =
            cause.downcast_ref::<CertError>()
        {
            *code
        } else {
            continue;
        };
        return code.filter(|c| *c != 0).unwrap_or(1);
    }
    1
}
