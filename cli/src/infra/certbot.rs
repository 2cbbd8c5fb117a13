//! certbot — implements `CertIssuer` with the HTTP-01 webroot authenticator.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CertIssuer, CommandRunner};

pub struct CertbotIssuer<R: CommandRunner> {
    runner: R,
    binary: String,
    email: Option<String>,
    /// Issuance talks to the ACME server and can take minutes.
    timeout: Duration,
}

impl<R: CommandRunner> CertbotIssuer<R> {
    #[must_use]
    pub fn new(runner: R, binary: impl Into<String>, email: Option<String>, timeout: Duration) -> Self {
        Self {
            runner,
            binary: binary.into(),
            email,
            timeout,
        }
    }

    /// Arguments for a non-interactive webroot issuance.
    #[must_use]
    pub fn issue_args(&self, webroot: &Path, domain: &str) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "certonly".into(),
            "--webroot".into(),
            "--webroot-path".into(),
            webroot.display().to_string(),
            "--domain".into(),
            domain.into(),
            "--non-interactive".into(),
            "--agree-tos".into(),
        ];
        match &self.email {
            Some(email) => {
                args.push("--email".into());
                args.push(email.clone());
            }
            None => args.push("--register-unsafely-without-email".into()),
        }
        args
    }
}

impl<R: CommandRunner> CertIssuer for CertbotIssuer<R> {
    async fn issue(&self, webroot: &Path, domain: &str) -> Result<Output> {
        let args = self.issue_args(webroot, domain);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner
            .run_with_timeout(&self.binary, &arg_refs, self.timeout)
            .await
    }
}
