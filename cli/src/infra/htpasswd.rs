//! htpasswd file storage and `openssl passwd` hashing.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, PasswordHasher, UserStore};
use crate::domain::error::UserError;
use crate::infra::fs::write_atomic;

/// The htpasswd file on disk. A missing file reads as empty.
pub struct FileUserStore {
    path: PathBuf,
}

impl FileUserStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl UserStore for FileUserStore {
    fn read(&self) -> Result<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
        }
    }

    fn write(&self, content: &str) -> Result<()> {
        // nginx workers read this file, so it cannot be owner-only.
        write_atomic(&self.path, content.as_bytes(), 0o644)
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }
}

/// APR1-MD5 hashes via `openssl passwd -apr1 -stdin`.
pub struct OpensslHasher<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> OpensslHasher<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> PasswordHasher for OpensslHasher<R> {
    async fn hash(&self, password: &str) -> Result<String> {
        let input = format!("{password}\n");
        let output = self
            .runner
            .run_with_stdin("openssl", &["passwd", "-apr1", "-stdin"], input.as_bytes())
            .await
            .context("running openssl passwd")?;
        if !output.status.success() {
            return Err(
                UserError::HashFailed(String::from_utf8_lossy(&output.stderr).trim().to_string())
                    .into(),
            );
        }
        let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if hash.is_empty() {
            return Err(UserError::HashFailed("openssl produced no output".to_string()).into());
        }
        Ok(hash)
    }
}
