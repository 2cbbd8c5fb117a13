//! Shared fixtures: a temp site tree plus a config file pointing at it.

#![allow(dead_code, clippy::expect_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub fn vhostctl() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vhostctl"));
    cmd.env("NO_COLOR", "1")
        .env_remove("VHOSTCTL_CONFIG")
        .env_remove("VHOSTCTL_LOG");
    cmd
}

/// Whether the test process can exercise root-only commands.
pub fn is_root() -> bool {
    nix::unistd::Uid::effective().is_root()
}

/// A temp tree with sites-available, sites-enabled, www, and a config file
/// whose nginx and certbot binaries are `true`.
pub struct Sandbox {
    pub dir: TempDir,
    pub config: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let root = dir.path();
        for sub in ["sites-available", "sites-enabled", "www", "live"] {
            std::fs::create_dir_all(root.join(sub)).expect("mkdir");
        }
        let config = root.join("config.yaml");
        let yaml = format!(
            "paths:\n  sites_available: {a}\n  sites_enabled: {e}\n  webroot: {w}\n  cert_root: {c}\n  htpasswd: {h}\nnginx:\n  binary: \"true\"\ncertbot:\n  binary: \"true\"\ndns:\n  retry_interval_secs: 1\n",
            a = root.join("sites-available").display(),
            e = root.join("sites-enabled").display(),
            w = root.join("www").display(),
            c = root.join("live").display(),
            h = root.join("htpasswd").display(),
        );
        std::fs::write(&config, yaml).expect("write config");
        Self { dir, config }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn available(&self, name: &str) -> PathBuf {
        self.root().join("sites-available").join(name)
    }

    pub fn enabled(&self, name: &str) -> PathBuf {
        self.root().join("sites-enabled").join(name)
    }

    pub fn add_site(&self, name: &str) {
        std::fs::write(self.available(name), "server {}\n").expect("write fragment");
    }

    pub fn enable_site(&self, name: &str) {
        std::os::unix::fs::symlink(self.available(name), self.enabled(name)).expect("symlink");
    }

    /// A command preconfigured with `--config` for this sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = vhostctl();
        cmd.arg("--config").arg(&self.config);
        cmd
    }
}
