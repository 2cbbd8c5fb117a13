//! Integration tests for `vhostctl config`.
//!
//! Every test points `--config` (or `VHOSTCTL_CONFIG`) at a temp path so the
//! system-wide `/etc/vhostctl/config.yaml` is never read or written.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use predicates::prelude::*;
use tempfile::TempDir;

use crate::support::vhostctl;

fn temp_config() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.yaml");
    (dir, path)
}

#[test]
fn test_config_help_shows_show_and_set_subcommands() {
    vhostctl()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn test_config_show_without_file_lists_defaults() {
    let (_dir, path) = temp_config();
    vhostctl()
        .args(["config", "show"])
        .env("VHOSTCTL_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("/etc/nginx/sites-available"))
        .stdout(predicate::str::contains("dns.retry_interval_secs:"))
        .stdout(predicate::str::contains("VHOSTCTL_CONFIG:"));
}

#[test]
fn test_config_show_json() {
    let (_dir, path) = temp_config();
    let output = vhostctl()
        .args(["config", "show", "--json"])
        .env("VHOSTCTL_CONFIG", &path)
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["paths"]["webroot"], "/var/www");
    assert_eq!(value["dns"]["retry_interval_secs"], 10);
    assert!(value["certbot"]["email"].is_null());
}

#[test]
fn test_config_set_then_show_roundtrip() {
    let (_dir, path) = temp_config();
    vhostctl()
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "paths.webroot", "/srv/www"])
        .assert()
        .success();

    vhostctl()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/srv/www"));
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config();
    vhostctl()
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "nginx.user", "www-data"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown setting"));
    assert!(!path.exists());
}

#[test]
fn test_config_set_relative_path_fails() {
    let (_dir, path) = temp_config();
    vhostctl()
        .arg("--config")
        .arg(&path)
        .args(["config", "set", "paths.sites_enabled", "sites-enabled"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("absolute"));
    assert!(!path.exists());
}

#[test]
fn test_config_file_with_zero_interval_fails_every_command() {
    let (_dir, path) = temp_config();
    std::fs::write(&path, "dns:\n  retry_interval_secs: 0\n").unwrap();

    vhostctl()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid configuration in"))
        .stderr(predicate::str::contains("dns.retry_interval_secs"));
}
