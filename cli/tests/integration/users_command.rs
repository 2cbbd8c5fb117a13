//! Integration tests for `vhostctl users`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use predicates::prelude::*;

use crate::support::{Sandbox, is_root};

#[test]
fn test_users_list_without_file_shows_hint() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["users", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No users"));
}

#[test]
fn test_users_list_json() {
    let sandbox = Sandbox::new();
    std::fs::write(
        sandbox.root().join("htpasswd"),
        "# comment\nalice:$apr1$a$b\nbob:$apr1$c$d\n",
    )
    .unwrap();

    let output = sandbox
        .cmd()
        .args(["--json", "users", "list"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value, serde_json::json!(["alice", "bob"]));
}

#[test]
fn test_users_add_requires_root() {
    if is_root() {
        return;
    }
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["users", "add", "alice", "--password-stdin"])
        .write_stdin("pw\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must be run as root"));
    assert!(!sandbox.root().join("htpasswd").exists());
}

#[test]
fn test_users_add_invalid_name_as_root() {
    if !is_root() {
        return;
    }
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["users", "add", "alice1", "--password-stdin"])
        .write_stdin("pw\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("letters only"));
}

#[test]
fn test_users_remove_unknown_as_root() {
    if !is_root() {
        return;
    }
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.root().join("htpasswd"), "alice:x\n").unwrap();
    sandbox
        .cmd()
        .args(["users", "remove", "carol"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
    assert_eq!(
        std::fs::read_to_string(sandbox.root().join("htpasswd")).unwrap(),
        "alice:x\n"
    );
}
