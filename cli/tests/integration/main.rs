//! Integration tests for vhostctl
//!
//! These tests spawn the actual binary against a config file whose roots
//! all live in a temp dir. External tools are replaced with `true` where a
//! test needs them to succeed.

mod config_command;
mod support;
mod users_command;
