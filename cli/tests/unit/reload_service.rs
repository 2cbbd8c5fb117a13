//! Unit tests for the validate-then-reload contract.

#![allow(clippy::expect_used)]

use vhostctl::application::services::reload::reload_config;
use vhostctl::domain::error::{WebServerError, exit_code_for};

use crate::mocks::FakeWebServer;

#[tokio::test]
async fn test_reload_runs_test_then_reload() {
    let web = FakeWebServer::healthy();
    reload_config(&web).await.expect("reload");
    assert_eq!(web.calls(), vec!["test", "reload"]);
}

#[tokio::test]
async fn test_failed_test_skips_reload_and_keeps_exit_code() {
    let web = FakeWebServer::invalid_config(1);
    let err = reload_config(&web).await.expect_err("invalid");

    assert_eq!(web.calls(), vec!["test"]);
    let ws = err.downcast_ref::<WebServerError>().expect("WebServerError");
    assert!(matches!(ws, WebServerError::ConfigInvalid { stderr, .. } if stderr.contains("test failed")));
    assert_eq!(exit_code_for(&err), 1);
}

#[tokio::test]
async fn test_failed_reload_signal_is_reported() {
    let web = FakeWebServer::with_codes(0, 3);
    let err = reload_config(&web).await.expect_err("reload failed");

    assert_eq!(web.calls(), vec!["test", "reload"]);
    assert!(matches!(
        err.downcast_ref::<WebServerError>(),
        Some(WebServerError::ReloadFailed { .. })
    ));
    assert_eq!(exit_code_for(&err), 3);
}
