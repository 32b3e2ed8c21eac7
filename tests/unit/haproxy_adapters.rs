//! Unit tests for the HAProxy validator, service reloader and inspector.

#![allow(clippy::expect_used)]

use std::path::Path;
use std::time::Duration;

use cert_deploy::application::ports::{ConfigValidator, ProxyInspector, ServiceReloader};
use cert_deploy::domain::{CommandError, ReloadError, ServiceAction, ValidateError};
use cert_deploy::infra::haproxy::{HaproxyInspector, HaproxyValidator, ServiceManagerReloader};

use crate::helpers::{NoopReporter, ScriptedRunner, err_output, ok_output, proxy};

const TIMEOUT: Duration = Duration::from_secs(5);

fn validator(runner: ScriptedRunner) -> HaproxyValidator<ScriptedRunner> {
    HaproxyValidator::new(runner, "haproxy", TIMEOUT)
}

fn reloader(runner: ScriptedRunner, verify_active: bool) -> ServiceManagerReloader<ScriptedRunner> {
    ServiceManagerReloader::new(runner, "systemctl", ServiceAction::Restart, verify_active, TIMEOUT)
}

// ============================================================================
// HaproxyValidator
// ============================================================================

#[tokio::test]
async fn test_validator_runs_config_check() {
    let v = validator(ScriptedRunner::new(vec![Ok(ok_output(b"Configuration file is valid"))]));
    v.validate(&proxy(), &NoopReporter).await.expect("valid");
}

#[tokio::test]
async fn test_validator_invokes_check_mode_with_config_path() {
    let runner = ScriptedRunner::new(vec![Ok(ok_output(b""))]);
    let seen = runner.recorder();
    let v = validator(runner);
    v.validate(&proxy(), &NoopReporter).await.expect("valid");
    assert_eq!(
        *seen.lock().expect("lock"),
        vec![vec!["haproxy", "-c", "-f", "/etc/haproxy/haproxy.cfg"]]
    );
}

#[tokio::test]
async fn test_validator_missing_binary() {
    let v = validator(ScriptedRunner::new(vec![Err(CommandError::NotFound {
        program: "haproxy".to_string(),
    })]));
    let err = v.validate(&proxy(), &NoopReporter).await.expect_err("must fail");
    assert_eq!(
        err,
        ValidateError::BinaryNotFound {
            binary: "haproxy".to_string()
        }
    );
}

#[tokio::test]
async fn test_validator_nonzero_exit_carries_diagnostic() {
    let v = validator(ScriptedRunner::new(vec![Ok(err_output(
        1,
        b"[ALERT] parsing [/etc/haproxy/haproxy.cfg:42] : unknown keyword 'bogus'",
    ))]));
    let err = v.validate(&proxy(), &NoopReporter).await.expect_err("must fail");
    match err {
        ValidateError::ConfigInvalid { diagnostic } => {
            assert!(diagnostic.contains("unknown keyword"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_validator_timeout() {
    let v = validator(ScriptedRunner::new(vec![Err(CommandError::Timeout {
        program: "haproxy".to_string(),
        timeout: Duration::from_secs(30),
    })]));
    let err = v.validate(&proxy(), &NoopReporter).await.expect_err("must fail");
    assert_eq!(err, ValidateError::Timeout { seconds: 30 });
}

// ============================================================================
// ServiceManagerReloader
// ============================================================================

#[tokio::test]
async fn test_reloader_restarts_then_checks_active() {
    let runner = ScriptedRunner::new(vec![Ok(ok_output(b"")), Ok(ok_output(b"active"))]);
    let seen = runner.recorder();
    let r = reloader(runner, true);
    r.reload(&proxy(), &NoopReporter).await.expect("reloaded");
    assert_eq!(
        *seen.lock().expect("lock"),
        vec![
            vec!["systemctl", "restart", "haproxy"],
            vec!["systemctl", "is-active", "haproxy"],
        ]
    );
}

#[tokio::test]
async fn test_reloader_uses_configured_action() {
    let runner = ScriptedRunner::new(vec![Ok(ok_output(b""))]);
    let seen = runner.recorder();
    let r = ServiceManagerReloader::new(runner, "systemctl", ServiceAction::Reload, false, TIMEOUT);
    r.reload(&proxy(), &NoopReporter).await.expect("reloaded");
    assert_eq!(seen.lock().expect("lock")[0], vec!["systemctl", "reload", "haproxy"]);
}

#[tokio::test]
async fn test_reloader_inactive_after_restart() {
    let r = reloader(
        ScriptedRunner::new(vec![Ok(ok_output(b"")), Ok(err_output(3, b"failed"))]),
        true,
    );
    let err = r.reload(&proxy(), &NoopReporter).await.expect_err("must fail");
    assert_eq!(
        err,
        ReloadError::NotActive {
            service: "haproxy".to_string()
        }
    );
}

#[tokio::test]
async fn test_reloader_skips_active_check_when_disabled() {
    // Only one response queued: a second call would panic.
    let r = reloader(ScriptedRunner::new(vec![Ok(ok_output(b""))]), false);
    r.reload(&proxy(), &NoopReporter).await.expect("reloaded");
}

#[tokio::test]
async fn test_reloader_failure_carries_diagnostic() {
    let r = reloader(
        ScriptedRunner::new(vec![Ok(err_output(
            1,
            b"Job for haproxy.service failed because the control process exited with error code.",
        ))]),
        true,
    );
    let err = r.reload(&proxy(), &NoopReporter).await.expect_err("must fail");
    assert!(matches!(err, ReloadError::Failed { ref diagnostic } if diagnostic.contains("Job for haproxy.service")));
}

#[tokio::test]
async fn test_reloader_timeout() {
    let r = reloader(
        ScriptedRunner::new(vec![Err(CommandError::Timeout {
            program: "systemctl".to_string(),
            timeout: Duration::from_secs(60),
        })]),
        true,
    );
    let err = r.reload(&proxy(), &NoopReporter).await.expect_err("must fail");
    assert_eq!(err, ReloadError::Timeout { seconds: 60 });
    assert_eq!(err.reason_code(), "timeout");
}

#[tokio::test]
async fn test_reloader_active_check_timeout() {
    let runner = ScriptedRunner::new(vec![
        Ok(ok_output(b"")),
        Err(CommandError::Timeout {
            program: "systemctl".to_string(),
            timeout: Duration::from_secs(60),
        }),
    ]);
    let seen = runner.recorder();
    let r = reloader(runner, true);
    let err = r.reload(&proxy(), &NoopReporter).await.expect_err("must fail");
    assert_eq!(err, ReloadError::Timeout { seconds: 60 });
    assert_eq!(seen.lock().expect("lock")[1], vec!["systemctl", "is-active", "haproxy"]);
}

#[tokio::test]
async fn test_reloader_missing_manager() {
    let r = reloader(
        ScriptedRunner::new(vec![Err(CommandError::NotFound {
            program: "systemctl".to_string(),
        })]),
        true,
    );
    let err = r.reload(&proxy(), &NoopReporter).await.expect_err("must fail");
    assert_eq!(err.reason_code(), "manager_not_found");
}

// ============================================================================
// HaproxyInspector
// ============================================================================

#[tokio::test]
async fn test_inspector_version_is_first_line() {
    let inspector = HaproxyInspector::new(
        ScriptedRunner::new(vec![Ok(ok_output(
            b"\nHAProxy version 2.8.5-1ubuntu3 2024/04/01\nStatus: long-term supported branch\n",
        ))]),
        "haproxy",
    );
    assert_eq!(
        inspector.version().await.expect("version"),
        "HAProxy version 2.8.5-1ubuntu3 2024/04/01"
    );
}

#[tokio::test]
async fn test_inspector_version_fails_on_empty_output() {
    let inspector = HaproxyInspector::new(ScriptedRunner::new(vec![Ok(ok_output(b""))]), "haproxy");
    assert!(inspector.version().await.is_err());
}

#[test]
fn test_inspector_config_exists_requires_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = dir.path().join("haproxy.cfg");
    std::fs::write(&cfg, b"global\n").expect("seed");
    let inspector = HaproxyInspector::new(ScriptedRunner::default(), "haproxy");

    assert!(inspector.config_exists(&cfg));
    assert!(!inspector.config_exists(dir.path()));
    assert!(!inspector.config_exists(Path::new("/nonexistent/haproxy.cfg")));
}
