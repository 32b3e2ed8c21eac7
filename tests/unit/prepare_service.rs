//! Unit tests for the pre-deployment environment check.

#![allow(clippy::expect_used)]

use std::path::Path;

use anyhow::Result;
use cert_deploy::application::ports::ProxyInspector;
use cert_deploy::application::services::prepare::prepare;

use crate::helpers::{RecordingReporter, proxy};

struct StubInspector {
    config_exists: bool,
    version: Option<&'static str>,
}

impl ProxyInspector for StubInspector {
    fn config_exists(&self, _: &Path) -> bool {
        self.config_exists
    }

    async fn version(&self) -> Result<String> {
        self.version
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("haproxy: command not found"))
    }
}

#[tokio::test]
async fn test_prepare_reports_version() {
    let inspector = StubInspector {
        config_exists: true,
        version: Some("HAProxy version 2.8.5"),
    };
    let report = prepare(&inspector, &proxy(), &RecordingReporter::default())
        .await
        .expect("prepare");
    assert_eq!(report.version.as_deref(), Some("HAProxy version 2.8.5"));
}

#[tokio::test]
async fn test_prepare_fails_without_config_file() {
    let inspector = StubInspector {
        config_exists: false,
        version: Some("HAProxy version 2.8.5"),
    };
    let err = prepare(&inspector, &proxy(), &RecordingReporter::default())
        .await
        .expect_err("must fail");
    assert!(err.to_string().contains("/etc/haproxy/haproxy.cfg"));
}

#[tokio::test]
async fn test_prepare_unknown_version_is_only_a_warning() {
    let inspector = StubInspector {
        config_exists: true,
        version: None,
    };
    let reporter = RecordingReporter::default();
    let report = prepare(&inspector, &proxy(), &reporter).await.expect("prepare");
    assert!(report.version.is_none());
    assert_eq!(reporter.warnings.lock().expect("lock").len(), 1);
}
