//! HAProxy and service-manager adapters.
//!
//! `HaproxyValidator` runs `<binary> -c -f <config>`, `ServiceManagerReloader`
//! runs `<manager> restart|reload <service>`, and `HaproxyInspector` answers
//! the `prepare` probes. All process execution goes through a `CommandRunner`.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{
    CommandRunner, ConfigValidator, ProgressReporter, ProxyInspector, ServiceReloader,
};
use crate::domain::{CommandError, ProxyHandle, ReloadError, ServiceAction, ValidateError};
use crate::infra::command_runner::diagnostic;

// ── Config validator ─────────────────────────────────────────────────────────

/// Runs the proxy's built-in configuration check.
pub struct HaproxyValidator<C> {
    runner: C,
    binary: String,
    timeout: Duration,
}

impl<C: CommandRunner> HaproxyValidator<C> {
    #[must_use]
    pub fn new(runner: C, binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            runner,
            binary: binary.into(),
            timeout,
        }
    }
}

impl<C: CommandRunner> ConfigValidator for HaproxyValidator<C> {
    async fn validate(
        &self,
        proxy: &ProxyHandle,
        _reporter: &dyn ProgressReporter,
    ) -> Result<(), ValidateError> {
        let config = proxy.config_path().to_string_lossy();
        let output = self
            .runner
            .run_with_timeout(&self.binary, &["-c", "-f", &config], self.timeout)
            .await
            .map_err(|e| match e {
                CommandError::NotFound { program } => ValidateError::BinaryNotFound { binary: program },
                CommandError::Timeout { timeout, .. } => ValidateError::Timeout {
                    seconds: timeout.as_secs(),
                },
                CommandError::Io { program, reason } => ValidateError::Spawn {
                    binary: program,
                    reason,
                },
            })?;

        if output.status.success() {
            tracing::info!(config = %config, "proxy configuration test passed");
            Ok(())
        } else {
            let diagnostic = diagnostic(&output);
            tracing::error!(config = %config, %diagnostic, "proxy configuration test failed");
            Err(ValidateError::ConfigInvalid { diagnostic })
        }
    }
}

// ── Service reloader ─────────────────────────────────────────────────────────

/// Restarts or reloads the proxy through a systemctl-compatible manager.
pub struct ServiceManagerReloader<C> {
    runner: C,
    manager: String,
    action: ServiceAction,
    verify_active: bool,
    timeout: Duration,
}

impl<C: CommandRunner> ServiceManagerReloader<C> {
    #[must_use]
    pub fn new(
        runner: C,
        manager: impl Into<String>,
        action: ServiceAction,
        verify_active: bool,
        timeout: Duration,
    ) -> Self {
        Self {
            runner,
            manager: manager.into(),
            action,
            verify_active,
            timeout,
        }
    }

    async fn run_manager(&self, args: &[&str]) -> Result<std::process::Output, ReloadError> {
        self.runner
            .run_with_timeout(&self.manager, args, self.timeout)
            .await
            .map_err(|e| match e {
                CommandError::NotFound { program } => ReloadError::ManagerNotFound { manager: program },
                CommandError::Timeout { timeout, .. } => ReloadError::Timeout {
                    seconds: timeout.as_secs(),
                },
                CommandError::Io { program, reason } => ReloadError::Failed {
                    diagnostic: format!("{program}: {reason}"),
                },
            })
    }
}

impl<C: CommandRunner> ServiceReloader for ServiceManagerReloader<C> {
    async fn reload(
        &self,
        proxy: &ProxyHandle,
        reporter: &dyn ProgressReporter,
    ) -> Result<(), ReloadError> {
        let service = proxy.service_name();
        let output = self.run_manager(&[self.action.as_str(), service]).await?;
        if !output.status.success() {
            let diagnostic = diagnostic(&output);
            tracing::error!(service, action = self.action.as_str(), %diagnostic, "service reload failed");
            return Err(ReloadError::Failed { diagnostic });
        }

        if self.verify_active {
            reporter.step(&format!("waiting for {service} to report active..."));
            let status = self.run_manager(&["is-active", service]).await?;
            if !status.status.success() {
                tracing::error!(service, state = %diagnostic(&status), "service not active after reload");
                return Err(ReloadError::NotActive {
                    service: service.to_string(),
                });
            }
        }
        tracing::info!(service, action = self.action.as_str(), "service reloaded");
        Ok(())
    }
}

// ── Inspector ────────────────────────────────────────────────────────────────

/// Read-only environment probes for `prepare`.
pub struct HaproxyInspector<C> {
    runner: C,
    binary: String,
}

impl<C: CommandRunner> HaproxyInspector<C> {
    #[must_use]
    pub fn new(runner: C, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }
}

impl<C: CommandRunner> ProxyInspector for HaproxyInspector<C> {
    fn config_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    async fn version(&self) -> Result<String> {
        let output = self.runner.run(&self.binary, &["-v"]).await?;
        anyhow::ensure!(
            output.status.success(),
            "{} -v failed: {}",
            self.binary,
            diagnostic(&output)
        );
        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("{} -v printed nothing", self.binary))
    }
}
