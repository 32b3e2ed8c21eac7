//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{
    CommandError, DeployStage, DeploymentRequest, HookError, InstallerConfig, ProxyHandle,
    ReloadError, StoreError, TargetLayout, ValidateError,
};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output, CommandError>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NotFound`] if the program does not exist and
    /// [`CommandError::Timeout`] if it exceeds `timeout`. On timeout, the child
    /// process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output, CommandError>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Event sink passed explicitly to every deployment component, so services
/// emit events without depending on the Presentation layer or on global
/// logger state. Sync trait — no async needed.
pub trait ProgressReporter {
    /// The deployment of `domain` entered `stage`.
    fn stage(&self, domain: &str, stage: DeployStage);
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Deployment Ports ──────────────────────────────────────────────────────────

/// Persists certificate material where the proxy reads it.
#[allow(async_fn_in_trait)]
pub trait MaterialStore {
    /// Write the request's material according to `layout`.
    ///
    /// Returns the set of files renamed into place. Every file is written
    /// atomically and is readable only by its owner.
    async fn write(
        &self,
        request: &DeploymentRequest,
        layout: &TargetLayout,
        reporter: &dyn ProgressReporter,
    ) -> Result<BTreeSet<PathBuf>, StoreError>;
}

/// Runs the proxy's own configuration check. Must never mutate anything.
#[allow(async_fn_in_trait)]
pub trait ConfigValidator {
    /// Validate the live configuration referenced by `proxy`.
    async fn validate(
        &self,
        proxy: &ProxyHandle,
        reporter: &dyn ProgressReporter,
    ) -> Result<(), ValidateError>;
}

/// Asks the service manager to restart or reload the proxy.
///
/// Callers must only invoke `reload` after `ConfigValidator::validate`
/// succeeded; implementations do not re-check.
#[allow(async_fn_in_trait)]
pub trait ServiceReloader {
    async fn reload(
        &self,
        proxy: &ProxyHandle,
        reporter: &dyn ProgressReporter,
    ) -> Result<(), ReloadError>;
}

/// Read-only probes used by `prepare`.
#[allow(async_fn_in_trait)]
pub trait ProxyInspector {
    /// Whether the proxy configuration file exists.
    fn config_exists(&self, path: &Path) -> bool;
    /// The proxy's self-reported version line.
    async fn version(&self) -> Result<String>;
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts loading of the installer configuration.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when no file exists.
    fn load(&self) -> Result<InstallerConfig>;
    /// The file the configuration is read from, if one was resolved.
    fn path(&self) -> Option<PathBuf>;
}

// ── Host Lifecycle Hooks ──────────────────────────────────────────────────────

/// Lifecycle hooks a certificate-management host expects from an installer.
///
/// None of these take part in the deployment state machine.
pub trait InstallerHooks {
    /// Human-readable description of the installer.
    fn more_info(&self) -> &'static str;
    /// Enhancements (redirects, HSTS, …) this installer can apply.
    fn supported_enhancements(&self) -> &'static [&'static str];
    /// Apply an enhancement to `domain`.
    ///
    /// # Errors
    ///
    /// Returns an error for any enhancement not in `supported_enhancements`.
    fn enhance(&self, domain: &str, enhancement: &str) -> Result<(), HookError>;
    /// Persist pending configuration changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the changes cannot be saved.
    fn save(&self, title: Option<&str>) -> Result<(), HookError>;
    /// Revert the last `checkpoints` saved configuration changes.
    ///
    /// # Errors
    ///
    /// Returns an error if rollback is not possible.
    fn rollback_checkpoints(&self, checkpoints: u32) -> Result<(), HookError>;
    /// Domain names found in the proxy configuration.
    fn all_names(&self) -> BTreeSet<String>;
}
