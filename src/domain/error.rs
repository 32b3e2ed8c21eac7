//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

// ── Request errors ────────────────────────────────────────────────────────────

/// Errors raised while constructing a `DeploymentRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Domain must not be empty.")]
    EmptyDomain,

    #[error("Invalid domain '{0}': expected a DNS hostname such as example.com")]
    InvalidDomain(String),
}

// ── Material store errors ─────────────────────────────────────────────────────

/// Failures of the Material Store stage.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreError {
    #[error("cannot read source material {}: {reason}", .path.display())]
    SourceUnreadable { path: PathBuf, reason: String },

    #[error("target directory {} is unavailable: {reason}", .path.display())]
    DirectoryUnavailable { path: PathBuf, reason: String },

    #[error("failed to write {}: {reason}", .path.display())]
    Write {
        path: PathBuf,
        reason: String,
        /// Files already renamed into place before the failure.
        committed: Vec<PathBuf>,
    },
}

impl StoreError {
    /// Short machine-readable name of the failure.
    #[must_use]
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::SourceUnreadable { .. } => "source_unreadable",
            Self::DirectoryUnavailable { .. } => "directory_unavailable",
            Self::Write { .. } => "write_error",
        }
    }
}

// ── Config validator errors ───────────────────────────────────────────────────

/// Failures of the Config Validator stage.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidateError {
    #[error("proxy binary '{binary}' not found")]
    BinaryNotFound { binary: String },

    #[error("proxy configuration is invalid:\n{diagnostic}")]
    ConfigInvalid { diagnostic: String },

    #[error("configuration check timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("failed to run '{binary}': {reason}")]
    Spawn { binary: String, reason: String },
}

impl ValidateError {
    /// Short machine-readable name of the failure.
    #[must_use]
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::BinaryNotFound { .. } => "binary_not_found",
            Self::ConfigInvalid { .. } => "config_invalid",
            Self::Timeout { .. } => "timeout",
            Self::Spawn { .. } => "spawn_failed",
        }
    }
}

// ── Service reloader errors ───────────────────────────────────────────────────

/// Failures of the Service Reloader stage.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReloadError {
    #[error("service manager '{manager}' not found")]
    ManagerNotFound { manager: String },

    #[error("service reload failed:\n{diagnostic}")]
    Failed { diagnostic: String },

    #[error("service '{service}' is not active after reload")]
    NotActive { service: String },

    #[error("service reload timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl ReloadError {
    /// Short machine-readable name of the failure.
    #[must_use]
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::ManagerNotFound { .. } => "manager_not_found",
            Self::Failed { .. } => "reload_error",
            Self::NotActive { .. } => "not_active",
            Self::Timeout { .. } => "timeout",
        }
    }
}

// ── Process errors ────────────────────────────────────────────────────────────

/// Failures of an external process invocation, before its exit code is known.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{program}: command not found")]
    NotFound { program: String },

    #[error("{program} timed out after {}s", .timeout.as_secs())]
    Timeout {
        program: String,
        timeout: std::time::Duration,
    },

    #[error("failed to run {program}: {reason}")]
    Io { program: String, reason: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors in the installer configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid template '{template}' for {field}: {reason}")]
    InvalidTemplate {
        field: &'static str,
        template: String,
        reason: &'static str,
    },

    #[error("Setting {0} must not be empty")]
    Empty(&'static str),

    #[error("Setting {0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

// ── Installer hook errors ─────────────────────────────────────────────────────

/// Errors returned by host lifecycle hooks outside the deployment core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    #[error("{0} is not supported by the HAProxy installer")]
    Unsupported(&'static str),
}
