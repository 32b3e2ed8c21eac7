//! Deployment stages and the outcome reported to the caller.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::error::{ReloadError, StoreError, ValidateError};

/// States of the deployment state machine.
///
/// `Idle → Writing → Validating → Reloading → Done`, with an early exit to
/// `Failed` from any working stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployStage {
    Idle,
    Writing,
    Validating,
    Reloading,
    Done,
    Failed,
}

impl DeployStage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Writing => "writing",
            Self::Validating => "validating",
            Self::Reloading => "reloading",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Whether this stage ends a run.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for DeployStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final status of one deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    Success,
    WriteFailed,
    ValidationFailed,
    ReloadFailed,
}

/// The error that stopped a deployment, tagged by stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "error", rename_all = "snake_case")]
pub enum StageFailure {
    Write(StoreError),
    Validate(ValidateError),
    Reload(ReloadError),
}

impl StageFailure {
    /// The stage the failure happened in.
    #[must_use]
    pub fn stage(&self) -> DeployStage {
        match self {
            Self::Write(_) => DeployStage::Writing,
            Self::Validate(_) => DeployStage::Validating,
            Self::Reload(_) => DeployStage::Reloading,
        }
    }

    #[must_use]
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::Write(e) => e.reason_code(),
            Self::Validate(e) => e.reason_code(),
            Self::Reload(e) => e.reason_code(),
        }
    }
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write(e) => write!(f, "{} stage failed: {e}", self.stage()),
            Self::Validate(e) => write!(f, "{} stage failed: {e}", self.stage()),
            Self::Reload(e) => write!(f, "{} stage failed: {e}", self.stage()),
        }
    }
}

/// Result of one `deploy` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentOutcome {
    pub domain: String,
    pub status: DeploymentStatus,
    /// Files renamed into place during this run, including on failure.
    pub written_paths: BTreeSet<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<StageFailure>,
    pub finished_at: DateTime<Utc>,
}

impl DeploymentOutcome {
    /// All stages passed.
    #[must_use]
    pub fn success(domain: &str, written_paths: BTreeSet<PathBuf>) -> Self {
        Self {
            domain: domain.to_string(),
            status: DeploymentStatus::Success,
            written_paths,
            failure: None,
            finished_at: Utc::now(),
        }
    }

    /// A stage failed; later stages did not run.
    #[must_use]
    pub fn failed(domain: &str, written_paths: BTreeSet<PathBuf>, failure: StageFailure) -> Self {
        let status = match failure {
            StageFailure::Write(_) => DeploymentStatus::WriteFailed,
            StageFailure::Validate(_) => DeploymentStatus::ValidationFailed,
            StageFailure::Reload(_) => DeploymentStatus::ReloadFailed,
        };
        Self {
            domain: domain.to_string(),
            status,
            written_paths,
            failure: Some(failure),
            finished_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == DeploymentStatus::Success
    }
}
