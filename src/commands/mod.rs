//! Command implementations

pub mod config;
pub mod deploy;
pub mod info;
pub mod prepare;
pub mod restart;
pub mod rollback;

use std::process::ExitCode;

use crate::domain::{DeployStage, DeploymentStatus};

/// Exit code for a failed validation gate.
pub const EXIT_VALIDATION_FAILED: u8 = 2;
/// Exit code for a failed reload.
pub const EXIT_RELOAD_FAILED: u8 = 3;
/// Exit code for a failed material write.
pub const EXIT_WRITE_FAILED: u8 = 4;

/// Map a deployment status to the process exit code.
#[must_use]
pub fn exit_code(status: DeploymentStatus) -> ExitCode {
    match status {
        DeploymentStatus::Success => ExitCode::SUCCESS,
        DeploymentStatus::WriteFailed => ExitCode::from(EXIT_WRITE_FAILED),
        DeploymentStatus::ValidationFailed => ExitCode::from(EXIT_VALIDATION_FAILED),
        DeploymentStatus::ReloadFailed => ExitCode::from(EXIT_RELOAD_FAILED),
    }
}

/// Exit code for a failed stage outside a full deployment.
#[must_use]
pub fn stage_exit_code(stage: DeployStage) -> ExitCode {
    match stage {
        DeployStage::Validating => ExitCode::from(EXIT_VALIDATION_FAILED),
        DeployStage::Reloading => ExitCode::from(EXIT_RELOAD_FAILED),
        DeployStage::Writing => ExitCode::from(EXIT_WRITE_FAILED),
        _ => ExitCode::FAILURE,
    }
}
