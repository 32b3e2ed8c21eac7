//! `cert-deploy rollback` — revert saved configuration checkpoints.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::application::ports::InstallerHooks;

/// Arguments for the rollback command.
#[derive(Args, Debug)]
pub struct RollbackArgs {
    /// Number of checkpoints to revert
    #[arg(long, default_value_t = 1)]
    pub checkpoints: u32,
}

/// Run `cert-deploy rollback`.
///
/// # Errors
///
/// Returns the hook's error; the HAProxy installer keeps no checkpoints.
pub fn run(args: &RollbackArgs, hooks: &impl InstallerHooks) -> Result<ExitCode> {
    hooks.rollback_checkpoints(args.checkpoints)?;
    Ok(ExitCode::SUCCESS)
}
