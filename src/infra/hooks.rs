//! Host lifecycle hooks for the HAProxy installer.
//!
//! The installer never edits HAProxy configuration, so there is nothing to
//! enhance, save or roll back.

use std::collections::BTreeSet;

use crate::application::ports::InstallerHooks;
use crate::domain::HookError;

pub struct HaproxyHooks;

impl InstallerHooks for HaproxyHooks {
    fn more_info(&self) -> &'static str {
        "Installs certificates into HAProxy: writes the certificate material, \
         checks the HAProxy configuration and restarts the service. \
         HAProxy routing configuration is never modified."
    }

    fn supported_enhancements(&self) -> &'static [&'static str] {
        &[]
    }

    fn enhance(&self, domain: &str, enhancement: &str) -> Result<(), HookError> {
        tracing::debug!(domain, enhancement, "enhancement requested");
        Err(HookError::Unsupported("enhance"))
    }

    fn save(&self, title: Option<&str>) -> Result<(), HookError> {
        tracing::info!(title = title.unwrap_or(""), "save requested; no configuration changes to save");
        Ok(())
    }

    fn rollback_checkpoints(&self, checkpoints: u32) -> Result<(), HookError> {
        tracing::debug!(checkpoints, "rollback requested");
        Err(HookError::Unsupported("rollback"))
    }

    fn all_names(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }
}
