//! Application service — pre-deployment environment check.
//!
//! Confirms the proxy configuration file exists and detects the proxy
//! version. A missing version is only a warning; the config check during
//! deployment reports a missing binary precisely.

use anyhow::Result;

use crate::application::ports::{ProgressReporter, ProxyInspector};
use crate::domain::ProxyHandle;

/// What `prepare` found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareReport {
    /// The proxy's version line, if it could be determined.
    pub version: Option<String>,
}

/// Check the environment before deploying.
///
/// # Errors
///
/// Returns an error if the proxy configuration file does not exist.
pub async fn prepare(
    inspector: &impl ProxyInspector,
    proxy: &ProxyHandle,
    reporter: &impl ProgressReporter,
) -> Result<PrepareReport> {
    let config_path = proxy.config_path();
    if !inspector.config_exists(config_path) {
        anyhow::bail!(
            "proxy configuration file '{}' does not exist",
            config_path.display()
        );
    }

    let version = match inspector.version().await {
        Ok(version) => {
            tracing::info!(%version, "detected proxy version");
            reporter.step(&format!("detected {version}"));
            Some(version)
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not determine proxy version");
            reporter.warn(&format!("could not determine proxy version: {e}"));
            None
        }
    };
    Ok(PrepareReport { version })
}
