//! Reference to the external proxy instance.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The proxy being deployed to. Referenced, never owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyHandle {
    config_path: PathBuf,
    service_name: String,
}

impl ProxyHandle {
    #[must_use]
    pub fn new(config_path: impl Into<PathBuf>, service_name: impl Into<String>) -> Self {
        Self {
            config_path: config_path.into(),
            service_name: service_name.into(),
        }
    }

    /// Path of the live proxy configuration file.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Service-manager unit name of the proxy.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

/// How the service manager is asked to pick up new material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceAction {
    #[default]
    Restart,
    Reload,
}

impl ServiceAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restart => "restart",
            Self::Reload => "reload",
        }
    }
}
