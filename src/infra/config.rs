//! Infrastructure implementation of the `ConfigStore` port.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::InstallerConfig;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "CERT_DEPLOY_CONFIG";

/// Production implementation of `ConfigStore` that reads a YAML file.
pub struct YamlConfigStore {
    path: Option<PathBuf>,
}

impl YamlConfigStore {
    /// Resolve the config location from the CLI flag, the environment and
    /// the user config directory, in that order.
    #[must_use]
    pub fn locate(explicit: Option<&Path>) -> Self {
        Self {
            path: resolve_path(
                explicit,
                std::env::var_os(CONFIG_ENV),
                dirs::config_dir().as_deref(),
            ),
        }
    }

    /// Store reading exactly `path` (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }
}

/// Pick the config file: an explicit path or the env var always wins; the
/// per-user file is used only when it exists.
#[must_use]
pub fn resolve_path(
    explicit: Option<&Path>,
    env: Option<OsString>,
    config_dir: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(val) = env.filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(val));
    }
    config_dir
        .map(|d| d.join("cert-deploy").join("config.yaml"))
        .filter(|p| p.is_file())
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<InstallerConfig> {
        let Some(path) = &self.path else {
            tracing::debug!("no config file found, using defaults");
            return Ok(InstallerConfig::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let config: InstallerConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn path(&self) -> Option<PathBuf> {
        self.path.clone()
    }
}
