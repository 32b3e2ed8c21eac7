//! Domain types and validators for the installer configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::layout::TargetLayout;
use crate::domain::proxy::{ProxyHandle, ServiceAction};

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration, normally `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InstallerConfig {
    /// The proxy process and its service unit.
    pub proxy: ProxyConfig,
    /// Where certificate material is written.
    pub target: TargetConfig,
    /// Bounds on external process invocations.
    pub timeouts: TimeoutConfig,
}

/// Proxy binary, configuration file and service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Proxy executable used for `-c -f <config>` and `-v`.
    pub binary: String,
    /// Live proxy configuration file.
    pub config_path: PathBuf,
    /// Service unit restarted after deployment.
    pub service: String,
    /// Service manager executable.
    pub service_manager: String,
    /// `restart` or `reload`.
    pub service_action: ServiceAction,
    /// Run `<service_manager> is-active <service>` after the reload.
    pub verify_active: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            binary: "haproxy".to_string(),
            config_path: PathBuf::from("/etc/haproxy/haproxy.cfg"),
            service: "haproxy".to_string(),
            service_manager: "systemctl".to_string(),
            service_action: ServiceAction::Restart,
            verify_active: true,
        }
    }
}

/// Layout mode selector in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Combined,
    Split,
}

/// Output directory and file templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub base_dir: PathBuf,
    pub layout: LayoutMode,
    pub combined_template: String,
    pub cert_template: String,
    pub key_template: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("/etc/haproxy/ssl"),
            layout: LayoutMode::Combined,
            combined_template: "{domain}.pem".to_string(),
            cert_template: "{domain}.crt".to_string(),
            key_template: "{domain}.key".to_string(),
        }
    }
}

/// Timeouts in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub validate_secs: u64,
    pub reload_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            validate_secs: 30,
            reload_secs: 60,
        }
    }
}

impl TimeoutConfig {
    #[must_use]
    pub fn validate_timeout(&self) -> Duration {
        Duration::from_secs(self.validate_secs)
    }

    #[must_use]
    pub fn reload_timeout(&self) -> Duration {
        Duration::from_secs(self.reload_secs)
    }
}

// ── Derived values ───────────────────────────────────────────────────────────

impl InstallerConfig {
    /// Check every setting before any deployment uses it.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.proxy.binary.trim().is_empty() {
            return Err(ConfigError::Empty("proxy.binary"));
        }
        if self.proxy.service.trim().is_empty() {
            return Err(ConfigError::Empty("proxy.service"));
        }
        if self.proxy.service_manager.trim().is_empty() {
            return Err(ConfigError::Empty("proxy.service_manager"));
        }
        if self.proxy.config_path.as_os_str().is_empty() {
            return Err(ConfigError::Empty("proxy.config_path"));
        }
        if self.target.base_dir.as_os_str().is_empty() {
            return Err(ConfigError::Empty("target.base_dir"));
        }
        if self.timeouts.validate_secs == 0 {
            return Err(ConfigError::ZeroTimeout("timeouts.validate_secs"));
        }
        if self.timeouts.reload_secs == 0 {
            return Err(ConfigError::ZeroTimeout("timeouts.reload_secs"));
        }
        self.layout().map(|_| ())
    }

    /// Build the target layout from the `target` section.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected templates are invalid.
    pub fn layout(&self) -> Result<TargetLayout, ConfigError> {
        let t = &self.target;
        match t.layout {
            LayoutMode::Combined => TargetLayout::combined(&t.base_dir, &t.combined_template),
            LayoutMode::Split => TargetLayout::split(&t.base_dir, &t.cert_template, &t.key_template),
        }
    }

    #[must_use]
    pub fn proxy_handle(&self) -> ProxyHandle {
        ProxyHandle::new(self.proxy.config_path.clone(), self.proxy.service.clone())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
