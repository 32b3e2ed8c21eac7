//! Application context — unified state passed to every command handler.
//!
//! `AppContext` loads the installer configuration once and wires the
//! production adapters (`TokioCommandRunner`, `FsMaterialStore`, the HAProxy
//! validator and the service-manager reloader) into the deployment service.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::application::services::deploy::Deployer;
use crate::domain::InstallerConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::FsMaterialStore;
use crate::infra::haproxy::{HaproxyInspector, HaproxyValidator, ServiceManagerReloader};
use crate::output::{OutputContext, Reporter, TerminalReporter, TracingReporter};

/// The deployment service wired to real processes and the real filesystem.
pub type ProductionDeployer = Deployer<
    FsMaterialStore,
    HaproxyValidator<TokioCommandRunner>,
    ServiceManagerReloader<TokioCommandRunner>,
>;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags<'a> {
    /// Explicit `--config` path.
    pub config: Option<&'a Path>,
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Effective installer configuration.
    pub config: InstallerConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read, parsed or
    /// validated.
    pub fn new(flags: &AppFlags<'_>) -> Result<Self> {
        let store = YamlConfigStore::locate(flags.config);
        let config = store.load().context("loading configuration")?;
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            config,
            config_path: store.path(),
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Progress sink for the current output mode.
    #[must_use]
    pub fn reporter(&self) -> Reporter<'_> {
        match self.mode {
            OutputMode::Human => Reporter::Terminal(TerminalReporter::new(&self.output)),
            OutputMode::Json => Reporter::Tracing(TracingReporter),
        }
    }

    /// Build the deployment service from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the target layout is invalid.
    pub fn deployer(&self) -> Result<ProductionDeployer> {
        let cfg = &self.config;
        let layout = cfg.layout().context("building target layout")?;
        let validator = HaproxyValidator::new(
            TokioCommandRunner::new(cfg.timeouts.validate_timeout()),
            cfg.proxy.binary.clone(),
            cfg.timeouts.validate_timeout(),
        );
        let reloader = ServiceManagerReloader::new(
            TokioCommandRunner::new(cfg.timeouts.reload_timeout()),
            cfg.proxy.service_manager.clone(),
            cfg.proxy.service_action,
            cfg.proxy.verify_active,
            cfg.timeouts.reload_timeout(),
        );
        Ok(Deployer::new(
            FsMaterialStore,
            validator,
            reloader,
            layout,
            cfg.proxy_handle(),
        ))
    }

    /// Read-only probes for `prepare`.
    #[must_use]
    pub fn inspector(&self) -> HaproxyInspector<TokioCommandRunner> {
        HaproxyInspector::new(
            TokioCommandRunner::new(self.config.timeouts.validate_timeout()),
            self.config.proxy.binary.clone(),
        )
    }
}
