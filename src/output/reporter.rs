//! `TerminalReporter` — Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::domain::DeployStage;
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `stage()` prints `"  [{stage}] {domain}"`
/// - `step()` prints `"  → {message}"`
/// - `success()` prints `"  ✓ {message}"`
/// - `warn()` prints `"  ! {message}"`
///
/// All output is suppressed when `ctx.quiet`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn stage(&self, domain: &str, stage: DeployStage) {
        if !self.ctx.quiet && !stage.is_terminal() {
            let label = format!("[{stage}]");
            println!("  {} {domain}", label.style(self.ctx.styles.stage));
        }
    }

    fn step(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "→".style(self.ctx.styles.stage));
        }
    }

    fn success(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "✓".style(self.ctx.styles.success));
        }
    }

    fn warn(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "!".style(self.ctx.styles.warning));
        }
    }
}

/// Reporter for `--json` runs: stdout is reserved for the JSON document, so
/// events go to the tracing subscriber on stderr.
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn stage(&self, domain: &str, stage: DeployStage) {
        tracing::info!(domain, stage = %stage, "stage");
    }

    fn step(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn success(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Reporter selected by the output mode.
pub enum Reporter<'a> {
    Terminal(TerminalReporter<'a>),
    Tracing(TracingReporter),
}

impl ProgressReporter for Reporter<'_> {
    fn stage(&self, domain: &str, stage: DeployStage) {
        match self {
            Self::Terminal(r) => r.stage(domain, stage),
            Self::Tracing(r) => r.stage(domain, stage),
        }
    }

    fn step(&self, message: &str) {
        match self {
            Self::Terminal(r) => r.step(message),
            Self::Tracing(r) => r.step(message),
        }
    }

    fn success(&self, message: &str) {
        match self {
            Self::Terminal(r) => r.success(message),
            Self::Tracing(r) => r.success(message),
        }
    }

    fn warn(&self, message: &str) {
        match self {
            Self::Terminal(r) => r.warn(message),
            Self::Tracing(r) => r.warn(message),
        }
    }
}
