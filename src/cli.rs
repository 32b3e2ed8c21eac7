//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;
use crate::infra::hooks::HaproxyHooks;

/// Deploy issued TLS certificates to HAProxy
#[derive(Parser)]
#[command(
    name = "cert-deploy",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Configuration file (default: $CERT_DEPLOY_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Install a certificate and reload the proxy
    Deploy(commands::deploy::DeployArgs),

    /// Check the proxy environment
    Prepare,

    /// Run the proxy configuration check
    ConfigTest,

    /// Validate the configuration, then restart the proxy
    Restart,

    /// Describe the installer and its configuration
    Info,

    /// Revert saved configuration checkpoints
    Rollback(commands::rollback::RollbackArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the command
    /// fails before reaching a deployment stage.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            config,
            json,
            quiet,
            no_color,
            verbose: _,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            config: config.as_deref(),
            no_color,
            quiet,
            json,
        })?;
        match command {
            Command::Deploy(args) => commands::deploy::run(&app, &args).await,
            Command::Prepare => commands::prepare::run(&app).await,
            Command::ConfigTest => commands::config_test::run(&app).await,
            Command::Restart => commands::restart::run(&app).await,
            Command::Info => commands::info::run(&app, &HaproxyHooks),
            Command::Rollback(args) => commands::rollback::run(&args, &HaproxyHooks),
            Command::Config(cmd) => commands::config::run(&app, &cmd),
        }
    }
}
