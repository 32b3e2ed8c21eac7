//! `cert-deploy config` — show the effective configuration.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::app::AppContext;

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the configuration file in use
    Path,
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn run(app: &AppContext, cmd: &ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => {
            if app.is_json() {
                println!("{}", serde_json::to_string_pretty(&app.config)?);
            } else {
                let yaml = serde_yaml::to_string(&app.config).context("cannot serialize config")?;
                print!("{yaml}");
            }
        }
        ConfigCommand::Path => match &app.config_path {
            Some(path) => println!("{}", path.display()),
            None => app.output.info("no configuration file found; using defaults"),
        },
    }
    Ok(ExitCode::SUCCESS)
}
