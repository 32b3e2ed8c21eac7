//! `cert-deploy deploy` — install an issued certificate and reload the proxy.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::services::prepare::prepare;
use crate::domain::DeploymentRequest;
use crate::output::json;

/// Arguments for the deploy command.
#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Domain the certificate was issued for
    #[arg(long)]
    pub domain: String,

    /// Leaf certificate
    #[arg(long)]
    pub cert_path: PathBuf,

    /// Private key
    #[arg(long)]
    pub key_path: PathBuf,

    /// Intermediate chain
    #[arg(long)]
    pub chain_path: PathBuf,

    /// Leaf certificate followed by the intermediate chain
    #[arg(long)]
    pub fullchain_path: PathBuf,

    /// Skip the pre-deployment environment check
    #[arg(long)]
    pub skip_prepare: bool,
}

/// Run `cert-deploy deploy`.
///
/// # Errors
///
/// Returns an error if the request or configuration is invalid, or if the
/// environment check fails. Stage failures are reported through the exit
/// code instead.
pub async fn run(app: &AppContext, args: &DeployArgs) -> Result<ExitCode> {
    let request = DeploymentRequest::new(
        &args.domain,
        &args.cert_path,
        &args.key_path,
        &args.chain_path,
        &args.fullchain_path,
    )
    .context("invalid deployment request")?;

    let deployer = app.deployer()?;
    let reporter = app.reporter();
    if !app.is_json() {
        app.output.header(&format!("Deploying {}", request.domain()));
        for file in deployer.layout().files(request.domain()) {
            app.output.kv("target", &file.path.display().to_string());
        }
    }
    if !args.skip_prepare {
        prepare(&app.inspector(), deployer.proxy(), &reporter).await?;
    }

    let outcome = deployer.deploy(&request, &reporter).await;
    if app.is_json() {
        println!("{}", json::format_outcome(&outcome)?);
    } else {
        app.output.outcome(&outcome);
    }
    Ok(super::exit_code(outcome.status))
}
