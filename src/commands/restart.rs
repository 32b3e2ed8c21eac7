//! `cert-deploy restart` — validate the proxy configuration, then reload.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::output::json;

/// Run `cert-deploy restart`.
///
/// The service is only touched if the configuration check passes.
///
/// # Errors
///
/// Returns an error if the deployment service cannot be built.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let deployer = app.deployer()?;
    match deployer.validate_and_reload(&app.reporter()).await {
        Ok(()) => {
            if app.is_json() {
                println!("{}", serde_json::json!({ "reloaded": true }));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            if app.is_json() {
                println!("{}", json::format_error(&failure.to_string(), failure.reason_code())?);
            } else {
                app.output.error(&failure.to_string());
            }
            Ok(super::stage_exit_code(failure.stage()))
        }
    }
}
