//! `cert-deploy prepare` — check the proxy environment before deploying.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::prepare::prepare;

/// Run `cert-deploy prepare`.
///
/// # Errors
///
/// Returns an error if the proxy configuration file does not exist.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let proxy = app.config.proxy_handle();
    let report = prepare(&app.inspector(), &proxy, &app.reporter()).await?;

    if app.is_json() {
        let obj = serde_json::json!({
            "config_path": proxy.config_path(),
            "version": report.version,
        });
        println!("{}", serde_json::to_string_pretty(&obj)?);
    } else {
        app.output
            .success(&format!("found {}", proxy.config_path().display()));
    }
    Ok(ExitCode::SUCCESS)
}
