//! `cert-deploy info` — describe the installer and its configuration.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::InstallerHooks;
use crate::domain::LayoutMode;

/// Run `cert-deploy info`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(app: &AppContext, hooks: &impl InstallerHooks) -> Result<ExitCode> {
    let enhancements = hooks.supported_enhancements();
    if app.is_json() {
        let obj = serde_json::json!({
            "description": hooks.more_info(),
            "supported_enhancements": enhancements,
            "layout": app.config.target.layout,
            "base_dir": app.config.target.base_dir,
            "service": app.config.proxy.service,
        });
        println!("{}", serde_json::to_string_pretty(&obj)?);
        return Ok(ExitCode::SUCCESS);
    }

    app.output.header("HAProxy installer");
    app.output.info(hooks.more_info());
    let layout = match app.config.target.layout {
        LayoutMode::Combined => "combined PEM",
        LayoutMode::Split => "split certificate/key",
    };
    app.output.kv("layout", layout);
    app.output
        .kv("base_dir", &app.config.target.base_dir.display().to_string());
    app.output.kv("service", &app.config.proxy.service);
    let listed = if enhancements.is_empty() {
        "none".to_string()
    } else {
        enhancements.join(", ")
    };
    app.output.kv("enhancements", &listed);
    Ok(ExitCode::SUCCESS)
}
