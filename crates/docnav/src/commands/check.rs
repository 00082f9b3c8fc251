//! `docnav check` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_site::ResolvedSite;

use crate::commands::summary;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long, env = "DOCNAV_CONFIG")]
    config: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or the sidebar is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = ResolvedSite::load(self.config.as_deref())?;

        if let Some(path) = &site.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        if let Some(logo) = site.meta.logo_path() {
            output.info(&format!("Logo: {logo}"));
        }
        if let Some(favicon) = &site.meta.favicon {
            output.info(&format!("Favicon: {favicon}"));
        }
        for stylesheet in &site.meta.custom_css {
            output.info(&format!("Stylesheet: {stylesheet}"));
        }
        for (name, path) in &site.meta.components {
            output.info(&format!("Component override: {name} -> {path}"));
        }
        if site.routes.tree().is_empty() {
            output.warning("Sidebar is empty");
        }

        output.success(&summary(&site));
        Ok(())
    }
}
