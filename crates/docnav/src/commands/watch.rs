//! `docnav watch` command implementation.
//!
//! Watches the directory containing the config file (editors often replace
//! the file instead of writing in place) and revalidates on every change.
//! An invalid edit is reported and the last valid navigation stays current.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use clap::Args;
use docnav_site::NavState;
use notify::{RecursiveMode, Watcher};

use crate::commands::summary;
use crate::error::CliError;
use crate::output::Output;

/// Quiet period before a burst of file events triggers a reload.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Arguments for the watch command.
#[derive(Args)]
pub(crate) struct WatchArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long, env = "DOCNAV_CONFIG")]
    config: Option<PathBuf>,
}

impl WatchArgs {
    /// Execute the watch command.
    ///
    /// Runs until interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial config is invalid or the watcher
    /// cannot be started.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let state = NavState::load(self.config.as_deref())?;

        let site = state.current();
        output.success(&summary(&site));

        let config_path = match &site.config_path {
            Some(path) => std::fs::canonicalize(path)?,
            None => std::env::current_dir()?.join("docnav.toml"),
        };
        let watch_dir = config_path.parent().unwrap_or(Path::new("."));
        let file_name = config_path.file_name().map(OsString::from);

        let (tx, rx) = mpsc::channel();
        let mut watcher =
            notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
                let Ok(event) = res else {
                    return;
                };
                if is_config_change(&event, file_name.as_deref()) {
                    let _ = tx.send(());
                }
            })?;
        watcher.watch(watch_dir, RecursiveMode::NonRecursive)?;

        output.info(&format!(
            "Watching {} for changes (Ctrl+C to stop)",
            config_path.display()
        ));

        while rx.recv().is_ok() {
            // Coalesce the several events one save produces
            while rx.recv_timeout(DEBOUNCE).is_ok() {}
            tracing::debug!(path = %config_path.display(), "Config changed, reloading");

            match state.reload() {
                Ok(site) => output.success(&format!("Reloaded {}", summary(&site))),
                Err(err) => {
                    output.error(&format!("Rejected: {err} (keeping previous navigation)"));
                }
            }
        }

        Ok(())
    }
}

/// Whether a filesystem event touches the config file.
fn is_config_change(event: &notify::Event, file_name: Option<&std::ffi::OsStr>) -> bool {
    let relevant_kind = matches!(
        event.kind,
        notify::EventKind::Create(_) | notify::EventKind::Modify(_) | notify::EventKind::Remove(_)
    );
    relevant_kind
        && event
            .paths
            .iter()
            .any(|path| file_name.is_some() && path.file_name() == file_name)
}
