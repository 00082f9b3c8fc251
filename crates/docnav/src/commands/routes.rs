//! `docnav routes` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_site::{ResolvedSite, RouteEntry};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long, env = "DOCNAV_CONFIG")]
    config: Option<PathBuf>,

    /// Print the flattened routes as JSON.
    #[arg(long, conflicts_with = "tree")]
    json: bool,

    /// Print the nested sidebar tree as JSON.
    #[arg(long)]
    tree: bool,
}

impl RoutesArgs {
    /// Execute the routes command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or the sidebar is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = ResolvedSite::load(self.config.as_deref())?;

        if self.tree {
            output.result(&serde_json::to_string_pretty(site.routes.tree())?);
        } else if self.json {
            output.result(&serde_json::to_string_pretty(site.routes.routes())?);
        } else {
            for route in site.routes.routes() {
                output.result(&format_route(route));
            }
        }

        Ok(())
    }
}

/// Render a route as an indented table line.
fn format_route(route: &RouteEntry) -> String {
    let indent = "  ".repeat(route.depth);
    let mut line = format!(
        "{indent}{}  -> {}",
        route.full_path.join(" / "),
        route.target
    );
    if route.collapsed_default {
        line.push_str("  [collapsed]");
    }
    if let Some(badge) = &route.badge {
        line.push_str(&format!("  ({})", badge.text));
    }
    line
}

#[cfg(test)]
mod tests {
    use docnav_site::{BadgeConfig, BadgeVariant, NavTarget};
    use pretty_assertions::assert_eq;

    use super::*;

    fn route(depth: usize, collapsed: bool) -> RouteEntry {
        let mut full_path: Vec<String> = (0..depth).map(|i| format!("Group {i}")).collect();
        full_path.push("Fonts".to_owned());
        RouteEntry {
            label: "Fonts".to_owned(),
            full_path,
            target: NavTarget::Slug("features/fonts".to_owned()),
            collapsed_default: collapsed,
            depth,
            badge: None,
        }
    }

    #[test]
    fn test_format_route_top_level() {
        assert_eq!(format_route(&route(0, false)), "Fonts  -> slug:features/fonts");
    }

    #[test]
    fn test_format_route_nested_collapsed() {
        assert_eq!(
            format_route(&route(1, true)),
            "  Group 0 / Fonts  -> slug:features/fonts  [collapsed]"
        );
    }

    #[test]
    fn test_format_route_with_badge() {
        let mut entry = route(0, false);
        entry.badge = Some(BadgeConfig {
            text: "New".to_owned(),
            variant: BadgeVariant::Tip,
        });

        assert_eq!(format_route(&entry), "Fonts  -> slug:features/fonts  (New)");
    }
}
