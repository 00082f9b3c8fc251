//! `docnav resolve` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_site::{Pagination, ResolvedSite, RouteEntry, RouteIndex};
use serde::Serialize;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Content slug to look up (e.g. `fundamentals/concepts`).
    slug: String,

    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long, env = "DOCNAV_CONFIG")]
    config: Option<PathBuf>,

    /// Print the result as JSON (`null` if the slug is not in the sidebar).
    #[arg(long)]
    json: bool,
}

/// Sidebar position of a page, with its neighbours.
#[derive(Serialize)]
struct Resolved<'a> {
    route: &'a RouteEntry,
    breadcrumbs: &'a [String],
    #[serde(flatten)]
    pagination: Pagination<'a>,
}

impl<'a> Resolved<'a> {
    fn lookup(index: &'a RouteIndex, slug: &str) -> Option<Self> {
        let route = index.resolve_slug(slug)?;
        Some(Self {
            route,
            breadcrumbs: route.ancestors(),
            pagination: index.pagination(slug).unwrap_or_default(),
        })
    }
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// A slug missing from the sidebar is reported but is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or the sidebar is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = ResolvedSite::load(self.config.as_deref())?;
        let resolved = Resolved::lookup(&site.routes, &self.slug);

        if self.json {
            output.result(&serde_json::to_string_pretty(&resolved)?);
            return Ok(());
        }

        let Some(resolved) = resolved else {
            output.warning(&format!("\"{}\" is not in the sidebar", self.slug));
            return Ok(());
        };

        let route = resolved.route;
        output.result(&format!("Label:       {}", route.label));
        output.result(&format!("Breadcrumbs: {}", resolved.breadcrumbs.join(" / ")));
        output.result(&format!("Depth:       {}", route.depth));
        output.result(&format!("Collapsed:   {}", route.collapsed_default));
        if let Some(prev) = resolved.pagination.prev {
            output.result(&format!("Previous:    {} ({})", prev.label, prev.target));
        }
        if let Some(next) = resolved.pagination.next {
            output.result(&format!("Next:        {} ({})", next.label, next.target));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use docnav_site::{Config, ResolvedSite};

    use super::*;

    fn site() -> ResolvedSite {
        let config = Config::from_toml_str(
            r#"
[site]
title = "DesignPush"

[[sidebar]]
label = "Editing Tokens"
items = [
    { slug = "editing-tokens/primitive-tokens" },
    { slug = "editing-tokens/semantic-tokens" },
]
"#,
        )
        .unwrap();
        ResolvedSite::from_config(config).unwrap()
    }

    #[test]
    fn test_lookup_serialization() {
        let site = site();

        let resolved = Resolved::lookup(&site.routes, "editing-tokens/semantic-tokens").unwrap();
        let json = serde_json::to_value(&resolved).unwrap();

        assert_eq!(json["route"]["label"], "Semantic Tokens");
        assert_eq!(json["breadcrumbs"][0], "Editing Tokens");
        assert_eq!(json["prev"]["slug"], "editing-tokens/primitive-tokens");
        assert!(json.get("next").is_none());
    }

    #[test]
    fn test_lookup_missing_slug() {
        let site = site();
        assert!(Resolved::lookup(&site.routes, "features/fonts").is_none());
    }
}
