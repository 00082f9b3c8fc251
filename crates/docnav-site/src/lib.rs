//! Sidebar validation and routing for docnav.
//!
//! This crate provides:
//! - [`validate`]: check a raw sidebar tree and produce a [`ValidatedNavTree`]
//! - [`flatten`]: turn a validated tree into ordered [`RouteEntry`] values
//! - [`resolve_slug`] and [`RouteIndex`]: map content slugs back to their
//!   sidebar position, breadcrumbs and previous/next pages
//! - [`NavState`]: current [`ResolvedSite`] snapshot with hot reload
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use docnav_site::ResolvedSite;
//!
//! let site = ResolvedSite::load(None)?;
//!
//! for route in site.routes.routes() {
//!     println!("{} -> {}", route.full_path.join(" / "), route.target);
//! }
//!
//! let _crumbs = site.routes.breadcrumbs("fundamentals/concepts");
//! # Ok(())
//! # }
//! ```

mod error;
mod routes;
mod site;
mod tree;

pub use error::{LoadError, NavError};
pub use routes::{Pagination, RouteEntry, RouteIndex, flatten, resolve_slug};
pub use site::{NavState, ResolvedSite};
pub use tree::{NavGroup, NavItem, NavNode, NavTarget, ValidatedNavTree, validate};

// Re-export config types consumers need alongside the resolver
pub use docnav_config::{BadgeConfig, BadgeVariant, Config, ConfigError, SiteMeta};
