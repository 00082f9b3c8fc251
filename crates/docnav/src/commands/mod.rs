//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod resolve;
pub(crate) mod routes;
pub(crate) mod watch;

pub(crate) use check::CheckArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use routes::RoutesArgs;
pub(crate) use watch::WatchArgs;

use docnav_site::ResolvedSite;

/// One-line description of a loaded site.
pub(crate) fn summary(site: &ResolvedSite) -> String {
    let index = &site.routes;
    format!(
        "{}: {} top-level entries, {} routes ({} pages)",
        site.meta.title,
        index.tree().nodes().len(),
        index.routes().len(),
        index.slug_count()
    )
}
