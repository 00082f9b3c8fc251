//! Flattened routing table.
//!
//! [`flatten`] walks a [`ValidatedNavTree`] depth-first and emits one
//! [`RouteEntry`] per leaf in display order. [`RouteIndex`] keeps the table
//! next to the tree and a slug index, for the lookups page rendering needs:
//! slug to sidebar position, previous/next page, breadcrumbs.

use std::collections::HashMap;

use docnav_config::BadgeConfig;
use serde::Serialize;

use crate::tree::{NavNode, NavTarget, ValidatedNavTree};

/// Sidebar position of a single leaf.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    /// Display label.
    pub label: String,
    /// Ancestor group labels followed by the entry's own label.
    pub full_path: Vec<String>,
    /// Link target.
    #[serde(flatten)]
    pub target: NavTarget,
    /// `collapsed` flag of the enclosing group (`false` at top level).
    pub collapsed_default: bool,
    /// Number of enclosing groups.
    pub depth: usize,
    /// Badge shown next to the label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<BadgeConfig>,
}

impl RouteEntry {
    /// Labels of the enclosing groups, outermost first.
    #[must_use]
    pub fn ancestors(&self) -> &[String] {
        &self.full_path[..self.depth]
    }
}

/// Flatten a validated tree into its routing table.
///
/// The result has exactly one entry per leaf, in depth-first order with
/// sibling order preserved.
#[must_use]
pub fn flatten(tree: &ValidatedNavTree) -> Vec<RouteEntry> {
    let mut routes = Vec::with_capacity(tree.leaf_count());
    let mut ancestors = Vec::new();
    flatten_nodes(tree.nodes(), &mut ancestors, false, &mut routes);
    routes
}

fn flatten_nodes(
    nodes: &[NavNode],
    ancestors: &mut Vec<String>,
    collapsed: bool,
    routes: &mut Vec<RouteEntry>,
) {
    for node in nodes {
        match node {
            NavNode::Group(group) => {
                ancestors.push(group.label.clone());
                flatten_nodes(&group.items, ancestors, group.collapsed, routes);
                ancestors.pop();
            }
            NavNode::Item(item) => {
                let mut full_path = ancestors.clone();
                full_path.push(item.label.clone());
                routes.push(RouteEntry {
                    label: item.label.clone(),
                    full_path,
                    target: item.target.clone(),
                    collapsed_default: collapsed,
                    depth: ancestors.len(),
                    badge: item.badge.clone(),
                });
            }
        }
    }
}

/// Normalize a slug query: content pipelines often hand over `/guide/`.
fn normalize_slug(slug: &str) -> &str {
    slug.trim_matches('/')
}

/// Find the route entry for a content slug.
///
/// Returns `None` when the page is not in the sidebar, which is a normal
/// state for pages deliberately left out of navigation.
#[must_use]
pub fn resolve_slug<'a>(routes: &'a [RouteEntry], slug: &str) -> Option<&'a RouteEntry> {
    let slug = normalize_slug(slug);
    routes.iter().find(|route| route.target.slug() == Some(slug))
}

/// Neighbouring pages of a route, for "previous/next page" links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Pagination<'a> {
    /// Previous page in sidebar order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<&'a RouteEntry>,
    /// Next page in sidebar order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<&'a RouteEntry>,
}

/// Routing table with O(1) slug lookups.
///
/// Owns the validated tree it was built from, so renderers can build the
/// nested sidebar from [`RouteIndex::tree`] and resolve pages from the same
/// snapshot.
#[derive(Clone, Debug)]
pub struct RouteIndex {
    tree: ValidatedNavTree,
    routes: Vec<RouteEntry>,
    slug_index: HashMap<String, usize>,
}

impl RouteIndex {
    /// Build the index for a validated tree.
    #[must_use]
    pub fn new(tree: ValidatedNavTree) -> Self {
        let routes = flatten(&tree);
        let slug_index = routes
            .iter()
            .enumerate()
            .filter_map(|(i, route)| route.target.slug().map(|slug| (slug.to_owned(), i)))
            .collect();

        Self {
            tree,
            routes,
            slug_index,
        }
    }

    /// Validated tree, for nested sidebar rendering.
    #[must_use]
    pub fn tree(&self) -> &ValidatedNavTree {
        &self.tree
    }

    /// Flattened routes in display order.
    #[must_use]
    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    /// Number of slug entries.
    #[must_use]
    pub fn slug_count(&self) -> usize {
        self.slug_index.len()
    }

    /// Find the route entry for a content slug.
    #[must_use]
    pub fn resolve_slug(&self, slug: &str) -> Option<&RouteEntry> {
        self.position(slug).map(|i| &self.routes[i])
    }

    /// Index of a slug in [`RouteIndex::routes`].
    #[must_use]
    pub fn position(&self, slug: &str) -> Option<usize> {
        self.slug_index.get(normalize_slug(slug)).copied()
    }

    /// Labels of the groups enclosing a slug, outermost first.
    #[must_use]
    pub fn breadcrumbs(&self, slug: &str) -> Option<&[String]> {
        self.resolve_slug(slug).map(RouteEntry::ancestors)
    }

    /// Previous and next pages around a slug.
    ///
    /// External links are skipped; they are not pages of this site.
    /// Returns `None` if the slug is not in the sidebar.
    #[must_use]
    pub fn pagination(&self, slug: &str) -> Option<Pagination<'_>> {
        let idx = self.position(slug)?;
        let is_page = |route: &&RouteEntry| !route.target.is_external();

        Some(Pagination {
            prev: self.routes[..idx].iter().rev().find(is_page),
            next: self.routes[idx + 1..].iter().find(is_page),
        })
    }
}

#[cfg(test)]
mod tests {
    use docnav_config::NavNodeConfig;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tree::validate;

    fn designpush_tree() -> ValidatedNavTree {
        let tree = vec![
            NavNodeConfig::group(
                "Getting Started",
                vec![NavNodeConfig::link("Quick Start", "/getting-started/quick-start/")],
            )
            .collapsed(true),
            NavNodeConfig::group(
                "Fundamentals",
                vec![
                    NavNodeConfig::slug("Concepts", "fundamentals/concepts"),
                    NavNodeConfig::slug("Interface", "fundamentals/interface-overview"),
                ],
            ),
            NavNodeConfig::group(
                "Integrations",
                vec![
                    NavNodeConfig::group(
                        "Tailwind",
                        vec![
                            NavNodeConfig::slug("Preset", "tailwind/preset"),
                            NavNodeConfig::link("GitHub", "https://github.com/designpush/tailwind"),
                            NavNodeConfig::slug("FAQ", "tailwind/faq"),
                        ],
                    )
                    .collapsed(true),
                    NavNodeConfig::slug("Figma Plugin", "reference/figma-plugin"),
                ],
            ),
        ];
        validate(&tree).unwrap()
    }

    /// Rebuild nested `(label, children)` groups from full paths.
    #[derive(Debug, PartialEq)]
    enum Shape {
        Group(String, Vec<Shape>),
        Leaf(String, NavTarget),
    }

    fn regroup(routes: &[RouteEntry], depth: usize) -> Vec<Shape> {
        let mut shapes: Vec<Shape> = Vec::new();
        let mut i = 0;
        while i < routes.len() {
            let route = &routes[i];
            if route.depth == depth {
                shapes.push(Shape::Leaf(route.label.clone(), route.target.clone()));
                i += 1;
                continue;
            }
            let group = &route.full_path[depth];
            let end = routes[i..]
                .iter()
                .position(|r| r.depth == depth || &r.full_path[depth] != group)
                .map_or(routes.len(), |offset| i + offset);
            shapes.push(Shape::Group(group.clone(), regroup(&routes[i..end], depth + 1)));
            i = end;
        }
        shapes
    }

    fn shape_of(nodes: &[NavNode]) -> Vec<Shape> {
        nodes
            .iter()
            .map(|node| match node {
                NavNode::Group(group) => Shape::Group(group.label.clone(), shape_of(&group.items)),
                NavNode::Item(item) => Shape::Leaf(item.label.clone(), item.target.clone()),
            })
            .collect()
    }

    #[test]
    fn test_flatten_quick_start_example() {
        let tree = validate(&[NavNodeConfig::group(
            "Getting Started",
            vec![NavNodeConfig::slug("Quick Start", "getting-started/quick-start")],
        )])
        .unwrap();

        let routes = flatten(&tree);

        assert_eq!(
            routes,
            vec![RouteEntry {
                label: "Quick Start".to_owned(),
                full_path: vec!["Getting Started".to_owned(), "Quick Start".to_owned()],
                target: NavTarget::Slug("getting-started/quick-start".to_owned()),
                collapsed_default: false,
                depth: 1,
                badge: None,
            }]
        );
    }

    #[test]
    fn test_flatten_one_entry_per_leaf_in_order() {
        let tree = designpush_tree();

        let routes = flatten(&tree);

        assert_eq!(routes.len(), tree.leaf_count());
        let labels: Vec<_> = routes.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Quick Start",
                "Concepts",
                "Interface",
                "Preset",
                "GitHub",
                "FAQ",
                "Figma Plugin"
            ]
        );
    }

    #[test]
    fn test_flatten_depth_and_collapsed() {
        let routes = flatten(&designpush_tree());

        let preset = &routes[3];
        assert_eq!(preset.depth, 2);
        assert_eq!(preset.full_path, vec!["Integrations", "Tailwind", "Preset"]);
        assert!(preset.collapsed_default);

        let figma = &routes[6];
        assert_eq!(figma.depth, 1);
        assert!(!figma.collapsed_default);

        assert!(routes[0].collapsed_default);
    }

    #[test]
    fn test_flatten_top_level_leaf() {
        let tree = validate(&[NavNodeConfig::link("Home", "/")]).unwrap();

        let routes = flatten(&tree);

        assert_eq!(routes[0].depth, 0);
        assert_eq!(routes[0].full_path, vec!["Home"]);
        assert!(!routes[0].collapsed_default);
        assert!(routes[0].ancestors().is_empty());
    }

    #[test]
    fn test_flatten_regroup_round_trip() {
        let tree = designpush_tree();

        let routes = flatten(&tree);

        assert_eq!(regroup(&routes, 0), shape_of(tree.nodes()));
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let tree = designpush_tree();
        assert_eq!(flatten(&tree), flatten(&tree));
    }

    #[test]
    fn test_resolve_slug_found() {
        let routes = flatten(&designpush_tree());

        let route = resolve_slug(&routes, "tailwind/faq").unwrap();

        assert_eq!(route.label, "FAQ");
        assert_eq!(route.ancestors(), ["Integrations", "Tailwind"]);
    }

    #[test]
    fn test_resolve_slug_ignores_surrounding_slashes() {
        let routes = flatten(&designpush_tree());
        assert!(resolve_slug(&routes, "/tailwind/faq/").is_some());
    }

    #[test]
    fn test_resolve_slug_not_in_sidebar() {
        let routes = flatten(&designpush_tree());
        assert!(resolve_slug(&routes, "reference/beta-testing").is_none());
    }

    #[test]
    fn test_resolve_slug_does_not_match_links() {
        let routes = flatten(&designpush_tree());
        assert!(resolve_slug(&routes, "getting-started/quick-start").is_none());
    }

    #[test]
    fn test_index_matches_linear_lookup() {
        let index = RouteIndex::new(designpush_tree());

        for route in index.routes() {
            if let Some(slug) = route.target.slug() {
                assert_eq!(index.resolve_slug(slug), resolve_slug(index.routes(), slug));
            }
        }
        assert_eq!(index.slug_count(), 5);
    }

    #[test]
    fn test_index_breadcrumbs() {
        let index = RouteIndex::new(designpush_tree());

        assert_eq!(
            index.breadcrumbs("tailwind/preset").unwrap(),
            ["Integrations", "Tailwind"]
        );
        assert!(index.breadcrumbs("missing").is_none());
    }

    #[test]
    fn test_index_pagination_skips_external_links() {
        let index = RouteIndex::new(designpush_tree());

        let pagination = index.pagination("tailwind/preset").unwrap();
        assert_eq!(pagination.prev.unwrap().label, "Interface");
        assert_eq!(pagination.next.unwrap().label, "FAQ");

        let pagination = index.pagination("tailwind/faq").unwrap();
        assert_eq!(pagination.prev.unwrap().label, "Preset");
    }

    #[test]
    fn test_index_pagination_includes_internal_links() {
        let index = RouteIndex::new(designpush_tree());

        let pagination = index.pagination("fundamentals/concepts").unwrap();

        assert_eq!(pagination.prev.unwrap().label, "Quick Start");
    }

    #[test]
    fn test_index_pagination_keeps_redirect_links() {
        let tree = validate(&[NavNodeConfig::group(
            "Tailwind",
            vec![
                NavNodeConfig::slug("Preset", "tailwind/preset"),
                NavNodeConfig::link("GitHub", "/go?to=https://github.com/designpush"),
                NavNodeConfig::slug("FAQ", "tailwind/faq"),
            ],
        )])
        .unwrap();
        let index = RouteIndex::new(tree);

        let pagination = index.pagination("tailwind/preset").unwrap();

        assert_eq!(pagination.next.unwrap().label, "GitHub");
    }

    #[test]
    fn test_index_pagination_edges() {
        let index = RouteIndex::new(designpush_tree());

        let last = index.pagination("reference/figma-plugin").unwrap();
        assert!(last.next.is_none());
        assert_eq!(last.prev.unwrap().label, "FAQ");

        assert!(index.pagination("missing").is_none());
    }

    #[test]
    fn test_route_entry_serialization() {
        let index = RouteIndex::new(designpush_tree());

        let json = serde_json::to_value(&index.routes()[1]).unwrap();

        assert_eq!(json["label"], "Concepts");
        assert_eq!(json["slug"], "fundamentals/concepts");
        assert_eq!(json["fullPath"][0], "Fundamentals");
        assert_eq!(json["collapsedDefault"], false);
        assert_eq!(json["depth"], 1);
        assert!(json.get("badge").is_none());
    }
}
