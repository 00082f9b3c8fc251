//! Validated navigation tree.
//!
//! [`validate`] turns the raw `[[sidebar]]` entries into a [`ValidatedNavTree`]
//! in a single depth-first pass. Groups own their children by value, so the
//! tree cannot contain cycles and traversal is plain recursion.
//!
//! Checks, per node and in this order:
//! 1. shape: a group must not declare a target, a leaf must declare exactly
//!    one of `slug` or `link`
//! 2. label: explicit labels must not be blank, groups and links need one
//! 3. sibling uniqueness of the effective label
//! 4. groups must not be empty, slugs must be well formed and globally unique
//!
//! The first violation found aborts validation.

use std::collections::{HashMap, HashSet};
use std::fmt;

use docnav_config::{BadgeConfig, NavNodeConfig};
use serde::Serialize;

use crate::error::NavError;

/// Where a leaf points.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavTarget {
    /// Content page managed by the content pipeline.
    Slug(String),
    /// Explicit route or external URL.
    Link(String),
}

impl NavTarget {
    /// Slug or link value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Slug(value) | Self::Link(value) => value,
        }
    }

    /// Slug value, `None` for links.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Slug(slug) => Some(slug),
            Self::Link(_) => None,
        }
    }

    /// Whether this target leaves the site (`https://...`, `//host/...`).
    #[must_use]
    pub fn is_external(&self) -> bool {
        match self {
            Self::Slug(_) => false,
            Self::Link(link) => {
                link.starts_with("//")
                    || link.split_once("://").is_some_and(|(scheme, _)| {
                        !scheme.is_empty()
                            && scheme
                                .chars()
                                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
                    })
            }
        }
    }
}

impl fmt::Display for NavTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slug(slug) => write!(f, "slug:{slug}"),
            Self::Link(link) => write!(f, "link:{link}"),
        }
    }
}

/// Labeled group of navigation nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavGroup {
    /// Display label, unique among siblings.
    pub label: String,
    /// Whether the group starts folded.
    pub collapsed: bool,
    /// Badge shown next to the label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<BadgeConfig>,
    /// Child nodes in display order. Never empty.
    pub items: Vec<NavNode>,
}

/// Leaf navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display label (explicit or derived from the slug).
    pub label: String,
    /// Link target.
    #[serde(flatten)]
    pub target: NavTarget,
    /// Badge shown next to the label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<BadgeConfig>,
}

/// Node of a validated navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavNode {
    Group(NavGroup),
    Item(NavItem),
}

impl NavNode {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Group(group) => &group.label,
            Self::Item(item) => &item.label,
        }
    }

    /// Number of leaves in this subtree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Group(group) => group.items.iter().map(Self::leaf_count).sum(),
            Self::Item(_) => 1,
        }
    }
}

/// Navigation tree that passed [`validate`].
///
/// Only obtainable through [`validate`], so holding one proves every
/// invariant holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidatedNavTree {
    nodes: Vec<NavNode>,
}

impl ValidatedNavTree {
    /// Top-level nodes in display order.
    #[must_use]
    pub fn nodes(&self) -> &[NavNode] {
        &self.nodes
    }

    /// Total number of leaves.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().map(NavNode::leaf_count).sum()
    }

    /// Whether the sidebar has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Validate a raw sidebar tree.
///
/// Pure: the same input always yields the same result.
///
/// # Errors
///
/// Returns the first [`NavError`] found in depth-first order.
pub fn validate(tree: &[NavNodeConfig]) -> Result<ValidatedNavTree, NavError> {
    let mut validator = Validator::default();
    let nodes = validator.validate_siblings(tree, &[])?;
    Ok(ValidatedNavTree { nodes })
}

/// Derive a display label from the last slug segment.
///
/// `fundamentals/interface-overview` becomes `Interface Overview`.
pub(crate) fn label_from_slug(slug: &str) -> String {
    let segment = slug
        .trim_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    segment
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a label path for error messages.
fn display_path(segments: &[String]) -> String {
    segments.join(" > ")
}

/// Check slug syntax.
fn check_slug(slug: &str) -> Result<(), &'static str> {
    if slug.trim().is_empty() {
        return Err("slug cannot be empty");
    }
    if slug.starts_with('/') || slug.ends_with('/') {
        return Err("slug must not start or end with '/'");
    }
    if slug.split('/').any(str::is_empty) {
        return Err("slug contains an empty segment");
    }
    if slug.chars().any(char::is_whitespace) {
        return Err("slug must not contain whitespace");
    }
    Ok(())
}

/// Raw node shape, decided before anything else is looked at.
enum Shape<'a> {
    Group(&'a [NavNodeConfig]),
    Leaf(NavTarget),
}

/// Classify a raw node, rejecting entries with conflicting targets.
fn shape_of(raw: &NavNodeConfig) -> Result<Shape<'_>, &'static str> {
    if raw.is_group() {
        return match (&raw.items, &raw.slug, &raw.link) {
            (Some(items), None, None) => Ok(Shape::Group(items)),
            _ => Err("a group cannot also declare `slug` or `link`"),
        };
    }
    match (&raw.slug, &raw.link) {
        (Some(_), Some(_)) => Err("declares both `slug` and `link`"),
        (None, None) => Err("declares neither `slug` nor `link`"),
        (Some(slug), None) => Ok(Shape::Leaf(NavTarget::Slug(slug.clone()))),
        (None, Some(link)) => Ok(Shape::Leaf(NavTarget::Link(link.clone()))),
    }
}

/// Traversal state shared across the whole tree.
#[derive(Default)]
struct Validator {
    /// Slug to display path of the leaf that first used it.
    slugs: HashMap<String, String>,
}

impl Validator {
    fn validate_siblings(
        &mut self,
        nodes: &[NavNodeConfig],
        parent: &[String],
    ) -> Result<Vec<NavNode>, NavError> {
        let mut labels = HashSet::with_capacity(nodes.len());
        let mut validated = Vec::with_capacity(nodes.len());

        for (position, raw) in nodes.iter().enumerate() {
            let mut path = parent.to_vec();
            path.push(Self::segment(raw, position));

            let shape = shape_of(raw).map_err(|reason| NavError::AmbiguousNode {
                path: display_path(&path),
                reason,
            })?;
            let label = Self::effective_label(raw, &shape, &path)?;

            if !labels.insert(label.clone()) {
                return Err(NavError::DuplicateLabel {
                    label,
                    parent: if parent.is_empty() {
                        "top level".to_owned()
                    } else {
                        display_path(parent)
                    },
                });
            }

            let node = match shape {
                Shape::Group(items) => {
                    if items.is_empty() {
                        return Err(NavError::EmptyGroup {
                            path: display_path(&path),
                        });
                    }
                    NavNode::Group(NavGroup {
                        label,
                        collapsed: raw.collapsed,
                        badge: raw.badge.clone(),
                        items: self.validate_siblings(items, &path)?,
                    })
                }
                Shape::Leaf(target) => {
                    if let NavTarget::Slug(slug) = &target {
                        self.register_slug(slug, &path)?;
                    }
                    NavNode::Item(NavItem {
                        label,
                        target,
                        badge: raw.badge.clone(),
                    })
                }
            };
            validated.push(node);
        }

        Ok(validated)
    }

    /// Path segment naming a raw node in error messages.
    fn segment(raw: &NavNodeConfig, position: usize) -> String {
        match (&raw.label, &raw.slug) {
            (Some(label), _) if !label.trim().is_empty() => label.clone(),
            (None, Some(slug)) if !slug.trim().is_empty() => slug.clone(),
            _ => format!("#{}", position + 1),
        }
    }

    fn effective_label(
        raw: &NavNodeConfig,
        shape: &Shape<'_>,
        path: &[String],
    ) -> Result<String, NavError> {
        match (&raw.label, shape) {
            (Some(label), _) if label.trim().is_empty() => Err(NavError::EmptyLabel {
                path: display_path(path),
            }),
            (Some(label), _) => Ok(label.clone()),
            (None, Shape::Leaf(NavTarget::Slug(slug))) => Ok(label_from_slug(slug)),
            (None, _) => Err(NavError::MissingLabel {
                path: display_path(path),
            }),
        }
    }

    fn register_slug(&mut self, slug: &str, path: &[String]) -> Result<(), NavError> {
        check_slug(slug).map_err(|reason| NavError::InvalidSlug {
            slug: slug.to_owned(),
            path: display_path(path),
            reason,
        })?;

        if let Some(first) = self.slugs.get(slug) {
            return Err(NavError::DuplicateSlug {
                slug: slug.to_owned(),
                first: first.clone(),
                second: display_path(path),
            });
        }
        self.slugs.insert(slug.to_owned(), display_path(path));
        Ok(())
    }
}
