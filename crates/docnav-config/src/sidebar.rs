//! Raw sidebar configuration.
//!
//! These types mirror the `[[sidebar]]` entries of `docnav.toml` field for
//! field. They accept shapes that are not valid navigation (a leaf with both
//! `slug` and `link`, a group without a label, ...) so that validation can
//! report every such node with its position instead of failing in serde.

use serde::{Deserialize, Serialize};

/// Declarative navigation tree: top-level sidebar entries in display order.
pub type NavTree = Vec<NavNodeConfig>;

/// A sidebar entry as written in the config file.
///
/// An entry with `items` is a group. Anything else is a leaf that must
/// declare exactly one of `slug` or `link`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NavNodeConfig {
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether a group starts folded.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub collapsed: bool,
    /// Child entries (groups only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NavNodeConfig>>,
    /// Content page identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Explicit route or external URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Badge shown next to the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<BadgeConfig>,
}

impl NavNodeConfig {
    /// Group entry with the given children.
    #[must_use]
    pub fn group(label: impl Into<String>, items: Vec<NavNodeConfig>) -> Self {
        Self {
            label: Some(label.into()),
            items: Some(items),
            ..Self::default()
        }
    }

    /// Leaf entry pointing at a content slug.
    #[must_use]
    pub fn slug(label: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            slug: Some(slug.into()),
            ..Self::default()
        }
    }

    /// Leaf entry pointing at an explicit route.
    #[must_use]
    pub fn link(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            link: Some(link.into()),
            ..Self::default()
        }
    }

    /// Set the `collapsed` flag.
    #[must_use]
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Whether this entry is a group.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.items.is_some()
    }
}

/// Badge attached to a sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BadgeConfig {
    /// Badge text.
    pub text: String,
    /// Color variant.
    #[serde(default)]
    pub variant: BadgeVariant,
}

/// Badge color variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    #[default]
    Default,
    Note,
    Tip,
    Caution,
    Danger,
    Success,
}
