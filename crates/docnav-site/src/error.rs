//! Navigation validation errors.

use docnav_config::ConfigError;

/// Error returned when a sidebar tree breaks a navigation invariant.
///
/// Every variant names the offending node by its label path
/// (`Getting Started > Quick Start`). Unlabeled leaves appear by slug,
/// anything else without a usable label by 1-based position (`#3`).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// Label is empty or whitespace-only.
    #[error("Empty label at {path}")]
    EmptyLabel {
        /// Path of the node.
        path: String,
    },
    /// Group or link entry without a label.
    #[error("Missing label at {path}: groups and link entries need a label")]
    MissingLabel {
        /// Path of the node.
        path: String,
    },
    /// Two siblings share a label.
    #[error("Duplicate label \"{label}\" in {parent}")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
        /// Path of the enclosing group, or `top level`.
        parent: String,
    },
    /// A slug appears in more than one leaf.
    #[error("Duplicate slug \"{slug}\" at {second} (already used at {first})")]
    DuplicateSlug {
        /// The repeated slug.
        slug: String,
        /// Path of the first leaf using the slug.
        first: String,
        /// Path of the offending leaf.
        second: String,
    },
    /// Entry does not declare exactly one kind of target.
    #[error("Ambiguous entry at {path}: {reason}")]
    AmbiguousNode {
        /// Path of the node.
        path: String,
        /// What the entry declares.
        reason: &'static str,
    },
    /// Slug is not a relative content path.
    #[error("Invalid slug \"{slug}\" at {path}: {reason}")]
    InvalidSlug {
        /// The slug as written.
        slug: String,
        /// Path of the node.
        path: String,
        /// Which rule was broken.
        reason: &'static str,
    },
    /// Group without items.
    #[error("Empty group at {path}")]
    EmptyGroup {
        /// Path of the group.
        path: String,
    },
}

/// Error returned when loading a site from its config file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Invalid sidebar: {0}")]
    Nav(#[from] NavError),
}
