//! Resolved site and hot-reload holder.
//!
//! [`ResolvedSite`] is the immutable result of loading `docnav.toml`: site
//! metadata passed through unchanged plus the validated [`RouteIndex`].
//!
//! [`NavState`] keeps the current [`ResolvedSite`] behind an `Arc` so
//! readers never block on a reload.
//!
//! # Thread Safety
//!
//! - `current()` only clones the `Arc` under a read lock
//! - `replace()` and `reload()` validate first, then swap; a failed reload
//!   leaves the previous snapshot current
//! - reloads are serialized by a separate mutex so two concurrent reloads
//!   cannot interleave their swap order

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use docnav_config::{Config, SiteMeta};

use crate::error::{LoadError, NavError};
use crate::routes::RouteIndex;
use crate::tree::validate;

/// Validated site configuration.
#[derive(Clone, Debug)]
pub struct ResolvedSite {
    /// Site metadata, unmodified.
    pub meta: SiteMeta,
    /// Routing index built from the sidebar.
    pub routes: RouteIndex,
    /// Config file the site was loaded from.
    pub config_path: Option<PathBuf>,
}

impl ResolvedSite {
    /// Validate the sidebar of an already parsed config.
    ///
    /// # Errors
    ///
    /// Returns [`NavError`] if the sidebar is invalid.
    pub fn from_config(config: Config) -> Result<Self, NavError> {
        let tree = validate(&config.sidebar)?;
        let routes = RouteIndex::new(tree);

        tracing::debug!(
            title = %config.site.title,
            groups = routes.tree().nodes().len(),
            routes = routes.routes().len(),
            "Resolved sidebar"
        );

        Ok(Self {
            meta: config.site,
            routes,
            config_path: config.config_path,
        })
    }

    /// Load and validate a config file.
    ///
    /// Without `config_path`, `docnav.toml` is discovered from the current
    /// directory upwards.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file cannot be loaded or is invalid.
    pub fn load(config_path: Option<&Path>) -> Result<Self, LoadError> {
        let config = Config::load(config_path)?;
        Ok(Self::from_config(config)?)
    }
}

/// Current site snapshot with atomic replacement.
pub struct NavState {
    /// Current snapshot.
    current: RwLock<Arc<ResolvedSite>>,
    /// Serializes reloads.
    reload_lock: Mutex<()>,
    /// Number of successful swaps since creation.
    generation: AtomicU64,
}

impl NavState {
    /// Create state holding an initial site.
    #[must_use]
    pub fn new(site: ResolvedSite) -> Self {
        Self {
            current: RwLock::new(Arc::new(site)),
            reload_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Load the initial site from a config file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file cannot be loaded or is invalid.
    pub fn load(config_path: Option<&Path>) -> Result<Self, LoadError> {
        ResolvedSite::load(config_path).map(Self::new)
    }

    /// Get the current site snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn current(&self) -> Arc<ResolvedSite> {
        Arc::clone(&self.current.read().unwrap())
    }

    /// Number of successful replacements since creation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Validate `config` and make it current.
    ///
    /// # Errors
    ///
    /// Returns [`NavError`] if the sidebar is invalid; the current snapshot
    /// is kept.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn replace(&self, config: Config) -> Result<Arc<ResolvedSite>, NavError> {
        let _guard = self.reload_lock.lock().unwrap();
        let site = ResolvedSite::from_config(config).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected sidebar update, keeping previous navigation");
        })?;
        Ok(self.swap(site))
    }

    /// Re-read the config file of the current snapshot and make it current.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file cannot be loaded or is invalid; the
    /// current snapshot is kept.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn reload(&self) -> Result<Arc<ResolvedSite>, LoadError> {
        let _guard = self.reload_lock.lock().unwrap();
        let config_path = self.current().config_path.clone();

        let site = ResolvedSite::load(config_path.as_deref()).inspect_err(|e| {
            tracing::warn!(error = %e, "Reload failed, keeping previous navigation");
        })?;
        Ok(self.swap(site))
    }

    /// Install a validated site. Caller holds `reload_lock`.
    fn swap(&self, site: ResolvedSite) -> Arc<ResolvedSite> {
        let site = Arc::new(site);
        *self.current.write().unwrap() = Arc::clone(&site);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        tracing::info!(
            generation,
            routes = site.routes.routes().len(),
            "Navigation updated"
        );
        site
    }
}
