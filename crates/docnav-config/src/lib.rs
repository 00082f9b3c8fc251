//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! A config file has two parts:
//!
//! - `[site]`: site metadata ([`SiteMeta`]) passed through to the renderer
//! - `[[sidebar]]`: the declarative navigation tree ([`NavTree`])
//!
//! The sidebar is only parsed here. Checking its structure is the job of
//! `docnav-site`, which turns a [`NavTree`] into a validated tree.
//!
//! ## Environment Variable Expansion
//!
//! String values in the `[site]` table support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.title`
//! - `site.logo.src`
//! - `site.favicon`
//! - `site.custom_css[*]`
//! - `site.components.*`

mod expand;
mod sidebar;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use sidebar::{BadgeConfig, BadgeVariant, NavNodeConfig, NavTree};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Site metadata.
    pub site: SiteMeta,
    /// Declarative sidebar tree, in display order.
    #[serde(default)]
    pub sidebar: NavTree,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Site metadata.
///
/// Paths are opaque strings handed to the external asset pipeline as-is.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SiteMeta {
    /// Site title.
    pub title: String,
    /// Site logo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<LogoConfig>,
    /// Favicon path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Custom stylesheet paths, in load order.
    #[serde(default)]
    pub custom_css: Vec<String>,
    /// Theme component overrides (component name to source path).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<String, String>,
}

impl SiteMeta {
    /// Logo source path, if a logo is configured.
    #[must_use]
    pub fn logo_path(&self) -> Option<&str> {
        self.logo.as_ref().map(|logo| logo.src.as_str())
    }
}

/// Logo configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogoConfig {
    /// Logo image path.
    pub src: String,
    /// Render the logo instead of the title text.
    #[serde(default)]
    pub replaces_title: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.favicon`").
        field: String,
        /// Error message (e.g., "${`ASSET_BASE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if no config file can be found, or reading, parsing,
    /// expansion or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        let cwd = std::env::current_dir()?;
        match discover_config(&cwd) {
            Some(discovered) => Self::load_from_file(&discovered),
            None => Err(ConfigError::NotFound(cwd.join(CONFIG_FILENAME))),
        }
    }

    /// Parse configuration from a TOML string.
    ///
    /// Applies environment variable expansion and validation, but does not
    /// touch the filesystem. `config_path` is left unset.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;

        // Expand environment variables before validation
        config.expand_env_vars()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate site metadata.
    ///
    /// The sidebar is not checked here; see `docnav_site::validate`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let site = &self.site;
        require_non_empty(&site.title, "site.title")?;

        if let Some(logo) = &site.logo {
            require_non_empty(&logo.src, "site.logo.src")?;
        }
        if let Some(favicon) = &site.favicon {
            require_non_empty(favicon, "site.favicon")?;
        }
        for (i, path) in site.custom_css.iter().enumerate() {
            require_non_empty(path, &format!("site.custom_css[{i}]"))?;
        }
        for (name, path) in &site.components {
            require_non_empty(path, &format!("site.components.{name}"))?;
        }

        Ok(())
    }

    /// Expand environment variable references in site metadata strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let site = &mut self.site;
        site.title = expand::expand_env(&site.title, "site.title")?;

        if let Some(ref mut logo) = site.logo {
            logo.src = expand::expand_env(&logo.src, "site.logo.src")?;
        }
        if let Some(ref favicon) = site.favicon {
            site.favicon = Some(expand::expand_env(favicon, "site.favicon")?);
        }
        for (i, path) in site.custom_css.iter_mut().enumerate() {
            *path = expand::expand_env(path, &format!("site.custom_css[{i}]"))?;
        }
        for (name, path) in &mut site.components {
            *path = expand::expand_env(path, &format!("site.components.{name}"))?;
        }

        Ok(())
    }
}

/// Search for config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}
