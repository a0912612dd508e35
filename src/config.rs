//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the data directory next to `posts.json`; stock defaults are overridden by
//! whatever keys it sets.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Wanderlust Chronicles"
//! tagline = "Stories from the road, waiting to be told."
//! description = "Sharing stories, discoveries, and the joy of exploring our world."
//! base_url = ""                 # Canonical origin, e.g. "https://example.github.io"
//! stylesheet = "/css/style.css"
//! # copyright_year = 2024       # Footer year (omitted when unset)
//!
//! [images]
//! fallback = "/uploads/default-travel.jpg"  # Card image for posts without one
//! about_photo = "/uploads/about-photo.jpg"
//!
//! [home]
//! recent_count = 6              # Cards in "Recent Stories" after the featured post
//!
//! [processing]
//! max_processes = 4             # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [site]
//! title = "Slow Roads"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity and page chrome.
    pub site: SiteInfo,
    /// Fixed image paths used in place of missing post data.
    pub images: ImagesConfig,
    /// Home page layout.
    pub home: HomeConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        if self.images.fallback.trim().is_empty() {
            return Err(ConfigError::Validation(
                "images.fallback must not be empty".into(),
            ));
        }
        if !self.site.base_url.is_empty()
            && !(self.site.base_url.starts_with("http://")
                || self.site.base_url.starts_with("https://"))
        {
            return Err(ConfigError::Validation(
                "site.base_url must start with http:// or https://".into(),
            ));
        }
        Ok(())
    }

    /// Canonical URL for a site-relative path, when `site.base_url` is set.
    pub fn canonical_url(&self, path: &str) -> Option<String> {
        if self.site.base_url.is_empty() {
            return None;
        }
        Some(format!("{}{}", self.site.base_url.trim_end_matches('/'), path))
    }
}

/// Site identity shared by every page's head, header, and footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub title: String,
    /// Shown in the placeholder hero when nothing is published.
    pub tagline: String,
    /// Home page meta description and footer blurb.
    pub description: String,
    /// Origin for canonical links. Empty disables them.
    pub base_url: String,
    pub stylesheet: String,
    /// Footer copyright year. Kept in config so rebuilds stay byte-identical.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright_year: Option<i32>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Wanderlust Chronicles".to_string(),
            tagline: "Stories from the road, waiting to be told.".to_string(),
            description: "Sharing stories, discoveries, and the joy of exploring our beautiful world, one journey at a time.".to_string(),
            base_url: String::new(),
            stylesheet: "/css/style.css".to_string(),
            copyright_year: None,
        }
    }
}

/// Fixed image paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Card and hero background for posts without a featured image.
    pub fallback: String,
    /// Portrait on the about page.
    pub about_photo: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            fallback: "/uploads/default-travel.jpg".to_string(),
            about_photo: "/uploads/about-photo.jpg".to_string(),
        }
    }
}

/// Home page layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeConfig {
    /// Number of recent-story cards following the featured post.
    pub recent_count: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self { recent_count: 6 }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel page-rendering workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Wanderpress Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file next to posts.json and categories.json in the data
# directory. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Shown in every <title>, the header logo, and the footer.
title = "Wanderlust Chronicles"

# Shown in the placeholder hero when nothing is published yet.
tagline = "Stories from the road, waiting to be told."

# Home page meta description and footer blurb.
description = "Sharing stories, discoveries, and the joy of exploring our beautiful world, one journey at a time."

# Origin used for <link rel="canonical"> on post pages, e.g.
# "https://example.github.io". Leave empty to omit canonical links.
base_url = ""

# Stylesheet linked from every page.
stylesheet = "/css/style.css"

# Footer copyright year. Omitted from the footer when unset so that
# rebuilding an unchanged store produces identical files.
# copyright_year = 2024

# ---------------------------------------------------------------------------
# Image paths
# ---------------------------------------------------------------------------
[images]
# Used on cards and the featured hero for posts without a featured image.
fallback = "/uploads/default-travel.jpg"

# Portrait on the about page.
about_photo = "/uploads/about-photo.jpg"

# ---------------------------------------------------------------------------
# Home page
# ---------------------------------------------------------------------------
[home]
# Number of "Recent Stories" cards shown after the featured post.
recent_count = 6

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for rendering post pages.
# Omit to use all CPU cores. Values above the core count are clamped.
# max_processes = 4
"##
}
