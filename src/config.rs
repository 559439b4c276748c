//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! describe the documentation site as shipped; a `config.toml` in the config
//! directory overrides just the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Qazana Documentation"
//! site_url = "https://docs.qazana.net"   # SITE_URL env var wins when set
//! description = "Everything you need to know about ..."
//!
//! [content]
//! root = "content"
//! sections = ["elements", "getting-started", "install", "integrations"]
//! images = "src/images"
//! data = "./src/data/"
//!
//! [manifest]
//! name = "Qazana Documentation"
//! short_name = "Qazana"
//! start_url = "/"
//! background_color = "#343f44"
//! theme_color = "#343f44"
//! display = "minimal-ui"
//! icon = "static/favicon.png"
//!
//! [sitemap]
//! exclude = ["/dev-404-page", "/404", ...]
//!
//! [cms]
//! base_url = "api.qazana.net"
//! protocol = "https"
//! hosting_wpcom = false
//! verbose_output = true
//! included_routes = ["**/categories", ...]
//!
//! [search]
//! app_id = "6RCFK5TOI5"
//! chunk_size = 10000
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::search::SearchSettings;
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
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// Site metadata exposed to page templates.
    pub site: SiteSection,
    /// Markdown and image source directories.
    pub content: ContentConfig,
    /// Web app manifest values.
    pub manifest: ManifestConfig,
    /// Sitemap generation settings.
    pub sitemap: SitemapConfig,
    /// Remote CMS source.
    pub cms: CmsConfig,
    /// Search indexing settings (only used when indexing is enabled).
    pub search: SearchSettings,
}

impl SiteSettings {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        if self.content.root.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content.root must not be empty".into(),
            ));
        }
        if self.search.chunk_size == 0 {
            return Err(ConfigError::Validation(
                "search.chunk_size must be greater than zero".into(),
            ));
        }
        if !matches!(self.cms.protocol.as_str(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "cms.protocol must be http or https, got {:?}",
                self.cms.protocol
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub title: String,
    /// Canonical URL. Overridden by the `SITE_URL` environment variable.
    pub site_url: String,
    pub description: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Qazana Documentation".to_string(),
            site_url: "https://docs.qazana.net".to_string(),
            description: "Everything you need to know about working with the Qazana \
                          professional publishing platform."
                .to_string(),
        }
    }
}

/// Content source directories, relative to the site root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Markdown root. Always sourced first.
    pub root: String,
    /// Subdirectories of `root` sourced as additional Markdown collections, in order.
    pub sections: Vec<String>,
    /// Image directory.
    pub images: String,
    /// YAML data directory.
    pub data: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: "content".to_string(),
            sections: ["elements", "getting-started", "install", "integrations"]
                .map(String::from)
                .to_vec(),
            images: "src/images".to_string(),
            data: "./src/data/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    pub name: String,
    pub short_name: String,
    pub start_url: String,
    pub background_color: String,
    pub theme_color: String,
    pub display: String,
    pub icon: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            name: "Qazana Documentation".to_string(),
            short_name: "Qazana".to_string(),
            start_url: "/".to_string(),
            background_color: "#343f44".to_string(),
            theme_color: "#343f44".to_string(),
            display: "minimal-ui".to_string(),
            icon: "static/favicon.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Paths left out of the sitemap.
    pub exclude: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            exclude: [
                "/dev-404-page",
                "/404",
                "/404.html",
                "/offline-plugin-app-shell-fallback",
                "/data-schema",
                "/data-schema-2",
                "/v0.11/README",
                "/README",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// Remote CMS (WordPress REST API) source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CmsConfig {
    pub base_url: String,
    pub protocol: String,
    pub hosting_wpcom: bool,
    pub verbose_output: bool,
    pub included_routes: Vec<String>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: "api.qazana.net".to_string(),
            protocol: "https".to_string(),
            hosting_wpcom: false,
            verbose_output: true,
            included_routes: [
                "**/categories",
                "**/posts",
                "**/pages",
                "**/media",
                "**/menus",
                "**/faq",
                "**/tutorials",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteSettings::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteSettings, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteSettings = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, on top of stock defaults.
pub fn load_config(dir: &Path) -> Result<SiteSettings, ConfigError> {
    let overlay = load_raw_config(dir)?;
    if overlay.is_none() {
        tracing::debug!(dir = %dir.display(), "no config.toml, using stock defaults");
    }
    resolve_config(stock_defaults_value()?, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docsite configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
#
# Environment variables (not configurable here):
#   SITE_URL                    overrides [site].site_url
#   ALGOLIA / INCOMING_HOOK_TITLE=Algolia   request a search indexing build
#   ALGOLIA_ADMIN_KEY           search admin key ("<key>" placeholder is ignored)
#   SERVICE_WORKER_KILL_SWITCH  "true" removes the service worker

# ---------------------------------------------------------------------------
# Site metadata
# ---------------------------------------------------------------------------
[site]
title = "Qazana Documentation"
site_url = "https://docs.qazana.net"
description = "Everything you need to know about working with the Qazana professional publishing platform."

# ---------------------------------------------------------------------------
# Content sources
# ---------------------------------------------------------------------------
[content]
# Markdown root, always sourced first.
root = "content"
# Subdirectories of root sourced as their own collections, in this order.
sections = ["elements", "getting-started", "install", "integrations"]
# Image directory.
images = "src/images"
# YAML data directory.
data = "./src/data/"

# ---------------------------------------------------------------------------
# Web app manifest
# ---------------------------------------------------------------------------
[manifest]
name = "Qazana Documentation"
short_name = "Qazana"
start_url = "/"
background_color = "#343f44"
theme_color = "#343f44"
display = "minimal-ui"
icon = "static/favicon.png"

# ---------------------------------------------------------------------------
# Sitemap
# ---------------------------------------------------------------------------
[sitemap]
exclude = [
    "/dev-404-page",
    "/404",
    "/404.html",
    "/offline-plugin-app-shell-fallback",
    "/data-schema",
    "/data-schema-2",
    "/v0.11/README",
    "/README",
]

# ---------------------------------------------------------------------------
# Remote CMS (WordPress REST API)
# ---------------------------------------------------------------------------
[cms]
base_url = "api.qazana.net"
protocol = "https"
hosting_wpcom = false
verbose_output = true
included_routes = [
    "**/categories",
    "**/posts",
    "**/pages",
    "**/media",
    "**/menus",
    "**/faq",
    "**/tutorials",
]

# ---------------------------------------------------------------------------
# Search indexing
# ---------------------------------------------------------------------------
[search]
app_id = "6RCFK5TOI5"
# Records per indexing request (plugin default is 1000).
chunk_size = 10000

# Queries replace the default set entirely when given.
# [[search.queries]]
# query = "{ allMarkdownRemark { edges { node { objectID: id } } } }"
# index_name = "docs"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_site_metadata() {
        let config = SiteSettings::default();
        assert_eq!(config.site.title, "Qazana Documentation");
        assert_eq!(config.site.site_url, "https://docs.qazana.net");
    }

    #[test]
    fn default_content_sections_in_order() {
        let config = SiteSettings::default();
        assert_eq!(config.content.root, "content");
        assert_eq!(
            config.content.sections,
            ["elements", "getting-started", "install", "integrations"]
        );
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[manifest]
theme_color = "#000000"
"##;
        let config: SiteSettings = toml::from_str(toml).unwrap();
        assert_eq!(config.manifest.theme_color, "#000000");
        // Default values preserved
        assert_eq!(config.manifest.background_color, "#343f44");
        assert_eq!(config.search.chunk_size, 10_000);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<SiteSettings, _> = toml::from_str("[site]\ntitel = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn stock_config_toml_matches_defaults() {
        let parsed: SiteSettings = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(parsed, SiteSettings::default());
    }

    #[test]
    fn merge_replaces_arrays_wholesale() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[content]\nsections = [\"guides\"]\n").unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.content.sections, ["guides"]);
        assert_eq!(config.content.root, "content");
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, SiteSettings::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[site]
site_url = "https://docs.example.com"

[search]
chunk_size = 2500
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.site_url, "https://docs.example.com");
        assert_eq!(config.search.chunk_size, 2500);
        // Unspecified values should be defaults
        assert_eq!(config.site.title, "Qazana Documentation");
        assert_eq!(config.search.queries.len(), 1);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // validation tests
    // =========================================================================

    #[test]
    fn validate_rejects_zero_chunk_size() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[search]\nchunk_size = 0\n").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_unknown_protocol() {
        let mut config = SiteSettings::default();
        config.cms.protocol = "ftp".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_empty_title() {
        let mut config = SiteSettings::default();
        config.site.title = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SiteSettings::default().validate().is_ok());
    }
}
