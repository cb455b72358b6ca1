//! Site configuration module.
//!
//! Loads tool settings from the site's `_config.yml` — the same file the
//! rest of a Jekyll-style site reads. Every field has a default, so a site
//! with no config (or a config that only carries Jekyll's own keys) works
//! out of the box.
//!
//! ## Configuration Options
//!
//! ```yaml
//! # All options are optional - defaults shown below
//!
//! owner: ""                          # Site author, used for citations
//! baseurl: ""                        # URL prefix for generated links
//! highlighter_class_name: highlight  # CSS class of highlighted code blocks
//! images_dir: resources/images       # Source image directory
//! data_dir: _data                    # Where the resolution store lives
//! posts_dir: _posts                  # Post sources
//! tags_dir: tags                     # Generated tag stub pages
//! resolutions_name: resolutions      # Store file name (without .yml)
//! tag_layout: tag                    # Layout named in tag stub front matter
//! ```
//!
//! Unlike a dedicated tool config, `_config.yml` belongs to the whole site:
//! it carries theme settings, plugin lists, and whatever else the site
//! defines. Unknown keys are therefore ignored rather than rejected.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the site configuration file within the source root.
pub const CONFIG_FILENAME: &str = "_config.yml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool settings read from `_config.yml`.
///
/// All fields have defaults; a site config needs only the values it wants
/// to override. Path fields are relative to the source root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site author name ("First Last"), used for citation entries.
    pub owner: String,
    /// URL prefix for links derived from post slugs.
    pub baseurl: String,
    /// CSS class marking highlighted code blocks.
    pub highlighter_class_name: String,
    /// Source image directory scanned by the resolution store builder.
    pub images_dir: String,
    /// Data directory holding the persisted resolution store.
    pub data_dir: String,
    /// Directory of post sources (`YYYY-MM-DD-slug.md`).
    pub posts_dir: String,
    /// Directory of generated tag stub pages.
    pub tags_dir: String,
    /// Base name of the resolution store file (`<name>.yml`).
    pub resolutions_name: String,
    /// Layout named in the front matter of generated tag stubs.
    pub tag_layout: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            baseurl: String::new(),
            highlighter_class_name: "highlight".to_string(),
            images_dir: "resources/images".to_string(),
            data_dir: "_data".to_string(),
            posts_dir: "_posts".to_string(),
            tags_dir: "tags".to_string(),
            resolutions_name: "resolutions".to_string(),
            tag_layout: "tag".to_string(),
        }
    }
}

impl SiteConfig {
    /// Validate that path-like fields are usable relative paths.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("images_dir", &self.images_dir),
            ("data_dir", &self.data_dir),
            ("posts_dir", &self.posts_dir),
            ("tags_dir", &self.tags_dir),
        ];
        for (key, value) in paths {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if Path::new(value).is_absolute() {
                return Err(ConfigError::Validation(format!(
                    "{key} must be relative to the source root: {value}"
                )));
            }
        }
        if self.resolutions_name.is_empty() {
            return Err(ConfigError::Validation(
                "resolutions_name must not be empty".into(),
            ));
        }
        if self.tag_layout.is_empty() {
            return Err(ConfigError::Validation(
                "tag_layout must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Load the site config from `<root>/_config.yml`.
///
/// A missing file yields the stock defaults. Keys the tool doesn't know are
/// ignored — the file is shared with the rest of the site.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&path)?;
    let config: SiteConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// A stock `_config.yml` fragment with every tool option documented.
pub fn stock_config_yaml() -> &'static str {
    r#"# inkstone settings — merge into your site's _config.yml.
# Every option is optional; the values below are the defaults.

# Site author ("First Last"), used for citation entries.
owner: ""

# URL prefix for links derived from post slugs.
baseurl: ""

# CSS class marking highlighted code blocks.
highlighter_class_name: highlight

# Source image directory scanned by the resolution store builder.
images_dir: resources/images

# Data directory holding the persisted resolution store.
data_dir: _data

# Directory of post sources (YYYY-MM-DD-slug.md).
posts_dir: _posts

# Directory of generated tag stub pages.
tags_dir: tags

# Base name of the resolution store file (<name>.yml).
resolutions_name: resolutions

# Layout named in the front matter of generated tag stubs.
tag_layout: tag
"#
}
