//! Build context shared by all generators.
//!
//! The original site kept its data (notably the resolution store) in an
//! ambient site-wide map that every build step mutated. Here the shared
//! state is explicit: a [`BuildContext`] owns the source root and the
//! loaded configuration, and each generator receives it as an argument.
//! Fixed paths — the store file, the image directory, the tag directory —
//! are derived in one place instead of being re-assembled at every call
//! site.

use crate::config::{self, ConfigError, SiteConfig};
use std::path::{Path, PathBuf};

/// Source root plus loaded configuration for one build invocation.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Site source root (the directory containing `_config.yml`).
    pub source: PathBuf,
    pub config: SiteConfig,
}

impl BuildContext {
    /// Load and validate the config at `source`, producing a ready context.
    pub fn load(source: &Path) -> Result<Self, ConfigError> {
        let config = config::load_config(source)?;
        config.validate()?;
        Ok(Self {
            source: source.to_path_buf(),
            config,
        })
    }

    /// Build a context from an already-constructed config (tests, mostly).
    pub fn with_config(source: &Path, config: SiteConfig) -> Self {
        Self {
            source: source.to_path_buf(),
            config,
        }
    }

    /// Source image directory scanned by the resolution store builder.
    pub fn images_dir(&self) -> PathBuf {
        self.source.join(&self.config.images_dir)
    }

    /// Fixed path of the persisted resolution store.
    pub fn resolutions_file(&self) -> PathBuf {
        self.source
            .join(&self.config.data_dir)
            .join(format!("{}.yml", self.config.resolutions_name))
    }

    /// Directory of post sources.
    pub fn posts_dir(&self) -> PathBuf {
        self.source.join(&self.config.posts_dir)
    }

    /// Directory of generated tag stub pages.
    pub fn tags_dir(&self) -> PathBuf {
        self.source.join(&self.config.tags_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILENAME;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn paths_derived_from_defaults() {
        let tmp = TempDir::new().unwrap();
        let ctx = BuildContext::load(tmp.path()).unwrap();

        assert_eq!(ctx.images_dir(), tmp.path().join("resources/images"));
        assert_eq!(
            ctx.resolutions_file(),
            tmp.path().join("_data").join("resolutions.yml")
        );
        assert_eq!(ctx.posts_dir(), tmp.path().join("_posts"));
        assert_eq!(ctx.tags_dir(), tmp.path().join("tags"));
    }

    #[test]
    fn paths_follow_config_overrides() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            "images_dir: assets/img\nresolutions_name: dimensions\n",
        )
        .unwrap();

        let ctx = BuildContext::load(tmp.path()).unwrap();
        assert_eq!(ctx.images_dir(), tmp.path().join("assets/img"));
        assert_eq!(
            ctx.resolutions_file(),
            tmp.path().join("_data").join("dimensions.yml")
        );
    }

    #[test]
    fn load_rejects_invalid_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "tags_dir: \"\"\n").unwrap();
        assert!(BuildContext::load(tmp.path()).is_err());
    }
}
