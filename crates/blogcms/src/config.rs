//! # Configuration
//!
//! blogcms configuration is loaded with [`confique`] from, in priority order:
//!
//! 1. **Environment variables**: `BLOGCMS_DATA_DIR`, `BLOGCMS_LOG`, `BLOGCMS_SEED`.
//! 2. **Data directory config**: `<data_dir>/blogcms.toml`, when a data directory is
//!    given on the command line.
//! 3. **User config**: `blogcms.toml` in the OS config directory (via `directories`).
//! 4. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Where the JSON collections live |
//! | `log_level` | `warn` | `tracing` filter used when `RUST_LOG` is unset |
//! | `seed_defaults` | `true` | Seed sample categories and posts into an empty store |
//!
//! These are process settings. Blog settings shown to authors (posts per page,
//! default status, theme) live in the store, see [`crate::model::Settings`].

use crate::error::{BlogError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "blogcms.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BlogConfig {
    /// Directory holding the JSON collections.
    #[config(env = "BLOGCMS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log filter (e.g. "warn", "blogcms=debug") used when RUST_LOG is unset.
    #[config(env = "BLOGCMS_LOG", default = "warn")]
    pub log_level: String,

    /// Seed sample data into an empty store.
    #[config(env = "BLOGCMS_SEED", default = true)]
    pub seed_defaults: bool,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: "warn".to_string(),
            seed_defaults: true,
        }
    }
}

impl BlogConfig {
    /// Loads env, then `<data_dir>/blogcms.toml`, then the user config file.
    /// Missing files are skipped.
    pub fn load(data_dir: Option<&Path>) -> Result<Self> {
        let mut builder = BlogConfig::builder().env();
        if let Some(dir) = data_dir {
            builder = builder.file(dir.join(CONFIG_FILE));
        }
        if let Some(dirs) = project_dirs() {
            builder = builder.file(dirs.config_dir().join(CONFIG_FILE));
        }
        builder.load().map_err(|e| BlogError::Config(e.to_string()))
    }

    /// Loads from a single file plus env, for tests and explicit `--config` use.
    pub fn from_file(path: &Path) -> Result<Self> {
        BlogConfig::builder()
            .env()
            .file(path)
            .load()
            .map_err(|e| BlogError::Config(e.to_string()))
    }
}

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "blogcms")
}
