//! # Startup
//!
//! Resolves where data lives, loads configuration and opens the store.
//!
//! ## Data Directory Resolution
//!
//! 1. `data_override` (the CLI's `--data` flag), used as-is.
//! 2. `data_dir` from [`BlogConfig`] (env `BLOGCMS_DATA_DIR` or a config file).
//! 3. The OS data directory for `blogcms` (via the `directories` crate).
//! 4. `./.blogcms` when no OS directory can be determined.
//!
//! Opening a store seeds sample data into empty collections unless
//! `seed_defaults` is off.

use crate::api::BlogApi;
use crate::config::{project_dirs, BlogConfig};
use crate::store::{BlogStore, FsBackend};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct BlogContext {
    pub api: BlogApi<FsBackend>,
    pub config: BlogConfig,
    pub data_dir: PathBuf,
}

/// Config for this run. A broken config file is logged and replaced by defaults.
pub fn load_config(data_override: Option<&Path>) -> BlogConfig {
    BlogConfig::load(data_override).unwrap_or_else(|e| {
        warn!(error = %e, "could not load config, using defaults");
        BlogConfig::default()
    })
}

pub fn resolve_data_dir(data_override: Option<PathBuf>, config: &BlogConfig) -> PathBuf {
    data_override
        .or_else(|| config.data_dir.clone())
        .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from(".blogcms"))
}

pub fn open(config: BlogConfig, data_override: Option<PathBuf>) -> BlogContext {
    let data_dir = resolve_data_dir(data_override, &config);
    debug!(data_dir = %data_dir.display(), "opening store");

    let mut store =
        BlogStore::new(FsBackend::new(data_dir.clone())).with_seed_defaults(config.seed_defaults);
    if !store.ensure_defaults() {
        warn!("could not seed default data");
    }

    BlogContext {
        api: BlogApi::new(store),
        config,
        data_dir,
    }
}

pub fn initialize(data_override: Option<PathBuf>) -> BlogContext {
    let config = load_config(data_override.as_deref());
    open(config, data_override)
}
