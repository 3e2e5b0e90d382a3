//! # Storage Layer
//!
//! Persistence is split in three levels:
//!
//! 1. [`StorageBackend`]: raw string I/O per key. [`FsBackend`] keeps one JSON file
//!    per key in a data directory, [`MemBackend`] keeps a map in memory for tests.
//! 2. [`JsonStore`]: the key-value adapter. Serializes collections to JSON and
//!    converts every backend failure into a degraded value (`false` on write, the
//!    caller's default on read) plus a `tracing` event.
//! 3. [`BlogStore`]: the entity repository. Assigns ids and timestamps, replaces or
//!    appends on save, cascades category deletion into posts.
//!
//! ## Collections
//!
//! | Key                   | Content           |
//! |-----------------------|-------------------|
//! | `blogcms_posts`       | `Vec<Post>`       |
//! | `blogcms_categories`  | `Vec<Category>`   |
//! | `blogcms_settings`    | `Settings`        |
//!
//! Collections are rewritten whole on every mutation; there are no partial updates.
//!
//! ## Writers
//!
//! The store assumes a single writer. Every mutating repository method takes
//! `&mut self`, so within one process the borrow checker serializes writers. Two
//! processes sharing a data directory can still lose updates; the atomic rename in
//! [`FsBackend`] only protects against torn files.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── blogcms_posts.json
//! ├── blogcms_categories.json
//! ├── blogcms_settings.json
//! └── blogcms.toml            # optional config
//! ```

pub mod backend;
pub mod blog_store;
pub mod fs_backend;
pub mod json;
pub mod mem_backend;
pub mod seed;
pub mod settings;

pub use backend::StorageBackend;
pub use blog_store::BlogStore;
pub use fs_backend::FsBackend;
pub use json::JsonStore;
pub use mem_backend::MemBackend;

/// The named collections held in the key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Posts,
    Categories,
    Settings,
}

impl StoreKey {
    pub const ALL: [StoreKey; 3] = [StoreKey::Posts, StoreKey::Categories, StoreKey::Settings];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Posts => "blogcms_posts",
            StoreKey::Categories => "blogcms_categories",
            StoreKey::Settings => "blogcms_settings",
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
