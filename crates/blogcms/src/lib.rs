//! # blogcms
//!
//! A local-first blog content manager. Posts, categories and settings live in three
//! JSON collections inside a key-value store; listings are produced by a pure
//! filter → sort → paginate pipeline and handed to a presentation layer as plain
//! view models.
//!
//! ## Layering
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  UI client (crates/blogcms-cli)                           │
//! │  - argument parsing, prompts, terminal rendering          │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  API facade (api.rs)                                      │
//! │  - owns the store and the explicit AppState               │
//! │  - dispatches to command functions                        │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  Commands (commands/*)         Query / View / Validation  │
//! │  - mutations + messages        - pure functions           │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  Repository (store/blog_store.rs)                         │
//! │  - ids, timestamps, category cascade                      │
//! │  JsonStore adapter → StorageBackend (fs or memory)        │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing from `api.rs` inward writes to stdout or exits the process. Expected
//! conditions never surface as errors: a missing record is `None`, a failed write is
//! `false` (and a `tracing` event), invalid input is a [`validation::ValidationReport`].

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod ids;
pub mod init;
pub mod model;
pub mod query;
pub mod state;
pub mod store;
pub mod text;
pub mod validation;
pub mod view;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
