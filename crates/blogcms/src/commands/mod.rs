//! # Command Layer
//!
//! The business operations of blogcms. Each module exposes plain functions over a
//! [`BlogStore`](crate::store::BlogStore) that return a [`CmdResult`]:
//!
//! - [`list`]: the public listing (filter, sort, paginate)
//! - [`manage`]: the management table
//! - [`posts`]: view, create, update and delete posts
//! - [`categories`]: list, create, update and delete categories
//! - [`data`]: settings, statistics, export, import and clear
//!
//! Commands never print, prompt or exit. Expected failures (unknown id, invalid
//! form, failed write) come back as [`CmdMessage`]s with [`MessageLevel::Error`]
//! and, for forms, a [`ValidationReport`]; the UI decides how to show them.
//!
//! Tests here use `MemBackend` and verify the `CmdResult` contents.

use crate::model::{Category, Post};
use crate::query::Pagination;
use crate::validation::ValidationReport;
use serde::Serialize;

pub mod categories;
pub mod data;
pub mod list;
pub mod manage;
pub mod posts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_posts: Vec<Post>,
    pub listed_posts: Vec<Post>,
    pub affected_categories: Vec<Category>,
    /// Categories known at the time of the command, for resolving labels.
    pub listed_categories: Vec<Category>,
    pub pagination: Option<Pagination>,
    pub validation: Option<ValidationReport>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_listed_posts(mut self, posts: Vec<Post>) -> Self {
        self.listed_posts = posts;
        self
    }

    pub fn with_listed_categories(mut self, categories: Vec<Category>) -> Self {
        self.listed_categories = categories;
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}

pub(crate) fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}
