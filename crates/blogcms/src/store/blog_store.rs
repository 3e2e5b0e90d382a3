//! Entity repository for posts and categories.
//!
//! Every method reads the full collection, changes it in memory and writes it back
//! through [`JsonStore`]. Failures never escape: lookups give `None`, mutations give
//! `None` / `false`, and the reason is logged.

use super::backend::StorageBackend;
use super::json::JsonStore;
use super::StoreKey;
use crate::clock::{Clock, SystemClock};
use crate::ids::{IdSource, TimeRandomIds};
use crate::model::{Category, CategoryInput, Post, PostInput};
use crate::text::{random_color, slugify};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{debug, error, warn};

pub struct BlogStore<B: StorageBackend> {
    pub(crate) json: JsonStore<B>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdSource>,
    pub(crate) seed_defaults: bool,
}

impl<B: StorageBackend> BlogStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            json: JsonStore::new(backend),
            clock: Box::new(SystemClock),
            ids: Box::new(TimeRandomIds),
            seed_defaults: true,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_ids(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Whether [`BlogStore::ensure_defaults`] and [`BlogStore::clear_all`] seed
    /// sample data into empty collections.
    pub fn with_seed_defaults(mut self, seed: bool) -> Self {
        self.seed_defaults = seed;
        self
    }

    pub fn backend(&self) -> &B {
        self.json.backend()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn fresh_id(&self, taken: &HashSet<&str>) -> String {
        loop {
            let id = self.ids.next_id();
            if !taken.contains(id.as_str()) {
                return id;
            }
        }
    }

    // --- Posts ---

    /// All posts in insertion order.
    pub fn posts(&self) -> Vec<Post> {
        self.json.read_or_default(StoreKey::Posts)
    }

    pub fn post(&self, id: &str) -> Option<Post> {
        self.posts().into_iter().find(|p| p.id == id)
    }

    pub(crate) fn write_posts(&self, posts: &[Post]) -> bool {
        self.json.write(StoreKey::Posts, posts)
    }

    /// Replaces the post whose id matches `input.id`, or appends a new post.
    ///
    /// On update `createdAt` is kept and `updatedAt` refreshed. A new post always
    /// gets a fresh id, even when `input.id` named an unknown one. The slug falls
    /// back to the title when empty and is normalized either way.
    ///
    /// Returns the stored record, or `None` if the title is blank or the write failed.
    pub fn save_post(&mut self, input: PostInput) -> Option<Post> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            warn!("refusing to save a post without a title");
            return None;
        }
        let slug = if input.slug.trim().is_empty() {
            slugify(&title)
        } else {
            slugify(&input.slug)
        };
        let tags = input
            .tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        let category_id = input.category_id.filter(|id| !id.is_empty());

        let now = self.now();
        let mut posts = self.posts();
        let existing = input
            .id
            .as_deref()
            .and_then(|id| posts.iter().position(|p| p.id == id));

        let saved = match existing {
            Some(pos) => {
                let created_at = posts[pos].created_at;
                let post = Post {
                    id: posts[pos].id.clone(),
                    title,
                    slug,
                    category_id,
                    status: input.status,
                    excerpt: input.excerpt,
                    content: input.content,
                    tags,
                    created_at,
                    updated_at: now.max(created_at),
                };
                posts[pos] = post.clone();
                debug!(id = %post.id, "updating post");
                post
            }
            None => {
                let taken: HashSet<&str> = posts.iter().map(|p| p.id.as_str()).collect();
                let post = Post {
                    id: self.fresh_id(&taken),
                    title,
                    slug,
                    category_id,
                    status: input.status,
                    excerpt: input.excerpt,
                    content: input.content,
                    tags,
                    created_at: now,
                    updated_at: now,
                };
                posts.push(post.clone());
                debug!(id = %post.id, "creating post");
                post
            }
        };

        self.write_posts(&posts).then_some(saved)
    }

    /// Deleting an unknown id is a successful no-op.
    pub fn delete_post(&mut self, id: &str) -> bool {
        self.delete_posts(&[id.to_string()])
    }

    pub fn delete_posts(&mut self, ids: &[String]) -> bool {
        let doomed: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let mut posts = self.posts();
        let before = posts.len();
        posts.retain(|p| !doomed.contains(p.id.as_str()));
        if posts.len() == before {
            return true;
        }
        debug!(count = before - posts.len(), "deleting posts");
        self.write_posts(&posts)
    }

    // --- Categories ---

    pub fn categories(&self) -> Vec<Category> {
        self.json.read_or_default(StoreKey::Categories)
    }

    pub fn category(&self, id: &str) -> Option<Category> {
        self.categories().into_iter().find(|c| c.id == id)
    }

    pub(crate) fn write_categories(&self, categories: &[Category]) -> bool {
        self.json.write(StoreKey::Categories, categories)
    }

    /// Same replace-or-append rules as [`BlogStore::save_post`]. An empty color is
    /// replaced with one from the palette.
    pub fn save_category(&mut self, input: CategoryInput) -> Option<Category> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            warn!("refusing to save a category without a name");
            return None;
        }
        let color = match input.color.trim() {
            "" => random_color().to_string(),
            given => given.to_lowercase(),
        };

        let now = self.now();
        let mut categories = self.categories();
        let existing = input
            .id
            .as_deref()
            .and_then(|id| categories.iter().position(|c| c.id == id));

        let saved = match existing {
            Some(pos) => {
                let created_at = categories[pos].created_at;
                let category = Category {
                    id: categories[pos].id.clone(),
                    name,
                    description: input.description.trim().to_string(),
                    color,
                    created_at,
                    updated_at: now.max(created_at),
                };
                categories[pos] = category.clone();
                debug!(id = %category.id, "updating category");
                category
            }
            None => {
                let taken: HashSet<&str> = categories.iter().map(|c| c.id.as_str()).collect();
                let category = Category {
                    id: self.fresh_id(&taken),
                    name,
                    description: input.description.trim().to_string(),
                    color,
                    created_at: now,
                    updated_at: now,
                };
                categories.push(category.clone());
                debug!(id = %category.id, "creating category");
                category
            }
        };

        self.write_categories(&categories).then_some(saved)
    }

    /// Removes a category and clears `categoryId` on every post that referenced it.
    ///
    /// Posts are rewritten first, then categories. If the category write fails the
    /// previous post collection is written back so the two stay consistent.
    pub fn delete_category(&mut self, id: &str) -> bool {
        let categories = self.categories();
        let snapshot = self.posts();
        let now = self.now();

        let mut detached = 0usize;
        let posts: Vec<Post> = snapshot
            .iter()
            .cloned()
            .map(|mut post| {
                if post.in_category(id) {
                    post.category_id = None;
                    post.updated_at = now.max(post.created_at);
                    detached += 1;
                }
                post
            })
            .collect();

        let remaining: Vec<Category> = categories.iter().filter(|c| c.id != id).cloned().collect();
        if detached == 0 && remaining.len() == categories.len() {
            return true;
        }

        if detached > 0 && !self.write_posts(&posts) {
            return false;
        }
        if !self.write_categories(&remaining) {
            if detached > 0 && !self.write_posts(&snapshot) {
                error!(category = id, "could not restore posts after failed category delete");
            }
            return false;
        }
        debug!(category = id, detached, "deleted category");
        true
    }
}
