//! Fixtures for unit tests and (with the `test_utils` feature) downstream crates.

use crate::clock::FixedClock;
use crate::ids::SequentialIds;
use crate::model::{Category, CategoryInput, Post, PostInput, PostStatus};
use crate::store::{BlogStore, MemBackend};
use crate::text::slugify;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::rc::Rc;

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// A draft post created `minutes` after [`base_time`].
pub fn post_at(id: &str, title: &str, minutes: i64) -> Post {
    let at = base_time() + Duration::minutes(minutes);
    Post {
        id: id.to_string(),
        title: title.to_string(),
        slug: slugify(title),
        category_id: None,
        status: PostStatus::Draft,
        excerpt: String::new(),
        content: format!("<p>{} body</p>", title),
        tags: Vec::new(),
        created_at: at,
        updated_at: at,
    }
}

pub fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        color: "#3b82f6".to_string(),
        created_at: base_time(),
        updated_at: base_time(),
    }
}

/// An in-memory store with a pinned clock and `id-N` ids. Seeding is off.
pub struct StoreFixture {
    pub store: BlogStore<MemBackend>,
    pub clock: Rc<FixedClock>,
}

impl StoreFixture {
    pub fn empty() -> Self {
        let clock = Rc::new(FixedClock::new(base_time()));
        let store = BlogStore::new(MemBackend::new())
            .with_clock(clock.clone())
            .with_ids(SequentialIds::new())
            .with_seed_defaults(false);
        Self { store, clock }
    }

    /// `n` posts titled "Post 1".."Post n", one minute apart. Even numbers are
    /// published, odd numbers are drafts.
    pub fn with_posts(n: usize) -> Self {
        let mut fx = Self::empty();
        for i in 1..=n {
            fx.clock.advance(Duration::minutes(1));
            let status = if i % 2 == 0 {
                PostStatus::Published
            } else {
                PostStatus::Draft
            };
            fx.store.save_post(PostInput {
                title: format!("Post {}", i),
                content: format!("<p>Body of post {}</p>", i),
                status,
                ..Default::default()
            });
        }
        fx
    }

    /// Creates a category and files every existing post under it.
    pub fn categorize_all(&mut self, name: &str) -> String {
        let Some(category) = self.store.save_category(CategoryInput {
            name: name.to_string(),
            color: "#3b82f6".to_string(),
            ..Default::default()
        }) else {
            return String::new();
        };
        for post in self.store.posts() {
            let mut input = PostInput::from(&post);
            input.category_id = Some(category.id.clone());
            self.store.save_post(input);
        }
        category.id
    }
}
