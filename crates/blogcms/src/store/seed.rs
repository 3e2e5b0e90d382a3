//! Sample content for a fresh store.

use super::backend::StorageBackend;
use super::blog_store::BlogStore;
use super::StoreKey;
use crate::model::{Category, CategoryInput, PostInput, PostStatus};
use tracing::info;

struct SampleCategory {
    name: &'static str,
    description: &'static str,
    color: &'static str,
}

const SAMPLE_CATEGORIES: [SampleCategory; 3] = [
    SampleCategory {
        name: "Technology",
        description: "Posts about technology and programming",
        color: "#3b82f6",
    },
    SampleCategory {
        name: "Lifestyle",
        description: "Posts about lifestyle and personal experiences",
        color: "#10b981",
    },
    SampleCategory {
        name: "Business",
        description: "Posts about business and entrepreneurship",
        color: "#f59e0b",
    },
];

struct SamplePost {
    title: &'static str,
    category: &'static str,
    status: PostStatus,
    excerpt: &'static str,
    content: &'static str,
    tags: &'static [&'static str],
}

const SAMPLE_POSTS: [SamplePost; 3] = [
    SamplePost {
        title: "Getting Started with Modern Web Development",
        category: "Technology",
        status: PostStatus::Published,
        excerpt: "A tour of the tools and habits that make building for the web pleasant today.",
        content: "<p>Building for the web has changed a lot in a few years.</p>\
                  <ul><li>Component frameworks</li><li>Responsive layouts</li>\
                  <li>Performance budgets</li><li>Accessibility from day one</li></ul>",
        tags: &["web development", "javascript", "frontend"],
    },
    SamplePost {
        title: "Finding Balance in a Remote Work Week",
        category: "Lifestyle",
        status: PostStatus::Published,
        excerpt: "Small routines that keep a home office from swallowing the whole day.",
        content: "<p>Working from home blurs the line between desk and kitchen.</p>\
                  <p>A fixed start time, a real lunch break and a walk at the end of the \
                  day go a long way.</p>",
        tags: &["remote work", "habits"],
    },
    SamplePost {
        title: "Notes on Pricing a First Product",
        category: "Business",
        status: PostStatus::Draft,
        excerpt: "What early customers taught us about charging for software.",
        content: "<p>Pricing is a conversation with customers, not a spreadsheet.</p>\
                  <p>Start higher than feels comfortable and listen to who says no.</p>",
        tags: &["startups", "pricing"],
    },
];

impl<B: StorageBackend> BlogStore<B> {
    /// Seeds sample categories into an empty category collection and sample posts
    /// into an empty post collection. Non-empty collections are left alone, and so
    /// are collections whose stored data does not decode.
    pub fn initialize_defaults(&mut self) -> bool {
        let mut ok = true;
        if self.json.is_vacant(StoreKey::Categories) {
            for sample in &SAMPLE_CATEGORIES {
                ok &= self
                    .save_category(CategoryInput {
                        id: None,
                        name: sample.name.to_string(),
                        description: sample.description.to_string(),
                        color: sample.color.to_string(),
                    })
                    .is_some();
            }
            info!("seeded default categories");
        }
        if self.json.is_vacant(StoreKey::Posts) {
            let categories = self.categories();
            for sample in &SAMPLE_POSTS {
                ok &= self.save_post(sample_input(sample, &categories)).is_some();
            }
            info!("seeded sample posts");
        }
        ok
    }

    /// Runs [`BlogStore::initialize_defaults`] when seeding is enabled.
    pub fn ensure_defaults(&mut self) -> bool {
        !self.seed_defaults || self.initialize_defaults()
    }
}

fn sample_input(sample: &SamplePost, categories: &[Category]) -> PostInput {
    PostInput {
        id: None,
        title: sample.title.to_string(),
        slug: String::new(),
        category_id: categories
            .iter()
            .find(|c| c.name == sample.category)
            .map(|c| c.id.clone()),
        status: sample.status,
        excerpt: sample.excerpt.to_string(),
        content: sample.content.to_string(),
        tags: sample.tags.iter().map(|t| t.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use crate::ids::SequentialIds;
    use crate::model::PostInput;
    use crate::store::{BlogStore, MemBackend, StoreKey};

    #[test]
    fn test_seeds_empty_store() {
        let mut store = BlogStore::new(MemBackend::new()).with_ids(SequentialIds::new());
        assert!(store.ensure_defaults());

        let names: Vec<String> = store.categories().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Technology", "Lifestyle", "Business"]);
        let posts = store.posts();
        assert_eq!(posts.len(), 3);
        assert!(posts.iter().all(|p| p.category_id.is_some()));
        assert_eq!(posts[0].slug, "getting-started-with-modern-web-development");
    }

    #[test]
    fn test_does_not_touch_existing_posts() {
        let mut store = BlogStore::new(MemBackend::new()).with_ids(SequentialIds::new());
        store
            .save_post(PostInput {
                title: "Mine".into(),
                ..Default::default()
            })
            .unwrap();
        assert!(store.initialize_defaults());
        assert_eq!(store.posts().len(), 1);
        assert_eq!(store.categories().len(), 3);
    }

    #[test]
    fn test_leaves_undecodable_collections_alone() {
        let corrupt = r#"[{"id":"mine","title":"My only draft","tags":[],}]"#;
        let backend = MemBackend::new();
        backend.insert_raw(StoreKey::Posts.as_str(), corrupt);
        let mut store = BlogStore::new(backend).with_ids(SequentialIds::new());

        assert!(store.ensure_defaults());
        assert_eq!(
            store.backend().raw(StoreKey::Posts.as_str()).as_deref(),
            Some(corrupt)
        );
        assert_eq!(store.categories().len(), 3);
    }

    #[test]
    fn test_reseeds_collection_emptied_by_the_user() {
        let backend = MemBackend::new();
        backend.insert_raw(StoreKey::Posts.as_str(), "[]");
        let mut store = BlogStore::new(backend).with_ids(SequentialIds::new());

        assert!(store.initialize_defaults());
        assert_eq!(store.posts().len(), 3);
    }

    #[test]
    fn test_seeding_disabled() {
        let mut store = BlogStore::new(MemBackend::new()).with_seed_defaults(false);
        assert!(store.ensure_defaults());
        assert!(store.posts().is_empty());
        assert!(store.categories().is_empty());
    }
}
