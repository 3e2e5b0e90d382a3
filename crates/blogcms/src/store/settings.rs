//! Settings, statistics and whole-store operations (export, import, clear).

use super::backend::StorageBackend;
use super::blog_store::BlogStore;
use super::StoreKey;
use crate::model::{
    CategoryStats, ExportEnvelope, ImportEnvelope, PostStatus, Settings, SettingsPatch, Stats,
    EXPORT_VERSION,
};
use tracing::{debug, warn};

impl<B: StorageBackend> BlogStore<B> {
    pub fn settings(&self) -> Settings {
        self.json.read_or_default(StoreKey::Settings)
    }

    /// Merges `patch` into the stored settings and returns the result.
    pub fn save_settings(&mut self, patch: &SettingsPatch) -> Option<Settings> {
        let mut settings = self.settings();
        settings.merge(patch);
        self.json
            .write(StoreKey::Settings, &settings)
            .then_some(settings)
    }

    pub fn stats(&self) -> Stats {
        let posts = self.posts();
        let categories = self.categories();
        let published = posts
            .iter()
            .filter(|p| p.status == PostStatus::Published)
            .count();

        let category_stats = categories
            .iter()
            .map(|category| CategoryStats {
                post_count: posts.iter().filter(|p| p.in_category(&category.id)).count(),
                category: category.clone(),
            })
            .collect();

        Stats {
            total_posts: posts.len(),
            published_posts: published,
            draft_posts: posts.len() - published,
            total_categories: categories.len(),
            category_stats,
        }
    }

    pub fn export(&self) -> ExportEnvelope {
        ExportEnvelope {
            posts: self.posts(),
            categories: self.categories(),
            settings: self.settings(),
            export_date: self.now(),
            version: EXPORT_VERSION.to_string(),
        }
    }

    /// Parses an export file and imports it. Malformed input changes nothing.
    pub fn import_json(&mut self, raw: &str) -> bool {
        match serde_json::from_str::<ImportEnvelope>(raw) {
            Ok(envelope) => self.import(envelope),
            Err(e) => {
                warn!(error = %e, "rejecting malformed import");
                false
            }
        }
    }

    /// Replaces every collection present in the envelope; settings are merged.
    pub fn import(&mut self, envelope: ImportEnvelope) -> bool {
        let mut ok = true;
        if let Some(posts) = &envelope.posts {
            ok &= self.write_posts(posts);
        }
        if let Some(categories) = &envelope.categories {
            ok &= self.write_categories(categories);
        }
        if let Some(patch) = &envelope.settings {
            ok &= self.save_settings(patch).is_some();
        }
        debug!(
            version = envelope.version.as_deref().unwrap_or("unknown"),
            ok, "imported data"
        );
        ok
    }

    /// Removes all three collections, then seeds defaults again if seeding is on.
    pub fn clear_all(&mut self) -> bool {
        let mut ok = true;
        for key in StoreKey::ALL {
            ok &= self.json.remove(key);
        }
        if self.seed_defaults {
            ok &= self.initialize_defaults();
        }
        ok
    }
}
