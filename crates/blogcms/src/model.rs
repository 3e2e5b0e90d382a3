//! Domain records persisted by the store.
//!
//! Field names serialize in camelCase so the JSON collections keep the
//! `createdAt` / `categoryId` shape that exported files use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(format!("Unknown post status: {}", other)),
        }
    }
}

/// A blog post as stored in the posts collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    /// Weak reference to a [`Category`]. `None` means uncategorized; a dangling id
    /// is not an error.
    #[serde(default, with = "category_ref")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    pub fn in_category(&self, category_id: &str) -> bool {
        self.category_id.as_deref() == Some(category_id)
    }
}

/// Caller-supplied fields for [`crate::store::BlogStore::save_post`].
///
/// With an `id` that matches a stored post the save replaces it; without one (or
/// with an unknown one) a new post is appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostInput {
    pub id: Option<String>,
    pub title: String,
    pub slug: String,
    pub category_id: Option<String>,
    pub status: PostStatus,
    pub excerpt: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl From<&Post> for PostInput {
    fn from(post: &Post) -> Self {
        Self {
            id: Some(post.id.clone()),
            title: post.title.clone(),
            slug: post.slug.clone(),
            category_id: post.category_id.clone(),
            status: post.status,
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            tags: post.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    // Seeded categories historically carried only createdAt.
    #[serde(default = "epoch")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryInput {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    /// Empty means "pick one from the palette".
    pub color: String,
}

impl From<&Category> for CategoryInput {
    fn from(category: &Category) -> Self {
        Self {
            id: Some(category.id.clone()),
            name: category.name.clone(),
            description: category.description.clone(),
            color: category.color.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

/// Application settings, persisted as a single map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub posts_per_page: usize,
    pub default_status: PostStatus,
    pub auto_save: bool,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            posts_per_page: 6,
            default_status: PostStatus::Draft,
            auto_save: true,
            theme: Theme::Light,
        }
    }
}

impl Settings {
    /// Shallow merge: every field present in `patch` wins.
    pub fn merge(&mut self, patch: &SettingsPatch) {
        if let Some(n) = patch.posts_per_page {
            self.posts_per_page = n;
        }
        if let Some(status) = patch.default_status {
            self.default_status = status;
        }
        if let Some(auto_save) = patch.auto_save {
            self.auto_save = auto_save;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts_per_page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_status: Option<PostStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_save: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl SettingsPatch {
    /// Builds a patch from a `key value` pair as typed on a command line.
    /// Accepts both `postsPerPage` and `posts_per_page` spellings.
    pub fn from_pair(key: &str, value: &str) -> std::result::Result<Self, String> {
        let mut patch = SettingsPatch::default();
        match key {
            "postsPerPage" | "posts_per_page" => {
                let n: usize = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("postsPerPage must be a positive number, got '{}'", value))?;
                if n == 0 {
                    return Err("postsPerPage must be at least 1".to_string());
                }
                patch.posts_per_page = Some(n);
            }
            "defaultStatus" | "default_status" => patch.default_status = Some(value.parse()?),
            "autoSave" | "auto_save" => {
                patch.auto_save = Some(match value.trim() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    other => return Err(format!("autoSave must be true or false, got '{}'", other)),
                })
            }
            "theme" => patch.theme = Some(value.parse()?),
            other => return Err(format!("Unknown setting: {}", other)),
        }
        Ok(patch)
    }
}

/// Per-category entry of [`Stats`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    #[serde(flatten)]
    pub category: Category,
    pub post_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_posts: usize,
    pub published_posts: usize,
    pub draft_posts: usize,
    pub total_categories: usize,
    pub category_stats: Vec<CategoryStats>,
}

pub const EXPORT_VERSION: &str = "1.0";

/// Whole-store snapshot written by export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub posts: Vec<Post>,
    pub categories: Vec<Category>,
    pub settings: Settings,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

/// What import accepts. Every collection is optional; `version` and
/// `exportDate` are carried but never checked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEnvelope {
    #[serde(default)]
    pub posts: Option<Vec<Post>>,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
    #[serde(default)]
    pub settings: Option<SettingsPatch>,
    #[serde(default)]
    pub version: Option<String>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Stores `None` as `""` so files stay readable by older exports, and reads both
/// `""` and `null` back as `None`.
mod category_ref {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        Ok(raw.filter(|id| !id.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        let now = Utc::now();
        Post {
            id: "p1".into(),
            title: "Hello".into(),
            slug: "hello".into(),
            category_id: None,
            status: PostStatus::Draft,
            excerpt: String::new(),
            content: "<p>Hi</p>".into(),
            tags: vec!["rust".into()],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_uncategorized_post_serializes_empty_reference() {
        let json = serde_json::to_value(sample_post()).unwrap();
        assert_eq!(json["categoryId"], "");
        assert_eq!(json["status"], "draft");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_empty_and_null_category_reference_read_as_none() {
        let mut json = serde_json::to_value(sample_post()).unwrap();
        json["categoryId"] = serde_json::Value::Null;
        let post: Post = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(post.category_id, None);

        json["categoryId"] = "cat-1".into();
        let post: Post = serde_json::from_value(json).unwrap();
        assert_eq!(post.category_id.as_deref(), Some("cat-1"));
    }

    #[test]
    fn test_category_without_updated_at_still_loads() {
        let json = r##"{"id":"c1","name":"Tech","color":"#3b82f6","createdAt":"2024-01-01T00:00:00Z"}"##;
        let cat: Category = serde_json::from_str(json).unwrap();
        assert_eq!(cat.updated_at, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(cat.description, "");
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"postsPerPage": 10}"#).unwrap();
        assert_eq!(settings.posts_per_page, 10);
        assert_eq!(settings.default_status, PostStatus::Draft);
        assert!(settings.auto_save);
        assert_eq!(settings.theme, Theme::Light);
    }

    #[test]
    fn test_merge_only_touches_present_fields() {
        let mut settings = Settings::default();
        settings.merge(&SettingsPatch {
            theme: Some(Theme::Dark),
            ..Default::default()
        });
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.posts_per_page, 6);
    }

    #[test]
    fn test_settings_patch_from_pair() {
        let patch = SettingsPatch::from_pair("postsPerPage", "9").unwrap();
        assert_eq!(patch.posts_per_page, Some(9));

        let patch = SettingsPatch::from_pair("default_status", "published").unwrap();
        assert_eq!(patch.default_status, Some(PostStatus::Published));

        assert!(SettingsPatch::from_pair("postsPerPage", "0").is_err());
        assert!(SettingsPatch::from_pair("autoSave", "maybe").is_err());
        assert!(SettingsPatch::from_pair("colour", "red").is_err());
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("Published".parse::<PostStatus>(), Ok(PostStatus::Published));
        assert!("archived".parse::<PostStatus>().is_err());
    }
}
