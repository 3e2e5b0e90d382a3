//! Rule presets and typed forms for the post and category editors.

use super::{validate, FieldRules, FormData, RuleSet, ValidationReport};
use crate::model::{Category, CategoryInput, Post, PostInput, PostStatus};
use crate::text::{format_tags, is_hex_color, parse_tags, slugify, strip_html};

pub const TITLE_MAX: usize = 200;
pub const CATEGORY_NAME_MAX: usize = 50;

pub fn post_rules() -> RuleSet {
    RuleSet::new()
        .field(
            "title",
            FieldRules::new("Title")
                .required()
                .min_length(1)
                .max_length(TITLE_MAX),
        )
        .field(
            "slug",
            FieldRules::new("Slug").custom(|slug| {
                (!slug.is_empty() && slugify(slug).is_empty())
                    .then(|| "Slug must contain letters or numbers".to_string())
            }),
        )
        .field(
            "content",
            FieldRules::new("Content").custom(|content| {
                strip_html(content)
                    .trim()
                    .is_empty()
                    .then(|| "Content is required".to_string())
            }),
        )
}

pub fn category_rules() -> RuleSet {
    RuleSet::new()
        .field(
            "name",
            FieldRules::new("Name")
                .required()
                .min_length(1)
                .max_length(CATEGORY_NAME_MAX),
        )
        .field(
            "color",
            FieldRules::new("Color").custom(|color| {
                (!color.is_empty() && !is_hex_color(color))
                    .then(|| "Color must be a hex value like #3b82f6".to_string())
            }),
        )
}

/// Raw post editor fields. Tags are the comma separated string the user typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostForm {
    pub title: String,
    pub slug: String,
    pub category_id: String,
    pub status: PostStatus,
    pub excerpt: String,
    pub content: String,
    pub tags: String,
}

impl PostForm {
    pub fn to_form_data(&self) -> FormData {
        [
            ("title", &self.title),
            ("slug", &self.slug),
            ("category", &self.category_id),
            ("excerpt", &self.excerpt),
            ("content", &self.content),
            ("tags", &self.tags),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
    }

    pub fn validate(&self) -> ValidationReport {
        validate(&self.to_form_data(), &post_rules())
    }

    /// Converts to repository input. `id` selects update vs create.
    pub fn into_input(self, id: Option<String>) -> PostInput {
        let title = self.title.trim().to_string();
        let slug = match self.slug.trim() {
            "" => slugify(&title),
            given => slugify(given),
        };
        PostInput {
            id,
            title,
            slug,
            category_id: Some(self.category_id.trim().to_string()).filter(|c| !c.is_empty()),
            status: self.status,
            excerpt: self.excerpt.trim().to_string(),
            content: self.content.trim().to_string(),
            tags: parse_tags(&self.tags),
        }
    }
}

/// Prefills the editor from a stored post.
impl From<&Post> for PostForm {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            category_id: post.category_id.clone().unwrap_or_default(),
            status: post.status,
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            tags: format_tags(&post.tags),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
    pub color: String,
}

impl CategoryForm {
    pub fn to_form_data(&self) -> FormData {
        [
            ("name", &self.name),
            ("description", &self.description),
            ("color", &self.color),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
    }

    pub fn validate(&self) -> ValidationReport {
        validate(&self.to_form_data(), &category_rules())
    }

    pub fn into_input(self, id: Option<String>) -> CategoryInput {
        CategoryInput {
            id,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            color: self.color.trim().to_string(),
        }
    }
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone(),
            color: category.color.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_form(title: &str, content: &str) -> PostForm {
        PostForm {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_post_form() {
        assert!(post_form("Hello", "<p>World</p>").validate().is_valid);
    }

    #[test]
    fn test_title_rules() {
        let report = post_form("", "<p>x</p>").validate();
        assert_eq!(report.first_error("title"), Some("Title is required"));

        let long = "x".repeat(TITLE_MAX + 1);
        let report = post_form(&long, "<p>x</p>").validate();
        assert_eq!(
            report.first_error("title"),
            Some("Title must be no more than 200 characters")
        );
    }

    #[test]
    fn test_markup_only_content_is_empty() {
        let report = post_form("Title", "<p>  </p><br>").validate();
        assert_eq!(report.first_error("content"), Some("Content is required"));
    }

    #[test]
    fn test_slug_must_have_word_characters() {
        let mut form = post_form("Title", "body");
        form.slug = "!!!".into();
        assert!(form.validate().first_error("slug").is_some());
        form.slug = "Fine Slug".into();
        assert!(form.validate().is_valid);
    }

    #[test]
    fn test_post_form_into_input() {
        let form = PostForm {
            title: "  Hello World ".into(),
            slug: String::new(),
            category_id: "  ".into(),
            status: PostStatus::Published,
            excerpt: String::new(),
            content: "<p>x</p>".into(),
            tags: "Rust, CLI".into(),
        };
        let input = form.into_input(None);
        assert_eq!(input.title, "Hello World");
        assert_eq!(input.slug, "hello-world");
        assert_eq!(input.category_id, None);
        assert_eq!(input.tags, vec!["rust".to_string(), "cli".to_string()]);
    }

    #[test]
    fn test_category_rules() {
        let form = CategoryForm {
            name: "n".repeat(CATEGORY_NAME_MAX + 1),
            description: String::new(),
            color: "blue".into(),
        };
        let report = form.validate();
        assert_eq!(
            report.first_error("name"),
            Some("Name must be no more than 50 characters")
        );
        assert!(report.first_error("color").is_some());

        let ok = CategoryForm {
            name: "Travel".into(),
            description: String::new(),
            color: String::new(),
        };
        assert!(ok.validate().is_valid);
    }
}
