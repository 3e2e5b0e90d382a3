//! # Presentation Models
//!
//! Pure mapping from entities and pagination metadata to the fragments a UI shows:
//! post cards for the listing, rows for the management table, category cards, the
//! full post view and the pagination bar.
//!
//! Interactive elements are described, not wired: each fragment carries the
//! [`UiAction`]s it offers and the client decides how to trigger them (a button, a
//! key binding, a CLI subcommand). Destructive actions carry the confirmation
//! prompt the client should show first.
//!
//! All view models are `Serialize` so template based renderers can consume them.

use crate::model::{Category, Post, PostStatus};
use crate::query::{page_window, Pagination};
use crate::text::{format_tags, relative_time, strip_html, truncate_text, DEFAULT_TRUNCATE};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const UNCATEGORIZED_COLOR: &str = "#6b7280";
const DATE_FORMAT: &str = "%b %-d, %Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UiAction {
    ViewPost { id: String },
    EditPost { id: String },
    DeletePost { id: String },
    EditCategory { id: String },
    DeleteCategory { id: String },
    GoToPage { page: usize },
}

impl UiAction {
    /// Prompt to show before running the action, for destructive ones.
    pub fn confirmation(&self) -> Option<&'static str> {
        match self {
            UiAction::DeletePost { .. } => Some("Are you sure you want to delete this post?"),
            UiAction::DeleteCategory { .. } => Some(
                "Are you sure you want to delete this category? Posts in this category will become uncategorized.",
            ),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryLabel {
    pub name: String,
    pub color: String,
}

/// Name and color for a post's category; missing or dangling references read as
/// "Uncategorized".
pub fn category_label(categories: &[Category], id: Option<&str>) -> CategoryLabel {
    id.and_then(|id| categories.iter().find(|c| c.id == id))
        .map(|c| CategoryLabel {
            name: c.name.clone(),
            color: c.color.clone(),
        })
        .unwrap_or_else(|| CategoryLabel {
            name: UNCATEGORIZED.to_string(),
            color: UNCATEGORIZED_COLOR.to_string(),
        })
}

pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format(DATE_FORMAT).to_string()
}

/// The excerpt, or the start of the stripped content when there is none.
pub fn preview_text(post: &Post) -> String {
    if !post.excerpt.trim().is_empty() {
        return post.excerpt.trim().to_string();
    }
    truncate_text(strip_html(&post.content).trim(), DEFAULT_TRUNCATE)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostCard {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub category: CategoryLabel,
    pub status: PostStatus,
    pub tags: Vec<String>,
    pub date: String,
    pub age: String,
    pub actions: Vec<UiAction>,
}

pub fn post_card(post: &Post, categories: &[Category], now: DateTime<Utc>) -> PostCard {
    PostCard {
        id: post.id.clone(),
        title: post.title.clone(),
        preview: preview_text(post),
        category: category_label(categories, post.category_id.as_deref()),
        status: post.status,
        tags: post.tags.clone(),
        date: format_date(post.created_at),
        age: relative_time(post.created_at, now),
        actions: vec![
            UiAction::ViewPost {
                id: post.id.clone(),
            },
            UiAction::EditPost {
                id: post.id.clone(),
            },
            UiAction::DeletePost {
                id: post.id.clone(),
            },
        ],
    }
}

pub fn post_cards(posts: &[Post], categories: &[Category], now: DateTime<Utc>) -> Vec<PostCard> {
    posts
        .iter()
        .map(|p| post_card(p, categories, now))
        .collect()
}

/// One row of the management table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRow {
    pub id: String,
    pub title: String,
    pub status: PostStatus,
    pub category: CategoryLabel,
    pub updated: String,
    pub actions: Vec<UiAction>,
}

pub fn post_rows(posts: &[Post], categories: &[Category], now: DateTime<Utc>) -> Vec<PostRow> {
    posts
        .iter()
        .map(|post| PostRow {
            id: post.id.clone(),
            title: post.title.clone(),
            status: post.status,
            category: category_label(categories, post.category_id.as_deref()),
            updated: relative_time(post.updated_at, now),
            actions: vec![
                UiAction::EditPost {
                    id: post.id.clone(),
                },
                UiAction::DeletePost {
                    id: post.id.clone(),
                },
            ],
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub post_count: usize,
    pub actions: Vec<UiAction>,
}

pub fn category_cards(categories: &[Category], posts: &[Post]) -> Vec<CategoryCard> {
    categories
        .iter()
        .map(|category| CategoryCard {
            id: category.id.clone(),
            name: category.name.clone(),
            description: category.description.clone(),
            color: category.color.clone(),
            post_count: posts.iter().filter(|p| p.in_category(&category.id)).count(),
            actions: vec![
                UiAction::EditCategory {
                    id: category.id.clone(),
                },
                UiAction::DeleteCategory {
                    id: category.id.clone(),
                },
            ],
        })
        .collect()
}

/// Everything shown on a single post page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetail {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub category: CategoryLabel,
    pub status: PostStatus,
    pub tags: String,
    pub excerpt: String,
    pub body: String,
    pub created: String,
    pub updated: String,
    pub actions: Vec<UiAction>,
}

pub fn post_detail(post: &Post, categories: &[Category]) -> PostDetail {
    PostDetail {
        id: post.id.clone(),
        title: post.title.clone(),
        slug: post.slug.clone(),
        category: category_label(categories, post.category_id.as_deref()),
        status: post.status,
        tags: format_tags(&post.tags),
        excerpt: post.excerpt.clone(),
        body: strip_html(&block_breaks(&post.content)).trim().to_string(),
        created: format_date(post.created_at),
        updated: format_date(post.updated_at),
        actions: vec![
            UiAction::EditPost {
                id: post.id.clone(),
            },
            UiAction::DeletePost {
                id: post.id.clone(),
            },
        ],
    }
}

// Keeps paragraphs and list items on their own lines once tags are stripped.
fn block_breaks(html: &str) -> String {
    html.replace("</p>", "</p>\n")
        .replace("<li>", "<li>- ")
        .replace("</li>", "</li>\n")
        .replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("<br />", "\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub number: usize,
    pub active: bool,
    pub action: UiAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationBar {
    /// False when everything fits on one page; nothing should be drawn then.
    pub visible: bool,
    pub prev: Option<UiAction>,
    pub next: Option<UiAction>,
    /// "start-end of total".
    pub label: String,
    pub pages: Vec<PageButton>,
}

pub fn pagination_bar(pagination: &Pagination) -> PaginationBar {
    if pagination.total_pages <= 1 {
        return PaginationBar {
            visible: false,
            prev: None,
            next: None,
            label: String::new(),
            pages: Vec::new(),
        };
    }
    let current = pagination.current_page;
    PaginationBar {
        visible: true,
        prev: pagination
            .has_prev
            .then(|| UiAction::GoToPage { page: current - 1 }),
        next: pagination
            .has_next
            .then(|| UiAction::GoToPage { page: current + 1 }),
        label: format!(
            "{}-{} of {}",
            pagination.start_index, pagination.end_index, pagination.total_items
        ),
        pages: page_window(current, pagination.total_pages)
            .into_iter()
            .map(|number| PageButton {
                number,
                active: number == current,
                action: UiAction::GoToPage { page: number },
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{paginate, PageRequest};
    use crate::test_utils::{category, post_at};
    use chrono::Duration;

    #[test]
    fn test_missing_category_reads_uncategorized() {
        let cats = vec![category("c1", "Tech")];
        assert_eq!(category_label(&cats, None).name, UNCATEGORIZED);
        assert_eq!(category_label(&cats, Some("gone")).name, UNCATEGORIZED);
        assert_eq!(category_label(&cats, Some("c1")).name, "Tech");
    }

    #[test]
    fn test_card_prefers_excerpt_then_stripped_content() {
        let cats = vec![];
        let mut post = post_at("p", "Title", 0);
        post.content = format!("<p>{}</p>", "word ".repeat(60));
        let now = post.created_at + Duration::hours(3);

        let card = post_card(&post, &cats, now);
        assert!(card.preview.ends_with("..."));
        assert!(!card.preview.contains('<'));
        assert_eq!(card.age, "3 hours ago");

        post.excerpt = "Short summary".into();
        assert_eq!(post_card(&post, &cats, now).preview, "Short summary");
    }

    #[test]
    fn test_card_actions() {
        let post = post_at("p", "Title", 0);
        let card = post_card(&post, &[], post.created_at);
        assert_eq!(
            card.actions,
            vec![
                UiAction::ViewPost { id: "p".into() },
                UiAction::EditPost { id: "p".into() },
                UiAction::DeletePost { id: "p".into() },
            ]
        );
        assert!(card.actions[2].confirmation().is_some());
        assert!(card.actions[1].confirmation().is_none());
    }

    #[test]
    fn test_category_cards_count_posts() {
        let cats = vec![category("c1", "Tech"), category("c2", "Life")];
        let mut a = post_at("a", "A", 0);
        a.category_id = Some("c1".into());
        let mut b = post_at("b", "B", 1);
        b.category_id = Some("c1".into());
        let cards = category_cards(&cats, &[a, b]);
        assert_eq!(cards[0].post_count, 2);
        assert_eq!(cards[1].post_count, 0);
    }

    #[test]
    fn test_detail_body_keeps_block_lines() {
        let mut post = post_at("p", "T", 0);
        post.content = "<p>One</p><ul><li>a</li><li>b</li></ul>".into();
        post.tags = vec!["x".into(), "y".into()];
        let detail = post_detail(&post, &[]);
        assert_eq!(detail.body, "One\n- a\n- b");
        assert_eq!(detail.tags, "x, y");
    }

    #[test]
    fn test_pagination_bar_hidden_for_single_page() {
        let page = paginate((1..=3).collect::<Vec<_>>(), PageRequest::new(1, 6));
        assert!(!pagination_bar(&page.pagination).visible);
    }

    #[test]
    fn test_pagination_bar_middle_page() {
        let page = paginate((1..=40).collect::<Vec<_>>(), PageRequest::new(4, 3));
        let bar = pagination_bar(&page.pagination);
        assert!(bar.visible);
        assert_eq!(bar.label, "10-12 of 40");
        assert_eq!(bar.prev, Some(UiAction::GoToPage { page: 3 }));
        assert_eq!(bar.next, Some(UiAction::GoToPage { page: 5 }));
        let numbers: Vec<usize> = bar.pages.iter().map(|b| b.number).collect();
        assert_eq!(numbers, vec![2, 3, 4, 5, 6]);
        assert!(bar.pages[2].active);
    }

    #[test]
    fn test_pagination_bar_last_page_has_no_next() {
        let page = paginate((1..=7).collect::<Vec<_>>(), PageRequest::new(3, 3));
        let bar = pagination_bar(&page.pagination);
        assert_eq!(bar.next, None);
        assert_eq!(bar.label, "7-7 of 7");
    }
}
