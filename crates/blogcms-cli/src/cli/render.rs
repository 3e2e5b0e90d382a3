//! # Rendering
//!
//! Turns the library's view models into styled terminal text.
//!
//! Layout calculations (width, truncation, padding) stay in Rust because they need
//! Unicode-aware processing. Templates handle presentation: which style each piece
//! gets and how lines are arranged. Colors are decided once, when the [`Renderer`]
//! is built; with colors off the `style` filter still checks names so typos in
//! templates stay visible.

use super::styles::{apply_hex, names, Theme};
use super::templates;
use blogcms::commands::{CmdMessage, MessageLevel};
use blogcms::model::{PostStatus, Settings, Stats, Theme as ThemeSetting};
use blogcms::validation::ValidationReport;
use blogcms::view::{CategoryCard, PaginationBar, PostCard, PostDetail, PostRow};
use minijinja::{Environment, Value};
use serde::Serialize;
use tracing::error;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
const MANAGE_TITLE_WIDTH: usize = 40;

#[derive(Serialize)]
struct PostLine {
    id: String,
    title: String,
    padding: String,
    age: String,
    category: String,
    color: String,
    status: &'static str,
    date: String,
    preview: String,
    tags: String,
}

#[derive(Serialize)]
struct PageMark {
    text: String,
    style: &'static str,
}

#[derive(Serialize)]
struct PostListData<'a> {
    posts: Vec<PostLine>,
    bar: &'a PaginationBar,
    marks: Vec<PageMark>,
}

#[derive(Serialize)]
struct PostDetailData<'a> {
    post: &'a PostDetail,
    dates: String,
    rule: String,
}

#[derive(Serialize)]
struct ManageLine {
    id: String,
    title: String,
    status: String,
    status_style: &'static str,
    category: String,
    color: String,
    updated: String,
}

#[derive(Serialize)]
struct ManageData {
    rows: Vec<ManageLine>,
}

#[derive(Serialize)]
struct CategoryLine {
    id: String,
    name: String,
    description: String,
    color: String,
    padding: String,
    count: String,
}

#[derive(Serialize)]
struct CategoriesData {
    categories: Vec<CategoryLine>,
}

#[derive(Serialize)]
struct StatsData<'a> {
    stats: &'a Stats,
    categories: Vec<CategoryLine>,
}

#[derive(Serialize)]
struct SettingsEntry {
    key: &'static str,
    padding: String,
    value: String,
}

#[derive(Serialize)]
struct SettingsData {
    entries: Vec<SettingsEntry>,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    errors: Vec<String>,
    messages: Vec<MessageData>,
}

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(theme: &'static Theme, use_color: bool) -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("style", move |value: Value, name: String| -> String {
            let text = value.to_string();
            if use_color {
                theme.apply(&name, &text)
            } else {
                theme.apply_plain(&name, &text)
            }
        });
        env.add_filter("hex", move |value: Value, color: String| -> String {
            let text = value.to_string();
            if use_color {
                apply_hex(&color, &text)
            } else {
                text
            }
        });
        for &(name, source) in templates::ALL {
            if let Err(e) = env.add_template(name, source) {
                error!(template = name, error = %e, "invalid template");
            }
        }
        Self { env }
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> String {
        self.env
            .get_template(name)
            .and_then(|tmpl| tmpl.render(data))
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    /// Post cards followed by the pagination bar, when there is more than one page.
    pub fn post_list(&self, cards: &[PostCard], bar: &PaginationBar) -> String {
        let title_width = LINE_WIDTH.saturating_sub(TIME_WIDTH);
        let posts = cards
            .iter()
            .map(|card| {
                let title = truncate_to_width(&card.title, title_width.saturating_sub(2));
                PostLine {
                    id: card.id.clone(),
                    padding: " ".repeat(title_width.saturating_sub(title.width())),
                    title,
                    age: format!("{:>width$}", card.age, width = TIME_WIDTH),
                    category: card.category.name.clone(),
                    color: card.category.color.clone(),
                    status: status_style(card.status),
                    date: card.date.clone(),
                    preview: truncate_to_width(&card.preview, LINE_WIDTH.saturating_sub(2)),
                    tags: card
                        .tags
                        .iter()
                        .map(|t| format!("#{}", t))
                        .collect::<Vec<_>>()
                        .join(" "),
                }
            })
            .collect();

        let data = PostListData {
            posts,
            bar,
            marks: page_marks(bar),
        };
        self.render("post_list", &data)
    }

    pub fn post_detail(&self, post: &PostDetail) -> String {
        let dates = if post.updated == post.created {
            post.created.clone()
        } else {
            format!("{} (updated {})", post.created, post.updated)
        };
        let data = PostDetailData {
            post,
            dates,
            rule: "─".repeat(LINE_WIDTH.min(60)),
        };
        self.render("post_detail", &data)
    }

    /// The management table: one aligned row per post.
    pub fn manage(&self, rows: &[PostRow]) -> String {
        let id_width = rows.iter().map(|r| r.id.width()).max().unwrap_or(0);
        let category_width = rows
            .iter()
            .map(|r| r.category.name.width())
            .max()
            .unwrap_or(0);
        let status_width = PostStatus::Published.as_str().len();

        let rows = rows
            .iter()
            .map(|row| ManageLine {
                id: pad_to_width(&row.id, id_width),
                title: pad_to_width(
                    &truncate_to_width(&row.title, MANAGE_TITLE_WIDTH),
                    MANAGE_TITLE_WIDTH,
                ),
                status: pad_to_width(row.status.as_str(), status_width),
                status_style: status_style(row.status),
                category: pad_to_width(&row.category.name, category_width),
                color: row.category.color.clone(),
                updated: row.updated.clone(),
            })
            .collect();
        self.render("manage", &ManageData { rows })
    }

    pub fn categories(&self, cards: &[CategoryCard]) -> String {
        let lines = category_lines(
            cards.iter().map(|c| {
                (
                    c.id.as_str(),
                    c.name.as_str(),
                    c.description.as_str(),
                    c.color.as_str(),
                    c.post_count,
                )
            }),
        );
        self.render("categories", &CategoriesData { categories: lines })
    }

    pub fn stats(&self, stats: &Stats) -> String {
        let categories = category_lines(stats.category_stats.iter().map(|s| {
            (
                s.category.id.as_str(),
                s.category.name.as_str(),
                s.category.description.as_str(),
                s.category.color.as_str(),
                s.post_count,
            )
        }));
        self.render("stats", &StatsData { stats, categories })
    }

    pub fn settings(&self, settings: &Settings) -> String {
        let pairs = [
            ("postsPerPage", settings.posts_per_page.to_string()),
            ("defaultStatus", settings.default_status.to_string()),
            ("autoSave", settings.auto_save.to_string()),
            ("theme", theme_name(settings.theme).to_string()),
        ];
        let key_width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0) + 2;
        let entries = pairs
            .into_iter()
            .map(|(key, value)| SettingsEntry {
                key,
                padding: " ".repeat(key_width - key.len()),
                value,
            })
            .collect();
        self.render("settings", &SettingsData { entries })
    }

    /// Command messages, preceded by the first error of each invalid field.
    pub fn messages(&self, messages: &[CmdMessage], validation: Option<&ValidationReport>) -> String {
        let errors = validation
            .filter(|report| !report.is_valid)
            .map(ValidationReport::summary)
            .unwrap_or_default();
        if messages.is_empty() && errors.is_empty() {
            return String::new();
        }

        let messages = messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect();
        self.render("messages", &MessagesData { errors, messages })
    }
}

fn status_style(status: PostStatus) -> &'static str {
    match status {
        PostStatus::Draft => names::DRAFT,
        PostStatus::Published => names::PUBLISHED,
    }
}

fn theme_name(theme: ThemeSetting) -> &'static str {
    match theme {
        ThemeSetting::Light => "light",
        ThemeSetting::Dark => "dark",
    }
}

fn page_marks(bar: &PaginationBar) -> Vec<PageMark> {
    let mut marks = Vec::new();
    if bar.prev.is_some() {
        marks.push(PageMark {
            text: "‹".to_string(),
            style: names::MUTED,
        });
    }
    for page in &bar.pages {
        marks.push(if page.active {
            PageMark {
                text: format!("[{}]", page.number),
                style: names::HIGHLIGHT,
            }
        } else {
            PageMark {
                text: page.number.to_string(),
                style: names::MUTED,
            }
        });
    }
    if bar.next.is_some() {
        marks.push(PageMark {
            text: "›".to_string(),
            style: names::MUTED,
        });
    }
    marks
}

fn category_lines<'a>(
    categories: impl Iterator<Item = (&'a str, &'a str, &'a str, &'a str, usize)>,
) -> Vec<CategoryLine> {
    let categories: Vec<_> = categories.collect();
    let name_width = categories
        .iter()
        .map(|(_, name, ..)| name.width())
        .max()
        .unwrap_or(0)
        + 2;
    categories
        .into_iter()
        .map(|(id, name, description, color, count)| CategoryLine {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            color: color.to_string(),
            padding: " ".repeat(name_width.saturating_sub(name.width())),
            count: if count == 1 {
                "1 post".to_string()
            } else {
                format!("{} posts", count)
            },
        })
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::styles::LIGHT_THEME;
    use blogcms::query::{paginate, PageRequest};
    use blogcms::test_utils::{base_time, category, post_at};
    use blogcms::view::{category_cards, pagination_bar, post_cards, post_detail, post_rows};

    fn plain() -> Renderer {
        Renderer::new(&LIGHT_THEME, false)
    }

    #[test]
    fn test_empty_list() {
        let page = paginate(Vec::<blogcms::model::Post>::new(), PageRequest::new(1, 6));
        let output = plain().post_list(&[], &pagination_bar(&page.pagination));
        assert_eq!(output.trim(), "No posts found.");
    }

    #[test]
    fn test_list_shows_card_fields_without_style_markers() {
        let mut post = post_at("p1", "Hello Rust", 0);
        post.tags = vec!["rust".into(), "intro".into()];
        post.category_id = Some("c1".into());
        let cats = vec![category("c1", "Tech")];
        let cards = post_cards(&[post], &cats, base_time());
        let page = paginate(vec![()], PageRequest::new(1, 6));

        let output = plain().post_list(&cards, &pagination_bar(&page.pagination));
        assert!(output.contains("Hello Rust"));
        assert!(output.contains("Tech"));
        assert!(output.contains("draft"));
        assert!(output.contains("#rust #intro"));
        assert!(output.contains("p1"));
        assert!(output.contains("Just now"));
        assert!(!output.contains("(!?)"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_list_draws_pagination_bar_when_needed() {
        let posts: Vec<_> = (0..7).map(|i| post_at(&format!("p{}", i), "T", i)).collect();
        let page = paginate(posts, PageRequest::new(2, 3));
        let cards = post_cards(&page.items, &[], base_time());

        let output = plain().post_list(&cards, &pagination_bar(&page.pagination));
        assert!(output.contains("‹ 1 [2] 3 ›"));
        assert!(output.contains("4-6 of 7"));
    }

    #[test]
    fn test_single_page_has_no_bar() {
        let posts = vec![post_at("p1", "Only", 0)];
        let page = paginate(posts, PageRequest::new(1, 6));
        let cards = post_cards(&page.items, &[], base_time());

        let output = plain().post_list(&cards, &pagination_bar(&page.pagination));
        assert!(!output.contains("of 1"));
        assert!(!output.contains("[1]"));
    }

    #[test]
    fn test_long_titles_are_truncated() {
        let title = "x".repeat(200);
        let cards = post_cards(&[post_at("p1", &title, 0)], &[], base_time());
        let page = paginate(vec![()], PageRequest::new(1, 6));

        let output = plain().post_list(&cards, &pagination_bar(&page.pagination));
        let first = output.lines().next().unwrap();
        assert!(first.contains('…'));
        assert!(first.width() <= LINE_WIDTH);
    }

    #[test]
    fn test_post_detail() {
        let mut post = post_at("p1", "Hello", 0);
        post.content = "<p>First</p><p>Second</p>".into();
        let output = plain().post_detail(&post_detail(&post, &[]));
        assert!(output.starts_with("Hello"));
        assert!(output.contains("Uncategorized"));
        assert!(output.contains("/hello"));
        assert!(output.contains("First\nSecond"));
    }

    #[test]
    fn test_manage_rows_align() {
        let posts = vec![post_at("a", "Short", 0), post_at("bbbb", "Longer title", 1)];
        let output = plain().manage(&post_rows(&posts, &[], base_time()));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        let status_col = |line: &str| line.find("draft").unwrap();
        assert_eq!(status_col(lines[0]), status_col(lines[1]));
    }

    #[test]
    fn test_categories_with_counts() {
        let cats = vec![category("c1", "Tech"), category("c2", "Lifestyle")];
        let mut post = post_at("p1", "A", 0);
        post.category_id = Some("c1".into());
        let output = plain().categories(&category_cards(&cats, &[post]));
        assert!(output.contains("Tech"));
        assert!(output.contains("1 post"));
        assert!(output.contains("0 posts"));
    }

    #[test]
    fn test_messages_and_validation_errors() {
        let report = ValidationReport {
            is_valid: false,
            errors: [("title".to_string(), vec!["Title is required".to_string()])]
                .into_iter()
                .collect(),
        };
        let output = plain().messages(
            &[CmdMessage::error("Please fix the errors and try again")],
            Some(&report),
        );
        assert!(output.contains("  - Title is required"));
        assert!(output.contains("Please fix the errors and try again"));
        assert!(plain().messages(&[], None).is_empty());
    }

    #[test]
    fn test_colored_messages_use_ansi() {
        let output = Renderer::new(&LIGHT_THEME, true).messages(&[CmdMessage::success("Saved")], None);
        assert!(output.contains("\u{1b}["));
        assert!(output.contains("Saved"));
    }

    #[test]
    fn test_settings_lists_every_key() {
        let output = plain().settings(&Settings::default());
        for key in ["postsPerPage", "defaultStatus", "autoSave", "theme"] {
            assert!(output.contains(key), "missing {}", key);
        }
        assert!(output.contains("light"));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
    }
}
