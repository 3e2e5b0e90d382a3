//! Text helpers shared by the repository, the query pipeline and the views:
//! slugs, tag lists, markup stripping, truncation and relative times.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Palette used when a category is created without a color.
pub const CATEGORY_PALETTE: [&str; 12] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#06b6d4", "#84cc16", "#f97316",
    "#ec4899", "#6366f1", "#14b8a6", "#eab308",
];

pub const DEFAULT_TRUNCATE: usize = 150;
const ELLIPSIS: &str = "...";

/// Turns a title into a URL slug.
///
/// Lowercases and trims, drops everything except ASCII word characters,
/// whitespace and hyphens, then collapses each run of whitespace, underscores
/// and hyphens into one `-` and trims hyphens from both ends. The output only
/// contains `[a-z0-9-]`.
///
/// ```
/// use blogcms::text::slugify;
///
/// assert_eq!(slugify("Hello, World! 2024"), "hello-world-2024");
/// assert_eq!(slugify("  --Rust_and   C++--  "), "rust-and-c");
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let kept = lowered
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace());

    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;
    for ch in kept {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            pending_separator = true;
            continue;
        }
        if pending_separator && !slug.is_empty() {
            slug.push('-');
        }
        pending_separator = false;
        slug.push(ch);
    }
    slug
}

/// Splits a comma separated tag string. Trims, drops empties and lowercases;
/// order and duplicates are kept.
pub fn parse_tags(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn format_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Removes markup tags and decodes the handful of entities post bodies use.
pub fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    decode_entities(&out)
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Cuts `text` to `max_chars` characters, trims the cut and appends `...`.
/// Text that already fits is returned unchanged.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}{}", cut.trim(), ELLIPSIS)
}

/// True when every whitespace separated term of `query` occurs in `text`,
/// ignoring case. An empty query matches everything.
pub fn search_in_text(text: &str, query: &str) -> bool {
    let haystack = text.to_lowercase();
    query
        .to_lowercase()
        .split_whitespace()
        .all(|term| haystack.contains(term))
}

pub fn random_color() -> &'static str {
    let pick = (Uuid::new_v4().as_u128() % CATEGORY_PALETTE.len() as u128) as usize;
    CATEGORY_PALETTE[pick]
}

/// `#rrggbb`, case-insensitive.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// "Just now" under a minute, otherwise "N units ago".
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    if duration.num_seconds() < 60 {
        return "Just now".to_string();
    }
    let formatter = timeago::Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}
