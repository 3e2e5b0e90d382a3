//! Template sources for terminal output.
//!
//! Templates live in stand-alone files so they are easy to edit and diff, and are
//! embedded here as string constants. They are minijinja templates rendered with
//! `trim_blocks` and `lstrip_blocks`: a line holding only a block tag produces no
//! output, so keep block tags on their own lines and let expression lines carry
//! the line breaks.
//!
//! Layout math (widths, truncation, padding) is done in Rust; templates only pick
//! styles and arrange lines.

pub const POST_LIST_TEMPLATE: &str = include_str!("templates/post_list.jinja");
pub const PAGINATION_TEMPLATE: &str = include_str!("templates/pagination.jinja");
pub const POST_DETAIL_TEMPLATE: &str = include_str!("templates/post_detail.jinja");
pub const MANAGE_TEMPLATE: &str = include_str!("templates/manage.jinja");
pub const CATEGORIES_TEMPLATE: &str = include_str!("templates/categories.jinja");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.jinja");
pub const STATS_TEMPLATE: &str = include_str!("templates/stats.jinja");
pub const SETTINGS_TEMPLATE: &str = include_str!("templates/settings.jinja");

/// Every template with the name it is registered under.
pub const ALL: &[(&str, &str)] = &[
    ("post_list", POST_LIST_TEMPLATE),
    ("pagination", PAGINATION_TEMPLATE),
    ("post_detail", POST_DETAIL_TEMPLATE),
    ("manage", MANAGE_TEMPLATE),
    ("categories", CATEGORIES_TEMPLATE),
    ("messages", MESSAGES_TEMPLATE),
    ("stats", STATS_TEMPLATE),
    ("settings", SETTINGS_TEMPLATE),
];
