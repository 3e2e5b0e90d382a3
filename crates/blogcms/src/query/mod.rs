//! # Query Pipeline
//!
//! Listing posts is a pure function of a collection snapshot:
//!
//! ```text
//! posts ──filter──▶ matching ──sort──▶ ordered ──paginate──▶ Page { items, pagination }
//! ```
//!
//! - [`filter`]: search, category, status and tag constraints, ANDed. Empty values
//!   impose nothing and keep input order.
//! - [`sort`]: newest, oldest or title. Always a stable sort.
//! - [`paginate`]: 1-based slicing plus the metadata a pagination bar needs.
//!
//! Nothing here touches the store; callers pass the collection in.

pub mod filter;
pub mod paginate;
pub mod sort;

pub use filter::{filter_posts, ManageQuery};
pub use paginate::{page_window, paginate, Page, PageRequest, Pagination, PAGE_WINDOW};
pub use sort::{sort_posts, SortOrder};

use crate::model::{Post, PostStatus};

/// Filters and sort order of the public post listing. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    /// Case-insensitive substring over title, content, excerpt and tags.
    pub search: String,
    /// Exact category id.
    pub category: Option<String>,
    pub status: Option<PostStatus>,
    /// Exact (lowercase) tag.
    pub tag: Option<String>,
    pub sort: SortOrder,
}

/// Filter, sort and paginate in one go.
pub fn run(posts: Vec<Post>, query: &PostQuery, request: PageRequest) -> Page<Post> {
    let mut matching = filter_posts(posts, query);
    sort_posts(&mut matching, query.sort);
    paginate(matching, request)
}

/// The management table: title/content search, optional status, newest first,
/// no paging.
pub fn run_manage(posts: Vec<Post>, query: &ManageQuery) -> Vec<Post> {
    let mut matching: Vec<Post> = posts.into_iter().filter(|p| query.matches(p)).collect();
    sort_posts(&mut matching, SortOrder::Newest);
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::post_at;

    #[test]
    fn test_run_filters_sorts_and_pages() {
        let posts: Vec<Post> = (0..7)
            .map(|i| {
                let mut p = post_at(&format!("p{}", i), &format!("Post {}", i), i);
                if i % 2 == 0 {
                    p.status = PostStatus::Published;
                }
                p
            })
            .collect();

        let query = PostQuery {
            status: Some(PostStatus::Published),
            ..Default::default()
        };
        let page = run(posts, &query, PageRequest::new(1, 3));

        let ids: Vec<&str> = page.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p6", "p4", "p2"]);
        assert_eq!(page.pagination.total_items, 4);
        assert_eq!(page.pagination.total_pages, 2);
        assert!(page.pagination.has_next);
    }

    #[test]
    fn test_run_manage_searches_title_and_content_only() {
        let mut tagged = post_at("a", "Alpha", 1);
        tagged.tags = vec!["needle".into()];
        let mut titled = post_at("b", "Needle in title", 2);
        titled.status = PostStatus::Published;
        let mut bodied = post_at("c", "Gamma", 3);
        bodied.content = "a NEEDLE here".into();

        let query = ManageQuery {
            search: "needle".into(),
            status: None,
        };
        let ids: Vec<String> = run_manage(vec![tagged, titled, bodied], &query)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["c", "b"]);
    }
}
