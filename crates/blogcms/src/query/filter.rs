use super::PostQuery;
use crate::model::{Post, PostStatus};

impl PostQuery {
    pub fn matches(&self, post: &Post) -> bool {
        let search = self.search.trim().to_lowercase();
        if !search.is_empty() && !matches_search(post, &search) {
            return false;
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if !post.in_category(category) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if post.status != status {
                return false;
            }
        }
        if let Some(tag) = self.tag.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let tag = tag.to_lowercase();
            if !post.tags.iter().any(|t| *t == tag) {
                return false;
            }
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.category.as_deref().map_or(true, str::is_empty)
            && self.status.is_none()
            && self.tag.as_deref().map_or(true, |t| t.trim().is_empty())
    }
}

/// Matches against title, content, excerpt and tags joined by single spaces, so a
/// needle may run across field boundaries. `needle` must already be lowercase.
fn matches_search(post: &Post, needle: &str) -> bool {
    let haystack = format!(
        "{} {} {} {}",
        post.title,
        post.content,
        post.excerpt,
        post.tags.join(" ")
    );
    haystack.to_lowercase().contains(needle)
}

/// Keeps matching posts in their input order.
pub fn filter_posts(posts: Vec<Post>, query: &PostQuery) -> Vec<Post> {
    if query.is_empty() {
        return posts;
    }
    posts.into_iter().filter(|p| query.matches(p)).collect()
}

/// Filters of the management table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManageQuery {
    pub search: String,
    pub status: Option<PostStatus>,
}

impl ManageQuery {
    pub fn matches(&self, post: &Post) -> bool {
        let search = self.search.trim().to_lowercase();
        let search_ok = search.is_empty()
            || format!("{} {}", post.title, post.content)
                .to_lowercase()
                .contains(&search);
        search_ok && self.status.map_or(true, |s| post.status == s)
    }
}
