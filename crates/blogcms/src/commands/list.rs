use super::CmdResult;
use crate::query::{self, PageRequest, PostQuery};
use crate::store::{BlogStore, StorageBackend};

/// One page of the public listing.
pub fn run<B: StorageBackend>(
    store: &BlogStore<B>,
    query: &PostQuery,
    request: PageRequest,
) -> CmdResult {
    let page = query::run(store.posts(), query, request);
    CmdResult {
        listed_posts: page.items,
        listed_categories: store.categories(),
        pagination: Some(page.pagination),
        ..Default::default()
    }
}
