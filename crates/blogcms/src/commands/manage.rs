use super::CmdResult;
use crate::query::{self, ManageQuery};
use crate::store::{BlogStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &BlogStore<B>, query: &ManageQuery) -> CmdResult {
    CmdResult::default()
        .with_listed_posts(query::run_manage(store.posts(), query))
        .with_listed_categories(store.categories())
}
