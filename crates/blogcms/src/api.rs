//! # API Facade
//!
//! [`BlogApi`] is the single entry point for UI clients. It owns the repository and
//! the explicit [`AppState`] (filters, page, open post) and dispatches to the
//! command layer.
//!
//! The facade does no business logic of its own, performs no I/O beyond the store,
//! and returns data structures rather than strings.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `BlogApi<FsBackend>`
//! - Testing: `BlogApi<MemBackend>`

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::model::{Settings, SettingsPatch, Stats};
use crate::state::AppState;
use crate::store::{BlogStore, StorageBackend};
use crate::validation::{CategoryForm, PostForm};
use crate::view::UiAction;

pub struct BlogApi<B: StorageBackend> {
    store: BlogStore<B>,
    state: AppState,
}

impl<B: StorageBackend> BlogApi<B> {
    pub fn new(store: BlogStore<B>) -> Self {
        Self {
            store,
            state: AppState::new(),
        }
    }

    pub fn store(&self) -> &BlogStore<B> {
        &self.store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    // --- Listing ---

    /// The current page of the listing, using the state's filters. Without a
    /// `limit` the `postsPerPage` setting decides the page size.
    pub fn list_posts(&self, limit: Option<usize>) -> CmdResult {
        let limit = limit.unwrap_or_else(|| self.store.settings().posts_per_page);
        commands::list::run(&self.store, &self.state.query, self.state.page_request(limit))
    }

    pub fn manage_posts(&self) -> CmdResult {
        commands::manage::run(&self.store, &self.state.manage)
    }

    // --- Posts ---

    pub fn get_post(&self, id: &str) -> CmdResult {
        commands::posts::get(&self.store, id)
    }

    /// An empty editor form with the configured default status.
    pub fn new_post_form(&self) -> PostForm {
        PostForm {
            status: self.store.settings().default_status,
            ..Default::default()
        }
    }

    /// An editor form prefilled from a stored post.
    pub fn edit_post_form(&self, id: &str) -> Option<PostForm> {
        self.store.post(id).as_ref().map(PostForm::from)
    }

    pub fn create_post(&mut self, form: PostForm) -> CmdResult {
        commands::posts::create(&mut self.store, form)
    }

    pub fn update_post(&mut self, id: &str, form: PostForm) -> CmdResult {
        commands::posts::update(&mut self.store, id, form)
    }

    pub fn delete_posts<I: AsRef<str>>(&mut self, ids: &[I]) -> CmdResult {
        let ids: Vec<String> = ids.iter().map(|i| i.as_ref().to_string()).collect();
        commands::posts::delete(&mut self.store, &ids)
    }

    // --- Categories ---

    pub fn list_categories(&self) -> CmdResult {
        commands::categories::list(&self.store)
    }

    pub fn edit_category_form(&self, id: &str) -> Option<CategoryForm> {
        self.store.category(id).as_ref().map(CategoryForm::from)
    }

    pub fn create_category(&mut self, form: CategoryForm) -> CmdResult {
        commands::categories::create(&mut self.store, form)
    }

    pub fn update_category(&mut self, id: &str, form: CategoryForm) -> CmdResult {
        commands::categories::update(&mut self.store, id, form)
    }

    pub fn delete_category(&mut self, id: &str) -> CmdResult {
        commands::categories::delete(&mut self.store, id)
    }

    // --- Data ---

    pub fn settings(&self) -> Settings {
        commands::data::settings(&self.store)
    }

    pub fn update_settings(&mut self, patch: &SettingsPatch) -> CmdResult {
        commands::data::update_settings(&mut self.store, patch)
    }

    pub fn stats(&self) -> Stats {
        commands::data::stats(&self.store)
    }

    pub fn export(&self) -> Result<String> {
        commands::data::export(&self.store)
    }

    pub fn import(&mut self, raw: &str) -> CmdResult {
        commands::data::import(&mut self.store, raw)
    }

    pub fn clear(&mut self) -> CmdResult {
        commands::data::clear(&mut self.store)
    }

    // --- Actions ---

    /// Runs an action offered by a view model. Navigation only updates the state;
    /// deletes go to the store. Confirmation is the caller's job and must happen
    /// before this call.
    pub fn dispatch(&mut self, action: &UiAction) -> CmdResult {
        if self.state.apply(action) {
            return CmdResult::default();
        }
        match action {
            UiAction::DeletePost { id } => self.delete_posts(&[id]),
            UiAction::DeleteCategory { id } => self.delete_category(id),
            _ => CmdResult::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SettingsPatch;
    use crate::state::Screen;
    use crate::test_utils::StoreFixture;

    fn api_with_posts(n: usize) -> BlogApi<crate::store::MemBackend> {
        BlogApi::new(StoreFixture::with_posts(n).store)
    }

    #[test]
    fn test_list_uses_posts_per_page_setting() {
        let mut api = api_with_posts(8);
        assert_eq!(api.list_posts(None).listed_posts.len(), 6);

        api.update_settings(&SettingsPatch {
            posts_per_page: Some(3),
            ..Default::default()
        });
        let result = api.list_posts(None);
        assert_eq!(result.listed_posts.len(), 3);
        assert_eq!(result.pagination.unwrap().total_pages, 3);
    }

    #[test]
    fn test_page_action_moves_listing() {
        let mut api = api_with_posts(7);
        api.dispatch(&UiAction::GoToPage { page: 3 });
        let result = api.list_posts(Some(3));
        assert_eq!(result.listed_posts.len(), 1);
        assert_eq!(result.listed_posts[0].title, "Post 1");
    }

    #[test]
    fn test_search_resets_page() {
        let mut api = api_with_posts(7);
        api.dispatch(&UiAction::GoToPage { page: 2 });
        api.state_mut().set_search("post 7");
        let result = api.list_posts(Some(3));
        assert_eq!(api.state().page(), 1);
        assert_eq!(result.listed_posts.len(), 1);
    }

    #[test]
    fn test_delete_action_hits_store() {
        let mut api = api_with_posts(2);
        let id = api.store().posts()[0].id.clone();
        let result = api.dispatch(&UiAction::DeletePost { id: id.clone() });
        assert_eq!(result.messages[0].content, "Post deleted successfully!");
        assert!(api.store().post(&id).is_none());
    }

    #[test]
    fn test_edit_action_opens_editor() {
        let mut api = api_with_posts(1);
        let id = api.store().posts()[0].id.clone();
        api.dispatch(&UiAction::EditPost { id: id.clone() });
        assert_eq!(api.state().screen, Screen::Editor(Some(id.clone())));
        assert_eq!(api.edit_post_form(&id).unwrap().title, "Post 1");
    }

    #[test]
    fn test_new_post_form_uses_default_status() {
        let mut api = api_with_posts(0);
        api.update_settings(&SettingsPatch::from_pair("defaultStatus", "published").unwrap());
        assert_eq!(
            api.new_post_form().status,
            crate::model::PostStatus::Published
        );
    }
}
