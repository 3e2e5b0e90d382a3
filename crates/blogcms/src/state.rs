//! Explicit application state.
//!
//! What used to live on a long-lived controller (current page, filters, which post
//! is open) is a plain value here. Query and view functions take it by reference;
//! [`crate::api::BlogApi`] owns one and updates it in response to [`UiAction`]s.

use crate::model::PostStatus;
use crate::query::{ManageQuery, PageRequest, PostQuery, SortOrder};
use crate::view::UiAction;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Home,
    Manage,
    Categories,
    Post(String),
    Editor(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub screen: Screen,
    pub query: PostQuery,
    pub manage: ManageQuery,
    page: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Home,
            query: PostQuery::default(),
            manage: ManageQuery::default(),
            page: 1,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_request(&self, limit: usize) -> PageRequest {
        PageRequest::new(self.page, limit)
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    // Every listing filter change starts over at page 1.

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.page = 1;
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.query.category = category.filter(|c| !c.is_empty());
        self.page = 1;
    }

    pub fn set_status(&mut self, status: Option<PostStatus>) {
        self.query.status = status;
        self.page = 1;
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        self.query.tag = tag.filter(|t| !t.trim().is_empty());
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.query.sort = sort;
        self.page = 1;
    }

    /// Replaces every listing filter at once.
    pub fn set_query(&mut self, query: PostQuery) {
        self.query = query;
        self.page = 1;
    }

    pub fn set_manage_filters(&mut self, search: impl Into<String>, status: Option<PostStatus>) {
        self.manage = ManageQuery {
            search: search.into(),
            status,
        };
    }

    /// The post currently open for viewing or editing.
    pub fn current_post_id(&self) -> Option<&str> {
        match &self.screen {
            Screen::Post(id) | Screen::Editor(Some(id)) => Some(id),
            _ => None,
        }
    }

    /// Applies the navigation part of an action. Returns `true` when the action is
    /// fully handled by the state change, `false` when it needs the store.
    pub fn apply(&mut self, action: &UiAction) -> bool {
        match action {
            UiAction::GoToPage { page } => {
                self.go_to_page(*page);
                true
            }
            UiAction::ViewPost { id } => {
                self.screen = Screen::Post(id.clone());
                true
            }
            UiAction::EditPost { id } => {
                self.screen = Screen::Editor(Some(id.clone()));
                true
            }
            UiAction::EditCategory { .. } => {
                self.screen = Screen::Categories;
                true
            }
            UiAction::DeletePost { .. } | UiAction::DeleteCategory { .. } => false,
        }
    }
}
