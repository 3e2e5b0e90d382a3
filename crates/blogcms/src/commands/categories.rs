use super::{plural, CmdMessage, CmdResult};
use crate::store::{BlogStore, StorageBackend};
use crate::validation::CategoryForm;

pub fn list<B: StorageBackend>(store: &BlogStore<B>) -> CmdResult {
    CmdResult::default()
        .with_listed_categories(store.categories())
        .with_listed_posts(store.posts())
}

pub fn create<B: StorageBackend>(store: &mut BlogStore<B>, form: CategoryForm) -> CmdResult {
    save(store, None, form)
}

pub fn update<B: StorageBackend>(
    store: &mut BlogStore<B>,
    id: &str,
    form: CategoryForm,
) -> CmdResult {
    if store.category(id).is_none() {
        return not_found(id);
    }
    save(store, Some(id.to_string()), form)
}

fn not_found(id: &str) -> CmdResult {
    CmdResult::default().with_message(CmdMessage::error(format!("Category not found: {}", id)))
}

fn save<B: StorageBackend>(
    store: &mut BlogStore<B>,
    id: Option<String>,
    form: CategoryForm,
) -> CmdResult {
    let mut result = CmdResult::default();
    let report = form.validate();
    if !report.is_valid {
        result.add_message(CmdMessage::error("Please fix the errors and try again"));
        result.validation = Some(report);
        return result;
    }

    let is_update = id.is_some();
    match store.save_category(form.into_input(id)) {
        Some(category) => {
            result.add_message(CmdMessage::success(if is_update {
                "Category updated successfully!"
            } else {
                "Category created successfully!"
            }));
            result.affected_categories.push(category);
        }
        None => result.add_message(CmdMessage::error(
            "Failed to save category. Please try again.",
        )),
    }
    result
}

/// Deletes a category; its posts become uncategorized.
pub fn delete<B: StorageBackend>(store: &mut BlogStore<B>, id: &str) -> CmdResult {
    let Some(category) = store.category(id) else {
        return not_found(id);
    };
    let detached = store.posts().iter().filter(|p| p.in_category(id)).count();

    let mut result = CmdResult::default();
    if !store.delete_category(id) {
        result.add_message(CmdMessage::error(
            "Failed to delete category. Please try again.",
        ));
        return result;
    }
    result.add_message(CmdMessage::success("Category deleted successfully!"));
    if detached > 0 {
        result.add_message(CmdMessage::info(format!(
            "{} now uncategorized",
            plural(detached, "post")
        )));
    }
    result.affected_categories.push(category);
    result
}
