use super::{plural, CmdMessage, CmdResult};
use crate::model::Post;
use crate::store::{BlogStore, StorageBackend};
use crate::validation::PostForm;

const FIX_ERRORS: &str = "Please fix the errors and try again";

pub fn get<B: StorageBackend>(store: &BlogStore<B>, id: &str) -> CmdResult {
    match store.post(id) {
        Some(post) => CmdResult::default()
            .with_listed_posts(vec![post])
            .with_listed_categories(store.categories()),
        None => not_found(id),
    }
}

/// Validates the form and stores a new post.
pub fn create<B: StorageBackend>(store: &mut BlogStore<B>, form: PostForm) -> CmdResult {
    save(store, None, form)
}

/// Validates the form and replaces the post `id`.
pub fn update<B: StorageBackend>(store: &mut BlogStore<B>, id: &str, form: PostForm) -> CmdResult {
    if store.post(id).is_none() {
        return not_found(id);
    }
    save(store, Some(id.to_string()), form)
}

fn not_found(id: &str) -> CmdResult {
    CmdResult::default().with_message(CmdMessage::error(format!("Post not found: {}", id)))
}

fn save<B: StorageBackend>(
    store: &mut BlogStore<B>,
    id: Option<String>,
    form: PostForm,
) -> CmdResult {
    let mut result = CmdResult::default();
    let report = form.validate();
    if !report.is_valid {
        result.add_message(CmdMessage::error(FIX_ERRORS));
        result.validation = Some(report);
        return result;
    }

    let is_update = id.is_some();
    match store.save_post(form.into_input(id)) {
        Some(post) => {
            result.add_message(CmdMessage::success(if is_update {
                "Post updated successfully!"
            } else {
                "Post created successfully!"
            }));
            result.affected_posts.push(post);
        }
        None => result.add_message(CmdMessage::error("Failed to save post. Please try again.")),
    }
    result.validation = Some(report);
    result
}

/// Deletes every listed post that exists. Unknown ids are reported, not fatal.
pub fn delete<B: StorageBackend>(store: &mut BlogStore<B>, ids: &[String]) -> CmdResult {
    let mut result = CmdResult::default();
    let posts = store.posts();

    let mut found: Vec<Post> = Vec::new();
    for id in ids {
        if found.iter().any(|p| &p.id == id) {
            continue;
        }
        match posts.iter().find(|p| &p.id == id) {
            Some(post) => found.push(post.clone()),
            None => result.add_message(CmdMessage::warning(format!("Post not found: {}", id))),
        }
    }
    if found.is_empty() {
        return result;
    }

    let doomed: Vec<String> = found.iter().map(|p| p.id.clone()).collect();
    if !store.delete_posts(&doomed) {
        result.add_message(CmdMessage::error("Failed to delete post. Please try again."));
        return result;
    }

    result.add_message(CmdMessage::success(if found.len() == 1 {
        "Post deleted successfully!".to_string()
    } else {
        format!("Deleted {}", plural(found.len(), "post"))
    }));
    result.affected_posts = found;
    result
}
