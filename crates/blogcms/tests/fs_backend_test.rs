use blogcms::model::{CategoryInput, PostInput, PostStatus};
use blogcms::store::{BlogStore, FsBackend, StorageBackend, StoreKey};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().join("data"));
    (dir, backend)
}

fn open(dir: &TempDir) -> BlogStore<FsBackend> {
    BlogStore::new(FsBackend::new(dir.path().join("data"))).with_seed_defaults(false)
}

fn input(title: &str) -> PostInput {
    PostInput {
        title: title.to_string(),
        content: format!("<p>{}</p>", title),
        ..Default::default()
    }
}

#[test]
fn test_fs_backend_basic_io() {
    let (_dir, backend) = setup();

    assert_eq!(backend.read("blogcms_posts").unwrap(), None);

    backend.write("blogcms_posts", "[]").unwrap();
    assert_eq!(
        backend.read("blogcms_posts").unwrap(),
        Some("[]".to_string())
    );

    backend.remove("blogcms_posts").unwrap();
    assert_eq!(backend.read("blogcms_posts").unwrap(), None);
    // Removing twice is fine.
    backend.remove("blogcms_posts").unwrap();
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (_dir, backend) = setup();

    backend.write("blogcms_settings", "{}").unwrap();
    backend.write("blogcms_settings", "{\"theme\":\"dark\"}").unwrap();

    let path = backend.path_for("blogcms_settings");
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"theme\":\"dark\"}");

    for entry in fs::read_dir(backend.root()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_store_persists_across_instances() {
    let dir = TempDir::new().unwrap();

    let (post_id, category_id) = {
        let mut store = open(&dir);
        let category = store
            .save_category(CategoryInput {
                name: "Tech".into(),
                color: "#3b82f6".into(),
                ..Default::default()
            })
            .unwrap();
        let mut post = input("Persisted");
        post.category_id = Some(category.id.clone());
        post.status = PostStatus::Published;
        (store.save_post(post).unwrap().id, category.id)
    };

    let store = open(&dir);
    let post = store.post(&post_id).unwrap();
    assert_eq!(post.title, "Persisted");
    assert_eq!(post.slug, "persisted");
    assert_eq!(post.category_id.as_deref(), Some(category_id.as_str()));
    assert!(post.is_published());
    assert_eq!(store.categories().len(), 1);
}

#[test]
fn test_category_delete_is_visible_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let category = store
        .save_category(CategoryInput {
            name: "Gone".into(),
            ..Default::default()
        })
        .unwrap();
    let mut post = input("Orphan");
    post.category_id = Some(category.id.clone());
    let post = store.save_post(post).unwrap();

    assert!(store.delete_category(&category.id));

    let reopened = open(&dir);
    assert!(reopened.categories().is_empty());
    assert_eq!(reopened.post(&post.id).unwrap().category_id, None);
}

#[test]
fn test_corrupt_collection_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.save_post(input("Soon unreadable")).unwrap();

    let path = store.backend().path_for(StoreKey::Posts.as_str());
    fs::write(&path, "{ this is not json").unwrap();

    let store = open(&dir);
    assert!(store.posts().is_empty());
}

#[test]
fn test_seeding_writes_once() {
    let dir = TempDir::new().unwrap();
    let mut store = BlogStore::new(FsBackend::new(dir.path().to_path_buf()));

    assert!(store.ensure_defaults());
    let seeded = store.posts().len();
    assert!(seeded > 0);

    let mut again = BlogStore::new(FsBackend::new(dir.path().to_path_buf()));
    again.ensure_defaults();
    assert_eq!(again.posts().len(), seeded);
}

#[test]
fn test_seeding_keeps_a_hand_broken_posts_file() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.save_post(input("My only draft")).unwrap();

    let path = store.backend().path_for(StoreKey::Posts.as_str());
    let broken = fs::read_to_string(&path).unwrap().replacen(']', ",]", 1);
    fs::write(&path, &broken).unwrap();

    let mut seeding = BlogStore::new(FsBackend::new(dir.path().join("data")));
    assert!(seeding.ensure_defaults());

    assert_eq!(fs::read_to_string(&path).unwrap(), broken);
    assert_eq!(seeding.categories().len(), 3);
}
