use campsite_info::api::models::{Campsite, Comment, Rating};
use campsite_info::cache::{CacheKey, CacheStore};
use tempfile::TempDir;

fn make_campsite() -> Campsite {
    Campsite {
        id: 1,
        name: "Chrome River".into(),
        description: "Rafting.".into(),
        image: "images/chrome-river.jpg".into(),
        elevation: Some(877),
        featured: true,
    }
}

#[test]
fn test_set_and_get_campsite() {
    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().to_path_buf(), 600);

    store.set(CacheKey::Campsite(1), &make_campsite()).unwrap();

    let cached: Option<Campsite> = store.get(CacheKey::Campsite(1));
    assert_eq!(cached, Some(make_campsite()));
}

#[test]
fn test_keys_do_not_collide() {
    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().to_path_buf(), 600);

    let comments = vec![Comment {
        id: 0,
        campsite_id: 1,
        rating: Rating::default(),
        author: "Kent".into(),
        text: "Nice".into(),
        date: "2018-10-25T16:30Z".into(),
    }];
    store.set(CacheKey::Comments(1), &comments).unwrap();

    assert_eq!(store.get::<Campsite>(CacheKey::Campsite(1)), None);
    assert_eq!(store.get::<Vec<Comment>>(CacheKey::Comments(2)), None);
    assert_eq!(
        store.get::<Vec<Comment>>(CacheKey::Comments(1)),
        Some(comments)
    );
}

#[test]
fn test_get_missing_key_returns_none() {
    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().to_path_buf(), 600);
    assert_eq!(store.get::<Campsite>(CacheKey::Campsite(42)), None);
}

#[test]
fn test_expired_entry_returns_none() {
    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().to_path_buf(), 0);

    store.set(CacheKey::Campsite(1), &make_campsite()).unwrap();

    // Age must exceed the TTL, which takes a full second at TTL 0
    std::thread::sleep(std::time::Duration::from_millis(1100));

    assert_eq!(store.get::<Campsite>(CacheKey::Campsite(1)), None);
}

#[test]
fn test_corrupt_entry_returns_none() {
    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().to_path_buf(), 600);
    std::fs::write(dir.path().join("campsite_1.json"), "{not json").unwrap();
    assert_eq!(store.get::<Campsite>(CacheKey::Campsite(1)), None);
}

#[test]
fn test_invalidate_removes_one_entry() {
    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().to_path_buf(), 600);

    store.set(CacheKey::Campsite(1), &make_campsite()).unwrap();
    store.set(CacheKey::Comments(1), &Vec::<Comment>::new()).unwrap();

    store.invalidate(CacheKey::Comments(1)).unwrap();
    assert!(store.get::<Vec<Comment>>(CacheKey::Comments(1)).is_none());
    assert!(store.get::<Campsite>(CacheKey::Campsite(1)).is_some());

    // Invalidating a missing entry is fine
    store.invalidate(CacheKey::Comments(1)).unwrap();
}

#[test]
fn test_clear_removes_json_files_only() {
    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().to_path_buf(), 600);

    store.set(CacheKey::Campsite(1), &make_campsite()).unwrap();
    store.set(CacheKey::Campsite(2), &make_campsite()).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "keep").unwrap();

    store.clear().unwrap();

    assert!(store.get::<Campsite>(CacheKey::Campsite(1)).is_none());
    assert!(store.get::<Campsite>(CacheKey::Campsite(2)).is_none());
    assert!(dir.path().join("notes.txt").exists());
}

#[test]
fn test_clear_missing_dir_is_ok() {
    let dir = TempDir::new().unwrap();
    let store = CacheStore::new(dir.path().join("never-created"), 600);
    store.clear().unwrap();
}
