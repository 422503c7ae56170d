use super::*;

use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_root(label: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    env::temp_dir().join(format!("catalog_store_{label}_{suffix}"))
}

fn new_item(name: &str, price: &str) -> NewItem {
    NewItem {
        name: name.to_string(),
        image: "u".to_string(),
        price: price.to_string(),
        description: "d".to_string(),
        available: true,
    }
}

#[tokio::test]
async fn insert_assigns_next_id_after_highest() {
    let store = ItemStore::in_memory(vec![new_item("Ham", "10.00").into_item(ItemId(5))]);

    let created = store.insert(new_item("Cheese", "5.00")).await.expect("insert");

    assert_eq!(created.id, ItemId(6));
    let ids: Vec<_> = store.list().await.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![ItemId(5), ItemId(6)]);
}

#[tokio::test]
async fn replace_keeps_position_and_path_id() {
    let store = ItemStore::in_memory(vec![
        new_item("Ham", "10.00").into_item(ItemId(1)),
        new_item("Egg", "1.00").into_item(ItemId(2)),
    ]);

    let replaced = store
        .replace(ItemId(1), new_item("Smoked ham", "12.00"))
        .await
        .expect("replace");

    assert_eq!(replaced.id, ItemId(1));
    let items = store.list().await;
    assert_eq!(items[0], replaced);
    assert_eq!(items[1].name, "Egg");
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let store = ItemStore::in_memory(Vec::new());

    assert!(matches!(store.get(ItemId(9)).await, Err(StoreError::NotFound(ItemId(9)))));
    assert!(matches!(
        store.replace(ItemId(9), new_item("x", "1")).await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(store.remove(ItemId(9)).await, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn open_without_data_file_starts_empty() {
    let root = temp_root("missing");
    let store = ItemStore::open(root.join("server.json"), true)
        .await
        .expect("open");

    assert!(store.list().await.is_empty());
    assert!(!root.exists(), "nothing is written before the first mutation");
}

#[tokio::test]
async fn persisted_mutations_survive_reopen() {
    let root = temp_root("persist");
    let path = root.join("nested").join("server.json");

    let store = ItemStore::open(&path, true).await.expect("open");
    store.insert(new_item("Ham", "10.00")).await.expect("insert");
    store.insert(new_item("Egg", "1.00")).await.expect("insert");
    store.remove(ItemId(1)).await.expect("remove");

    let raw = fs::read_to_string(&path).expect("data file");
    assert!(raw.contains("\"foods\""));

    let reopened = ItemStore::open(&path, false).await.expect("reopen");
    let items = reopened.list().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, ItemId(2));
    assert_eq!(items[0].name, "Egg");

    fs::remove_dir_all(root).expect("cleanup");
}

#[tokio::test]
async fn malformed_data_file_is_rejected() {
    let root = temp_root("malformed");
    fs::create_dir_all(&root).expect("root");
    let path = root.join("server.json");
    fs::write(&path, "{ not json").expect("write");

    let err = ItemStore::open(&path, false).await.err().expect("must fail");
    assert!(matches!(err, StoreError::Parse { .. }), "unexpected error: {err}");

    fs::remove_dir_all(root).expect("cleanup");
}

#[tokio::test]
async fn open_accepts_records_without_image_or_description() {
    let root = temp_root("sparse");
    fs::create_dir_all(&root).expect("mkdir");
    let path = root.join("server.json");
    fs::write(
        &path,
        r#"{"foods":[{"id":1,"name":"Ham","price":"10.00","available":true}]}"#,
    )
    .expect("seed");

    let store = ItemStore::open(&path, false).await.expect("open");
    let items = store.list().await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Ham");
    assert!(items[0].image.is_empty());
    assert!(items[0].description.is_empty());
    fs::remove_dir_all(root).expect("cleanup");
}
