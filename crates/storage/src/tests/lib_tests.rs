use super::*;

#[tokio::test]
async fn get_on_empty_store_returns_none() {
    let store = SqliteStore::new("sqlite::memory:").await.expect("db");
    let value = store.get("privacy-consent").await.expect("get");
    assert_eq!(value, None);
}

#[tokio::test]
async fn set_then_get_round_trips() {
    let store = SqliteStore::new("sqlite::memory:").await.expect("db");
    store.set("k", "v1").await.expect("set");
    assert_eq!(store.get("k").await.expect("get").as_deref(), Some("v1"));
}

#[tokio::test]
async fn later_write_wins() {
    let store = SqliteStore::new("sqlite::memory:").await.expect("db");
    store.set("k", "v1").await.expect("set");
    store.set("k", "v2").await.expect("set");
    assert_eq!(store.get("k").await.expect("get").as_deref(), Some("v2"));
}

#[tokio::test]
async fn keys_are_independent() {
    let store = SqliteStore::new("sqlite::memory:").await.expect("db");
    store.set("a", "1").await.expect("set");
    store.set("b", "2").await.expect("set");
    assert_eq!(store.get("a").await.expect("get").as_deref(), Some("1"));
    assert_eq!(store.get("b").await.expect("get").as_deref(), Some("2"));
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let store = SqliteStore::new("sqlite::memory:").await.expect("db");
    store.health_check().await.expect("health check");
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = std::env::temp_dir().join(format!("camlink_storage_test_{suffix}"));
    let db_path = temp_root.join("nested").join("state.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let store = SqliteStore::new(&database_url).await.expect("db");
    drop(store);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );

    std::fs::remove_dir_all(temp_root).expect("cleanup");
}

#[tokio::test]
async fn values_survive_across_store_handles() {
    let suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = std::env::temp_dir().join(format!("camlink_storage_reopen_{suffix}"));
    let db_path = temp_root.join("state.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    {
        let store = SqliteStore::new(&database_url).await.expect("db");
        store.set("privacy-consent", r#"{"camera":true}"#).await.expect("set");
    }

    let reopened = SqliteStore::new(&database_url).await.expect("db");
    assert_eq!(
        reopened.get("privacy-consent").await.expect("get").as_deref(),
        Some(r#"{"camera":true}"#)
    );

    std::fs::remove_dir_all(temp_root).expect("cleanup");
}

#[tokio::test]
async fn memory_store_matches_contract() {
    let store = MemoryStore::new();
    assert_eq!(store.get("k").await.expect("get"), None);
    store.set("k", "v1").await.expect("set");
    store.set("k", "v2").await.expect("set");
    assert_eq!(store.get("k").await.expect("get").as_deref(), Some("v2"));
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/state.db", "sqlite://./data/camlink.db"),
        "sqlite://./data/state.db"
    );
}

#[test]
fn empty_database_url_falls_back() {
    assert_eq!(
        normalize_database_url("  ", "sqlite://./data/camlink.db"),
        "sqlite://./data/camlink.db"
    );
}

#[test]
fn memory_url_passes_through_untouched() {
    assert_eq!(
        normalize_database_url("sqlite::memory:", "sqlite://./data/camlink.db"),
        "sqlite::memory:"
    );
}
