use quire_core::db::migrations::latest_version;
use quire_core::db::{open_db, open_db_in_memory, DbError};
use quire_core::model::{Layer, Page, PageOptions, Stroke};
use quire_core::storage::{PageGateway, SlotStore, SqliteSlotStore, StoredValue, PAGE_SLOT_KEY};
use rusqlite::Connection;
use serde_json::json;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "slots");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quire.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "slots");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn saved_page_loads_back_with_content() {
    let conn = open_db_in_memory().unwrap();
    let mut gateway = PageGateway::new(SqliteSlotStore::new(&conn));

    let mut page = Page::new("sketch", 400, 300, PageOptions::default());
    let mut layer = Layer::new("ink");
    layer.add_item(Box::new(Stroke::with_points(
        "#000",
        3.0,
        vec![1.0, 2.0, 3.0, 4.0],
    )));
    page.add_layer(layer);

    let mtime = gateway.save(&page).unwrap();
    assert!(mtime > 0);
    assert_eq!(gateway.mtime(), mtime);

    let loaded = gateway.load().unwrap();
    assert_eq!(loaded.title(), "sketch");
    assert_eq!(loaded.size(), (400, 300));
    assert_eq!(loaded.layer(0).unwrap().item_count(), 1);
}

#[test]
fn missing_slot_loads_a_fresh_page() {
    let conn = open_db_in_memory().unwrap();
    let mut gateway = PageGateway::new(SqliteSlotStore::new(&conn));

    let page = gateway.load().unwrap();
    assert_eq!(page.options().paper.as_str(), "ruled");
    assert_eq!(page.layer_count(), 0);
    assert_eq!(gateway.mtime(), 0);
    let (width, height) = page.size();
    assert!(width > 0 && height > width);
}

#[test]
fn corrupt_slot_is_discarded_and_replaced_by_a_fresh_page() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSlotStore::new(&conn);
    store
        .write(
            PAGE_SLOT_KEY,
            &StoredValue {
                raw: "{not json".to_string(),
                mtime: 12345,
            },
        )
        .unwrap();

    let mut gateway = PageGateway::new(SqliteSlotStore::new(&conn));
    let page = gateway.load().unwrap();
    assert_eq!(page.layer_count(), 0);
    assert_eq!(gateway.mtime(), 0);

    // The unreadable value is gone, not left to fail every future load.
    assert!(SqliteSlotStore::new(&conn)
        .read(PAGE_SLOT_KEY)
        .unwrap()
        .is_none());
}

#[test]
fn newer_stored_version_wins_on_storage_change() {
    let conn = open_db_in_memory().unwrap();
    let mut gateway = PageGateway::new(SqliteSlotStore::new(&conn));

    let ours = gateway
        .save(&Page::new("ours", 400, 300, PageOptions::default()))
        .unwrap();

    let incoming = page_json("theirs", ours + 1);
    let adopted = gateway.on_storage_change(&incoming).unwrap();
    assert_eq!(adopted.title(), "theirs");
    assert_eq!(gateway.mtime(), ours + 1);
}

#[test]
fn older_or_equal_stored_version_is_ignored() {
    let conn = open_db_in_memory().unwrap();
    let mut gateway = PageGateway::new(SqliteSlotStore::new(&conn));

    let ours = gateway
        .save(&Page::new("ours", 400, 300, PageOptions::default()))
        .unwrap();

    assert!(gateway.on_storage_change(&page_json("stale", ours - 1)).is_none());
    // A tie is not strictly newer.
    assert!(gateway.on_storage_change(&page_json("tied", ours)).is_none());
    assert_eq!(gateway.mtime(), ours);
}

#[test]
fn corrupt_storage_change_never_clobbers_the_in_memory_page() {
    let conn = open_db_in_memory().unwrap();
    let mut gateway = PageGateway::new(SqliteSlotStore::new(&conn));

    let ours = gateway
        .save(&Page::new("ours", 400, 300, PageOptions::default()))
        .unwrap();

    assert!(gateway.on_storage_change("][ definitely not json").is_none());
    assert!(gateway
        .on_storage_change(&json!({"width": 1}).to_string())
        .is_none());
    assert_eq!(gateway.mtime(), ours);
}

#[test]
fn gateways_with_different_keys_do_not_interfere() {
    let conn = open_db_in_memory().unwrap();
    let mut first = PageGateway::with_key(SqliteSlotStore::new(&conn), "quire.page.a");
    let mut second = PageGateway::with_key(SqliteSlotStore::new(&conn), "quire.page.b");

    first
        .save(&Page::new("a", 100, 100, PageOptions::default()))
        .unwrap();

    let loaded = second.load().unwrap();
    assert_eq!(loaded.title(), "");
    assert_eq!(second.mtime(), 0);
}

fn page_json(title: &str, mtime: i64) -> String {
    json!({
        "title": title,
        "width": 400,
        "height": 300,
        "options": {"paper": "blank"},
        "mtime": mtime,
    })
    .to_string()
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
