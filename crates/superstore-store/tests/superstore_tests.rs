// Default-filling reads over the file-backed store

use std::fs;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use superstore_core::ExErrorKind;
use superstore_store::{FileStore, StoreOptions, SuperStore};
use tempfile::TempDir;

fn setup_store() -> (SuperStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp store directory");
    let store = SuperStore::open(StoreOptions::new("prefs").cwd(dir.path())).unwrap();
    (store, dir)
}

/// Read the key straight from the file, bypassing both wrappers
fn read_on_disk(store: &SuperStore, key: &str) -> Option<Value> {
    let bytes = fs::read(store.path()).ok()?;
    let doc: Value = serde_json::from_slice(&bytes).ok()?;
    doc.get(key).cloned()
}

#[test]
fn test_theme_scenario() {
    // Given: an empty store
    let (mut store, _dir) = setup_store();

    // When/Then: the first read fills the default
    assert_eq!(store.get("theme", json!("dark")).unwrap(), json!("dark"));
    assert_eq!(read_on_disk(&store, "theme"), Some(json!("dark")));

    // And: the existing value wins over a new default
    assert_eq!(store.get("theme", json!("light")).unwrap(), json!("dark"));

    // When: the key is deleted
    assert!(store.delete("theme").unwrap());

    // Then: the next read fills the new default
    assert_eq!(store.get("theme", json!("light")).unwrap(), json!("light"));
    assert_eq!(read_on_disk(&store, "theme"), Some(json!("light")));
}

#[test]
fn test_deleted_file_self_heals() {
    let (mut store, _dir) = setup_store();
    store.get("theme", json!("dark")).unwrap();
    store.set("theme", json!("solarized")).unwrap();

    fs::remove_file(store.path()).unwrap();

    assert_eq!(store.get("theme", json!("dark")).unwrap(), json!("dark"));
    assert_eq!(read_on_disk(&store, "theme"), Some(json!("dark")));
}

#[test]
fn test_falsy_values_are_present() {
    let (mut store, _dir) = setup_store();
    let present = [json!(0), json!(false), json!(""), Value::Null];

    for (i, value) in present.into_iter().enumerate() {
        let key = format!("k{}", i);
        store.set(&key, value.clone()).unwrap();

        assert_eq!(store.get(&key, json!("default")).unwrap(), value);
        assert_eq!(read_on_disk(&store, &key), Some(value));
    }
}

#[test]
fn test_return_matches_base_read() {
    let (mut store, _dir) = setup_store();

    let returned = store.get("window.width", json!(800)).unwrap();

    assert_eq!(Some(returned), store.inner().get("window.width").unwrap());
}

#[test]
fn test_float_defaults_read_back_unchanged() {
    let (mut store, _dir) = setup_store();

    for n in 1..2000u32 {
        let default = json!(f64::from(n) / 7.0);

        let first = store.get("ratio", default.clone()).unwrap();
        let second = store.get("ratio", json!("unused")).unwrap();

        assert_eq!(first, default, "n = {}", n);
        assert_eq!(second, first, "n = {}", n);
        assert_eq!(store.inner().get("ratio").unwrap(), Some(first), "n = {}", n);

        assert!(store.delete("ratio").unwrap());
    }
}

#[test]
fn test_second_read_does_not_write() {
    let (mut store, _dir) = setup_store();
    let writes = Arc::new(Mutex::new(0usize));
    let counter = writes.clone();
    store.on_did_any_change(move |_, _| *counter.lock().unwrap() += 1);

    assert_eq!(store.get("volume", json!(0.5)).unwrap(), json!(0.5));
    assert_eq!(store.get("volume", json!(0.5)).unwrap(), json!(0.5));

    assert_eq!(*writes.lock().unwrap(), 1);
}

#[test]
fn test_open_forwards_options_unchanged() {
    let dir = TempDir::new().unwrap();
    let options = StoreOptions::new("prefs").cwd(dir.path());

    let store = SuperStore::open(options.clone()).unwrap();

    assert_eq!(store.options(), &options);
    assert_eq!(store.path(), dir.path().join("prefs.json"));
}

#[test]
fn test_open_error_propagates() {
    let err = SuperStore::open(StoreOptions::new("")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_write_failure_during_fill_propagates() {
    // Given: a directory squatting on the temp file the store writes through
    let (mut store, dir) = setup_store();
    fs::create_dir(dir.path().join("prefs.json.tmp")).unwrap();

    // When: a miss tries to persist its default
    let err = store.get("theme", json!("dark")).unwrap_err();

    // Then: the write error reaches the caller and nothing was stored
    assert_eq!(err.kind(), ExErrorKind::Io);
    assert_eq!(store.inner().get("theme").unwrap(), None);
}

#[test]
fn test_typed_get() {
    let (mut store, _dir) = setup_store();

    let width: u32 = store.get_as("window.width", 800).unwrap();
    let maximized: bool = store.get_as("window.maximized", false).unwrap();

    assert_eq!(width, 800);
    assert!(!maximized);
    assert_eq!(
        store.store().unwrap().get("window"),
        Some(&json!({"width": 800, "maximized": false}))
    );
}

#[test]
fn test_wrapping_open_store() {
    let dir = TempDir::new().unwrap();
    let mut base = FileStore::open(StoreOptions::new("prefs").cwd(dir.path())).unwrap();
    base.set("theme", json!("dark")).unwrap();

    let mut store = SuperStore::wrap(base);

    assert_eq!(store.get("theme", json!("light")).unwrap(), json!("dark"));
}

#[test]
fn test_fill_through_scalar_intermediate_replaces_it() {
    // Given: `theme` holds a string
    let (mut store, _dir) = setup_store();
    store.set("theme", json!("dark")).unwrap();

    // When: a nested key under it is read with a default
    let variant = store.get("theme.variant", json!("x")).unwrap();

    // Then: the miss is filled and the string is gone
    assert_eq!(variant, json!("x"));
    assert_eq!(store.inner().get("theme").unwrap(), Some(json!({"variant": "x"})));
}
