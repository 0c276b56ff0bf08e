#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use serde_json::{json, Value};
use superstore_core::{DefaultingStore, KeyValueStore, MemoryStore};

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("JSON numbers are finite", |f| f.is_finite())
            .prop_map(Value::from),
        "[a-z ]{0,12}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn absent_key_returns_and_persists_default(key in "[a-z]{1,8}", default in arb_value()) {
        let mut store = DefaultingStore::wrap(MemoryStore::new());

        let returned = store.get(&key, default.clone()).unwrap();

        prop_assert_eq!(&returned, &default);
        prop_assert_eq!(store.inner().get(&key).unwrap(), Some(default));
    }

    #[test]
    fn present_key_is_never_overwritten(
        key in "[a-z]{1,8}",
        existing in arb_value(),
        default in arb_value(),
    ) {
        let mut store = DefaultingStore::wrap(MemoryStore::with_entries([(key.clone(), existing.clone())]));

        let returned = store.get(&key, default).unwrap();

        prop_assert_eq!(&returned, &existing);
        prop_assert_eq!(store.inner().get(&key).unwrap(), Some(existing));
    }

    #[test]
    fn return_matches_immediate_base_read(key in "[a-z]{1,4}", default in arb_value(), prefill in any::<bool>()) {
        let mut base = MemoryStore::new();
        if prefill {
            base.set(&key, json!("stored")).unwrap();
        }
        let mut store = DefaultingStore::wrap(base);

        let returned = store.get(&key, default).unwrap();

        prop_assert_eq!(Some(returned), store.inner().get(&key).unwrap());
    }
}

#[test]
fn theme_scenario_with_deletion() {
    let mut store = DefaultingStore::wrap(MemoryStore::new());

    assert_eq!(store.get("theme", json!("dark")).unwrap(), json!("dark"));
    assert_eq!(store.entries().get("theme"), Some(&json!("dark")));

    assert_eq!(store.get("theme", json!("light")).unwrap(), json!("dark"));

    store.remove("theme");
    assert_eq!(store.get("theme", json!("light")).unwrap(), json!("light"));
    assert_eq!(store.entries().get("theme"), Some(&json!("light")));
}
