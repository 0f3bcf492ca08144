//! Property tests for the fill-gap merge algebra.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use minuta_engine::merge::{attribute, fill_gap, Provenance};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!("")),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-zA-Z ]{1,8}".prop_map(Value::String),
    ]
}

fn flat_object() -> impl Strategy<Value = Value> {
    proptest::collection::btree_map("[a-e]", scalar(), 0..6)
        .prop_map(|entries| Value::Object(entries.into_iter().collect()))
}

fn nested_object() -> impl Strategy<Value = Value> {
    proptest::collection::btree_map(
        "[a-e]",
        prop_oneof![3 => scalar(), 1 => flat_object()],
        0..6,
    )
    .prop_map(|entries| Value::Object(entries.into_iter().collect()))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

proptest! {
    // Merging a document into itself changes nothing and fills nothing:
    // every incoming value either already occupies the slot or is itself
    // a gap.
    #[test]
    fn merge_is_idempotent(obj in nested_object()) {
        let mut merged = obj.clone();
        let filled = fill_gap(&mut merged, &obj);
        prop_assert!(filled.is_empty(), "self-merge filled {filled:?}");
        prop_assert_eq!(merged, obj);
    }

    // Populated scalar slots survive any merge untouched.
    #[test]
    fn populated_fields_are_never_overwritten(a in flat_object(), b in flat_object()) {
        let before = a.clone();
        let mut merged = a;
        fill_gap(&mut merged, &b);

        let before_map = before.as_object().unwrap();
        let merged_map = merged.as_object().unwrap();
        for (key, value) in before_map {
            if !is_blank(value) {
                prop_assert_eq!(&merged_map[key], value, "key {} was overwritten", key);
            }
        }
    }

    // A blank or missing slot adopts the incoming value, and the filled
    // path list reports it.
    #[test]
    fn gaps_adopt_incoming_values(a in flat_object(), b in flat_object()) {
        let mut merged = a.clone();
        let filled = fill_gap(&mut merged, &b);

        let a_map = a.as_object().unwrap();
        let merged_map = merged.as_object().unwrap();
        for (key, incoming) in b.as_object().unwrap() {
            if is_blank(incoming) {
                continue;
            }
            let had_gap = a_map.get(key).map_or(true, is_blank);
            if had_gap {
                prop_assert_eq!(&merged_map[key], incoming);
                prop_assert!(filled.contains(key), "path {} not reported", key);
            }
        }
    }

    // The filled paths are exactly the slots that changed.
    #[test]
    fn filled_paths_match_actual_changes(a in flat_object(), b in flat_object()) {
        let mut merged = a.clone();
        let filled = fill_gap(&mut merged, &b);

        let a_map = a.as_object().unwrap();
        for (key, value) in merged.as_object().unwrap() {
            let changed = a_map.get(key) != Some(value);
            prop_assert_eq!(filled.contains(key), changed, "path {} misreported", key);
        }
    }

    // Attribution never drops or reorders what a path already recorded.
    #[test]
    fn provenance_is_monotonic(
        existing in proptest::collection::btree_map(
            "[a-e]",
            proptest::collection::btree_set("[a-c]\\.pdf", 0..3)
                .prop_map(|sources| sources.into_iter().collect::<Vec<_>>()),
            0..4,
        ),
        filled in proptest::collection::vec("[a-g]", 0..4),
        source in "[a-d]\\.pdf",
    ) {
        let mut provenance: Provenance = existing.clone();
        attribute(&mut provenance, &filled, &[source]);

        for (path, sources) in &existing {
            let after = &provenance[path];
            prop_assert!(after.len() >= sources.len());
            prop_assert_eq!(&after[..sources.len()], &sources[..]);
        }
        for sources in provenance.values() {
            let mut seen = sources.clone();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), sources.len(), "duplicate source recorded");
        }
    }
}

#[test]
fn nested_gaps_fill_per_leaf() {
    let mut existing = json!({
        "endereco": { "cidade": "São Paulo", "uf": null }
    });
    let incoming = json!({
        "endereco": { "cidade": "Campinas", "uf": "SP", "cep": "01000-000" }
    });
    let mut filled = fill_gap(&mut existing, &incoming);
    filled.sort();
    assert_eq!(filled, vec!["endereco.cep", "endereco.uf"]);
    assert_eq!(existing["endereco"]["cidade"], "São Paulo");
    assert_eq!(existing["endereco"]["uf"], "SP");
}

#[test]
fn provenance_key_is_opaque_to_the_merge() {
    let mut existing = Value::Object(Map::new());
    let incoming = json!({
        "nome": "JOAO",
        "provenance": { "nome": ["rg.pdf"] }
    });
    let filled = fill_gap(&mut existing, &incoming);
    assert_eq!(filled, vec!["nome"]);
    assert!(existing.get("provenance").is_none());
}
