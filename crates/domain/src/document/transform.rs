//! Conversion between the wrapped representation the backend persists and
//! flat dot-path maps.
//!
//! In the wrapped form every addressable node is `{"value": payload}`, so
//! field maps and wrappers alternate, starting with the root field map. The
//! wrapper's `value` key adds nothing to the path; a `value` key inside a
//! field map, the root included, is an ordinary field. Arrays
//! are opaque payloads: they are recorded and re-wrapped as-is, never
//! descended into.

use crate::common::{join_path, PATH_SEPARATOR};
use crate::types::{FlatMap, SheetValue, ValueMap};

/// Key wrapping every persisted node.
pub const VALUE_KEY: &str = "value";

/// Wrapped document to flat path map.
pub fn flatten(doc: &SheetValue) -> FlatMap {
    let mut flat = FlatMap::new();
    flatten_into(doc, "", &mut flat);
    flat
}

/// Flat path map to wrapped document.
///
/// Non-final segments become `{"value": {}}` wrappers, the final segment
/// `{"value": payload}`. When a path has to pass through a wrapper that
/// already holds a scalar payload, the later path wins and the payload is
/// replaced by an object.
pub fn unflatten(flat: &FlatMap) -> SheetValue {
    let mut root = ValueMap::new();
    for (path, payload) in flat {
        let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        insert_wrapped(&mut root, &segments, payload.clone());
    }
    SheetValue::object(root)
}

/// `{"value": payload}`
pub fn wrap(payload: SheetValue) -> SheetValue {
    let mut wrapper = ValueMap::with_capacity(1);
    wrapper.insert(VALUE_KEY.to_string(), payload);
    SheetValue::object(wrapper)
}

fn flatten_into(names: &SheetValue, prefix: &str, flat: &mut FlatMap) {
    let Some(entries) = names.as_object() else {
        return;
    };
    for (key, node) in entries {
        flatten_node(node, &join_path(prefix, key), flat);
    }
}

/// `node` sits at `path` and is normally a `{"value": payload}` wrapper. An
/// object payload holds field names again, so a `value` key inside it is a
/// field (the `value` leaf of a status) rather than another wrapper.
fn flatten_node(node: &SheetValue, path: &str, flat: &mut FlatMap) {
    let payload = node
        .as_object()
        .map_or(Some(node), |wrapper| wrapper.get(VALUE_KEY));
    match payload {
        Some(inner @ SheetValue::Object(_)) => flatten_into(inner, path, flat),
        Some(leaf) => {
            flat.insert(path.to_string(), leaf.clone());
        }
        // Unwrapped nested fields
        None => flatten_into(node, path, flat),
    }
}

fn insert_wrapped(map: &mut ValueMap, segments: &[&str], payload: SheetValue) {
    match segments {
        [] => {}
        [last] => {
            map.insert((*last).to_string(), wrap(payload));
        }
        [head, rest @ ..] => {
            let wrapper = map
                .entry((*head).to_string())
                .or_insert_with(|| wrap(SheetValue::empty_object()));
            if !wrapper.is_object() {
                *wrapper = wrap(SheetValue::empty_object());
            }
            let Some(wrapper) = wrapper.as_object_mut() else {
                return;
            };
            let inner = wrapper
                .entry(VALUE_KEY.to_string())
                .or_insert_with(SheetValue::empty_object);
            if !inner.is_object() {
                *inner = SheetValue::empty_object();
            }
            if let Some(inner) = inner.as_object_mut() {
                insert_wrapped(inner, rest, payload);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::path::collapse;
    use proptest::prelude::*;
    use serde_json::json;

    fn flat(entries: serde_json::Value) -> FlatMap {
        SheetValue::from(entries)
            .as_object()
            .cloned()
            .unwrap_or_default()
    }

    #[test]
    fn test_flatten_wrapped_document() {
        let wrapped = SheetValue::from(json!({
            "forca": {"value": 10},
            "atributos": {"value": {"destreza": {"value": 12}}}
        }));
        assert_eq!(
            flatten(&wrapped),
            flat(json!({"forca": 10, "atributos.destreza": 12}))
        );
    }

    #[test]
    fn test_unflatten_reproduces_wrapped_document() {
        let wrapped = unflatten(&flat(json!({"forca": 10, "atributos.destreza": 12})));
        assert_eq!(
            wrapped.to_json(),
            json!({
                "forca": {"value": 10},
                "atributos": {"value": {"destreza": {"value": 12}}}
            })
        );
    }

    #[test]
    fn test_flatten_records_arrays_as_payloads() {
        let wrapped = SheetValue::from(json!({
            "inventario": {"value": [{"nome": "Espada"}]},
            "pericias": {"value": {"lista": {"value": ["a", "b"]}}}
        }));
        let result = flatten(&wrapped);
        assert_eq!(result["inventario"].to_json(), json!([{"nome": "Espada"}]));
        assert_eq!(result["pericias.lista"].to_json(), json!(["a", "b"]));
        assert_eq!(unflatten(&result), wrapped);
    }

    #[test]
    fn test_top_level_value_field_is_not_a_wrapper() {
        let flat = flat(json!({"value": 5, "a": 1}));
        let wrapped = unflatten(&flat);
        assert_eq!(
            wrapped.to_json(),
            json!({"value": {"value": 5}, "a": {"value": 1}})
        );
        assert_eq!(flatten(&wrapped), flat);
    }

    #[test]
    fn test_nested_value_fields_round_trip() {
        let flat = flat(json!({"value.value": 1, "value.max": 2}));
        assert_eq!(flatten(&unflatten(&flat)), flat);
    }

    #[test]
    fn test_flatten_reads_unwrapped_nested_fields() {
        let wrapped = SheetValue::from(json!({"a": {"b": {"value": 1}}}));
        assert_eq!(flatten(&wrapped), flat(json!({"a.b": 1})));
    }

    #[test]
    fn test_status_value_leaf_survives_round_trip() {
        let flat = flat(json!({"vida.value": 7, "vida.max": 10, "sorte.value": 1}));
        let wrapped = unflatten(&flat);
        assert_eq!(
            wrapped.to_json(),
            json!({
                "vida": {"value": {"value": {"value": 7}, "max": {"value": 10}}},
                "sorte": {"value": {"value": {"value": 1}}}
            })
        );
        assert_eq!(flatten(&wrapped), flat);
    }

    #[test]
    fn test_unflatten_later_path_wins_over_scalar() {
        let wrapped = unflatten(&flat(json!({"a": 1, "a.b": 2})));
        assert_eq!(wrapped.to_json(), json!({"a": {"value": {"b": {"value": 2}}}}));
    }

    #[test]
    fn test_unflatten_shares_intermediate_wrappers() {
        let wrapped = unflatten(&flat(json!({"a.b": 1, "a.c": 2})));
        assert_eq!(
            wrapped.to_json(),
            json!({"a": {"value": {"b": {"value": 1}, "c": {"value": 2}}}})
        );
    }

    fn field_key() -> impl Strategy<Value = String> {
        prop_oneof![Just(VALUE_KEY.to_string()), "[a-z]{1,3}"]
    }

    fn plain_tree() -> impl Strategy<Value = SheetValue> {
        let leaf = prop_oneof![
            any::<i64>().prop_map(SheetValue::Integer),
            any::<bool>().prop_map(SheetValue::Boolean),
            "[a-z ]{0,6}".prop_map(SheetValue::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop::collection::btree_map(field_key(), inner, 1..4)
                .prop_map(|entries| SheetValue::object(entries.into_iter().collect()))
        })
    }

    fn flat_map() -> impl Strategy<Value = FlatMap> {
        prop::collection::btree_map(field_key(), plain_tree(), 1..5)
            .prop_map(|entries| collapse(&SheetValue::object(entries.into_iter().collect())))
    }

    proptest! {
        #[test]
        fn prop_flatten_inverts_unflatten(flat in flat_map()) {
            prop_assert_eq!(flatten(&unflatten(&flat)), flat);
        }

        #[test]
        fn prop_unflatten_inverts_flatten(flat in flat_map()) {
            let wrapped = unflatten(&flat);
            prop_assert_eq!(unflatten(&flatten(&wrapped)), wrapped);
        }
    }
}
