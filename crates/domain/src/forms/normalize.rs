//! Building and repairing values documents against a template.
//!
//! Every non-object field defaults to `""` whatever its kind. Keys the
//! template does not declare are dropped by [`normalize`]; use
//! [`pruned_paths`] first to find out what will be lost.

use crate::common::join_path;
use crate::schema::{FieldKind, Schema};
use crate::types::{SheetValue, ValueMap};

/// Empty skeleton for a template: nested objects for `object` fields, `""`
/// for everything else.
pub fn initialize(schema: &Schema) -> SheetValue {
    let skeleton: ValueMap = schema
        .iter()
        .map(|(key, field)| {
            let value = match &field.kind {
                FieldKind::Object { fields } => initialize(fields),
                _ => SheetValue::empty_string(),
            };
            (key.clone(), value)
        })
        .collect();
    SheetValue::object(skeleton)
}

/// Reconcile an existing document with a template. Declared fields keep
/// their present, non-null values, missing ones get defaults, undeclared
/// keys are dropped. Idempotent.
pub fn normalize(values: &SheetValue, schema: &Schema) -> SheetValue {
    let existing = values.as_object();
    let normalized: ValueMap = schema
        .iter()
        .map(|(key, field)| {
            let current = existing.and_then(|entries| entries.get(key));
            let value = match (&field.kind, current) {
                (FieldKind::Object { fields }, Some(current)) => normalize(current, fields),
                (FieldKind::Object { fields }, None) => initialize(fields),
                (_, Some(current)) if !current.is_null() => current.clone(),
                _ => SheetValue::empty_string(),
            };
            (key.clone(), value)
        })
        .collect();
    SheetValue::object(normalized)
}

/// Dot paths of the keys [`normalize`] would drop because the template does
/// not declare them.
pub fn pruned_paths(values: &SheetValue, schema: &Schema) -> Vec<String> {
    let mut pruned = Vec::new();
    collect_pruned(values, schema, "", &mut pruned);
    pruned
}

fn collect_pruned(values: &SheetValue, schema: &Schema, prefix: &str, pruned: &mut Vec<String>) {
    let Some(entries) = values.as_object() else {
        return;
    };
    for (key, value) in entries {
        let path = join_path(prefix, key);
        match schema.get(key).map(|field| &field.kind) {
            None => pruned.push(path),
            Some(FieldKind::Object { fields }) => collect_pruned(value, fields, &path, pruned),
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::from_value(json!({
            "nome": {"type": "string", "required": true},
            "nivel": {"type": "number"},
            "atributos": {"type": "object", "fields": {
                "forca": {"type": "number"},
                "mente": {"type": "object", "fields": {"foco": {"type": "boolean"}}}
            }},
            "vida": {"type": "status"},
            "inventario": {"type": "objectlist", "fields": [{"type": "string", "name": "item"}]}
        }))
        .unwrap()
    }

    #[test]
    fn test_initialize_builds_skeleton() {
        assert_eq!(
            initialize(&schema()).to_json(),
            json!({
                "nome": "",
                "nivel": "",
                "atributos": {"forca": "", "mente": {"foco": ""}},
                "vida": "",
                "inventario": ""
            })
        );
    }

    #[test]
    fn test_initialize_empty_schema() {
        assert_eq!(initialize(&Schema::new()).to_json(), json!({}));
    }

    #[test]
    fn test_normalize_keeps_existing_and_fills_missing() {
        let values = SheetValue::from(json!({
            "nome": "Ayla",
            "atributos": {"forca": 14},
            "vida": {"value": 8, "max": 10},
            "inventario": [{"item": "Corda"}]
        }));
        assert_eq!(
            normalize(&values, &schema()).to_json(),
            json!({
                "nome": "Ayla",
                "nivel": "",
                "atributos": {"forca": 14, "mente": {"foco": ""}},
                "vida": {"value": 8, "max": 10},
                "inventario": [{"item": "Corda"}]
            })
        );
    }

    #[test]
    fn test_normalize_drops_undeclared_keys() {
        let values = SheetValue::from(json!({
            "nome": "Ayla",
            "antigo": 3,
            "atributos": {"sorte": 2}
        }));
        let normalized = normalize(&values, &schema());
        assert!(normalized.as_object().unwrap().get("antigo").is_none());
        assert_eq!(
            normalized.as_object().unwrap()["atributos"].to_json(),
            json!({"forca": "", "mente": {"foco": ""}})
        );
        assert_eq!(pruned_paths(&values, &schema()), vec!["antigo", "atributos.sorte"]);
    }

    #[test]
    fn test_normalize_replaces_null_and_scalar_objects() {
        let values = SheetValue::from(json!({"nome": null, "atributos": "oops"}));
        assert_eq!(
            normalize(&values, &schema()).to_json(),
            json!({
                "nome": "",
                "nivel": "",
                "atributos": {"forca": "", "mente": {"foco": ""}},
                "vida": "",
                "inventario": ""
            })
        );
    }

    #[test]
    fn test_normalize_non_object_root() {
        assert_eq!(
            normalize(&SheetValue::from(5), &schema()),
            initialize(&schema())
        );
    }

    fn loose_values() -> impl Strategy<Value = SheetValue> {
        let leaf = prop_oneof![
            Just(SheetValue::Null),
            any::<i64>().prop_map(SheetValue::Integer),
            "[a-z]{0,4}".prop_map(SheetValue::String),
        ];
        leaf.prop_recursive(3, 16, 4, |inner| {
            prop::collection::btree_map(
                prop_oneof![
                    Just("nome".to_string()),
                    Just("atributos".to_string()),
                    Just("forca".to_string()),
                    Just("mente".to_string()),
                    Just("foco".to_string()),
                    "[a-z]{1,3}"
                ],
                inner,
                0..5,
            )
            .prop_map(|entries| SheetValue::object(entries.into_iter().collect()))
        })
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(values in loose_values()) {
            let schema = schema();
            let once = normalize(&values, &schema);
            prop_assert_eq!(normalize(&once, &schema), once);
        }
    }
}
