//! Required-field validation.
//!
//! Violations are collected in one pass and reported together. Object
//! fields are always descended into, and a nested field's requiredness does
//! not depend on its parent's.

use crate::common::join_path;
use crate::schema::{FieldKind, Schema};
use crate::types::SheetValue;

/// A required leaf without a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    /// Dot path of the field
    pub path: String,
    /// Label shown to the user
    pub display_name: String,
}

/// `true` for the values that count as "not filled in": null and `""`.
/// Absent values are handled by the caller.
pub fn is_blank(value: &SheetValue) -> bool {
    match value {
        SheetValue::Null => true,
        SheetValue::String(text) => text.is_empty(),
        _ => false,
    }
}

/// Display names of every required leaf that is absent, null or `""`, in
/// declaration order, depth-first.
pub fn find_missing_required(values: &SheetValue, schema: &Schema) -> Vec<String> {
    missing_required_fields(values, schema)
        .into_iter()
        .map(|missing| missing.display_name)
        .collect()
}

/// Same walk as [`find_missing_required`], keeping each field's path.
pub fn missing_required_fields(values: &SheetValue, schema: &Schema) -> Vec<MissingField> {
    let mut missing = Vec::new();
    collect_missing(values, schema, "", &mut missing);
    missing
}

fn collect_missing(
    values: &SheetValue,
    schema: &Schema,
    parent_path: &str,
    missing: &mut Vec<MissingField>,
) {
    let entries = values.as_object();
    for (key, field) in schema {
        let value = entries.and_then(|entries| entries.get(key));
        let path = join_path(parent_path, key);
        match &field.kind {
            FieldKind::Object { fields } => {
                collect_missing(value.unwrap_or(&SheetValue::Null), fields, &path, missing)
            }
            _ if field.required && value.map_or(true, is_blank) => missing.push(MissingField {
                display_name: field.display_name(key),
                path,
            }),
            _ => {}
        }
    }
}
