//! Status path registry and status costs.
//!
//! The registry is computed once from the template, before anything is
//! rendered, so `statuscusto` fields can offer every status leaf as a
//! deduction target.

use crate::common::join_path;
use crate::document::{as_number, get, number_value, set, VALUE_KEY};
use crate::error::DomainError;
use crate::schema::{FieldKind, Schema};
use crate::types::SheetValue;

/// Dot paths of the `value` leaf of every `status` field, depth-first in
/// declaration order.
pub fn collect_status_paths(schema: &Schema) -> Vec<String> {
    let mut paths = Vec::new();
    collect_into(schema, "", &mut paths);
    paths
}

fn collect_into(schema: &Schema, prefix: &str, paths: &mut Vec<String>) {
    for (key, field) in schema {
        let path = join_path(prefix, key);
        match &field.kind {
            FieldKind::Status => paths.push(join_path(&path, VALUE_KEY)),
            FieldKind::Object { fields } => collect_into(fields, &path, paths),
            _ => {}
        }
    }
}

/// Every status leaf declared by a template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusRegistry {
    paths: Vec<String>,
}

impl StatusRegistry {
    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            paths: collect_status_paths(schema),
        }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|known| known == path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Subtract `amount` from the status leaf at `target`. Blank or non-numeric
/// current values count as 0.
pub fn deduct_status(
    doc: &SheetValue,
    target: &str,
    amount: f64,
    registry: &StatusRegistry,
) -> Result<SheetValue, DomainError> {
    if !registry.contains(target) {
        return Err(DomainError::unknown_status_target(target));
    }
    let current = get(doc, target).map(as_number).unwrap_or_default();
    Ok(set(doc, target, number_value(current - amount)))
}
