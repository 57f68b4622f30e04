//! Path store: dot-path reads and copy-on-write writes over a values
//! document. Schema-agnostic.
//!
//! `set` and `remove` rebuild only the containers on the root-to-target
//! path; every sibling subtree of the result is the same `Arc` as in the
//! input document, which is never modified.

use std::sync::Arc;

use crate::common::{join_path, PATH_SEPARATOR};
use crate::types::{FlatMap, SheetValue, ValueMap};

/// Read the node at `path`. Missing segments and non-container
/// intermediates resolve to `None`. Lists are indexed by zero-based
/// numeric segments.
pub fn get<'a>(doc: &'a SheetValue, path: &str) -> Option<&'a SheetValue> {
    path.split(PATH_SEPARATOR)
        .try_fold(doc, |node, segment| child(node, segment))
}

/// Return a new document with `value` stored at `path`. Missing or
/// non-container intermediates are replaced with empty objects. A segment
/// that is not an index of an existing list row leaves the document
/// unchanged.
pub fn set(doc: &SheetValue, path: &str, value: SheetValue) -> SheetValue {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    set_segments(doc, &segments, value)
}

/// Return a new document without the node at `path`. Absent paths yield
/// an unchanged (shared) copy.
pub fn remove(doc: &SheetValue, path: &str) -> SheetValue {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    remove_segments(doc, &segments).unwrap_or_else(|| doc.clone())
}

/// Build a plain nested document from a flat path map.
pub fn expand(flat: &FlatMap) -> SheetValue {
    flat.iter()
        .fold(SheetValue::empty_object(), |doc, (path, value)| {
            set(&doc, path, value.clone())
        })
}

/// Record every non-object node of a plain nested document at its dot path.
/// Lists are leaves.
pub fn collapse(doc: &SheetValue) -> FlatMap {
    let mut flat = FlatMap::new();
    if let Some(entries) = doc.as_object() {
        collapse_into(entries, "", &mut flat);
    }
    flat
}

fn collapse_into(entries: &ValueMap, prefix: &str, flat: &mut FlatMap) {
    for (key, value) in entries {
        let path = join_path(prefix, key);
        match value {
            SheetValue::Object(nested) => collapse_into(nested, &path, flat),
            other => {
                flat.insert(path, other.clone());
            }
        }
    }
}

fn child<'a>(node: &'a SheetValue, segment: &str) -> Option<&'a SheetValue> {
    match node {
        SheetValue::Object(entries) => entries.get(segment),
        SheetValue::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn list_index(segment: &str, len: usize) -> Option<usize> {
    segment.parse::<usize>().ok().filter(|index| *index < len)
}

fn set_segments(node: &SheetValue, segments: &[&str], value: SheetValue) -> SheetValue {
    let Some((head, rest)) = segments.split_first() else {
        return value;
    };

    if let SheetValue::List(items) = node {
        // Rows are never created or turned into an object by a path write.
        let Some(index) = list_index(head, items.len()) else {
            return node.clone();
        };
        let mut items = Arc::clone(items);
        let slot = &mut Arc::make_mut(&mut items)[index];
        let updated = set_segments(slot, rest, value);
        *slot = updated;
        return SheetValue::List(items);
    }

    let mut entries = match node {
        SheetValue::Object(entries) => Arc::clone(entries),
        _ => Arc::new(ValueMap::new()),
    };
    let map = Arc::make_mut(&mut entries);
    let updated = match map.get(*head) {
        Some(current) => set_segments(current, rest, value),
        None => set_segments(&SheetValue::Null, rest, value),
    };
    map.insert((*head).to_string(), updated);
    SheetValue::Object(entries)
}

fn remove_segments(node: &SheetValue, segments: &[&str]) -> Option<SheetValue> {
    let (head, rest) = segments.split_first()?;
    match node {
        SheetValue::Object(entries) => {
            let current = entries.get(*head)?;
            let mut entries = Arc::clone(entries);
            let map = Arc::make_mut(&mut entries);
            if rest.is_empty() {
                map.shift_remove(*head);
            } else {
                let updated = remove_segments(current, rest)?;
                map.insert((*head).to_string(), updated);
            }
            Some(SheetValue::Object(entries))
        }
        SheetValue::List(items) => {
            let index = list_index(head, items.len())?;
            let mut items = Arc::clone(items);
            let list = Arc::make_mut(&mut items);
            if rest.is_empty() {
                list.remove(index);
            } else {
                let updated = remove_segments(&list[index], rest)?;
                list[index] = updated;
            }
            Some(SheetValue::List(items))
        }
        _ => None,
    }
}
