//! Shape guarantees and row edits for `list` and `objectlist` values.
//!
//! Every operation returns a new vector; the slice passed in is never
//! modified.
//!
//! A `list` declares record columns with `columns`. Older templates put the
//! column names in `options` instead, which otherwise lists the allowed
//! scalar values. That legacy form is recognized when the existing items
//! are already records.

use crate::schema::{FieldDefinition, FieldKind};
use crate::types::{SheetValue, ValueMap};

/// What each item of a collection looks like.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemShape {
    /// Free text, or one of `choices` when present
    Scalar { choices: Option<Vec<String>> },
    /// Record with the declared columns
    Record { columns: Vec<String> },
}

impl ItemShape {
    /// A blank item of this shape: `""` or a record of `""` columns.
    pub fn empty_item(&self) -> SheetValue {
        match self {
            ItemShape::Scalar { .. } => SheetValue::empty_string(),
            ItemShape::Record { columns } => empty_record(columns.as_slice()),
        }
    }
}

/// Resolve the item shape of a collection field. `None` for fields that are
/// not collections.
pub fn item_shape(field: &FieldDefinition, items: &[SheetValue]) -> Option<ItemShape> {
    match &field.kind {
        FieldKind::ObjectList { fields } => Some(ItemShape::Record {
            columns: fields.iter().filter_map(|f| f.name.clone()).collect(),
        }),
        FieldKind::List {
            columns: Some(columns),
            ..
        } => Some(ItemShape::Record {
            columns: columns.clone(),
        }),
        FieldKind::List {
            options: Some(options),
            columns: None,
        } if items.iter().any(SheetValue::is_object) => Some(ItemShape::Record {
            columns: options.clone(),
        }),
        FieldKind::List { options, .. } => Some(ItemShape::Scalar {
            choices: options.clone(),
        }),
        _ => None,
    }
}

/// Shallow copy of `item` with every declared column present. Missing
/// columns become `""`; existing values, declared or not, are kept.
/// Non-record items are returned unchanged.
pub fn ensure_item_shape<S: AsRef<str>>(item: &SheetValue, columns: &[S]) -> SheetValue {
    let Some(entries) = item.as_object() else {
        return item.clone();
    };
    if columns
        .iter()
        .all(|column| entries.contains_key(column.as_ref()))
    {
        return item.clone();
    }

    let mut shaped = entries.clone();
    for column in columns {
        shaped
            .entry(column.as_ref().to_string())
            .or_insert_with(SheetValue::empty_string);
    }
    SheetValue::object(shaped)
}

/// A record with every column set to `""`.
pub fn empty_record<S: AsRef<str>>(columns: &[S]) -> SheetValue {
    let record: ValueMap = columns
        .iter()
        .map(|column| (column.as_ref().to_string(), SheetValue::empty_string()))
        .collect();
    SheetValue::object(record)
}

/// Move the element at `from` to `to`, keeping the relative order of the
/// others. Out-of-range indices return an unchanged copy.
pub fn reorder<T: Clone>(list: &[T], from: usize, to: usize) -> Vec<T> {
    let mut reordered = list.to_vec();
    if from < list.len() && to < list.len() {
        let moved = reordered.remove(from);
        reordered.insert(to, moved);
    }
    reordered
}

/// Copy of `list` with a blank record appended.
pub fn add_item<S: AsRef<str>>(list: &[SheetValue], columns: &[S]) -> Vec<SheetValue> {
    push_item(list, empty_record(columns))
}

/// Copy of `list` with `item` appended.
pub fn push_item<T: Clone>(list: &[T], item: T) -> Vec<T> {
    let mut extended = Vec::with_capacity(list.len() + 1);
    extended.extend_from_slice(list);
    extended.push(item);
    extended
}

/// Copy of `list` without the element at `index`. Out-of-range indices
/// return an unchanged copy.
pub fn remove_item<T: Clone>(list: &[T], index: usize) -> Vec<T> {
    list.iter()
        .enumerate()
        .filter(|(position, _)| *position != index)
        .map(|(_, item)| item.clone())
        .collect()
}

/// Guarantee a collection value: anything that is not an array becomes `[]`,
/// record items get every declared column. `value` is returned as-is for
/// non-collection fields.
pub fn normalize_collection(value: &SheetValue, field: &FieldDefinition) -> SheetValue {
    let items = value.as_list().unwrap_or_default();
    match item_shape(field, items) {
        None => value.clone(),
        Some(ItemShape::Scalar { .. }) if value.is_list() => value.clone(),
        Some(ItemShape::Scalar { .. }) => SheetValue::empty_list(),
        Some(ItemShape::Record { columns }) => SheetValue::list(
            items
                .iter()
                .map(|item| ensure_item_shape(item, columns.as_slice()))
                .collect(),
        ),
    }
}
