extern crate self as sheetsmith_domain;

pub mod common;
pub mod document;
pub mod error;
pub mod forms;
pub mod schema;
pub mod types;

pub use error::DomainError;

// Re-export the template model
pub use schema::{FieldDefinition, FieldKind, FieldLayout, Schema};

// Re-export values documents
pub use types::{FlatMap, SheetValue, ValueMap};

// Re-export document operations
pub use document::{
    as_flag, as_number, collapse, expand, flatten, get, parse_number, remove, set, unflatten,
    wrap, VALUE_KEY,
};

// Re-export form algorithms
pub use forms::{
    add_item, collect_status_paths, deduct_status, ensure_item_shape, find_missing_required,
    initialize, item_shape, missing_required_fields, normalize, normalize_collection,
    pruned_paths, remove_item, reorder, ItemShape, MissingField, StatusRegistry,
};
