//! # SheetSmith Value Types
//!
//! Shared vocabulary for values documents, used by every algorithm in this
//! crate and by the engine's form session.
//!
//! ## Design Principles
//!
//! 1. **Pure data types** - No I/O, no side effects
//! 2. **Cheap clones** - containers are `Arc`-shared, edits copy only one path
//! 3. **Serializable** - Values serialize to the exact JSON the backend stores

mod sheet_value;
pub use sheet_value::{SheetValue, ValueMap};

/// Single-level map from dot-joined paths to leaf values.
pub type FlatMap = ValueMap;
