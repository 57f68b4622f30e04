//! Common utility functions shared across the SheetSmith crates.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **No domain types** - helpers operate on plain strings

pub mod string;

// Re-export commonly used functions at crate root for convenience
pub use string::{join_path, none_if_empty, title_case_key, PATH_SEPARATOR};
