//! Schema-agnostic operations on values documents.

pub mod coerce;
pub mod path;
pub mod transform;

pub use coerce::{as_flag, as_number, number_value, parse_number};
pub use path::{collapse, expand, get, remove, set};
pub use transform::{flatten, unflatten, wrap, VALUE_KEY};
