//! Schema-driven algorithms over values documents.

pub mod collection;
pub mod dadovida;
pub mod normalize;
pub mod status;
pub mod validate;

pub use collection::{
    add_item, empty_record, ensure_item_shape, item_shape, normalize_collection, push_item,
    remove_item, reorder, ItemShape,
};
pub use dadovida::{circle_path, circle_paths, marked_circles, toggle_circle};
pub use normalize::{initialize, normalize, pruned_paths};
pub use status::{collect_status_paths, deduct_status, StatusRegistry};
pub use validate::{find_missing_required, is_blank, missing_required_fields, MissingField};
