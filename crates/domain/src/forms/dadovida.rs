//! Hit-dice trackers: `quantity` independent flags stored at
//! `path.circle_{i}`, zero-based.

use crate::common::join_path;
use crate::document::{as_flag, get, set};
use crate::types::SheetValue;

pub fn circle_path(path: &str, index: u32) -> String {
    join_path(path, &format!("circle_{index}"))
}

pub fn circle_paths(path: &str, quantity: u32) -> Vec<String> {
    (0..quantity).map(|index| circle_path(path, index)).collect()
}

/// Number of circles currently marked.
pub fn marked_circles(doc: &SheetValue, path: &str, quantity: u32) -> usize {
    circle_paths(path, quantity)
        .iter()
        .filter(|circle| get(doc, circle).is_some_and(as_flag))
        .count()
}

/// Flip one circle.
pub fn toggle_circle(doc: &SheetValue, path: &str, index: u32) -> SheetValue {
    let circle = circle_path(path, index);
    let marked = get(doc, &circle).is_some_and(as_flag);
    set(doc, &circle, SheetValue::Boolean(!marked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_circle_paths() {
        assert_eq!(
            circle_paths("combate.dados", 3),
            vec![
                "combate.dados.circle_0",
                "combate.dados.circle_1",
                "combate.dados.circle_2"
            ]
        );
        assert!(circle_paths("dados", 0).is_empty());
    }

    #[test]
    fn test_toggle_from_blank_default() {
        let doc = SheetValue::from(json!({"dados": ""}));
        let once = toggle_circle(&doc, "dados", 1);
        assert_eq!(once.to_json(), json!({"dados": {"circle_1": true}}));
        assert_eq!(marked_circles(&once, "dados", 3), 1);

        let twice = toggle_circle(&once, "dados", 1);
        assert_eq!(marked_circles(&twice, "dados", 3), 0);
    }

    #[test]
    fn test_marked_ignores_circles_beyond_quantity() {
        let doc = SheetValue::from(json!({"dados": {"circle_0": true, "circle_5": true}}));
        assert_eq!(marked_circles(&doc, "dados", 2), 1);
    }
}
