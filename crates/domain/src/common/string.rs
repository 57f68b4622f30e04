//! String helpers for paths and display names.

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// Converts an empty string to `None`, otherwise returns `Some(value)`.
///
/// # Examples
///
/// ```
/// use sheetsmith_domain::common::none_if_empty;
///
/// assert_eq!(none_if_empty("hello"), Some("hello"));
/// assert_eq!(none_if_empty(""), None);
/// assert_eq!(none_if_empty(" "), Some(" ")); // Whitespace is not empty
/// ```
pub fn none_if_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Appends `key` to a dot path, without a leading separator at the root.
///
/// # Examples
///
/// ```
/// use sheetsmith_domain::common::join_path;
///
/// assert_eq!(join_path("", "atributos"), "atributos");
/// assert_eq!(join_path("atributos", "forca"), "atributos.forca");
/// ```
pub fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}{PATH_SEPARATOR}{key}")
    }
}

/// Turns a snake_case key into a label: split on `_`, capitalize each word,
/// join with spaces.
///
/// # Examples
///
/// ```
/// use sheetsmith_domain::common::title_case_key;
///
/// assert_eq!(title_case_key("forca"), "Forca");
/// assert_eq!(title_case_key("pontos_de_vida"), "Pontos De Vida");
/// ```
pub fn title_case_key(key: &str) -> String {
    key.split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
