//! Unified error types for the domain layer
//!
//! Almost every form algorithm is total: missing paths resolve to `None`,
//! mismatched values are repaired by the normalizer. The errors below cover
//! the few operations that need a caller-visible failure, such as parsing a
//! template document or editing a collection through a path that is not one.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Template JSON could not be parsed into a schema
    #[error("Invalid schema: {0}")]
    Schema(String),

    /// No field is declared at the given path
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The field at the path has a different kind than the operation needs
    #[error("Field {path} is not a {expected}")]
    WrongKind {
        path: String,
        expected: &'static str,
    },

    /// Row index outside the collection
    #[error("Index {index} out of range for {path} (len {len})")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },

    /// A status cost points at something that is not a registered status leaf
    #[error("Unknown status target: {0}")]
    UnknownStatusTarget(String),

    /// A status cost has no target to deduct from
    #[error("Status cost has no target: {0}")]
    MissingStatusTarget(String),
}

impl DomainError {
    /// Create a schema parse error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create an unknown field error
    pub fn unknown_field(path: impl Into<String>) -> Self {
        Self::UnknownField(path.into())
    }

    /// Create a wrong field kind error
    pub fn wrong_kind(path: impl Into<String>, expected: &'static str) -> Self {
        Self::WrongKind {
            path: path.into(),
            expected,
        }
    }

    /// Creates an index error for row edits.
    ///
    /// Use this when a row operation names an index the collection does not
    /// have:
    /// - removing a row past the end
    /// - moving a row from or to a position past the end
    ///
    /// # Example
    /// ```ignore
    /// if index >= rows.len() {
    ///     return Err(DomainError::index_out_of_range("inventario", index, rows.len()));
    /// }
    /// ```
    pub fn index_out_of_range(path: impl Into<String>, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            path: path.into(),
            index,
            len,
        }
    }

    /// Create an unknown status target error
    pub fn unknown_status_target(path: impl Into<String>) -> Self {
        Self::UnknownStatusTarget(path.into())
    }

    /// Create a missing status target error
    pub fn missing_status_target(path: impl Into<String>) -> Self {
        Self::MissingStatusTarget(path.into())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Schema(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_error() {
        let err = DomainError::unknown_field("atributos.sorte");
        assert!(matches!(err, DomainError::UnknownField(_)));
        assert_eq!(err.to_string(), "Unknown field: atributos.sorte");
    }

    #[test]
    fn test_index_out_of_range_error() {
        let err = DomainError::index_out_of_range("inventario", 4, 2);
        assert!(matches!(err, DomainError::IndexOutOfRange { .. }));
        assert_eq!(err.to_string(), "Index 4 out of range for inventario (len 2)");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let domain_err: DomainError = json_err.into();
        assert!(matches!(domain_err, DomainError::Schema(_)));
        assert!(domain_err.to_string().starts_with("Invalid schema:"));
    }

    #[test]
    fn test_wrong_kind_error() {
        let err = DomainError::wrong_kind("nome", "collection");
        assert!(matches!(err, DomainError::WrongKind { .. }));
        assert_eq!(err.to_string(), "Field nome is not a collection");
    }

    #[test]
    fn test_status_target_error() {
        let err = DomainError::unknown_status_target("vida.max");
        assert_eq!(err.to_string(), "Unknown status target: vida.max");
    }
}
