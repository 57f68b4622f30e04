//! Form session errors.

use sheetsmith_domain::DomainError;

/// Errors that can occur during form session operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
