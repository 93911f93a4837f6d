//! Form error type

use thiserror::Error;

/// Errors raised by the form layer
///
/// Blocked navigation is not an error: `next`/`prev` report it as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{field}' expects a {expected} value")]
    KindMismatch {
        field: String,
        expected: &'static str,
    },

    #[error("'{value}' is not an option for field '{field}'")]
    InvalidChoice { field: String, value: String },

    #[error("field '{0}' is filled from another field and cannot be edited")]
    FieldLocked(String),

    #[error("form cannot be submitted yet")]
    SubmitBlocked,

    #[error("invalid form definition: {0}")]
    InvalidDefinition(String),
}
