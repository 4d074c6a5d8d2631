//! Error types shared by every pipeline stage.

use thiserror::Error;

/// Raised when a raw message is rejected by the schema predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid message format")]
pub struct ValidationError;

/// Errors produced while processing a single message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    /// Schema predicate rejected the input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A validated message lacks a key the stage needs.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A key is present but holds the wrong kind of value.
    #[error("field `{field}` must be {expected}")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },
}

impl ProcessError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
