//! Error types for JSON parsing and shape validation.

use thiserror::Error;

use crate::value::Type;

/// A failure encountered while parsing JSON text.
///
/// Carries the byte offset into the input where the problem was detected,
/// so callers can point at the offending position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at offset {offset}")]
pub struct ParseError {
    /// Human-readable description of what went wrong.
    pub message: String,
    /// Byte offset into the input where the error was detected.
    pub offset: usize,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, offset: usize) -> Self {
        ParseError {
            message: message.into(),
            offset,
        }
    }
}

/// A failure reported by shape validation or typed extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The value as a whole had the wrong type (e.g., expected an object,
    /// found an array).
    #[error("expected {expected}, got {actual}")]
    Type { expected: Type, actual: Type },

    /// A named object field had the wrong type. Fields absent from the
    /// object read as null, so a missing required field reports `null`
    /// as the actual type.
    #[error("bad type for field \"{field}\": expected {expected}, got {actual}")]
    Field {
        field: String,
        expected: Type,
        actual: Type,
    },
}

/// Convenience alias used throughout jsonish-core.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;
