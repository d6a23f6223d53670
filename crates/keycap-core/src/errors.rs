//! Error types for the keycap engine.
//!
//! Resolution never surfaces these to its caller; they travel between the
//! injected capabilities and the resolver, which logs them and falls back to
//! the property default.

use thiserror::Error;

/// Errors reported by an expression evaluator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("Expression evaluation failed: {message}")]
    Failed { message: String },

    #[error("Expression result has wrong type: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
}

impl ExpressionError {
    pub fn failed(message: impl Into<String>) -> Self {
        ExpressionError::Failed {
            message: message.into(),
        }
    }
}

/// Errors during variable substitution in literal text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubstitutionError {
    #[error("Unterminated variable reference at offset {offset}")]
    Unterminated { offset: usize },

    #[error("Invalid variable reference '{reference}'")]
    InvalidReference { reference: String },
}

/// Errors while decoding legacy pixel buffers into an image.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("Invalid pixel buffer: {reason}")]
    InvalidBuffer { reason: String },

    #[error("Unsupported pixel format: {format}")]
    UnsupportedFormat { format: String },
}

/// Structural problems in an authored element tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ElementError {
    #[error("Duplicate element id: {id}")]
    DuplicateId { id: String },
}
