//! Capabilities injected into the resolver.
//!
//! The expression grammar, variable store and image encoding live outside
//! this crate; the resolver only sees these traits.

use async_trait::async_trait;
use indexmap::IndexSet;
use keycap_core::{DecodeError, ExpressionError, SubstitutionError, VariableValue};
use serde::{Deserialize, Serialize};

/// Result type an expression is required to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionType {
    Number,
    String,
    Boolean,
}

/// Outcome of evaluating one expression.
///
/// `variable_ids` is filled even when evaluation fails, so the caller can
/// still re-resolve once one of those variables changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteResult {
    pub value: Result<VariableValue, ExpressionError>,
    pub variable_ids: IndexSet<String>,
}

impl ExecuteResult {
    pub fn ok(value: VariableValue, variable_ids: IndexSet<String>) -> Self {
        Self {
            value: Ok(value),
            variable_ids,
        }
    }

    pub fn failed(error: ExpressionError, variable_ids: IndexSet<String>) -> Self {
        Self {
            value: Err(error),
            variable_ids,
        }
    }
}

/// Literal text after `$(variable)` substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedText {
    pub text: String,
    pub variable_ids: IndexSet<String>,
}

/// Evaluates expressions and substitutes variables into literal text.
pub trait ExpressionEvaluator: Send + Sync {
    /// Evaluate `expression`, coercing the result to `required` when given.
    fn execute(&self, expression: &str, required: Option<ExpressionType>) -> ExecuteResult;

    /// Replace variable references in `text` with their current values.
    fn parse_variables(&self, text: &str) -> Result<ParsedText, SubstitutionError>;
}

/// One raw pixel buffer produced by a legacy feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelBufferDescriptor {
    /// Encoded pixel data.
    pub buffer: String,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub pixel_format: Option<String>,
}

/// Turns legacy pixel buffers into a data URL.
#[async_trait]
pub trait PixelBufferDecoder: Send + Sync {
    async fn decode(
        &self,
        buffers: &[PixelBufferDescriptor],
    ) -> Result<Option<String>, DecodeError>;
}

/// Decoder for hosts without legacy pixel buffer support. Produces no image.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPixelBufferDecoder;

#[async_trait]
impl PixelBufferDecoder for NoPixelBufferDecoder {
    async fn decode(
        &self,
        _buffers: &[PixelBufferDescriptor],
    ) -> Result<Option<String>, DecodeError> {
        Ok(None)
    }
}
