//! In-memory capabilities for tests.

use crate::capabilities::{
    ExecuteResult, ExpressionEvaluator, ExpressionType, ParsedText, PixelBufferDecoder,
    PixelBufferDescriptor,
};
use async_trait::async_trait;
use indexmap::IndexSet;
use keycap_core::{DecodeError, ExpressionError, SubstitutionError, VariableValue};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Evaluator over a fixed variable table.
///
/// Supported expressions: `$(name)` reads a variable, anything starting with
/// `fail` fails, and anything else is parsed as a JSON literal. Variable ids
/// are collected from every `$(...)` reference, including in failing expressions.
#[derive(Debug, Default)]
pub(crate) struct MockEvaluator {
    variables: HashMap<String, VariableValue>,
    calls: AtomicUsize,
}

impl MockEvaluator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, name: &str, value: VariableValue) -> Self {
        self.variables.insert(name.to_string(), value);
        self
    }

    /// Number of `execute` calls so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn evaluate(&self, expression: &str) -> Result<VariableValue, ExpressionError> {
        let expression = expression.trim();
        if expression.starts_with("fail") {
            return Err(ExpressionError::failed(expression));
        }
        if let Some(name) = expression
            .strip_prefix("$(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return self
                .variables
                .get(name)
                .cloned()
                .ok_or_else(|| ExpressionError::failed(format!("unknown variable {name}")));
        }
        serde_json::from_str(expression).map_err(|e| ExpressionError::failed(e.to_string()))
    }
}

fn type_name(value: &VariableValue) -> &'static str {
    match value {
        VariableValue::Null => "null",
        VariableValue::Bool(_) => "boolean",
        VariableValue::Number(_) => "number",
        VariableValue::String(_) => "string",
        VariableValue::Array(_) => "array",
        VariableValue::Object(_) => "object",
    }
}

fn coerce(
    value: VariableValue,
    required: Option<ExpressionType>,
) -> Result<VariableValue, ExpressionError> {
    let ok = match required {
        None => true,
        Some(ExpressionType::Number) => value.is_number(),
        Some(ExpressionType::String) => value.is_string(),
        Some(ExpressionType::Boolean) => value.is_boolean(),
    };
    if ok {
        Ok(value)
    } else {
        Err(ExpressionError::TypeMismatch {
            expected: format!("{required:?}").to_lowercase(),
            found: type_name(&value).to_string(),
        })
    }
}

/// Every `$(name)` reference in `text`, and the byte offset of an unterminated one.
fn references(text: &str) -> (Vec<(usize, usize, &str)>, Option<usize>) {
    let mut found = Vec::new();
    let mut offset = 0;
    while let Some(start) = text[offset..].find("$(").map(|i| i + offset) {
        match text[start..].find(')') {
            Some(len) => {
                found.push((start, start + len + 1, &text[start + 2..start + len]));
                offset = start + len + 1;
            }
            None => return (found, Some(start)),
        }
    }
    (found, None)
}

impl ExpressionEvaluator for MockEvaluator {
    fn execute(&self, expression: &str, required: Option<ExpressionType>) -> ExecuteResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (refs, _) = references(expression);
        let ids: IndexSet<String> = refs.iter().map(|(_, _, name)| name.to_string()).collect();
        match self.evaluate(expression).and_then(|v| coerce(v, required)) {
            Ok(value) => ExecuteResult::ok(value, ids),
            Err(error) => ExecuteResult::failed(error, ids),
        }
    }

    fn parse_variables(&self, text: &str) -> Result<ParsedText, SubstitutionError> {
        let (refs, unterminated) = references(text);
        if let Some(offset) = unterminated {
            return Err(SubstitutionError::Unterminated { offset });
        }

        if let Some((_, _, name)) = refs.iter().find(|(_, _, name)| name.trim().is_empty()) {
            return Err(SubstitutionError::InvalidReference {
                reference: format!("$({name})"),
            });
        }

        let mut output = String::new();
        let mut variable_ids = IndexSet::new();
        let mut last = 0;
        for (start, end, name) in refs {
            output.push_str(&text[last..start]);
            match self.variables.get(name) {
                Some(VariableValue::String(s)) => output.push_str(s),
                Some(other) => output.push_str(&other.to_string()),
                None => output.push_str("$NA"),
            }
            variable_ids.insert(name.to_string());
            last = end;
        }
        output.push_str(&text[last..]);

        Ok(ParsedText {
            text: output,
            variable_ids,
        })
    }
}

const SUPPORTED_FORMATS: [&str; 2] = ["rgba", "argb"];

/// Decoder that returns a fixed data URL and counts its calls.
///
/// Buffers with a pixel format other than `rgba` or `argb` are rejected.
#[derive(Debug, Default)]
pub(crate) struct MockDecoder {
    fail: bool,
    calls: AtomicUsize,
}

impl MockDecoder {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PixelBufferDecoder for MockDecoder {
    async fn decode(
        &self,
        buffers: &[PixelBufferDescriptor],
    ) -> Result<Option<String>, DecodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DecodeError::InvalidBuffer {
                reason: "corrupt".to_string(),
            });
        }
        if let Some(format) = buffers
            .iter()
            .filter_map(|b| b.pixel_format.as_deref())
            .find(|f| !SUPPORTED_FORMATS.contains(f))
        {
            return Err(DecodeError::UnsupportedFormat {
                format: format.to_string(),
            });
        }
        Ok(Some(format!("data:image/png;base64,{}", buffers.len())))
    }
}
