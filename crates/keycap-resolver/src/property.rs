//! Resolution of single element properties.
//!
//! Each accessor takes the property name (used for override lookup and
//! logging) and the element's own value. A feedback override for the same
//! element and property always wins over the element's value. Any failure
//! falls back to the accessor's default; the variables an expression touched
//! are recorded either way.

use crate::capabilities::{ExpressionEvaluator, ExpressionType};
use keycap_core::{
    Expressible, ExpressionError, FeedbackOverrides, HorizontalAlignment, PropertyOverrides,
    UsedVariables, VariableValue, VerticalAlignment,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Text shown when literal text cannot be substituted.
pub const SUBSTITUTION_ERROR_TEXT: &str = "ERR";

/// Where a property's value comes from after override lookup.
enum Source<'b, T> {
    Literal(T),
    Expression(&'b str),
    /// An override literal whose shape does not match the property type.
    Mismatch,
}

/// Like [`Source`], for properties that accept any value.
enum RawSource<'b> {
    Literal(VariableValue),
    Expression(&'b str),
}

/// Resolves the properties of one element.
pub struct PropertyResolver<'a> {
    evaluator: &'a dyn ExpressionEvaluator,
    used: &'a UsedVariables,
    element_id: &'a str,
    overrides: Option<&'a PropertyOverrides>,
}

impl<'a> PropertyResolver<'a> {
    pub fn new(
        evaluator: &'a dyn ExpressionEvaluator,
        used: &'a UsedVariables,
        element_id: &'a str,
        overrides: &'a FeedbackOverrides,
    ) -> Self {
        Self {
            evaluator,
            used,
            element_id,
            overrides: overrides.for_element(element_id),
        }
    }

    fn override_for(&self, property: &str) -> Option<&'a Expressible<VariableValue>> {
        self.overrides?.get(property)
    }

    fn source<'b, T>(&'b self, property: &str, base: &'b Expressible<T>) -> Source<'b, T>
    where
        T: Clone + DeserializeOwned,
    {
        match self.override_for(property) {
            Some(Expressible::Expression(expression)) => Source::Expression(expression),
            Some(Expressible::Value(value)) => match serde_json::from_value(value.clone()) {
                Ok(literal) => Source::Literal(literal),
                Err(error) => {
                    debug!(
                        element = self.element_id,
                        property,
                        %error,
                        "override value has the wrong type"
                    );
                    Source::Mismatch
                }
            },
            None => match base {
                Expressible::Value(literal) => Source::Literal(literal.clone()),
                Expressible::Expression(expression) => Source::Expression(expression),
            },
        }
    }

    fn raw_source<'b, T: Serialize>(
        &'b self,
        property: &str,
        base: &'b Expressible<T>,
    ) -> RawSource<'b> {
        match self.override_for(property) {
            Some(Expressible::Expression(expression)) => RawSource::Expression(expression),
            Some(Expressible::Value(value)) => RawSource::Literal(value.clone()),
            None => match base {
                Expressible::Value(literal) => RawSource::Literal(
                    serde_json::to_value(literal).unwrap_or(VariableValue::Null),
                ),
                Expressible::Expression(expression) => RawSource::Expression(expression),
            },
        }
    }

    fn execute(
        &self,
        property: &str,
        expression: &str,
        required: Option<ExpressionType>,
    ) -> Result<VariableValue, ExpressionError> {
        let result = self.evaluator.execute(expression, required);
        self.used.extend(result.variable_ids);
        if let Err(error) = &result.value {
            debug!(
                element = self.element_id,
                property,
                expression,
                %error,
                "expression evaluation failed"
            );
        }
        result.value
    }

    /// Any value: literal as-is, expression evaluated without a required type.
    ///
    /// A `null` literal counts as an absent value and yields `default`, so an
    /// unset optional property such as an image without data takes the
    /// caller's fallback.
    pub fn unknown<T: Serialize>(
        &self,
        property: &str,
        base: &Expressible<T>,
        default: VariableValue,
    ) -> VariableValue {
        match self.raw_source(property, base) {
            RawSource::Literal(VariableValue::Null) => default,
            RawSource::Literal(value) => value,
            RawSource::Expression(expression) => {
                self.execute(property, expression, None).unwrap_or(default)
            }
        }
    }

    /// Text to draw. Literal text goes through variable substitution,
    /// expressions are evaluated and stringified.
    pub fn draw_text<T: Serialize>(&self, property: &str, base: &Expressible<T>) -> String {
        match self.raw_source(property, base) {
            RawSource::Literal(VariableValue::String(text)) => {
                match self.evaluator.parse_variables(&text) {
                    Ok(parsed) => {
                        self.used.extend(parsed.variable_ids);
                        parsed.text
                    }
                    Err(error) => {
                        debug!(
                            element = self.element_id,
                            property,
                            %error,
                            "variable substitution failed"
                        );
                        SUBSTITUTION_ERROR_TEXT.to_string()
                    }
                }
            }
            RawSource::Literal(value) => stringify(value),
            RawSource::Expression(expression) => self
                .execute(property, expression, None)
                .map(stringify)
                .unwrap_or_default(),
        }
    }

    /// A number, multiplied by `scale`. The default is returned unscaled.
    pub fn number(
        &self,
        property: &str,
        base: &Expressible<f64>,
        default: f64,
        scale: f64,
    ) -> f64 {
        match self.source(property, base) {
            Source::Literal(value) => value * scale,
            Source::Expression(expression) => self
                .evaluate_number(property, expression)
                .map(|value| value * scale)
                .unwrap_or(default),
            Source::Mismatch => default,
        }
    }

    /// A packed color. Expressions are evaluated as numbers.
    pub fn color(&self, property: &str, base: &Expressible<u32>, default: u32) -> u32 {
        match self.source(property, base) {
            Source::Literal(value) => value,
            Source::Expression(expression) => self
                .evaluate_number(property, expression)
                .map(|value| value as u32)
                .unwrap_or(default),
            Source::Mismatch => default,
        }
    }

    fn evaluate_number(&self, property: &str, expression: &str) -> Option<f64> {
        let value = self
            .execute(property, expression, Some(ExpressionType::Number))
            .ok()?;
        to_number(&value)
    }

    pub fn string(&self, property: &str, base: &Expressible<String>, default: &str) -> String {
        match self.source(property, base) {
            Source::Literal(value) => value,
            Source::Expression(expression) => {
                match self.execute(property, expression, Some(ExpressionType::String)) {
                    Ok(VariableValue::String(value)) => value,
                    _ => default.to_string(),
                }
            }
            Source::Mismatch => default.to_string(),
        }
    }

    /// One of the variants of `T`, named by its serialized string.
    pub fn enumeration<T>(&self, property: &str, base: &Expressible<T>, default: T) -> T
    where
        T: Clone + DeserializeOwned,
    {
        match self.source(property, base) {
            Source::Literal(value) => value,
            Source::Expression(expression) => {
                match self.execute(property, expression, Some(ExpressionType::String)) {
                    Ok(value @ VariableValue::String(_)) => {
                        serde_json::from_value(value).unwrap_or(default)
                    }
                    _ => default,
                }
            }
            Source::Mismatch => default,
        }
    }

    pub fn boolean(&self, property: &str, base: &Expressible<bool>, default: bool) -> bool {
        match self.source(property, base) {
            Source::Literal(value) => value,
            Source::Expression(expression) => {
                match self.execute(property, expression, Some(ExpressionType::Boolean)) {
                    Ok(VariableValue::Bool(value)) => value,
                    _ => default,
                }
            }
            Source::Mismatch => default,
        }
    }

    /// Expressions may produce any word; only its first letter counts, so
    /// `"start"` and `"end"` work as well as `"left"` and `"right"`.
    pub fn horizontal_alignment(
        &self,
        property: &str,
        base: &Expressible<HorizontalAlignment>,
    ) -> HorizontalAlignment {
        match self.source(property, base) {
            Source::Literal(value) => value,
            Source::Expression(expression) => {
                match self.alignment_initial(property, expression) {
                    Some('l' | 's') => HorizontalAlignment::Left,
                    Some('r' | 'e') => HorizontalAlignment::Right,
                    _ => HorizontalAlignment::Center,
                }
            }
            Source::Mismatch => HorizontalAlignment::Center,
        }
    }

    pub fn vertical_alignment(
        &self,
        property: &str,
        base: &Expressible<VerticalAlignment>,
    ) -> VerticalAlignment {
        match self.source(property, base) {
            Source::Literal(value) => value,
            Source::Expression(expression) => {
                match self.alignment_initial(property, expression) {
                    Some('t' | 's') => VerticalAlignment::Top,
                    Some('b' | 'e') => VerticalAlignment::Bottom,
                    _ => VerticalAlignment::Center,
                }
            }
            Source::Mismatch => VerticalAlignment::Center,
        }
    }

    fn alignment_initial(&self, property: &str, expression: &str) -> Option<char> {
        match self.execute(property, expression, Some(ExpressionType::String)) {
            Ok(VariableValue::String(value)) => value
                .trim()
                .chars()
                .next()
                .map(|c| c.to_ascii_lowercase()),
            _ => None,
        }
    }
}

fn to_number(value: &VariableValue) -> Option<f64> {
    let number = match value {
        VariableValue::Number(n) => n.as_f64()?,
        VariableValue::Bool(b) => f64::from(u8::from(*b)),
        VariableValue::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

fn stringify(value: VariableValue) -> String {
    match value {
        VariableValue::Null => String::new(),
        VariableValue::String(s) => s,
        other => other.to_string(),
    }
}
