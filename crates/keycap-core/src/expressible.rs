//! Values that are either a literal or an expression evaluated at resolve time.

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An authorable property value.
///
/// Serialized as `{ "isExpression": bool, "value": ... }`, where `value` is
/// the expression source when `isExpression` is true.
#[derive(Debug, Clone, PartialEq)]
pub enum Expressible<T> {
    Value(T),
    Expression(String),
}

impl<T> Expressible<T> {
    pub fn expression(source: impl Into<String>) -> Self {
        Expressible::Expression(source.into())
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, Expressible::Expression(_))
    }

    /// Get the literal value, if this is not an expression.
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Expressible::Value(v) => Some(v),
            Expressible::Expression(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Expressible<U> {
        match self {
            Expressible::Value(v) => Expressible::Value(f(v)),
            Expressible::Expression(e) => Expressible::Expression(e),
        }
    }
}

impl<T: Default> Default for Expressible<T> {
    fn default() -> Self {
        Expressible::Value(T::default())
    }
}

impl<T> From<T> for Expressible<T> {
    fn from(value: T) -> Self {
        Expressible::Value(value)
    }
}

impl<T: Serialize> Serialize for Expressible<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Expressible", 2)?;
        match self {
            Expressible::Value(v) => {
                state.serialize_field("isExpression", &false)?;
                state.serialize_field("value", v)?;
            }
            Expressible::Expression(e) => {
                state.serialize_field("isExpression", &true)?;
                state.serialize_field("value", e)?;
            }
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct RawExpressible {
    #[serde(rename = "isExpression", default)]
    is_expression: bool,
    #[serde(default)]
    value: serde_json::Value,
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Expressible<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawExpressible::deserialize(deserializer)?;
        if raw.is_expression {
            match raw.value {
                serde_json::Value::String(source) => Ok(Expressible::Expression(source)),
                other => Err(D::Error::custom(format!(
                    "expression value must be a string, found {other}"
                ))),
            }
        } else {
            serde_json::from_value(raw.value)
                .map(Expressible::Value)
                .map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_literal() {
        let value: Expressible<f64> =
            serde_json::from_value(json!({ "isExpression": false, "value": 42 })).unwrap();
        assert_eq!(value, Expressible::Value(42.0));
    }

    #[test]
    fn test_deserialize_expression() {
        let value: Expressible<bool> =
            serde_json::from_value(json!({ "isExpression": true, "value": "$(internal:flag)" }))
                .unwrap();
        assert_eq!(value, Expressible::expression("$(internal:flag)"));
    }

    #[test]
    fn test_expression_must_be_string() {
        let value: Result<Expressible<f64>, _> =
            serde_json::from_value(json!({ "isExpression": true, "value": 3 }));
        assert!(value.is_err());
    }

    #[test]
    fn test_serialize_shape() {
        let json = serde_json::to_value(Expressible::<f64>::expression("1 + 2")).unwrap();
        assert_eq!(json, json!({ "isExpression": true, "value": "1 + 2" }));
    }
}
