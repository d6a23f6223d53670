//! Core value types shared by authored and resolved elements.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A packed color. The low 24 bits are RGB; the top byte is transparency,
/// so `0xff000000` is fully transparent.
pub type Color = u32;

/// Horizontal alignment of content within its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical alignment of content within its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    Top,
    #[default]
    Center,
    Bottom,
}

/// How an image is scaled into its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFillMode {
    Crop,
    Fill,
    Fit,
    #[default]
    FitOrShrink,
}

/// Where a border stroke sits relative to the shape edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderPosition {
    #[default]
    Inside,
    Center,
    Outside,
}

/// Decoration drawn around the whole key face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CanvasDecoration {
    #[default]
    FollowDefault,
    TopBar,
    Border,
}

/// Informational tag describing what an element is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementUsage {
    #[default]
    #[serde(rename = "auto")]
    Automatic,
    Text,
    Color,
    Image,
}

/// The kind of a graphics element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Canvas,
    Group,
    Image,
    Text,
    Box,
    Line,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Canvas => "canvas",
            ElementKind::Group => "group",
            ElementKind::Image => "image",
            ElementKind::Text => "text",
            ElementKind::Box => "box",
            ElementKind::Line => "line",
        };
        f.write_str(name)
    }
}

/// Font size of a text element: sized to fit, or a fixed pixel size.
///
/// Serialized as the string `"auto"` or a number.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FontSize {
    #[default]
    Auto,
    Fixed(f64),
}

impl FontSize {
    /// Coerce an arbitrary value into a font size.
    ///
    /// Finite numbers and numeric strings become `Fixed`; everything else,
    /// including `"auto"`, is `Auto`.
    pub fn from_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(size) if size.is_finite() => FontSize::Fixed(size),
                _ => FontSize::Auto,
            },
            serde_json::Value::String(s) => match s.trim().parse::<f64>() {
                Ok(size) if size.is_finite() => FontSize::Fixed(size),
                _ => FontSize::Auto,
            },
            _ => FontSize::Auto,
        }
    }

    pub fn to_value(self) -> serde_json::Value {
        match self {
            FontSize::Auto => serde_json::Value::String("auto".to_string()),
            FontSize::Fixed(size) => serde_json::json!(size),
        }
    }
}

impl Serialize for FontSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FontSize::Auto => serializer.serialize_str("auto"),
            FontSize::Fixed(size) => serializer.serialize_f64(*size),
        }
    }
}

impl<'de> Deserialize<'de> for FontSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(FontSize::from_value(&value))
    }
}

/// Resolved bounds as 0..1 fractions of the parent area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for DrawBounds {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_font_size_coercion() {
        assert_eq!(FontSize::from_value(&json!("auto")), FontSize::Auto);
        assert_eq!(FontSize::from_value(&json!(14)), FontSize::Fixed(14.0));
        assert_eq!(FontSize::from_value(&json!(" 18 ")), FontSize::Fixed(18.0));
        assert_eq!(FontSize::from_value(&json!("huge")), FontSize::Auto);
        assert_eq!(FontSize::from_value(&json!(null)), FontSize::Auto);
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(
            serde_json::to_value(ImageFillMode::FitOrShrink).unwrap(),
            json!("fit_or_shrink")
        );
        assert_eq!(
            serde_json::to_value(CanvasDecoration::TopBar).unwrap(),
            json!("top-bar")
        );
        assert_eq!(serde_json::to_value(ElementUsage::Automatic).unwrap(), json!("auto"));
    }
}
