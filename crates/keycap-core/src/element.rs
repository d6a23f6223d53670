//! Authored graphics element trees.
//!
//! Every authorable property is an [`Expressible`]. Bounds, opacity and border
//! width are authored as 0..100 percentages.

use crate::errors::ElementError;
use crate::expressible::Expressible;
use crate::types::{
    BorderPosition, CanvasDecoration, Color, ElementKind, ElementUsage, FontSize,
    HorizontalAlignment, ImageFillMode, VerticalAlignment,
};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A graphics element as authored by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GraphicsElement {
    Canvas(CanvasElement),
    Group(GroupElement),
    Image(ImageElement),
    Text(TextElement),
    Box(BoxElement),
    Line(LineElement),
}

impl GraphicsElement {
    /// The element id, unique within one tree.
    pub fn id(&self) -> &str {
        match self {
            GraphicsElement::Canvas(e) => &e.id,
            GraphicsElement::Group(e) => &e.id,
            GraphicsElement::Image(e) => &e.id,
            GraphicsElement::Text(e) => &e.id,
            GraphicsElement::Box(e) => &e.id,
            GraphicsElement::Line(e) => &e.id,
        }
    }

    pub fn usage(&self) -> ElementUsage {
        match self {
            GraphicsElement::Canvas(e) => e.usage,
            GraphicsElement::Group(e) => e.usage,
            GraphicsElement::Image(e) => e.usage,
            GraphicsElement::Text(e) => e.usage,
            GraphicsElement::Box(e) => e.usage,
            GraphicsElement::Line(e) => e.usage,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            GraphicsElement::Canvas(_) => ElementKind::Canvas,
            GraphicsElement::Group(_) => ElementKind::Group,
            GraphicsElement::Image(_) => ElementKind::Image,
            GraphicsElement::Text(_) => ElementKind::Text,
            GraphicsElement::Box(_) => ElementKind::Box,
            GraphicsElement::Line(_) => ElementKind::Line,
        }
    }

    /// The `enabled` property of this element.
    pub fn enabled(&self) -> &Expressible<bool> {
        match self {
            GraphicsElement::Canvas(e) => &e.enabled,
            GraphicsElement::Group(e) => &e.enabled,
            GraphicsElement::Image(e) => &e.enabled,
            GraphicsElement::Text(e) => &e.enabled,
            GraphicsElement::Box(e) => &e.enabled,
            GraphicsElement::Line(e) => &e.enabled,
        }
    }
}

/// Authored bounds, in percent of the parent area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementBounds {
    pub x: Expressible<f64>,
    pub y: Expressible<f64>,
    pub width: Expressible<f64>,
    pub height: Expressible<f64>,
}

impl Default for ElementBounds {
    fn default() -> Self {
        Self {
            x: Expressible::Value(0.0),
            y: Expressible::Value(0.0),
            width: Expressible::Value(100.0),
            height: Expressible::Value(100.0),
        }
    }
}

/// Border properties shared by boxes and lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BorderProperties {
    /// Stroke width in percent.
    pub border_width: Expressible<f64>,
    pub border_color: Expressible<Color>,
    pub border_position: Expressible<BorderPosition>,
}

impl Default for BorderProperties {
    fn default() -> Self {
        Self {
            border_width: Expressible::Value(0.0),
            border_color: Expressible::Value(0x000000),
            border_position: Expressible::Value(BorderPosition::Inside),
        }
    }
}

fn enabled_by_default() -> Expressible<bool> {
    Expressible::Value(true)
}

fn fully_opaque() -> Expressible<f64> {
    Expressible::Value(100.0)
}

/// The root decoration of a key face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasElement {
    pub id: String,
    pub usage: ElementUsage,
    pub enabled: Expressible<bool>,
    pub decoration: Expressible<CanvasDecoration>,
}

impl Default for CanvasElement {
    fn default() -> Self {
        Self {
            id: String::new(),
            usage: ElementUsage::default(),
            enabled: enabled_by_default(),
            decoration: Expressible::Value(CanvasDecoration::FollowDefault),
        }
    }
}

/// A container whose children are painted in order, later on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupElement {
    pub id: String,
    pub usage: ElementUsage,
    pub enabled: Expressible<bool>,
    pub opacity: Expressible<f64>,
    #[serde(flatten)]
    pub bounds: ElementBounds,
    pub children: Vec<GraphicsElement>,
}

impl Default for GroupElement {
    fn default() -> Self {
        Self {
            id: String::new(),
            usage: ElementUsage::default(),
            enabled: enabled_by_default(),
            opacity: fully_opaque(),
            bounds: ElementBounds::default(),
            children: Vec::new(),
        }
    }
}

/// An image element.
///
/// `base64_image` is normally a data URL. Legacy feedbacks may instead
/// produce an array of pixel buffer descriptors, which are decoded at resolve time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageElement {
    pub id: String,
    pub usage: ElementUsage,
    pub enabled: Expressible<bool>,
    pub opacity: Expressible<f64>,
    #[serde(flatten)]
    pub bounds: ElementBounds,
    pub base64_image: Expressible<Option<String>>,
    pub halign: Expressible<HorizontalAlignment>,
    pub valign: Expressible<VerticalAlignment>,
    pub fill_mode: Expressible<ImageFillMode>,
}

impl Default for ImageElement {
    fn default() -> Self {
        Self {
            id: String::new(),
            usage: ElementUsage::default(),
            enabled: enabled_by_default(),
            opacity: fully_opaque(),
            bounds: ElementBounds::default(),
            base64_image: Expressible::Value(None),
            halign: Expressible::Value(HorizontalAlignment::Center),
            valign: Expressible::Value(VerticalAlignment::Center),
            fill_mode: Expressible::Value(ImageFillMode::FitOrShrink),
        }
    }
}

/// A text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextElement {
    pub id: String,
    pub usage: ElementUsage,
    pub enabled: Expressible<bool>,
    pub opacity: Expressible<f64>,
    #[serde(flatten)]
    pub bounds: ElementBounds,
    /// Literal text supports `$(variable)` substitution.
    pub text: Expressible<String>,
    #[serde(rename = "fontsize")]
    pub font_size: Expressible<FontSize>,
    pub color: Expressible<Color>,
    pub halign: Expressible<HorizontalAlignment>,
    pub valign: Expressible<VerticalAlignment>,
    pub outline_color: Expressible<Color>,
}

impl Default for TextElement {
    fn default() -> Self {
        Self {
            id: String::new(),
            usage: ElementUsage::default(),
            enabled: enabled_by_default(),
            opacity: fully_opaque(),
            bounds: ElementBounds::default(),
            text: Expressible::Value(String::new()),
            font_size: Expressible::Value(FontSize::Auto),
            color: Expressible::Value(0xffffff),
            halign: Expressible::Value(HorizontalAlignment::Center),
            valign: Expressible::Value(VerticalAlignment::Center),
            outline_color: Expressible::Value(0xff000000),
        }
    }
}

/// A filled rectangle with an optional border.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxElement {
    pub id: String,
    pub usage: ElementUsage,
    pub enabled: Expressible<bool>,
    pub opacity: Expressible<f64>,
    #[serde(flatten)]
    pub bounds: ElementBounds,
    pub color: Expressible<Color>,
    #[serde(flatten)]
    pub border: BorderProperties,
}

impl Default for BoxElement {
    fn default() -> Self {
        Self {
            id: String::new(),
            usage: ElementUsage::default(),
            enabled: enabled_by_default(),
            opacity: fully_opaque(),
            bounds: ElementBounds::default(),
            color: Expressible::Value(0x000000),
            border: BorderProperties::default(),
        }
    }
}

/// A straight line between two points, stroked with the border properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineElement {
    pub id: String,
    pub usage: ElementUsage,
    pub enabled: Expressible<bool>,
    pub opacity: Expressible<f64>,
    pub from_x: Expressible<f64>,
    pub from_y: Expressible<f64>,
    pub to_x: Expressible<f64>,
    pub to_y: Expressible<f64>,
    #[serde(flatten)]
    pub border: BorderProperties,
}

impl Default for LineElement {
    fn default() -> Self {
        Self {
            id: String::new(),
            usage: ElementUsage::default(),
            enabled: enabled_by_default(),
            opacity: fully_opaque(),
            from_x: Expressible::Value(0.0),
            from_y: Expressible::Value(0.0),
            to_x: Expressible::Value(100.0),
            to_y: Expressible::Value(100.0),
            border: BorderProperties {
                border_width: Expressible::Value(1.0),
                ..BorderProperties::default()
            },
        }
    }
}

/// Check that element ids are unique across a tree, including group children.
pub fn validate_element_ids(elements: &[GraphicsElement]) -> Result<(), ElementError> {
    fn visit<'a>(
        elements: &'a [GraphicsElement],
        seen: &mut IndexSet<&'a str>,
    ) -> Result<(), ElementError> {
        for element in elements {
            if !seen.insert(element.id()) {
                return Err(ElementError::DuplicateId {
                    id: element.id().to_string(),
                });
            }
            if let GraphicsElement::Group(group) = element {
                visit(&group.children, seen)?;
            }
        }
        Ok(())
    }

    let mut seen = IndexSet::new();
    visit(elements, &mut seen)
}
