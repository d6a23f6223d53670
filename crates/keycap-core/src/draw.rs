//! Resolved draw elements.
//!
//! A draw element mirrors a [`GraphicsElement`](crate::GraphicsElement) with
//! every property reduced to a concrete value. Draw trees are produced once
//! per resolution pass and never mutated afterwards.

use crate::types::{
    BorderPosition, CanvasDecoration, Color, DrawBounds, ElementKind, ElementUsage, FontSize,
    HorizontalAlignment, ImageFillMode, VerticalAlignment,
};
use serde::{Deserialize, Serialize};

/// A fully resolved element, ready for rasterization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DrawElement {
    Canvas(DrawCanvas),
    Group(DrawGroup),
    Image(DrawImage),
    Text(DrawText),
    Box(DrawBox),
    Line(DrawLine),
}

impl DrawElement {
    pub fn id(&self) -> &str {
        match self {
            DrawElement::Canvas(e) => &e.id,
            DrawElement::Group(e) => &e.id,
            DrawElement::Image(e) => &e.id,
            DrawElement::Text(e) => &e.id,
            DrawElement::Box(e) => &e.id,
            DrawElement::Line(e) => &e.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            DrawElement::Canvas(_) => ElementKind::Canvas,
            DrawElement::Group(_) => ElementKind::Group,
            DrawElement::Image(_) => ElementKind::Image,
            DrawElement::Text(_) => ElementKind::Text,
            DrawElement::Box(_) => ElementKind::Box,
            DrawElement::Line(_) => ElementKind::Line,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            DrawElement::Canvas(e) => e.enabled,
            DrawElement::Group(e) => e.enabled,
            DrawElement::Image(e) => e.enabled,
            DrawElement::Text(e) => e.enabled,
            DrawElement::Box(e) => e.enabled,
            DrawElement::Line(e) => e.enabled,
        }
    }

    /// Visit this element and all of its descendants depth-first, in paint order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a DrawElement)) {
        f(self);
        if let DrawElement::Group(group) = self {
            for child in &group.children {
                child.walk(f);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawCanvas {
    pub id: String,
    pub usage: ElementUsage,
    pub enabled: bool,
    pub decoration: CanvasDecoration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawGroup {
    pub id: String,
    pub usage: ElementUsage,
    pub enabled: bool,
    /// 0..1
    pub opacity: f64,
    pub bounds: DrawBounds,
    pub children: Vec<DrawElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawImage {
    pub id: String,
    pub usage: ElementUsage,
    pub enabled: bool,
    pub opacity: f64,
    pub bounds: DrawBounds,
    /// Data URL of the image, if any.
    pub base64_image: Option<String>,
    pub halign: HorizontalAlignment,
    pub valign: VerticalAlignment,
    pub fill_mode: ImageFillMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawText {
    pub id: String,
    pub usage: ElementUsage,
    pub enabled: bool,
    pub opacity: f64,
    pub bounds: DrawBounds,
    pub text: String,
    #[serde(rename = "fontsize")]
    pub font_size: FontSize,
    pub color: Color,
    pub halign: HorizontalAlignment,
    pub valign: VerticalAlignment,
    pub outline_color: Color,
}

/// Resolved stroke settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawBorder {
    /// Fraction of the element size.
    pub width: f64,
    pub color: Color,
    pub position: BorderPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawBox {
    pub id: String,
    pub usage: ElementUsage,
    pub enabled: bool,
    pub opacity: f64,
    pub bounds: DrawBounds,
    pub color: Color,
    pub border: DrawBorder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawLine {
    pub id: String,
    pub usage: ElementUsage,
    pub enabled: bool,
    pub opacity: f64,
    pub from_x: f64,
    pub from_y: f64,
    pub to_x: f64,
    pub to_y: f64,
    pub border: DrawBorder,
}
