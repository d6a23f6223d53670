//! Element tree resolution.
//!
//! Walks an authored element tree and produces the matching draw tree.
//! Sibling elements are resolved concurrently; the output keeps paint order.

use crate::capabilities::{ExpressionEvaluator, PixelBufferDecoder, PixelBufferDescriptor};
use crate::property::PropertyResolver;
use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use indexmap::IndexSet;
use keycap_core::{
    BorderPosition, BorderProperties, CanvasDecoration, DrawBorder, DrawBounds, DrawBox,
    DrawCanvas, DrawElement, DrawGroup, DrawImage, DrawLine, DrawText, ElementBounds,
    FeedbackOverrides, FontSize, GraphicsElement, ImageElement, ImageFillMode, UsedVariables,
    VariableValue,
};
use tracing::{debug, trace, warn};

/// Percentages are authored 0..100 and drawn as 0..1.
const PERCENT: f64 = 0.01;

/// Resolution configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Omit disabled elements (and their subtrees) instead of resolving them.
    pub only_enabled: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self { only_enabled: true }
    }
}

/// Output of one resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedElements {
    pub elements: Vec<DrawElement>,
    /// Every variable referenced while resolving, including by failed expressions.
    pub used_variables: IndexSet<String>,
}

/// Resolve an element tree into draw elements.
///
/// Never fails: every property that cannot be resolved takes its default.
pub async fn resolve_elements(
    elements: &[GraphicsElement],
    overrides: &FeedbackOverrides,
    evaluator: &dyn ExpressionEvaluator,
    decoder: &dyn PixelBufferDecoder,
    options: ResolveOptions,
) -> ResolvedElements {
    let used = UsedVariables::new();
    let resolver = ElementResolver {
        evaluator,
        decoder,
        overrides,
        options,
        used: &used,
    };
    let elements = resolver.resolve_list(elements).await;
    debug!(
        elements = elements.len(),
        variables = used.len(),
        "resolved element tree"
    );

    ResolvedElements {
        elements,
        used_variables: used.into_set(),
    }
}

struct ElementResolver<'a> {
    evaluator: &'a dyn ExpressionEvaluator,
    decoder: &'a dyn PixelBufferDecoder,
    overrides: &'a FeedbackOverrides,
    options: ResolveOptions,
    used: &'a UsedVariables,
}

impl<'a> ElementResolver<'a> {
    fn resolve_list<'b>(&'b self, elements: &'b [GraphicsElement]) -> BoxFuture<'b, Vec<DrawElement>> {
        async move {
            join_all(elements.iter().map(|element| self.resolve_element(element)))
                .await
                .into_iter()
                .flatten()
                .collect()
        }
        .boxed()
    }

    async fn resolve_element(&self, element: &GraphicsElement) -> Option<DrawElement> {
        let id = element.id();
        let props = PropertyResolver::new(self.evaluator, self.used, id, self.overrides);

        let enabled = props.boolean("enabled", element.enabled(), true);
        if !enabled && self.options.only_enabled {
            trace!(element = id, kind = %element.kind(), "skipping disabled element");
            return None;
        }

        let resolved = match element {
            GraphicsElement::Canvas(canvas) => DrawElement::Canvas(DrawCanvas {
                id: canvas.id.clone(),
                usage: canvas.usage,
                enabled,
                decoration: props.enumeration(
                    "decoration",
                    &canvas.decoration,
                    CanvasDecoration::FollowDefault,
                ),
            }),
            GraphicsElement::Group(group) => {
                let opacity = props.number("opacity", &group.opacity, 1.0, PERCENT);
                let bounds = resolve_bounds(&props, &group.bounds);
                let children = self.resolve_list(&group.children).await;
                DrawElement::Group(DrawGroup {
                    id: group.id.clone(),
                    usage: group.usage,
                    enabled,
                    opacity,
                    bounds,
                    children,
                })
            }
            GraphicsElement::Image(image) => {
                let opacity = props.number("opacity", &image.opacity, 1.0, PERCENT);
                let bounds = resolve_bounds(&props, &image.bounds);
                let base64_image = self.resolve_image_data(&props, image).await;
                DrawElement::Image(DrawImage {
                    id: image.id.clone(),
                    usage: image.usage,
                    enabled,
                    opacity,
                    bounds,
                    base64_image,
                    halign: props.horizontal_alignment("halign", &image.halign),
                    valign: props.vertical_alignment("valign", &image.valign),
                    fill_mode: props.enumeration(
                        "fillMode",
                        &image.fill_mode,
                        ImageFillMode::FitOrShrink,
                    ),
                })
            }
            GraphicsElement::Text(text) => {
                let opacity = props.number("opacity", &text.opacity, 1.0, PERCENT);
                let bounds = resolve_bounds(&props, &text.bounds);
                let auto = FontSize::Auto.to_value();
                DrawElement::Text(DrawText {
                    id: text.id.clone(),
                    usage: text.usage,
                    enabled,
                    opacity,
                    bounds,
                    text: props.draw_text("text", &text.text),
                    font_size: FontSize::from_value(&props.unknown(
                        "fontsize",
                        &text.font_size,
                        auto,
                    )),
                    color: props.color("color", &text.color, 0xffffff),
                    halign: props.horizontal_alignment("halign", &text.halign),
                    valign: props.vertical_alignment("valign", &text.valign),
                    outline_color: props.color("outlineColor", &text.outline_color, 0xff000000),
                })
            }
            GraphicsElement::Box(b) => {
                let opacity = props.number("opacity", &b.opacity, 1.0, PERCENT);
                let bounds = resolve_bounds(&props, &b.bounds);
                DrawElement::Box(DrawBox {
                    id: b.id.clone(),
                    usage: b.usage,
                    enabled,
                    opacity,
                    bounds,
                    color: props.color("color", &b.color, 0x000000),
                    border: resolve_border(&props, &b.border),
                })
            }
            GraphicsElement::Line(line) => {
                let opacity = props.number("opacity", &line.opacity, 1.0, PERCENT);
                DrawElement::Line(DrawLine {
                    id: line.id.clone(),
                    usage: line.usage,
                    enabled,
                    opacity,
                    from_x: props.number("fromX", &line.from_x, 0.0, 1.0),
                    from_y: props.number("fromY", &line.from_y, 0.0, 1.0),
                    to_x: props.number("toX", &line.to_x, 100.0, 1.0),
                    to_y: props.number("toY", &line.to_y, 100.0, 1.0),
                    border: resolve_border(&props, &line.border),
                })
            }
        };

        Some(resolved)
    }

    /// A data URL, or legacy pixel buffers decoded into one.
    async fn resolve_image_data(
        &self,
        props: &PropertyResolver<'_>,
        image: &ImageElement,
    ) -> Option<String> {
        match props.unknown("base64Image", &image.base64_image, VariableValue::Null) {
            VariableValue::String(data) if !data.is_empty() => Some(data),
            value @ VariableValue::Array(_) => {
                let buffers: Vec<PixelBufferDescriptor> = match serde_json::from_value(value) {
                    Ok(buffers) => buffers,
                    Err(error) => {
                        debug!(element = %image.id, %error, "image value is not a pixel buffer list");
                        return None;
                    }
                };
                match self.decoder.decode(&buffers).await {
                    Ok(data) => data,
                    Err(error) => {
                        warn!(element = %image.id, %error, "failed to decode pixel buffers");
                        None
                    }
                }
            }
            _ => None,
        }
    }
}

fn resolve_bounds(props: &PropertyResolver<'_>, bounds: &ElementBounds) -> DrawBounds {
    DrawBounds {
        x: props.number("x", &bounds.x, 0.0, PERCENT),
        y: props.number("y", &bounds.y, 0.0, PERCENT),
        width: props.number("width", &bounds.width, 1.0, PERCENT),
        height: props.number("height", &bounds.height, 1.0, PERCENT),
    }
}

fn resolve_border(props: &PropertyResolver<'_>, border: &BorderProperties) -> DrawBorder {
    DrawBorder {
        width: props.number("borderWidth", &border.border_width, 0.0, PERCENT),
        color: props.color("borderColor", &border.border_color, 0x000000),
        position: props.enumeration(
            "borderPosition",
            &border.border_position,
            BorderPosition::Inside,
        ),
    }
}
