//! Rendering contract: anything that can paint primitives can display a page.

use crate::elements::{DrawingElement, ElementShape, ElementStyle, TextData};
use kurbo::{BezPath, Circle, Point, Rect};
use peniko::Color;

/// Resolved paint for one element.
#[derive(Debug, Clone, Copy)]
pub struct Paint {
    pub stroke: Color,
    pub stroke_width: f64,
    pub fill: Option<Color>,
}

impl From<&ElementStyle> for Paint {
    fn from(style: &ElementStyle) -> Self {
        Self {
            stroke: style.stroke(),
            stroke_width: style.stroke_width,
            fill: style.fill(),
        }
    }
}

/// A 2D drawing target.
pub trait Surface {
    /// Erase everything.
    fn clear(&mut self);

    /// Stroke an open polyline.
    fn draw_path(&mut self, path: &BezPath, paint: &Paint);

    /// Stroke (and optionally fill) a rectangle.
    fn draw_rect(&mut self, rect: Rect, paint: &Paint);

    /// Stroke (and optionally fill) a circle.
    fn draw_circle(&mut self, circle: Circle, paint: &Paint);

    /// Draw text with its baseline-left corner at `anchor`.
    fn draw_text(&mut self, text: &str, anchor: Point, font_size: f64, color: Color);
}

/// Paint one element. Elements missing required data are skipped.
pub fn render_element<S: Surface + ?Sized>(surface: &mut S, element: &DrawingElement) {
    let shape = element.shape();
    if !shape.is_drawable() {
        log::debug!("Skipping undrawable {:?} element {}", shape.kind(), element.id());
        return;
    }

    let paint = Paint::from(element.style());
    match shape {
        ElementShape::Path(path) => surface.draw_path(&path.to_path(), &paint),
        ElementShape::Rectangle(rect) => surface.draw_rect(rect.as_rect(), &paint),
        ElementShape::Circle(circle) => surface.draw_circle(circle.as_circle(), &paint),
        ElementShape::Text(text) => surface.draw_text(
            &text.text,
            text.anchor(),
            TextData::font_size(paint.stroke_width),
            paint.stroke,
        ),
    }
}

/// Full redraw: clear, paint committed elements back to front, then the
/// in-progress preview on top.
pub fn render_page<S: Surface + ?Sized>(
    surface: &mut S,
    elements: &[DrawingElement],
    preview: Option<&DrawingElement>,
) {
    surface.clear();
    for element in elements {
        render_element(surface, element);
    }
    if let Some(preview) = preview {
        render_element(surface, preview);
    }
}
