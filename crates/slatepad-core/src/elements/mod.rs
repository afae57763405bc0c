//! Drawable element definitions for the whiteboard.
//!
//! Elements are plain values: once built they are only ever replaced, never
//! edited in place. Construction goes through the validating constructors on
//! [`DrawingElement`], which reject degenerate input before it can reach a
//! page.

mod circle;
mod path;
mod rectangle;
mod style;
mod text;

pub use circle::CircleData;
pub use path::{MIN_PATH_POINTS, PathData};
pub use rectangle::RectangleData;
pub use style::{DEFAULT_COLOR, DEFAULT_STROKE_WIDTH, ElementStyle, parse_color};
pub use text::{FONT_SIZE_PER_STROKE_WIDTH, TextData};

use crate::error::ValidationError;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
///
/// Kept as a string so records written by older clients (which used
/// timestamps) still load.
pub type ElementId = String;

/// Placeholder for a coordinate absent from a stored record.
///
/// Missing numbers load as NaN so the element is kept but never drawn, and
/// are left out again when the element is written back.
pub(crate) fn missing_coordinate() -> f64 {
    f64::NAN
}

pub(crate) fn is_missing(value: &f64) -> bool {
    value.is_nan()
}

/// Generate a fresh element identifier.
pub fn new_element_id() -> ElementId {
    Uuid::new_v4().to_string()
}

/// Element discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Path,
    Text,
    Rectangle,
    Circle,
}

/// Shape kinds created by dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

/// Variant-specific payload, serialized as `"type"` + `"data"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ElementShape {
    Path(PathData),
    Text(TextData),
    Rectangle(RectangleData),
    Circle(CircleData),
}

impl ElementShape {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementShape::Path(_) => ElementKind::Path,
            ElementShape::Text(_) => ElementKind::Text,
            ElementShape::Rectangle(_) => ElementKind::Rectangle,
            ElementShape::Circle(_) => ElementKind::Circle,
        }
    }

    /// Whether the payload carries everything a renderer needs.
    pub fn is_drawable(&self) -> bool {
        match self {
            ElementShape::Path(p) => {
                p.len() >= MIN_PATH_POINTS
                    && p.points.iter().all(|pt| pt.x.is_finite() && pt.y.is_finite())
            }
            ElementShape::Text(t) => !t.text.is_empty() && t.x.is_finite() && t.y.is_finite(),
            ElementShape::Rectangle(r) => r.is_well_formed(),
            ElementShape::Circle(c) => c.is_well_formed(),
        }
    }
}

/// A single element on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingElement {
    id: ElementId,
    #[serde(flatten)]
    shape: ElementShape,
    style: ElementStyle,
}

impl DrawingElement {
    /// Build a freehand path. Fewer than two points is rejected.
    pub fn path(points: Vec<Point>, style: ElementStyle) -> Result<Self, ValidationError> {
        if points.len() < MIN_PATH_POINTS {
            return Err(ValidationError::TooFewPoints(points.len()));
        }
        if !points.iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
            return Err(ValidationError::DegenerateGeometry("path point is not finite"));
        }
        Self::build(ElementShape::Path(PathData::new(points)), style)
    }

    /// Build a drag-created shape from the drag anchor and release point.
    ///
    /// Rectangles are normalized so the origin is the min corner and the
    /// extent is never negative; circles are centred on the anchor.
    pub fn from_drag(
        kind: ShapeKind,
        anchor: Point,
        release: Point,
        style: ElementStyle,
    ) -> Result<Self, ValidationError> {
        let shape = match kind {
            ShapeKind::Rectangle => {
                ElementShape::Rectangle(RectangleData::from_corners(anchor, release))
            }
            ShapeKind::Circle => ElementShape::Circle(CircleData::from_drag(anchor, release)),
        };
        if !shape.is_drawable() {
            return Err(ValidationError::DegenerateGeometry("shape coordinates are not finite"));
        }
        Self::build(shape, style)
    }

    /// Build a text element. Empty text is rejected.
    pub fn text(
        text: impl Into<String>,
        anchor: Point,
        style: ElementStyle,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        if !anchor.x.is_finite() || !anchor.y.is_finite() {
            return Err(ValidationError::DegenerateGeometry("text anchor is not finite"));
        }
        Self::build(ElementShape::Text(TextData::new(text, anchor)), style)
    }

    fn build(shape: ElementShape, style: ElementStyle) -> Result<Self, ValidationError> {
        style.validate()?;
        Ok(Self {
            id: new_element_id(),
            shape,
            style,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.shape.kind()
    }

    pub fn shape(&self) -> &ElementShape {
        &self.shape
    }

    pub fn style(&self) -> &ElementStyle {
        &self.style
    }

    /// Path payload, if this is a path.
    pub fn as_path(&self) -> Option<&PathData> {
        match &self.shape {
            ElementShape::Path(p) => Some(p),
            _ => None,
        }
    }

    /// Whether the eraser at `point` with the given radius removes this element.
    ///
    /// Only paths are erasable.
    pub fn is_erased_by(&self, point: Point, radius: f64) -> bool {
        self.as_path()
            .is_some_and(|p| p.has_point_within(point, radius))
    }
}
