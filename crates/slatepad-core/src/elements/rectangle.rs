//! Rectangle payload.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle stored as origin plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleData {
    /// Left edge.
    #[serde(default = "super::missing_coordinate", skip_serializing_if = "super::is_missing")]
    pub x: f64,
    /// Top edge.
    #[serde(default = "super::missing_coordinate", skip_serializing_if = "super::is_missing")]
    pub y: f64,
    /// Width (never negative).
    #[serde(default = "super::missing_coordinate", skip_serializing_if = "super::is_missing")]
    pub width: f64,
    /// Height (never negative).
    #[serde(default = "super::missing_coordinate", skip_serializing_if = "super::is_missing")]
    pub height: f64,
}

impl RectangleData {
    /// Create a rectangle from origin and extent.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two drag corners, in either order.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let min_x = p1.x.min(p2.x);
        let min_y = p1.y.min(p2.y);
        let width = (p2.x - p1.x).abs();
        let height = (p2.y - p1.y).abs();

        Self::new(min_x, min_y, width, height)
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}
