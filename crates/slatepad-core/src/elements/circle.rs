//! Circle payload.

use kurbo::{Circle, Point};
use serde::{Deserialize, Serialize};

/// A circle stored as centre plus radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleData {
    /// Centre x.
    #[serde(default = "super::missing_coordinate", skip_serializing_if = "super::is_missing")]
    pub x: f64,
    /// Centre y.
    #[serde(default = "super::missing_coordinate", skip_serializing_if = "super::is_missing")]
    pub y: f64,
    /// Radius (never negative).
    #[serde(default = "super::missing_coordinate", skip_serializing_if = "super::is_missing")]
    pub radius: f64,
}

impl CircleData {
    /// Create a circle from centre and radius.
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    /// Circle centred on the drag anchor passing through the release point.
    pub fn from_drag(center: Point, edge: Point) -> Self {
        Self::new(center.x, center.y, center.distance(edge))
    }

    /// Centre point.
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Get as a kurbo Circle.
    pub fn as_circle(&self) -> Circle {
        Circle::new(self.center(), self.radius)
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.radius.is_finite() && self.radius >= 0.0
    }
}
