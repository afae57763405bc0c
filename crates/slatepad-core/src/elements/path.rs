//! Freehand path payload.

use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// Minimum number of points for a path to be committed or drawn.
pub const MIN_PATH_POINTS: usize = 2;

/// An ordered polyline recorded from pointer movement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathData {
    /// Points in the order they were recorded.
    #[serde(default)]
    pub points: Vec<Point>,
}

impl PathData {
    /// Create from existing points.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether any recorded point lies strictly closer than `radius` to `point`.
    pub fn has_point_within(&self, point: Point, radius: f64) -> bool {
        self.points.iter().any(|p| p.distance(point) < radius)
    }

    /// Polyline as a kurbo path.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.points.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for point in iter {
                path.line_to(*point);
            }
        }
        path
    }
}
