//! Text payload.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Ratio between a text element's stroke width and its font size.
pub const FONT_SIZE_PER_STROKE_WIDTH: f64 = 8.0;

/// A single line of text anchored at its baseline origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextData {
    #[serde(default)]
    pub text: String,
    #[serde(default = "super::missing_coordinate", skip_serializing_if = "super::is_missing")]
    pub x: f64,
    #[serde(default = "super::missing_coordinate", skip_serializing_if = "super::is_missing")]
    pub y: f64,
}

impl TextData {
    pub fn new(text: impl Into<String>, anchor: Point) -> Self {
        Self {
            text: text.into(),
            x: anchor.x,
            y: anchor.y,
        }
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Font size used when painting text with the given stroke width.
    pub fn font_size(stroke_width: f64) -> f64 {
        stroke_width * FONT_SIZE_PER_STROKE_WIDTH
    }
}
