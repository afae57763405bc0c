//! Per-element style.

use crate::error::ValidationError;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Default stroke colour for new elements.
pub const DEFAULT_COLOR: &str = "#000000";

/// Default stroke width for new elements.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Style properties carried by every element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    /// Stroke colour as a CSS hex string.
    pub color: String,
    /// Stroke width (always positive).
    pub stroke_width: f64,
    /// Optional fill colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            fill: None,
        }
    }
}

impl ElementStyle {
    /// Create a stroke-only style.
    pub fn new(color: impl Into<String>, stroke_width: f64) -> Self {
        Self {
            color: color.into(),
            stroke_width,
            fill: None,
        }
    }

    /// Builder-style fill colour.
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Reject styles that cannot be drawn.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ValidationError::DegenerateGeometry(
                "stroke width must be positive",
            ));
        }
        Ok(())
    }

    /// Get the stroke colour as a peniko Color.
    pub fn stroke(&self) -> Color {
        parse_color(&self.color)
    }

    /// Get the fill colour as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill.as_deref().map(parse_color)
    }
}

/// Parse a CSS hex colour (`#rgb`, `#rrggbb`, `#rrggbbaa`).
///
/// Anything unrecognised falls back to black; `transparent` maps to a fully
/// transparent colour.
pub fn parse_color(color: &str) -> Color {
    let color = color.trim();
    if color.eq_ignore_ascii_case("transparent") {
        return Color::from_rgba8(0, 0, 0, 0);
    }

    if let Some((r, g, b, a)) = color.strip_prefix('#').and_then(parse_hex) {
        return Color::from_rgba8(r, g, b, a);
    }

    Color::from_rgba8(0, 0, 0, 255)
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8, u8)> {
    let channel = |from: usize, to: usize| {
        hex.get(from..to)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
    };
    match hex.len() {
        // #rgb -> #rrggbb
        3 => Some((
            channel(0, 1)? * 17,
            channel(1, 2)? * 17,
            channel(2, 3)? * 17,
            255,
        )),
        6 => Some((channel(0, 2)?, channel(2, 4)?, channel(4, 6)?, 255)),
        8 => Some((
            channel(0, 2)?,
            channel(2, 4)?,
            channel(4, 6)?,
            channel(6, 8)?,
        )),
        _ => None,
    }
}
