//! Tool system: turns pointer gestures into element mutations.

use crate::elements::{DrawingElement, ElementStyle, ShapeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default eraser reach, as a multiple of the current stroke width.
pub const DEFAULT_ERASER_RADIUS_FACTOR: f64 = 5.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
    Text,
    Rectangle,
    Circle,
    Select,
}

impl ToolKind {
    /// All tools in palette order.
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Select,
        ToolKind::Pen,
        ToolKind::Eraser,
        ToolKind::Text,
        ToolKind::Rectangle,
        ToolKind::Circle,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen",
            ToolKind::Eraser => "Eraser",
            ToolKind::Text => "Text",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Select => "Select",
        }
    }

    fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Circle => Some(ShapeKind::Circle),
            _ => None,
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolState {
    /// Waiting for a pointer-down.
    #[default]
    Idle,
    /// A drag is in progress.
    Drawing {
        /// Where the pointer went down.
        anchor: Point,
        /// Latest pointer position.
        current: Point,
    },
    /// The text tool asked the host for content and is waiting for the answer.
    AwaitingText {
        anchor: Point,
    },
}

/// What the canvas should do in response to a tool step.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolAction {
    /// Nothing durable happened.
    None,
    /// The live preview changed; repaint, but the element list is untouched.
    Preview,
    /// Append this element to the current page.
    Commit(DrawingElement),
    /// Remove every path with a point strictly within `radius` of `at`.
    Erase { at: Point, radius: f64 },
    /// Ask the host for text to place at `anchor`.
    RequestText { anchor: Point },
}

/// Manages the current tool, its style and its gesture state.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    current_tool: ToolKind,
    /// Current state of the tool.
    state: ToolState,
    /// Points accumulated by the pen during the current drag.
    path_points: Vec<Point>,
    /// Style applied to new elements.
    pub current_style: ElementStyle,
    /// Eraser reach as a multiple of the stroke width.
    pub eraser_radius_factor: f64,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            state: ToolState::default(),
            path_points: Vec::new(),
            current_style: ElementStyle::default(),
            eraser_radius_factor: DEFAULT_ERASER_RADIUS_FACTOR,
        }
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_tool(&self) -> ToolKind {
        self.current_tool
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    /// Set the current tool. Any gesture in progress is abandoned.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.cancel();
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.current_style.color = color.into();
    }

    /// Set the stroke width; non-positive or non-finite widths are ignored.
    pub fn set_stroke_width(&mut self, width: f64) -> bool {
        if !width.is_finite() || width <= 0.0 {
            return false;
        }
        self.current_style.stroke_width = width;
        true
    }

    /// Radius within which the eraser removes paths.
    pub fn eraser_radius(&self) -> f64 {
        self.current_style.stroke_width * self.eraser_radius_factor
    }

    /// Pointer went down.
    pub fn begin(&mut self, point: Point) -> ToolAction {
        self.path_points.clear();

        match self.current_tool {
            ToolKind::Text => {
                self.state = ToolState::AwaitingText { anchor: point };
                ToolAction::RequestText { anchor: point }
            }
            tool => {
                if tool == ToolKind::Pen {
                    self.path_points.push(point);
                }
                self.state = ToolState::Drawing {
                    anchor: point,
                    current: point,
                };
                ToolAction::None
            }
        }
    }

    /// Pointer moved.
    pub fn update(&mut self, point: Point) -> ToolAction {
        let ToolState::Drawing { current, .. } = &mut self.state else {
            return ToolAction::None;
        };
        *current = point;

        match self.current_tool {
            ToolKind::Pen => {
                self.path_points.push(point);
                ToolAction::Preview
            }
            ToolKind::Eraser => ToolAction::Erase {
                at: point,
                radius: self.eraser_radius(),
            },
            ToolKind::Rectangle | ToolKind::Circle => ToolAction::Preview,
            ToolKind::Text | ToolKind::Select => ToolAction::None,
        }
    }

    /// Pointer released: finish the gesture and return any created element.
    pub fn end(&mut self, point: Point) -> ToolAction {
        let ToolState::Drawing { anchor, .. } = self.state else {
            return ToolAction::None;
        };
        self.state = ToolState::Idle;
        let points = std::mem::take(&mut self.path_points);

        let created = match self.current_tool {
            // A bare click (no movement) is discarded.
            ToolKind::Pen if points.len() >= 2 => {
                let mut points = points;
                points.push(point);
                DrawingElement::path(points, self.current_style.clone())
            }
            tool => match tool.shape_kind() {
                Some(kind) => {
                    DrawingElement::from_drag(kind, anchor, point, self.current_style.clone())
                }
                None => return ToolAction::None,
            },
        };

        match created {
            Ok(element) => ToolAction::Commit(element),
            Err(e) => {
                log::debug!("Discarding {} gesture: {}", self.current_tool.name(), e);
                ToolAction::None
            }
        }
    }

    /// Abort the gesture without committing anything.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
        self.path_points.clear();
    }

    /// Pointer left the surface: drop an in-progress drag. A pending text
    /// request survives, since the host's text prompt usually takes focus.
    /// Returns whether a drag was dropped.
    pub fn abort_drag(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.cancel();
        true
    }

    /// Resolve a pending text request. `None` or empty text cancels.
    pub fn submit_text(&mut self, text: Option<&str>) -> ToolAction {
        let ToolState::AwaitingText { anchor } = self.state else {
            return ToolAction::None;
        };
        self.state = ToolState::Idle;

        match text.filter(|t| !t.is_empty()) {
            Some(text) => match DrawingElement::text(text, anchor, self.current_style.clone()) {
                Ok(element) => ToolAction::Commit(element),
                Err(e) => {
                    log::debug!("Discarding text: {}", e);
                    ToolAction::None
                }
            },
            None => ToolAction::None,
        }
    }

    /// Check if a drag is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Drawing { .. })
    }

    /// Check if the text tool is waiting for content.
    pub fn is_awaiting_text(&self) -> bool {
        matches!(self.state, ToolState::AwaitingText { .. })
    }

    /// Points recorded by the pen so far.
    pub fn path_points(&self) -> &[Point] {
        &self.path_points
    }

    /// The in-progress element, for live rendering only. Never part of a page.
    pub fn preview_element(&self) -> Option<DrawingElement> {
        let ToolState::Drawing { anchor, current } = self.state else {
            return None;
        };
        let style = self.current_style.clone();
        match self.current_tool {
            ToolKind::Pen => DrawingElement::path(self.path_points.clone(), style).ok(),
            tool => tool
                .shape_kind()
                .and_then(|kind| DrawingElement::from_drag(kind, anchor, current, style).ok()),
        }
    }
}
