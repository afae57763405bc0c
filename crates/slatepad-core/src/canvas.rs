//! Canvas: owns the pages, the history and the tool state for one document.

use crate::document::WhiteboardDocument;
use crate::elements::DrawingElement;
use crate::history::{HistoryError, HistoryStack};
use crate::input::PointerEvent;
use crate::pages::PageCollection;
use crate::render::{Surface, render_page};
use crate::tools::{ToolAction, ToolKind, ToolManager};
use kurbo::Point;

/// Outcome of feeding an event to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasResponse {
    /// Nothing visible changed.
    Ignored,
    /// Only the live preview changed.
    Repaint,
    /// The document was mutated.
    Changed,
    /// The host should ask the user for text, then call [`Canvas::submit_text`].
    TextRequested { anchor: Point },
}

/// Runtime canvas state.
#[derive(Debug, Clone)]
pub struct Canvas {
    pages: PageCollection,
    history: HistoryStack,
    /// Tool manager.
    pub tool_manager: ToolManager,
    /// Bumped on every document mutation.
    revision: u64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a canvas with a single empty page and unbounded history.
    pub fn new() -> Self {
        Self::with_history(HistoryStack::new())
    }

    /// Create an empty canvas using the given history.
    pub fn with_history(history: HistoryStack) -> Self {
        Self {
            pages: PageCollection::new(),
            history,
            tool_manager: ToolManager::new(),
            revision: 0,
        }
    }

    /// Create a canvas with an existing document.
    pub fn with_document(document: WhiteboardDocument) -> Self {
        let mut canvas = Self::new();
        canvas.pages = PageCollection::from_document(document);
        canvas
    }

    pub fn pages(&self) -> &PageCollection {
        &self.pages
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Detached copy of the current document.
    pub fn document(&self) -> WhiteboardDocument {
        self.pages.to_document()
    }

    pub fn has_content(&self) -> bool {
        self.pages.has_content()
    }

    /// Switch to another document. History is dropped.
    pub fn load_document(&mut self, document: WhiteboardDocument) {
        self.tool_manager.cancel();
        self.pages = PageCollection::from_document(document);
        self.history.clear();
        self.revision += 1;
    }

    /// Start over with a single empty page.
    pub fn clear(&mut self) {
        self.load_document(WhiteboardDocument::new());
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool_manager.set_tool(tool);
    }

    /// Feed a pointer event through the active tool.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> CanvasResponse {
        let action = match event {
            PointerEvent::Down { position } => self.tool_manager.begin(position),
            PointerEvent::Move { position } => self.tool_manager.update(position),
            PointerEvent::Up { position } => self.tool_manager.end(position),
            PointerEvent::Leave => {
                return if self.tool_manager.abort_drag() {
                    CanvasResponse::Repaint
                } else {
                    CanvasResponse::Ignored
                };
            }
        };
        self.apply(action)
    }

    /// Answer a pending text request. `None` cancels.
    pub fn submit_text(&mut self, text: Option<&str>) -> CanvasResponse {
        let action = self.tool_manager.submit_text(text);
        self.apply(action)
    }

    fn apply(&mut self, action: ToolAction) -> CanvasResponse {
        match action {
            ToolAction::None => CanvasResponse::Ignored,
            ToolAction::Preview => CanvasResponse::Repaint,
            ToolAction::Commit(element) => {
                self.commit(element);
                CanvasResponse::Changed
            }
            ToolAction::Erase { at, radius } => {
                if self.erase_at(at, radius) > 0 {
                    CanvasResponse::Changed
                } else {
                    CanvasResponse::Ignored
                }
            }
            ToolAction::RequestText { anchor } => CanvasResponse::TextRequested { anchor },
        }
    }

    /// Append an element to the current page, recording history first.
    pub fn commit(&mut self, element: DrawingElement) {
        self.history.save_state(self.pages.pages());
        self.pages.current_page_mut().push(element);
        self.revision += 1;
    }

    /// Remove every path on the current page with a point strictly within
    /// `radius` of `point`. History is only recorded when something goes.
    pub fn erase_at(&mut self, point: Point, radius: f64) -> usize {
        let hit = |e: &DrawingElement| e.is_erased_by(point, radius);
        if !self.pages.current_elements().iter().any(hit) {
            return 0;
        }
        self.history.save_state(self.pages.pages());
        let removed = self.pages.current_page_mut().remove_where(hit);
        self.revision += 1;
        log::debug!("Erased {} element(s)", removed);
        removed
    }

    pub fn undo(&mut self) -> Result<(), HistoryError> {
        self.tool_manager.cancel();
        let previous = self.history.undo(self.pages.pages())?;
        self.pages.replace_pages(previous);
        self.revision += 1;
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), HistoryError> {
        self.tool_manager.cancel();
        let next = self.history.redo(self.pages.pages())?;
        self.pages.replace_pages(next);
        self.revision += 1;
        Ok(())
    }

    /// Append an empty page and select it.
    pub fn add_page(&mut self) -> usize {
        self.tool_manager.cancel();
        self.revision += 1;
        self.pages.add_page()
    }

    /// Delete a page. Refused when it is the only one.
    pub fn delete_page(&mut self, index: usize) -> bool {
        self.tool_manager.cancel();
        let removed = self.pages.delete_page(index);
        if removed {
            self.revision += 1;
        }
        removed
    }

    pub fn go_to_page(&mut self, index: usize) -> bool {
        self.tool_manager.cancel();
        self.pages.go_to_page(index)
    }

    pub fn go_to_previous(&mut self) -> bool {
        self.tool_manager.cancel();
        self.pages.go_to_previous()
    }

    pub fn go_to_next(&mut self) -> bool {
        self.tool_manager.cancel();
        self.pages.go_to_next()
    }

    /// Repaint the current page, including any live preview.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let preview = self.tool_manager.preview_element();
        render_page(surface, self.pages.current_elements(), preview.as_ref());
    }
}
