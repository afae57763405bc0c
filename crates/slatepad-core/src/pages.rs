//! Ordered page collection with a current-page cursor.

use crate::document::{WhiteboardDocument, WhiteboardPage};
use crate::elements::DrawingElement;

/// Owns the page sequence and which page is being edited.
///
/// Invariants: there is always at least one page, and `current` is always a
/// valid index.
#[derive(Debug, Clone)]
pub struct PageCollection {
    pages: Vec<WhiteboardPage>,
    current: usize,
}

impl Default for PageCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCollection {
    /// A single empty page.
    pub fn new() -> Self {
        Self::from_document(WhiteboardDocument::new())
    }

    /// Take over a document's pages, starting on the first page.
    pub fn from_document(document: WhiteboardDocument) -> Self {
        Self {
            pages: document.into_pages(),
            current: 0,
        }
    }

    /// Detached copy of the pages as a document.
    pub fn to_document(&self) -> WhiteboardDocument {
        // Non-empty by invariant.
        WhiteboardDocument::from_pages(self.pages.clone()).unwrap_or_default()
    }

    pub fn pages(&self) -> &[WhiteboardPage] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_page(&self) -> &WhiteboardPage {
        &self.pages[self.current]
    }

    pub(crate) fn current_page_mut(&mut self) -> &mut WhiteboardPage {
        &mut self.pages[self.current]
    }

    /// Elements of the current page in z-order.
    pub fn current_elements(&self) -> &[DrawingElement] {
        self.current_page().elements()
    }

    /// Whether any page holds at least one element.
    pub fn has_content(&self) -> bool {
        self.pages.iter().any(|p| !p.is_empty())
    }

    /// Append an empty page and select it. Returns the new index.
    pub fn add_page(&mut self) -> usize {
        let mut pages = self.pages.clone();
        pages.push(WhiteboardPage::new());
        self.pages = pages;
        self.current = self.pages.len() - 1;
        self.current
    }

    /// Delete the page at `index`. Refused when only one page remains or the
    /// index is out of range. Returns whether a page was removed.
    pub fn delete_page(&mut self, index: usize) -> bool {
        if self.pages.len() <= 1 || index >= self.pages.len() {
            return false;
        }
        let mut pages = self.pages.clone();
        pages.remove(index);
        self.pages = pages;
        self.clamp_current();
        true
    }

    /// Select the page at `index`. Out-of-range indices are ignored.
    pub fn go_to_page(&mut self, index: usize) -> bool {
        if index >= self.pages.len() || index == self.current {
            return false;
        }
        self.current = index;
        true
    }

    /// Select the previous page; stays put on the first page.
    pub fn go_to_previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Select the next page; stays put on the last page.
    pub fn go_to_next(&mut self) -> bool {
        if self.current + 1 >= self.pages.len() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current + 1 < self.pages.len()
    }

    /// Replace the whole page sequence (undo/redo). An empty sequence is
    /// replaced by a single empty page.
    pub fn replace_pages(&mut self, pages: Vec<WhiteboardPage>) {
        self.pages = if pages.is_empty() {
            vec![WhiteboardPage::new()]
        } else {
            pages
        };
        self.clamp_current();
    }

    fn clamp_current(&mut self) {
        self.current = self.current.min(self.pages.len() - 1);
    }
}
