//! Pages, documents and their persisted text form.

use crate::elements::DrawingElement;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for pages.
pub type PageId = String;

/// Errors reading a persisted document payload.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid drawing data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Drawing has no pages")]
    NoPages,
}

/// A single page: an ordered element list (z-order = insertion order).
///
/// The element list is shared copy-on-write: cloning a page (for a history
/// snapshot) is cheap, and any edit replaces the list rather than touching a
/// list another snapshot can see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhiteboardPage {
    pub id: PageId,
    elements: Arc<Vec<DrawingElement>>,
}

impl Default for WhiteboardPage {
    fn default() -> Self {
        Self::new()
    }
}

impl WhiteboardPage {
    /// Create an empty page with a fresh id.
    pub fn new() -> Self {
        Self::with_elements(Vec::new())
    }

    /// Create a page holding the given elements.
    pub fn with_elements(elements: Vec<DrawingElement>) -> Self {
        Self {
            id: format!("page-{}", Uuid::new_v4()),
            elements: Arc::new(elements),
        }
    }

    /// Elements in z-order (back to front).
    pub fn elements(&self) -> &[DrawingElement] {
        &self.elements
    }

    /// Append an element to the end of the z-order.
    pub(crate) fn push(&mut self, element: DrawingElement) {
        Arc::make_mut(&mut self.elements).push(element);
    }

    /// Remove every element matching `predicate`. Returns how many were removed.
    pub(crate) fn remove_where(&mut self, predicate: impl Fn(&DrawingElement) -> bool) -> usize {
        if !self.elements.iter().any(&predicate) {
            return 0;
        }
        let before = self.elements.len();
        Arc::make_mut(&mut self.elements).retain(|e| !predicate(e));
        before - self.elements.len()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether two pages share the same element list allocation.
    pub fn shares_elements_with(&self, other: &WhiteboardPage) -> bool {
        Arc::ptr_eq(&self.elements, &other.elements)
    }
}

/// A complete multi-page document. Always holds at least one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhiteboardDocument {
    pages: Vec<WhiteboardPage>,
}

impl Default for WhiteboardDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Accepted persisted shapes: the current `{ "pages": [...] }` form, or a
/// bare element array written before multi-page support.
#[derive(Deserialize)]
#[serde(untagged)]
enum PersistedPayload {
    Document { pages: Vec<WhiteboardPage> },
    Legacy(Vec<DrawingElement>),
}

impl WhiteboardDocument {
    /// Create a document with a single empty page.
    pub fn new() -> Self {
        Self {
            pages: vec![WhiteboardPage::new()],
        }
    }

    /// Build from a page list. An empty list is rejected.
    pub fn from_pages(pages: Vec<WhiteboardPage>) -> Result<Self, DocumentError> {
        if pages.is_empty() {
            return Err(DocumentError::NoPages);
        }
        Ok(Self { pages })
    }

    pub fn pages(&self) -> &[WhiteboardPage] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<WhiteboardPage> {
        self.pages
    }

    /// Whether any page holds at least one element.
    pub fn has_content(&self) -> bool {
        self.pages.iter().any(|p| !p.is_empty())
    }

    /// Serialize to the persisted JSON text.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse persisted JSON text, accepting the legacy element-array form.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        match serde_json::from_str::<PersistedPayload>(json)? {
            PersistedPayload::Document { pages } => Self::from_pages(pages),
            PersistedPayload::Legacy(elements) => Ok(Self {
                pages: vec![WhiteboardPage::with_elements(elements)],
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementKind, ElementStyle, ShapeKind};
    use kurbo::Point;

    fn rect() -> DrawingElement {
        DrawingElement::from_drag(
            ShapeKind::Rectangle,
            Point::new(10.0, 10.0),
            Point::new(60.0, 40.0),
            ElementStyle::default(),
        )
        .unwrap()
    }

    fn path() -> DrawingElement {
        DrawingElement::path(
            vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(9.0, 2.0)],
            ElementStyle::new("#ff0000", 4.0),
        )
        .unwrap()
    }

    #[test]
    fn test_new_document_has_one_empty_page() {
        let doc = WhiteboardDocument::new();
        assert_eq!(doc.pages().len(), 1);
        assert!(!doc.has_content());
    }

    #[test]
    fn test_round_trip() {
        let mut second = WhiteboardPage::new();
        second.push(path());
        let doc = WhiteboardDocument::from_pages(vec![
            WhiteboardPage::with_elements(vec![rect()]),
            second,
            WhiteboardPage::new(),
        ])
        .unwrap();

        let json = doc.to_json().unwrap();
        let loaded = WhiteboardDocument::from_json(&json).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_legacy_element_array_becomes_single_page() {
        let json = r##"[
            {"type":"path","id":"1","data":{"points":[{"x":0,"y":0},{"x":4,"y":4}]},"style":{"color":"#000000","strokeWidth":2}},
            {"type":"text","id":"2","data":{"text":"hello","x":5,"y":6},"style":{"color":"#000000","strokeWidth":2}}
        ]"##;
        let doc = WhiteboardDocument::from_json(json).unwrap();
        assert_eq!(doc.pages().len(), 1);
        let elements = doc.pages()[0].elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].kind(), ElementKind::Path);
        assert_eq!(elements[1].kind(), ElementKind::Text);
    }

    #[test]
    fn test_legacy_round_trip_preserves_elements() {
        let legacy = serde_json::to_string(&vec![rect(), path()]).unwrap();
        let doc = WhiteboardDocument::from_json(&legacy).unwrap();
        let reloaded = WhiteboardDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(reloaded, doc);
        assert_eq!(reloaded.pages()[0].len(), 2);
    }

    #[test]
    fn test_incomplete_shapes_load_but_are_not_drawable() {
        let json = r##"[
            {"type":"path","id":"1","data":{"points":[{"x":0,"y":0},{"x":4,"y":4}]},"style":{"color":"#000000","strokeWidth":2}},
            {"type":"rectangle","id":"2","data":{"x":1,"y":2},"style":{"color":"#000000","strokeWidth":2}},
            {"type":"circle","id":"3","data":{"radius":3},"style":{"color":"#000000","strokeWidth":2}},
            {"type":"text","id":"4","data":{"text":"hi"},"style":{"color":"#000000","strokeWidth":2}}
        ]"##;
        let doc = WhiteboardDocument::from_json(json).unwrap();
        let elements = doc.pages()[0].elements();
        assert_eq!(elements.len(), 4);
        let drawable: Vec<bool> = elements.iter().map(|e| e.shape().is_drawable()).collect();
        assert_eq!(drawable, vec![true, false, false, false]);

        let written = serde_json::to_value(&doc).unwrap();
        let rect = &written["pages"][0]["elements"][1]["data"];
        assert_eq!(rect["x"], 1.0);
        assert!(rect.get("width").is_none());

        let reloaded = WhiteboardDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.pages()[0].len(), 4);
    }

    #[test]
    fn test_empty_legacy_array_is_one_empty_page() {
        let doc = WhiteboardDocument::from_json("[]").unwrap();
        assert_eq!(doc.pages().len(), 1);
        assert!(!doc.has_content());
    }

    #[test]
    fn test_rejects_corrupt_payloads() {
        assert!(matches!(
            WhiteboardDocument::from_json("not json"),
            Err(DocumentError::Malformed(_))
        ));
        assert!(matches!(
            WhiteboardDocument::from_json(r#"{"pages":[]}"#),
            Err(DocumentError::NoPages)
        ));
        assert!(WhiteboardDocument::from_json(r#"{"shapes":{}}"#).is_err());
        assert!(WhiteboardDocument::from_json(r##"[{"type":"hexagon","id":"1","data":{},"style":{"color":"#000","strokeWidth":1}}]"##).is_err());
    }

    #[test]
    fn test_clone_shares_until_written() {
        let mut page = WhiteboardPage::with_elements(vec![rect()]);
        let snapshot = page.clone();
        assert!(page.shares_elements_with(&snapshot));

        page.push(path());
        assert!(!page.shares_elements_with(&snapshot));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(page.len(), 2);
    }

    #[test]
    fn test_remove_where() {
        let mut page = WhiteboardPage::with_elements(vec![rect(), path()]);
        let removed = page.remove_where(|e| e.kind() == ElementKind::Path);
        assert_eq!(removed, 1);
        assert_eq!(page.len(), 1);
        assert_eq!(page.remove_where(|e| e.kind() == ElementKind::Path), 0);
    }
}
