//! Slatepad Core Library
//!
//! Platform-agnostic document model, input handling, history and autosave
//! for the Slatepad whiteboard.

pub mod canvas;
pub mod config;
pub mod document;
pub mod editor;
pub mod elements;
pub mod error;
pub mod history;
pub mod input;
pub mod pages;
pub mod render;
pub mod storage;
pub mod tools;

pub use canvas::{Canvas, CanvasResponse};
pub use config::EditorConfig;
pub use document::{WhiteboardDocument, WhiteboardPage};
pub use editor::{Editor, EditorEvent, PendingAction, UnsavedChoice};
pub use elements::{DrawingElement, ElementKind, ElementStyle};
pub use error::{EditorError, EditorResult, ValidationError};
pub use history::{HistoryError, HistoryStack};
pub use input::{Command, KeyEvent, Modifiers, PointerEvent, ShortcutRegistry};
pub use pages::PageCollection;
pub use render::Surface;
pub use storage::{Drawing, DrawingStore, MemoryStore, StorageError};
pub use tools::{ToolKind, ToolManager};
