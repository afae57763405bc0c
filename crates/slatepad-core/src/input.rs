//! Pointer and keyboard events, and the keyboard shortcut table.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS. Either counts.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// The pointer left the canvas.
    Leave,
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Key name as reported by the host (`"ArrowLeft"`, `"s"`, ...).
    pub key: String,
    pub modifiers: Modifiers,
    /// Focus is inside a text field; shortcuts are suppressed.
    pub in_text_input: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            in_text_input: false,
        }
    }

    /// Same key, flagged as typed into a text field.
    pub fn in_text_input(mut self) -> Self {
        self.in_text_input = true;
        self
    }
}

/// Editor commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    PreviousPage,
    NextPage,
    AddPage,
    OpenSaveDialog,
    Undo,
    Redo,
}

/// A keyboard shortcut definition. All shortcuts need Ctrl or Cmd.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub shift: bool,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        shift: bool,
        command: Command,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            shift,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = vec!["Ctrl"];
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        event.modifiers.command()
            && event.modifiers.shift == self.shift
            && event.key.eq_ignore_ascii_case(self.key)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> &'static [Shortcut] {
        const SHORTCUTS: &[Shortcut] = &[
            Shortcut::new("ArrowLeft", false, Command::PreviousPage, "Previous page"),
            Shortcut::new("ArrowRight", false, Command::NextPage, "Next page"),
            Shortcut::new("N", false, Command::AddPage, "Add page"),
            Shortcut::new("S", false, Command::OpenSaveDialog, "Save drawing"),
            Shortcut::new("Z", false, Command::Undo, "Undo"),
            Shortcut::new("Z", true, Command::Redo, "Redo"),
            Shortcut::new("Y", false, Command::Redo, "Redo"),
        ];
        SHORTCUTS
    }

    /// Resolve a key press to a command, if any.
    pub fn lookup(event: &KeyEvent) -> Option<Command> {
        if event.in_text_input {
            return None;
        }
        Self::all()
            .iter()
            .find(|s| s.matches(event))
            .map(|s| s.command)
    }
}
