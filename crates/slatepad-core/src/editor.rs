//! Editor session: one canvas, one drawing store, and the rules that keep
//! them in step.

use crate::canvas::{Canvas, CanvasResponse};
use crate::config::EditorConfig;
use crate::error::EditorResult;
use crate::history::{HistoryError, HistoryStack};
use crate::input::{Command, KeyEvent, PointerEvent, ShortcutRegistry};
use crate::render::Surface;
use crate::storage::{
    AutoSaveManager, AutosaveStep, BoundDrawing, Drawing, DrawingStore, SaveRequest, SaveStatus,
    StorageResult,
};
use crate::tools::ToolKind;
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// An action held back until the user decides what to do with unsaved work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    OpenDrawing(String),
    AddPage,
    NewDrawing,
}

/// Answer to the unsaved-changes prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsavedChoice {
    /// Save under this name, then carry on.
    Save { name: String },
    /// Drop the changes and carry on.
    Discard,
    /// Keep editing; the held action is dropped.
    Cancel,
}

/// What the host should do next.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Nothing to do.
    None,
    /// Repaint the canvas.
    Redraw,
    /// The current page changed. If an autosave was started, send it and
    /// always report back through [`Editor::complete_save`], even on failure;
    /// navigation does not wait.
    Navigated { autosave: Option<SaveRequest> },
    /// Ask the user for text at `anchor`, then call [`Editor::submit_text`].
    RequestText { anchor: kurbo::Point },
    /// Show the save dialog pre-filled with `initial_name`.
    ShowSaveDialog { initial_name: Option<String> },
    /// Show the save / discard / cancel prompt. Answer with
    /// [`Editor::resolve_unsaved`].
    ConfirmUnsaved(PendingAction),
}

/// Editing session over a drawing store.
pub struct Editor<S: DrawingStore> {
    canvas: Canvas,
    autosave: AutoSaveManager<S>,
    pending: Option<PendingAction>,
}

impl<S: DrawingStore> Editor<S> {
    /// Create an editor with default settings.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, &EditorConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: &EditorConfig) -> Self {
        let history = match config.history_limit {
            Some(limit) => HistoryStack::with_limit(limit),
            None => HistoryStack::new(),
        };
        let mut canvas = Canvas::with_history(history);
        canvas.tool_manager.current_style = config.default_stroke.clone();
        canvas.tool_manager.eraser_radius_factor = config.eraser_radius_factor;

        let mut autosave = AutoSaveManager::with_window(store, config.inactivity_window());
        autosave.set_max_name_len(config.max_name_len);

        Self {
            canvas,
            autosave,
            pending: None,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn autosave(&self) -> &AutoSaveManager<S> {
        &self.autosave
    }

    pub fn status(&self) -> SaveStatus {
        self.autosave.status()
    }

    pub fn bound(&self) -> Option<&BoundDrawing> {
        self.autosave.bound()
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.autosave.has_unsaved_changes(&self.canvas)
    }

    pub fn render<R: Surface + ?Sized>(&self, surface: &mut R) {
        self.canvas.render(surface);
    }

    pub fn set_tool(&mut self, tool: ToolKind, now: Instant) {
        self.canvas.set_tool(tool);
        self.autosave.record_activity(now);
    }

    pub fn set_color(&mut self, color: &str, now: Instant) {
        self.canvas.tool_manager.set_color(color);
        self.autosave.record_activity(now);
    }

    pub fn set_stroke_width(&mut self, width: f64, now: Instant) -> bool {
        let accepted = self.canvas.tool_manager.set_stroke_width(width);
        if accepted {
            self.autosave.record_activity(now);
        }
        accepted
    }

    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) -> EditorEvent {
        let response = self.canvas.handle_pointer(event);
        self.after_canvas(response, now)
    }

    /// Answer a text request. `None` cancels.
    pub fn submit_text(&mut self, text: Option<&str>, now: Instant) -> EditorEvent {
        let response = self.canvas.submit_text(text);
        self.after_canvas(response, now)
    }

    fn after_canvas(&mut self, response: CanvasResponse, now: Instant) -> EditorEvent {
        match response {
            CanvasResponse::Ignored => EditorEvent::None,
            CanvasResponse::Repaint => EditorEvent::Redraw,
            CanvasResponse::Changed => {
                self.autosave.record_activity(now);
                EditorEvent::Redraw
            }
            CanvasResponse::TextRequested { anchor } => EditorEvent::RequestText { anchor },
        }
    }

    pub fn undo(&mut self, now: Instant) -> Result<(), HistoryError> {
        self.canvas.undo()?;
        self.autosave.record_activity(now);
        Ok(())
    }

    pub fn redo(&mut self, now: Instant) -> Result<(), HistoryError> {
        self.canvas.redo()?;
        self.autosave.record_activity(now);
        Ok(())
    }

    /// Dispatch a keyboard shortcut.
    pub fn handle_key(&mut self, event: &KeyEvent, now: Instant) -> EditorEvent {
        let Some(command) = ShortcutRegistry::lookup(event) else {
            return EditorEvent::None;
        };
        log::debug!("Shortcut {:?}", command);

        match command {
            Command::PreviousPage => self.go_to_previous(now),
            Command::NextPage => self.go_to_next(now),
            Command::AddPage => self.add_page(now),
            Command::OpenSaveDialog => self.open_save_dialog(),
            Command::Undo => match self.undo(now) {
                Ok(()) => EditorEvent::Redraw,
                Err(_) => EditorEvent::None,
            },
            Command::Redo => match self.redo(now) {
                Ok(()) => EditorEvent::Redraw,
                Err(_) => EditorEvent::None,
            },
        }
    }

    pub fn go_to_previous(&mut self, now: Instant) -> EditorEvent {
        if !self.canvas.pages().can_go_previous() {
            return EditorEvent::None;
        }
        self.navigate(now, |canvas| {
            canvas.go_to_previous();
        })
    }

    pub fn go_to_next(&mut self, now: Instant) -> EditorEvent {
        if !self.canvas.pages().can_go_next() {
            return EditorEvent::None;
        }
        self.navigate(now, |canvas| {
            canvas.go_to_next();
        })
    }

    pub fn go_to_page(&mut self, index: usize, now: Instant) -> EditorEvent {
        let pages = self.canvas.pages();
        if index >= pages.len() || index == pages.current_index() {
            return EditorEvent::None;
        }
        self.navigate(now, |canvas| {
            canvas.go_to_page(index);
        })
    }

    /// Append a page and select it. Held back while an unsaved new drawing
    /// has content.
    pub fn add_page(&mut self, now: Instant) -> EditorEvent {
        if self.is_guarded(&PendingAction::AddPage) {
            return self.hold(PendingAction::AddPage);
        }
        self.navigate(now, |canvas| {
            canvas.add_page();
        })
    }

    /// Delete a page. Refused when it is the only one.
    pub fn delete_page(&mut self, index: usize, now: Instant) -> bool {
        let removed = self.canvas.delete_page(index);
        if removed {
            self.autosave.record_activity(now);
        }
        removed
    }

    /// Best-effort autosave of the page being left, then move.
    fn navigate(&mut self, now: Instant, apply: impl FnOnce(&mut Canvas)) -> EditorEvent {
        let autosave = self.autosave.begin_autosave(&self.canvas);
        apply(&mut self.canvas);
        self.autosave.record_activity(now);
        EditorEvent::Navigated { autosave }
    }

    pub fn open_save_dialog(&self) -> EditorEvent {
        EditorEvent::ShowSaveDialog {
            initial_name: self.autosave.bound().map(|b| b.name.clone()),
        }
    }

    /// Explicit save: update the bound record, or create and bind one.
    pub async fn save(&mut self, name: &str) -> EditorResult<Drawing> {
        self.autosave.save(name, &self.canvas).await
    }

    /// Save into a new record regardless of the binding.
    pub async fn save_as_new(&mut self, name: &str) -> EditorResult<Drawing> {
        self.autosave.save_as_new(name, &self.canvas).await
    }

    /// Check the inactivity timer.
    pub fn poll_autosave(&mut self, now: Instant) -> Option<AutosaveStep> {
        self.autosave.poll(now, &self.canvas)
    }

    /// The user dismissed the first-save name prompt.
    pub fn decline_name(&mut self, now: Instant) {
        self.autosave.decline_name(now);
    }

    /// Apply the result of a save the host ran itself.
    pub fn complete_save(
        &mut self,
        request: &SaveRequest,
        result: StorageResult<Drawing>,
    ) -> EditorResult<Drawing> {
        self.autosave.complete_save(request, result)
    }

    /// Send a request from [`EditorEvent::Navigated`] or [`AutosaveStep::Save`]
    /// and apply the result.
    pub async fn execute(&mut self, request: &SaveRequest) -> EditorResult<Drawing> {
        self.autosave.execute(request).await
    }

    pub async fn open_drawing(&mut self, id: &str, now: Instant) -> EditorResult<EditorEvent> {
        self.request(PendingAction::OpenDrawing(id.to_string()), now)
            .await
    }

    pub async fn new_drawing(&mut self, now: Instant) -> EditorResult<EditorEvent> {
        self.request(PendingAction::NewDrawing, now).await
    }

    /// Run `action` now, or hold it behind the unsaved-changes prompt.
    pub async fn request(
        &mut self,
        action: PendingAction,
        now: Instant,
    ) -> EditorResult<EditorEvent> {
        if self.is_guarded(&action) {
            return Ok(self.hold(action));
        }
        self.perform(action, now).await
    }

    /// Resolve the unsaved-changes prompt. On a failed save the action stays
    /// held so the user can try again or cancel.
    pub async fn resolve_unsaved(
        &mut self,
        choice: UnsavedChoice,
        now: Instant,
    ) -> EditorResult<EditorEvent> {
        let Some(action) = self.pending.take() else {
            return Ok(EditorEvent::None);
        };

        match choice {
            UnsavedChoice::Cancel => {
                log::debug!("Held action {:?} cancelled", action);
                Ok(EditorEvent::None)
            }
            UnsavedChoice::Discard => {
                log::info!("Discarding unsaved changes for {:?}", action);
                self.perform(action, now).await
            }
            UnsavedChoice::Save { name } => match self.autosave.save(&name, &self.canvas).await {
                Ok(_) => self.perform(action, now).await,
                Err(e) => {
                    self.pending = Some(action);
                    Err(e)
                }
            },
        }
    }

    fn is_guarded(&self, action: &PendingAction) -> bool {
        match action {
            PendingAction::OpenDrawing(_) | PendingAction::NewDrawing => {
                self.has_unsaved_changes()
            }
            // A bound drawing is autosaved on navigation instead.
            PendingAction::AddPage => {
                self.autosave.bound().is_none() && self.canvas.has_content()
            }
        }
    }

    fn hold(&mut self, action: PendingAction) -> EditorEvent {
        log::info!("Unsaved changes; holding {:?}", action);
        self.pending = Some(action.clone());
        EditorEvent::ConfirmUnsaved(action)
    }

    async fn perform(&mut self, action: PendingAction, now: Instant) -> EditorResult<EditorEvent> {
        match action {
            PendingAction::OpenDrawing(id) => {
                let (drawing, document) = self.autosave.fetch(&id).await?;
                self.canvas.load_document(document);
                self.autosave.bind(&drawing, self.canvas.revision());
                log::info!("Opened \"{}\" ({})", drawing.name, drawing.id);
                Ok(EditorEvent::Redraw)
            }
            PendingAction::AddPage => Ok(self.navigate(now, |canvas| {
                canvas.add_page();
            })),
            PendingAction::NewDrawing => {
                self.canvas.clear();
                self.autosave.unbind();
                Ok(EditorEvent::Redraw)
            }
        }
    }

    /// Drawings whose name contains `filter`, case-insensitively.
    pub async fn list_drawings(&self, filter: &str) -> EditorResult<Vec<Drawing>> {
        self.autosave.list(filter).await
    }

    /// Delete a drawing. Deleting the open one leaves its content as an
    /// unsaved new drawing.
    pub async fn delete_drawing(&mut self, id: &str) -> EditorResult<()> {
        self.autosave.delete(id).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::document::WhiteboardDocument;
    use crate::elements::{CircleData, ElementShape, RectangleData};
    use crate::error::EditorError;
    use crate::input::Modifiers;
    use crate::storage::{MemoryStore, NewDrawing, SaveTarget, block_on};
    use kurbo::Point;
    use std::time::Duration;

    fn editor() -> Editor<MemoryStore> {
        Editor::new(Arc::new(MemoryStore::new()))
    }

    fn drag(editor: &mut Editor<MemoryStore>, from: Point, to: Point, now: Instant) {
        editor.handle_pointer(PointerEvent::Down { position: from }, now);
        editor.handle_pointer(PointerEvent::Up { position: to }, now);
    }

    fn draw_rect(editor: &mut Editor<MemoryStore>, now: Instant) {
        editor.set_tool(ToolKind::Rectangle, now);
        drag(editor, Point::new(10.0, 10.0), Point::new(60.0, 40.0), now);
    }

    fn ctrl(key: &str) -> KeyEvent {
        KeyEvent::new(
            key,
            Modifiers {
                ctrl: true,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_save_then_autosave_updates_same_record() {
        let mut editor = editor();
        let start = Instant::now();
        draw_rect(&mut editor, start);

        let created = block_on(editor.save("Test")).unwrap();
        let stored = block_on(editor.autosave().store().read(&created.id)).unwrap();
        let doc = WhiteboardDocument::from_json(&stored.data).unwrap();
        assert_eq!(doc, editor.canvas().document());
        assert_eq!(
            doc.pages()[0].elements()[0].shape(),
            &ElementShape::Rectangle(RectangleData::new(10.0, 10.0, 50.0, 30.0))
        );

        let later = start + Duration::from_secs(5);
        editor.set_tool(ToolKind::Circle, later);
        drag(&mut editor, Point::new(100.0, 100.0), Point::new(110.0, 100.0), later);

        let step = editor.poll_autosave(later + Duration::from_secs(120));
        let Some(AutosaveStep::Save(request)) = step else {
            panic!("expected an autosave, got {:?}", step);
        };
        assert_eq!(
            request.target,
            SaveTarget::Update {
                id: created.id.clone()
            }
        );
        block_on(editor.execute(&request)).unwrap();

        let stored = block_on(editor.autosave().store().read(&created.id)).unwrap();
        let doc = WhiteboardDocument::from_json(&stored.data).unwrap();
        let elements = doc.pages()[0].elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(
            elements[1].shape(),
            &ElementShape::Circle(CircleData::new(100.0, 100.0, 10.0))
        );
        assert_eq!(editor.autosave().store().len(), 1);
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn test_idle_unsaved_drawing_prompts_for_name() {
        let mut editor = editor();
        let start = Instant::now();
        draw_rect(&mut editor, start);

        assert_eq!(
            editor.poll_autosave(start + Duration::from_secs(120)),
            Some(AutosaveStep::PromptForName)
        );
        editor.decline_name(start + Duration::from_secs(130));
        assert_eq!(editor.poll_autosave(start + Duration::from_secs(200)), None);
        assert_eq!(
            editor.poll_autosave(start + Duration::from_secs(250)),
            Some(AutosaveStep::PromptForName)
        );
    }

    #[test]
    fn test_unchanged_pointer_moves_do_not_count_as_activity() {
        let mut editor = editor();
        let start = Instant::now();
        editor.handle_pointer(
            PointerEvent::Move {
                position: Point::new(1.0, 1.0),
            },
            start,
        );
        assert!(!editor.autosave().timer().is_armed());
    }

    #[test]
    fn test_open_with_unsaved_changes_waits_for_choice() {
        let mut editor = editor();
        let now = Instant::now();
        let other = block_on(editor.autosave().store().create(NewDrawing {
            name: "Other".to_string(),
            data: WhiteboardDocument::new().to_json().unwrap(),
        }))
        .unwrap();
        draw_rect(&mut editor, now);

        let event = block_on(editor.open_drawing(&other.id, now)).unwrap();
        assert_eq!(
            event,
            EditorEvent::ConfirmUnsaved(PendingAction::OpenDrawing(other.id.clone()))
        );
        assert!(editor.canvas().has_content());

        block_on(editor.resolve_unsaved(UnsavedChoice::Cancel, now)).unwrap();
        assert!(editor.pending().is_none());
        assert!(editor.canvas().has_content());
        assert!(editor.bound().is_none());

        block_on(editor.open_drawing(&other.id, now)).unwrap();
        let event = block_on(editor.resolve_unsaved(UnsavedChoice::Discard, now)).unwrap();
        assert_eq!(event, EditorEvent::Redraw);
        assert!(!editor.canvas().has_content());
        assert_eq!(editor.bound().unwrap().id, other.id);
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn test_save_then_proceed() {
        let mut editor = editor();
        let now = Instant::now();
        draw_rect(&mut editor, now);

        block_on(editor.new_drawing(now)).unwrap();
        assert_eq!(editor.pending(), Some(&PendingAction::NewDrawing));

        let err = block_on(editor.resolve_unsaved(
            UnsavedChoice::Save {
                name: "  ".to_string(),
            },
            now,
        ))
        .unwrap_err();
        assert!(matches!(err, EditorError::Validation(_)));
        assert_eq!(editor.pending(), Some(&PendingAction::NewDrawing));
        assert!(editor.canvas().has_content());

        block_on(editor.resolve_unsaved(
            UnsavedChoice::Save {
                name: "Kept".to_string(),
            },
            now,
        ))
        .unwrap();
        assert!(!editor.canvas().has_content());
        assert!(editor.bound().is_none());

        let saved = block_on(editor.list_drawings("kept")).unwrap();
        assert_eq!(saved.len(), 1);
    }

    #[test]
    fn test_clean_bound_drawing_switches_without_prompt() {
        let mut editor = editor();
        let now = Instant::now();
        draw_rect(&mut editor, now);
        block_on(editor.save("Test")).unwrap();

        let event = block_on(editor.new_drawing(now)).unwrap();
        assert_eq!(event, EditorEvent::Redraw);
        assert_eq!(editor.status(), SaveStatus::UnsavedNew);
        assert!(!editor.canvas().history().can_undo());
    }

    #[test]
    fn test_corrupt_drawing_leaves_document_untouched() {
        let mut editor = editor();
        let now = Instant::now();
        draw_rect(&mut editor, now);
        block_on(editor.save("Mine")).unwrap();
        let before = editor.canvas().document();

        let broken = block_on(editor.autosave().store().create(NewDrawing {
            name: "Broken".to_string(),
            data: r#"{"pages":"nope"}"#.to_string(),
        }))
        .unwrap();

        let err = block_on(editor.open_drawing(&broken.id, now)).unwrap_err();
        assert!(matches!(err, EditorError::Deserialization(_)));
        assert_eq!(editor.canvas().document(), before);
        assert_eq!(editor.bound().unwrap().name, "Mine");
    }

    #[test]
    fn test_opens_legacy_drawing() {
        let mut editor = editor();
        let now = Instant::now();
        let legacy = block_on(editor.autosave().store().create(NewDrawing {
            name: "Old".to_string(),
            data: r##"[{"type":"text","id":"1","data":{"text":"hi","x":1,"y":2},"style":{"color":"#000000","strokeWidth":2}}]"##.to_string(),
        }))
        .unwrap();

        block_on(editor.open_drawing(&legacy.id, now)).unwrap();
        assert_eq!(editor.canvas().pages().len(), 1);
        assert_eq!(editor.canvas().pages().current_elements().len(), 1);
    }

    #[test]
    fn test_add_page_held_for_unsaved_new_drawing() {
        let mut editor = editor();
        let now = Instant::now();
        assert!(matches!(
            editor.add_page(now),
            EditorEvent::Navigated { autosave: None }
        ));

        draw_rect(&mut editor, now);
        assert_eq!(
            editor.add_page(now),
            EditorEvent::ConfirmUnsaved(PendingAction::AddPage)
        );
        assert_eq!(editor.canvas().pages().len(), 2);

        block_on(editor.resolve_unsaved(UnsavedChoice::Discard, now)).unwrap();
        assert_eq!(editor.canvas().pages().len(), 3);
        assert_eq!(editor.canvas().pages().current_index(), 2);
    }

    #[test]
    fn test_held_add_page_rearms_timer() {
        let mut editor = editor();
        let start = Instant::now();
        draw_rect(&mut editor, start);
        editor.add_page(start);

        let later = start + Duration::from_secs(100);
        let event = block_on(editor.resolve_unsaved(UnsavedChoice::Discard, later)).unwrap();
        assert_eq!(event, EditorEvent::Navigated { autosave: None });

        assert_eq!(editor.poll_autosave(start + Duration::from_secs(150)), None);
        assert_eq!(
            editor.poll_autosave(start + Duration::from_secs(221)),
            Some(AutosaveStep::PromptForName)
        );
    }

    #[test]
    fn test_tool_style_and_navigation_rearm_timer() {
        for activity in 0..3 {
            let mut editor = editor();
            let start = Instant::now();
            editor.add_page(start);
            editor.go_to_page(0, start);
            draw_rect(&mut editor, start);

            let later = start + Duration::from_secs(100);
            match activity {
                0 => editor.set_tool(ToolKind::Pen, later),
                1 => editor.set_color("#ff0000", later),
                _ => {
                    editor.go_to_next(later);
                }
            }

            assert_eq!(
                editor.poll_autosave(start + Duration::from_secs(150)),
                None,
                "activity {} did not rearm the timer",
                activity
            );
            assert_eq!(
                editor.poll_autosave(start + Duration::from_secs(221)),
                Some(AutosaveStep::PromptForName)
            );
        }
    }

    #[test]
    fn test_navigation_does_not_wait_for_failed_autosave() {
        let mut editor = editor();
        let now = Instant::now();
        draw_rect(&mut editor, now);
        let created = block_on(editor.save("Test")).unwrap();
        editor.add_page(now);
        if let EditorEvent::Navigated {
            autosave: Some(request),
        } = editor.go_to_page(0, now)
        {
            block_on(editor.execute(&request)).unwrap();
        }
        assert!(!editor.autosave().is_busy());

        block_on(editor.autosave().store().delete(&created.id)).unwrap();
        drag(&mut editor, Point::new(0.0, 0.0), Point::new(5.0, 5.0), now);

        let EditorEvent::Navigated {
            autosave: Some(request),
        } = editor.go_to_next(now)
        else {
            panic!("expected navigation with an autosave");
        };
        assert_eq!(editor.canvas().pages().current_index(), 1);
        assert_eq!(editor.status(), SaveStatus::AutoSaving);

        let result = block_on(editor.execute(&request));
        assert!(matches!(result, Err(EditorError::NotFound(_))));
        assert_eq!(editor.canvas().pages().current_index(), 1);
        assert_eq!(editor.canvas().pages().pages()[0].len(), 2);
        assert_eq!(editor.status(), SaveStatus::Saved);
    }

    #[test]
    fn test_autosave_on_navigation_is_dropped_while_saving() {
        let mut editor = editor();
        let now = Instant::now();
        draw_rect(&mut editor, now);
        block_on(editor.save("Test")).unwrap();
        editor.add_page(now);

        let EditorEvent::Navigated {
            autosave: Some(first),
        } = editor.go_to_previous(now)
        else {
            panic!("expected an autosave");
        };
        assert_eq!(
            editor.go_to_next(now),
            EditorEvent::Navigated { autosave: None }
        );
        block_on(editor.execute(&first)).unwrap();
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let mut editor = editor();
        let now = Instant::now();
        draw_rect(&mut editor, now);
        block_on(editor.save("Named")).unwrap();

        assert_eq!(
            editor.handle_key(&ctrl("s"), now),
            EditorEvent::ShowSaveDialog {
                initial_name: Some("Named".to_string())
            }
        );

        assert!(matches!(
            editor.handle_key(&ctrl("n"), now),
            EditorEvent::Navigated { .. }
        ));
        assert_eq!(editor.canvas().pages().current_index(), 1);

        assert_eq!(
            editor.handle_key(&ctrl("ArrowLeft").in_text_input(), now),
            EditorEvent::None
        );
        assert_eq!(editor.canvas().pages().current_index(), 1);

        assert!(matches!(
            editor.handle_key(&ctrl("ArrowLeft"), now),
            EditorEvent::Navigated { .. }
        ));
        assert_eq!(editor.canvas().pages().current_index(), 0);
        assert_eq!(editor.handle_key(&ctrl("ArrowLeft"), now), EditorEvent::None);

        assert_eq!(editor.handle_key(&ctrl("z"), now), EditorEvent::Redraw);
        assert!(!editor.canvas().has_content());
        assert_eq!(editor.handle_key(&ctrl("y"), now), EditorEvent::Redraw);
        assert!(editor.canvas().has_content());
    }

    #[test]
    fn test_text_tool_round_trip() {
        let mut editor = editor();
        let now = Instant::now();
        editor.set_tool(ToolKind::Text, now);

        let event = editor.handle_pointer(
            PointerEvent::Down {
                position: Point::new(7.0, 8.0),
            },
            now,
        );
        assert_eq!(
            event,
            EditorEvent::RequestText {
                anchor: Point::new(7.0, 8.0)
            }
        );
        assert_eq!(editor.submit_text(Some("label"), now), EditorEvent::Redraw);
        assert!(editor.has_unsaved_changes());
    }

    #[test]
    fn test_config_applied() {
        let config = EditorConfig {
            history_limit: Some(1),
            max_name_len: 4,
            ..EditorConfig::default()
        };
        let mut editor = Editor::with_config(Arc::new(MemoryStore::new()), &config);
        let now = Instant::now();
        draw_rect(&mut editor, now);
        draw_rect(&mut editor, now);

        editor.undo(now).unwrap();
        assert_eq!(editor.undo(now), Err(HistoryError::NothingToUndo));
        assert!(matches!(
            block_on(editor.save("Too long")),
            Err(EditorError::Validation(_))
        ));
    }

    #[test]
    fn test_deleting_open_drawing_keeps_content() {
        let mut editor = editor();
        let now = Instant::now();
        draw_rect(&mut editor, now);
        let created = block_on(editor.save("Test")).unwrap();

        block_on(editor.delete_drawing(&created.id)).unwrap();
        assert!(editor.bound().is_none());
        assert!(editor.canvas().has_content());
        assert!(editor.has_unsaved_changes());
    }
}
